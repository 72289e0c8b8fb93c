//! Single-attempt HTML fetch used by the scraping sources.

use std::time::Duration;

use crate::error::ScraperError;

/// Per-request settings shared by every scraping source.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl FetchSettings {
    #[must_use]
    pub fn new(timeout_secs: u64, user_agent: impl Into<String>) -> Self {
        Self {
            timeout_secs,
            user_agent: user_agent.into(),
        }
    }
}

/// Fetch the HTML body of `url` with one attempt and no retries.
///
/// Each call builds its own `reqwest::Client`, so connections are scoped to
/// the call and released on every return path.
///
/// # Errors
///
/// - [`ScraperError::Timeout`] when the request exceeds `settings.timeout_secs`.
/// - [`ScraperError::UnexpectedStatus`] for any non-2xx response.
/// - [`ScraperError::EmptyDocument`] when the body is blank.
/// - [`ScraperError::Http`] for DNS, TLS, or connection failures.
pub(crate) async fn fetch_html(url: &str, settings: &FetchSettings) -> Result<String, ScraperError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.timeout_secs))
        .connect_timeout(Duration::from_secs(settings.timeout_secs.min(10)))
        .user_agent(settings.user_agent.as_str())
        .build()?;

    let response = client
        .get(url)
        .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
        .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
        .send()
        .await
        .map_err(|e| classify_error(e, url, settings.timeout_secs))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScraperError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_owned(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| classify_error(e, url, settings.timeout_secs))?;

    if body.trim().is_empty() {
        return Err(ScraperError::EmptyDocument {
            url: url.to_owned(),
        });
    }

    Ok(body)
}

fn classify_error(err: reqwest::Error, url: &str, timeout_secs: u64) -> ScraperError {
    if err.is_timeout() {
        ScraperError::Timeout {
            url: url.to_owned(),
            timeout_secs,
        }
    } else {
        ScraperError::Http(err)
    }
}
