//! Gilles Frozen Custard: one store, one featured flavor, seasonal closure.

use std::sync::LazyLock;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use custard_core::{Clock, DayLabel, FlavorEntry, LocationRecord, LocationStatus};
use scraper::{Html, Selector};

use crate::error::ScraperError;
use crate::fetch::{fetch_html, FetchSettings};
use crate::html::element_text;
use crate::normalize::{storefront_record, Brand, Storefront};

use super::FlavorSource;

const SOURCE: &str = "gilles";

const BRAND: Brand = Brand {
    name: "Gilles Frozen Custard",
    website: "https://gillesfrozencustard.com",
};

const STOREFRONT: Storefront = Storefront {
    id: "gilles-milwaukee",
    location: "Milwaukee",
    address: "7515 W Bluemound Rd, Milwaukee, WI",
    phone: "414-453-4875",
};

const OPEN_HOURS: &str = "11:00am - 9:00pm";
const CLOSED_HOURS: &str = "Reopens in spring";
const UNKNOWN_HOURS: &str = "Check website";

const NAME_FALLBACK: &str = "Check in-store";
const DESCRIPTION_FALLBACK: &str = "Visit Gilles for today's special flavor";

/// Last month (inclusive) in which "spring" still means this year's spring.
const LAST_PRE_SPRING_MONTH: u32 = 5;

static HEADING_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1, h2, h3").expect("valid selector"));
static PARAGRAPH_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("valid selector"));
static BODY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("valid selector"));

/// What the front page says about the store right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PageState {
    ClosedForWinter,
    Featured {
        name: Option<String>,
        description: Option<String>,
    },
}

pub struct GillesSource {
    url: String,
    settings: FetchSettings,
}

impl GillesSource {
    #[must_use]
    pub fn new(url: impl Into<String>, settings: FetchSettings) -> Self {
        Self {
            url: url.into(),
            settings,
        }
    }
}

#[async_trait]
impl FlavorSource for GillesSource {
    fn name(&self) -> &'static str {
        SOURCE
    }

    fn url(&self) -> Option<&str> {
        Some(&self.url)
    }

    async fn fetch_locations(
        &self,
        clock: &dyn Clock,
    ) -> Result<Vec<LocationRecord>, ScraperError> {
        let record = match fetch_html(&self.url, &self.settings).await {
            Ok(html) => {
                let state = read_page(&html);
                tracing::info!(source = SOURCE, ?state, "read front page");
                state_record(state, clock.today())
            }
            Err(e) => {
                tracing::warn!(source = SOURCE, url = %self.url, error = %e, "front page fetch failed");
                unknown_record(clock.today())
            }
        };
        Ok(vec![record])
    }
}

pub(crate) fn read_page(html: &str) -> PageState {
    let document = Html::parse_document(html);

    // Only visible body text counts; `<head>` styles and scripts may mention winter.
    let body = document
        .select(&BODY_SELECTOR)
        .next()
        .unwrap_or_else(|| document.root_element());
    let body_text = body.text().collect::<String>().to_lowercase();
    if body_text.contains("closed") && body_text.contains("winter") {
        return PageState::ClosedForWinter;
    }

    // The first match wins even when empty; an empty one falls back to a placeholder.
    let first_text = |selector: &Selector| {
        document
            .select(selector)
            .next()
            .map(|el| element_text(&el))
            .filter(|text| !text.is_empty())
    };

    PageState::Featured {
        name: first_text(&HEADING_SELECTOR),
        description: first_text(&PARAGRAPH_SELECTOR),
    }
}

fn state_record(state: PageState, today: NaiveDate) -> LocationRecord {
    match state {
        PageState::ClosedForWinter => {
            let notice = format!("Returning in spring {}", reopening_year(today));
            single_entry_record(
                LocationStatus::Closed,
                CLOSED_HOURS,
                "Closed for Winter",
                &notice,
                today,
                DayLabel::Closed,
            )
        }
        PageState::Featured { name, description } => single_entry_record(
            LocationStatus::Open,
            OPEN_HOURS,
            name.as_deref().unwrap_or(NAME_FALLBACK),
            description.as_deref().unwrap_or(DESCRIPTION_FALLBACK),
            today,
            DayLabel::Today,
        ),
    }
}

fn unknown_record(today: NaiveDate) -> LocationRecord {
    single_entry_record(
        LocationStatus::Unknown,
        UNKNOWN_HOURS,
        "Check website",
        "Visit website for current status",
        today,
        DayLabel::Today,
    )
}

fn single_entry_record(
    status: LocationStatus,
    hours: &str,
    name: &str,
    description: &str,
    date: NaiveDate,
    day_label: DayLabel,
) -> LocationRecord {
    let flavors = FlavorEntry::new(name, description, date, day_label)
        .into_iter()
        .collect();
    storefront_record(&BRAND, &STOREFRONT, status, hours, flavors)
}

/// The spring the store reopens in: this year through May, next year after.
fn reopening_year(today: NaiveDate) -> i32 {
    if today.month() <= LAST_PRE_SPRING_MONTH {
        today.year()
    } else {
        today.year() + 1
    }
}
