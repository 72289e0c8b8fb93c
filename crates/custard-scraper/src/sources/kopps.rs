//! Kopp's Frozen Custard: a brand-wide flavor calendar.
//!
//! The flavor preview page is a run of `h2` date headings ("Today's Flavors",
//! "Tomorrow – Tuesday 1/6", "Wednesday 1/7", ...), each followed by `h3`
//! flavor names with a `p` description underneath. One calendar covers all
//! three stores.

use std::sync::LazyLock;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Weekday};
use custard_core::{Clock, DayLabel, FlavorEntry, LocationRecord, LocationStatus};
use regex::Regex;
use scraper::{ElementRef, Html};

use crate::error::ScraperError;
use crate::fetch::{fetch_html, FetchSettings};
use crate::html::{element_text, has_tag, tag_sections};
use crate::normalize::{broadcast_flavors, Brand, Storefront};

use super::FlavorSource;

const SOURCE: &str = "kopps";
const HOURS: &str = "10:30am - 10:30pm";

/// A month/day heading more than this many days in the past is read as
/// next year's date (late-December pages already list early January).
const YEAR_ROLLOVER_DAYS: i64 = 180;

const BRAND: Brand = Brand {
    name: "Kopp's Frozen Custard",
    website: "https://kopps.com",
};

const STOREFRONTS: [Storefront; 3] = [
    Storefront {
        id: "kopps-greenfield",
        location: "Greenfield",
        address: "7631 W Layton Ave, Greenfield, WI",
        phone: "414-282-4312",
    },
    Storefront {
        id: "kopps-brookfield",
        location: "Brookfield",
        address: "18880 W Bluemound Rd, Brookfield, WI",
        phone: "262-789-9490",
    },
    Storefront {
        id: "kopps-glendale",
        location: "Glendale",
        address: "5373 N Port Washington Rd, Glendale, WI",
        phone: "414-961-3288",
    },
];

static WEEKDAY_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(mon(?:day)?|tue(?:s(?:day)?)?|wed(?:nesday)?|thu(?:r(?:s(?:day)?)?)?|fri(?:day)?|sat(?:urday)?|sun(?:day)?)\.?,?\s+(\d{1,2})/(\d{1,2})\b",
    )
    .expect("valid regex")
});

pub struct KoppsSource {
    url: String,
    settings: FetchSettings,
}

impl KoppsSource {
    #[must_use]
    pub fn new(url: impl Into<String>, settings: FetchSettings) -> Self {
        Self {
            url: url.into(),
            settings,
        }
    }
}

#[async_trait]
impl FlavorSource for KoppsSource {
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
        let html = match fetch_html(&self.url, &self.settings).await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!(source = SOURCE, url = %self.url, error = %e, "flavor calendar fetch failed");
                return Ok(vec![]);
            }
        };

        let Some(flavors) = parse_flavor_calendar(&html, clock) else {
            tracing::warn!(source = SOURCE, url = %self.url, "no dated headings found on flavor calendar");
            return Ok(vec![]);
        };

        tracing::info!(
            source = SOURCE,
            count = flavors.len(),
            "parsed flavor calendar"
        );
        Ok(broadcast_flavors(
            &BRAND,
            &STOREFRONTS,
            LocationStatus::Open,
            HOURS,
            &flavors,
        ))
    }
}

/// Flattens the calendar into entries in section order, then page order.
///
/// Returns `None` when no heading could be classified as a date.
pub(crate) fn parse_flavor_calendar(html: &str, clock: &dyn Clock) -> Option<Vec<FlavorEntry>> {
    let document = Html::parse_document(html);
    let mut dated_sections = 0usize;
    let mut flavors = Vec::new();

    for section in tag_sections(&document, "h2") {
        let heading = element_text(&section.heading);
        let Some((date, day_label)) = classify_heading(&heading, clock) else {
            tracing::debug!(source = SOURCE, heading, "skipping undated heading");
            continue;
        };
        dated_sections += 1;
        flavors.extend(section_entries(&section.body, date, day_label));
    }

    (dated_sections > 0).then_some(flavors)
}

/// Each `h3` in a section is a flavor; a `p` directly after it describes it.
fn section_entries(body: &[ElementRef<'_>], date: NaiveDate, day_label: DayLabel) -> Vec<FlavorEntry> {
    body.iter()
        .enumerate()
        .filter(|(_, el)| has_tag(el, "h3"))
        .filter_map(|(idx, el)| {
            let description = body
                .get(idx + 1)
                .filter(|next| has_tag(next, "p"))
                .map(element_text)
                .unwrap_or_default();
            FlavorEntry::new(&element_text(el), &description, date, day_label)
        })
        .collect()
}

/// Maps a date heading to its calendar date and label.
///
/// "today" and "tomorrow" markers win over any explicit month/day in the
/// same heading.
pub(crate) fn classify_heading(text: &str, clock: &dyn Clock) -> Option<(NaiveDate, DayLabel)> {
    let lower = text.to_lowercase();
    if lower.contains("today") {
        return Some((clock.today(), DayLabel::Today));
    }
    if lower.contains("tomorrow") {
        return Some((clock.tomorrow(), DayLabel::Tomorrow));
    }

    let caps = WEEKDAY_DATE_RE.captures(text)?;
    let weekday = parse_weekday(caps.get(1)?.as_str())?;
    let month = caps.get(2)?.as_str().parse::<u32>().ok()?;
    let day = caps.get(3)?.as_str().parse::<u32>().ok()?;
    let date = resolve_month_day(month, day, clock.today())?;
    Some((date, DayLabel::Weekday(weekday)))
}

fn parse_weekday(word: &str) -> Option<Weekday> {
    word.get(..3)?.parse::<Weekday>().ok()
}

/// Combines month/day with the current year; invalid dates yield `None`.
fn resolve_month_day(month: u32, day: u32, today: NaiveDate) -> Option<NaiveDate> {
    let date = NaiveDate::from_ymd_opt(today.year(), month, day)?;
    if (today - date).num_days() > YEAR_ROLLOVER_DAYS {
        return NaiveDate::from_ymd_opt(today.year() + 1, month, day);
    }
    Some(date)
}
