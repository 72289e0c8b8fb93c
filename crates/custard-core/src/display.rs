//! Per-card display fields derived from a [`LocationRecord`].
//!
//! This is the list client's view of a location: which flavor to headline
//! today and tomorrow, a capitalized status label, and whether the brand
//! publishes a flavor calendar worth linking to. It reads the flattened
//! `flavors` list directly.

use serde::Serialize;

use crate::flavors::{DayLabel, LocationRecord, LocationStatus};

const TODAY_FALLBACK: &str = "Check in-store";
const TOMORROW_FALLBACK: &str = "Check website";
const DISTANCE_PLACEHOLDER: &str = "-- mi";

/// Website fragments of brands that publish a multi-day flavor calendar.
const CALENDAR_SITES: [&str; 3] = ["kopps", "murfs", "culvers"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandCard {
    pub id: String,
    pub name: String,
    pub location: String,
    pub address: String,
    pub distance: String,
    pub status_label: String,
    pub hours: String,
    pub todays_flavor: String,
    pub flavor_description: String,
    pub tomorrows_flavor: String,
    pub website: String,
    pub has_calendar: bool,
}

impl StandCard {
    #[must_use]
    pub fn from_record(record: &LocationRecord) -> Self {
        let today = record
            .flavors
            .iter()
            .find(|f| f.day_label == DayLabel::Today)
            .or_else(|| record.flavors.first());
        let tomorrow = record
            .flavors
            .iter()
            .find(|f| f.day_label == DayLabel::Tomorrow);

        let status_label = match record.status {
            LocationStatus::Open => "Open",
            LocationStatus::Closed => "Closed",
            LocationStatus::Unknown => "Unknown",
        };

        let website_lower = record.website.to_lowercase();
        let has_calendar = CALENDAR_SITES
            .iter()
            .any(|site| website_lower.contains(site));

        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            location: record.location.clone(),
            address: record.address.clone(),
            distance: DISTANCE_PLACEHOLDER.to_string(),
            status_label: status_label.to_string(),
            hours: record.hours.clone(),
            todays_flavor: today.map_or_else(|| TODAY_FALLBACK.to_string(), |f| f.name.clone()),
            flavor_description: today.map(|f| f.description.clone()).unwrap_or_default(),
            tomorrows_flavor: tomorrow
                .map_or_else(|| TOMORROW_FALLBACK.to_string(), |f| f.name.clone()),
            website: record.website.clone(),
            has_calendar,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::flavors::FlavorEntry;

    fn entry(name: &str, label: DayLabel) -> FlavorEntry {
        FlavorEntry::new(
            name,
            &format!("{name} description"),
            NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            label,
        )
        .unwrap()
    }

    fn record(website: &str, status: LocationStatus, flavors: Vec<FlavorEntry>) -> LocationRecord {
        LocationRecord {
            id: "stand-1".to_string(),
            name: "Stand".to_string(),
            location: "Milwaukee".to_string(),
            address: "1 Main St".to_string(),
            phone: "414-555-0100".to_string(),
            status,
            hours: "11am - 10pm".to_string(),
            website: website.to_string(),
            flavors,
        }
    }

    #[test]
    fn picks_today_and_tomorrow_by_label() {
        let card = StandCard::from_record(&record(
            "https://kopps.com",
            LocationStatus::Open,
            vec![
                entry("Butter Pecan", DayLabel::Today),
                entry("Mint Chip", DayLabel::Today),
                entry("Turtle", DayLabel::Tomorrow),
            ],
        ));
        assert_eq!(card.todays_flavor, "Butter Pecan");
        assert_eq!(card.flavor_description, "Butter Pecan description");
        assert_eq!(card.tomorrows_flavor, "Turtle");
        assert_eq!(card.status_label, "Open");
        assert!(card.has_calendar);
    }

    #[test]
    fn falls_back_to_first_entry_without_today_label() {
        let card = StandCard::from_record(&record(
            "https://leonsfrozencustardmke.com",
            LocationStatus::Open,
            vec![entry("Vanilla", DayLabel::Always), entry("Chocolate", DayLabel::Always)],
        ));
        assert_eq!(card.todays_flavor, "Vanilla");
        assert_eq!(card.tomorrows_flavor, "Check website");
        assert!(!card.has_calendar);
    }

    #[test]
    fn empty_flavor_list_uses_placeholders() {
        let card = StandCard::from_record(&record(
            "https://gillesfrozencustard.com",
            LocationStatus::Unknown,
            vec![],
        ));
        assert_eq!(card.todays_flavor, "Check in-store");
        assert_eq!(card.flavor_description, "");
        assert_eq!(card.status_label, "Unknown");
        assert_eq!(card.distance, "-- mi");
    }
}
