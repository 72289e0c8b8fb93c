//! Command handlers for `scrape` and `sources`.

use std::sync::Arc;

use chrono::NaiveDate;
use custard_core::{AggregateResponse, AppConfig, FixedClock, StandCard};
use custard_scraper::Aggregator;

/// Run one aggregation cycle and print it.
pub(crate) async fn run_scrape(
    config: &AppConfig,
    json: bool,
    date: Option<NaiveDate>,
) -> anyhow::Result<()> {
    let mut aggregator = Aggregator::from_config(config);
    if let Some(date) = date {
        tracing::info!(%date, "overriding today");
        aggregator = aggregator.with_clock(Arc::new(FixedClock::at_local_noon(date, config.timezone)));
    }

    let response = aggregator.run().await;
    tracing::info!(total_locations = response.total_locations, "scrape complete");

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("{}", render_cards(&response));
    }
    Ok(())
}

/// Print each configured source and the page it reads.
pub(crate) fn run_sources(config: &AppConfig) {
    let aggregator = Aggregator::from_config(config);
    for source in aggregator.sources() {
        println!("{:<8} {}", source.name(), source.url().unwrap_or("(static menu)"));
    }
}

/// Plain-text stand cards, one block per location.
pub(crate) fn render_cards(response: &AggregateResponse) -> String {
    let mut blocks = vec![format!(
        "{} locations, updated {}",
        response.total_locations, response.last_updated
    )];

    for record in &response.all_locations {
        let card = StandCard::from_record(record);
        let mut lines = vec![
            format!("{} - {} [{}]", card.name, card.location, card.status_label),
            format!("  {} | {}", card.address, card.hours),
            format!("  Today:    {}", card.todays_flavor),
        ];
        if !card.flavor_description.is_empty() {
            lines.push(format!("            {}", card.flavor_description));
        }
        lines.push(format!("  Tomorrow: {}", card.tomorrows_flavor));
        if card.has_calendar {
            lines.push(format!("  Calendar: {}", card.website));
        }
        blocks.push(lines.join("\n"));
    }

    blocks.join("\n\n")
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono_tz::America::Chicago;
    use custard_core::{DayLabel, FlavorEntry, LocationRecord, LocationStatus};

    use super::*;

    fn record(id: &str, website: &str, flavors: Vec<FlavorEntry>) -> LocationRecord {
        LocationRecord {
            id: id.to_string(),
            name: "Kopp's Frozen Custard".to_string(),
            location: "Greenfield".to_string(),
            address: "7631 W Layton Ave, Greenfield, WI".to_string(),
            phone: "414-282-4312".to_string(),
            status: LocationStatus::Open,
            hours: "10:30am - 10:30pm".to_string(),
            website: website.to_string(),
            flavors,
        }
    }

    #[test]
    fn render_cards_shows_today_tomorrow_and_calendar_link() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let flavors = vec![
            FlavorEntry::new("Butter Pecan", "Roasted pecans.", date, DayLabel::Today).unwrap(),
            FlavorEntry::new("Mint Chip", "", date, DayLabel::Tomorrow).unwrap(),
        ];
        let now = chrono::Utc.with_ymd_and_hms(2026, 1, 5, 18, 0, 0).unwrap();
        let response = AggregateResponse::build(
            vec![record("kopps-greenfield", "https://kopps.com", flavors)],
            now,
            Chicago,
        );

        let text = render_cards(&response);
        assert!(text.starts_with("1 locations, updated 1/5/2026, 12:00:00 PM"));
        assert!(text.contains("Kopp's Frozen Custard - Greenfield [Open]"));
        assert!(text.contains("Today:    Butter Pecan"));
        assert!(text.contains("Roasted pecans."));
        assert!(text.contains("Tomorrow: Mint Chip"));
        assert!(text.contains("Calendar: https://kopps.com"));
    }

    #[test]
    fn render_cards_uses_placeholders_for_empty_listing() {
        let now = chrono::Utc.with_ymd_and_hms(2026, 1, 5, 18, 0, 0).unwrap();
        let response = AggregateResponse::build(
            vec![record("stand-1", "https://stand.example.com", vec![])],
            now,
            Chicago,
        );

        let text = render_cards(&response);
        assert!(text.contains("Today:    Check in-store"));
        assert!(text.contains("Tomorrow: Check website"));
        assert!(!text.contains("Calendar:"));
    }
}
