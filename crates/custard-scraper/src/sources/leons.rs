use async_trait::async_trait;
use custard_core::{Clock, DayLabel, FlavorEntry, LocationRecord, LocationStatus};

use crate::error::ScraperError;
use crate::normalize::{storefront_record, Brand, Storefront};

use super::FlavorSource;

const BRAND: Brand = Brand {
    name: "Leon's Frozen Custard",
    website: "https://leonsfrozencustardmke.com",
};

const STOREFRONT: Storefront = Storefront {
    id: "leons-milwaukee",
    location: "Milwaukee",
    address: "3131 S 27th St, Milwaukee, WI",
    phone: "414-383-1784",
};

const HOURS: &str = "11:00am - 11:00pm";

/// Leon's serves a fixed menu, so the flavors are constants.
const MENU: [(&str, &str); 3] = [
    ("Vanilla", "Classic vanilla custard (always available)"),
    ("Chocolate", "Rich chocolate custard (always available)"),
    ("Butter Pecan", "Butter pecan custard (always available)"),
];

/// Constant menu; performs no network I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeonsSource;

#[async_trait]
impl FlavorSource for LeonsSource {
    fn name(&self) -> &'static str {
        "leons"
    }

    async fn fetch_locations(
        &self,
        clock: &dyn Clock,
    ) -> Result<Vec<LocationRecord>, ScraperError> {
        let today = clock.today();
        let flavors = MENU
            .iter()
            .filter_map(|(name, description)| {
                FlavorEntry::new(name, description, today, DayLabel::Always)
            })
            .collect();

        Ok(vec![storefront_record(
            &BRAND,
            &STOREFRONT,
            LocationStatus::Open,
            HOURS,
            flavors,
        )])
    }
}
