//! Builds [`LocationRecord`]s from a brand's static storefront metadata.
//!
//! Pages that publish one brand-wide calendar are broadcast to every known
//! storefront via [`broadcast_flavors`], independent of how the calendar was
//! scraped.

use custard_core::{FlavorEntry, LocationRecord, LocationStatus};

/// Brand-level metadata shared by all of a retailer's storefronts.
#[derive(Debug, Clone, Copy)]
pub struct Brand {
    pub name: &'static str,
    pub website: &'static str,
}

/// One physical storefront of a [`Brand`].
#[derive(Debug, Clone, Copy)]
pub struct Storefront {
    /// Globally unique slug, e.g. `kopps-greenfield`.
    pub id: &'static str,
    pub location: &'static str,
    pub address: &'static str,
    pub phone: &'static str,
}

#[must_use]
pub fn storefront_record(
    brand: &Brand,
    storefront: &Storefront,
    status: LocationStatus,
    hours: &str,
    flavors: Vec<FlavorEntry>,
) -> LocationRecord {
    LocationRecord {
        id: storefront.id.to_string(),
        name: brand.name.to_string(),
        location: storefront.location.to_string(),
        address: storefront.address.to_string(),
        phone: storefront.phone.to_string(),
        status,
        hours: hours.to_string(),
        website: brand.website.to_string(),
        flavors,
    }
}

/// Emits one record per storefront, each carrying the same flavor list.
#[must_use]
pub fn broadcast_flavors(
    brand: &Brand,
    storefronts: &[Storefront],
    status: LocationStatus,
    hours: &str,
    flavors: &[FlavorEntry],
) -> Vec<LocationRecord> {
    storefronts
        .iter()
        .map(|storefront| storefront_record(brand, storefront, status, hours, flavors.to_vec()))
        .collect()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
