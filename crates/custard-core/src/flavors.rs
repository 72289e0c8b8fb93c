//! Normalized flavor-of-the-day schema shared by every source adapter, the
//! aggregator, and the HTTP API.
//!
//! Field names serialize in camelCase because the list client reads the JSON
//! as-is (`dayLabel`, `totalLocations`, `allLocations`, ...).

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc, Weekday};
use chrono_tz::Tz;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Description used when a source lists a flavor without one.
pub const NO_DESCRIPTION: &str = "No description available";

/// Which calendar day (or non-date state) a [`FlavorEntry`] belongs to.
///
/// Serialized as a lowercase token: `today`, `tomorrow`, a weekday name such
/// as `wednesday`, `always`, `closed`, or `unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum DayLabel {
    Today,
    Tomorrow,
    Weekday(Weekday),
    Always,
    Closed,
    /// Accepted on the wire for clients that send it; no source emits it.
    Unknown,
}

impl DayLabel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DayLabel::Today => "today",
            DayLabel::Tomorrow => "tomorrow",
            DayLabel::Weekday(day) => weekday_token(day),
            DayLabel::Always => "always",
            DayLabel::Closed => "closed",
            DayLabel::Unknown => "unknown",
        }
    }
}

fn weekday_token(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

impl std::fmt::Display for DayLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DayLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "today" => Ok(DayLabel::Today),
            "tomorrow" => Ok(DayLabel::Tomorrow),
            "always" => Ok(DayLabel::Always),
            "closed" => Ok(DayLabel::Closed),
            "unknown" => Ok(DayLabel::Unknown),
            other => other
                .parse::<Weekday>()
                .map(DayLabel::Weekday)
                .map_err(|_| format!("unrecognized day label \"{other}\"")),
        }
    }
}

impl From<DayLabel> for String {
    fn from(label: DayLabel) -> Self {
        label.as_str().to_string()
    }
}

impl TryFrom<String> for DayLabel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One flavor offered on one day at one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlavorEntry {
    pub name: String,
    pub description: String,
    /// Serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub day_label: DayLabel,
}

impl FlavorEntry {
    /// Builds an entry, substituting [`NO_DESCRIPTION`] for a blank description.
    ///
    /// Returns `None` when `name` is blank after trimming.
    #[must_use]
    pub fn new(name: &str, description: &str, date: NaiveDate, day_label: DayLabel) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let description = description.trim();
        Some(Self {
            name: name.to_string(),
            description: if description.is_empty() {
                NO_DESCRIPTION.to_string()
            } else {
                description.to_string()
            },
            date,
            day_label,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationStatus {
    Open,
    Closed,
    Unknown,
}

impl std::fmt::Display for LocationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationStatus::Open => write!(f, "open"),
            LocationStatus::Closed => write!(f, "closed"),
            LocationStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// One physical retail location and its flavor listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecord {
    /// Stable slug, unique across the whole response (e.g. `kopps-greenfield`).
    pub id: String,
    /// Brand name, shared by sibling locations.
    pub name: String,
    /// Neighborhood or city label.
    pub location: String,
    pub address: String,
    pub phone: String,
    pub status: LocationStatus,
    pub hours: String,
    pub website: String,
    /// Source-page order.
    pub flavors: Vec<FlavorEntry>,
}

/// Locations grouped under their brand name, in first-seen order.
///
/// Serializes as a JSON object whose keys keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrandGroups(Vec<(String, Vec<LocationRecord>)>);

impl BrandGroups {
    #[must_use]
    pub fn from_records(records: &[LocationRecord]) -> Self {
        let mut groups: Vec<(String, Vec<LocationRecord>)> = Vec::new();
        for record in records {
            match groups.iter_mut().find(|(name, _)| *name == record.name) {
                Some((_, members)) => members.push(record.clone()),
                None => groups.push((record.name.clone(), vec![record.clone()])),
            }
        }
        Self(groups)
    }

    #[must_use]
    pub fn get(&self, brand: &str) -> Option<&[LocationRecord]> {
        self.0
            .iter()
            .find(|(name, _)| name == brand)
            .map(|(_, members)| members.as_slice())
    }

    pub fn brands(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for BrandGroups {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, members) in &self.0 {
            map.serialize_entry(name, members)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
}

/// The document served by `GET /api/flavors`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResponse {
    #[serde(serialize_with = "serialize_millis")]
    pub timestamp: DateTime<Utc>,
    /// en-US wall-clock string in the retail time zone, e.g. `10/19/2026, 3:04:05 PM`.
    pub last_updated: String,
    pub total_locations: usize,
    pub locations: BrandGroups,
    pub all_locations: Vec<LocationRecord>,
    pub status: ResponseStatus,
}

impl AggregateResponse {
    /// Shapes the flattened adapter output into the wire document.
    ///
    /// `all_locations` keeps adapter-call order; `locations` groups the same
    /// records by brand.
    #[must_use]
    pub fn build(all_locations: Vec<LocationRecord>, now: DateTime<Utc>, timezone: Tz) -> Self {
        let locations = BrandGroups::from_records(&all_locations);
        Self {
            timestamp: now,
            last_updated: format_last_updated(now, timezone),
            total_locations: all_locations.len(),
            locations,
            all_locations,
            status: ResponseStatus::Success,
        }
    }
}

/// Formats an instant the way `toLocaleString("en-US")` does.
#[must_use]
pub fn format_last_updated(now: DateTime<Utc>, timezone: Tz) -> String {
    now.with_timezone(&timezone)
        .format("%-m/%-d/%Y, %-I:%M:%S %p")
        .to_string()
}

fn serialize_millis<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
}
