//! Injected source of "now" for everything that stamps dates.
//!
//! Adapters label entries `today`/`tomorrow` and the static source re-stamps
//! its menu on every call, so all of them read the date through a [`Clock`]
//! rather than calling `Utc::now()` directly.

use chrono::{DateTime, Days, NaiveDate, Utc};
use chrono_tz::Tz;

pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Time zone the retail calendar is published in.
    fn timezone(&self) -> Tz;

    /// The current calendar date in [`Clock::timezone`].
    fn today(&self) -> NaiveDate {
        self.now().with_timezone(&self.timezone()).date_naive()
    }

    /// The calendar date after [`Clock::today`].
    fn tomorrow(&self) -> NaiveDate {
        let today = self.today();
        today.checked_add_days(Days::new(1)).unwrap_or(today)
    }
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    timezone: Tz,
}

impl SystemClock {
    #[must_use]
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn timezone(&self) -> Tz {
        self.timezone
    }
}

/// A clock frozen at one instant. Used by tests and by the CLI's `--date`
/// override.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
    timezone: Tz,
}

impl FixedClock {
    #[must_use]
    pub fn new(now: DateTime<Utc>, timezone: Tz) -> Self {
        Self { now, timezone }
    }

    /// A clock pinned to local noon on `date` in `timezone`.
    ///
    /// Noon keeps the date stable regardless of the zone's UTC offset.
    #[must_use]
    pub fn at_local_noon(date: NaiveDate, timezone: Tz) -> Self {
        use chrono::TimeZone;

        let noon = date.and_hms_opt(12, 0, 0).unwrap_or_default();
        let now = timezone
            .from_local_datetime(&noon)
            .earliest()
            .map_or_else(|| noon.and_utc(), |local| local.with_timezone(&Utc));
        Self { now, timezone }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn timezone(&self) -> Tz {
        self.timezone
    }
}
