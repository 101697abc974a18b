use crate::utils::config::ConfigError;
use chrono::{DateTime, Datelike, Days, Duration, Local, NaiveDateTime, TimeZone, Timelike, Utc, Weekday};
use chrono_tz::Tz;

const GAP_STEP_MINUTES: i64 = 15;
/// One day of 15-minute steps covers every real-world transition.
const GAP_SEARCH_STEPS: i64 = 96;

/// The timezone commit timestamps are bucketed in.
#[derive(Clone, Copy, Debug)]
pub enum ReportTimezone {
    /// Whatever the host system is configured with.
    Local,
    Named(Tz),
}

impl ReportTimezone {
    pub fn parse(name: &str) -> Result<Self, ConfigError> {
        name.trim()
            .parse::<Tz>()
            .map(ReportTimezone::Named)
            .map_err(|e| ConfigError::InvalidTimezone {
                name: name.to_string(),
                reason: e.to_string(),
            })
    }

    pub fn name(&self) -> String {
        match self {
            ReportTimezone::Local => "Local".to_string(),
            ReportTimezone::Named(tz) => tz.name().to_string(),
        }
    }

    pub fn hour_and_weekday(&self, instant: DateTime<Utc>) -> (u32, Weekday) {
        match self {
            ReportTimezone::Local => {
                let local = instant.with_timezone(&Local);
                (local.hour(), local.weekday())
            }
            ReportTimezone::Named(tz) => {
                let local = instant.with_timezone(tz);
                (local.hour(), local.weekday())
            }
        }
    }

    /// Most recent Monday 00:00 in this timezone, as an instant.
    pub fn start_of_week(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            ReportTimezone::Local => monday_midnight(&Local, now),
            ReportTimezone::Named(tz) => monday_midnight(tz, now),
        }
    }
}

fn monday_midnight<Z: TimeZone>(zone: &Z, now: DateTime<Utc>) -> DateTime<Utc> {
    let today = now.with_timezone(zone).date_naive();
    let monday = today
        .checked_sub_days(Days::new(u64::from(today.weekday().num_days_from_monday())))
        .unwrap_or(today);
    let midnight: NaiveDateTime = monday.and_time(chrono::NaiveTime::MIN);

    first_valid_instant(zone, midnight)
}

/// `local` as an instant, or the first instant after it when a DST gap
/// swallows it. Ambiguous times resolve to the earlier instant.
fn first_valid_instant<Z: TimeZone>(zone: &Z, local: NaiveDateTime) -> DateTime<Utc> {
    (0..=GAP_SEARCH_STEPS)
        .map(|step| local + Duration::minutes(GAP_STEP_MINUTES * step))
        .find_map(|candidate| zone.from_local_datetime(&candidate).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&local))
}
