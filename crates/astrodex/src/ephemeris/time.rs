use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Julian Date of the J2000.0 epoch.
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian Date of the Unix epoch.
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

const DAYS_PER_CENTURY: f64 = 36_525.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstantError {
    #[error("Invalid date '{input}': expected YYYY-MM-DD")]
    InvalidDate { input: String },
    #[error("Invalid time '{input}': expected HH:MM or HH:MM:SS")]
    InvalidTime { input: String },
    #[error("Invalid UTC offset: {hours} hours")]
    InvalidOffset { hours: f64 },
}

/// A calendar instant carrying its local UTC offset.
///
/// The offset is kept so the wall-clock hour stays available for the
/// approximate ascendant fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Instant(DateTime<FixedOffset>);

impl Instant {
    pub fn new(datetime: DateTime<FixedOffset>) -> Self {
        Self(datetime)
    }

    pub fn from_utc(datetime: DateTime<Utc>) -> Self {
        Self(datetime.fixed_offset())
    }

    /// Build an instant from a local wall-clock date and time and the
    /// zone's offset from UTC in hours (e.g. `-8.0` for PST).
    pub fn from_local(
        date: NaiveDate,
        time: NaiveTime,
        utc_offset_hours: f64,
    ) -> Result<Self, InstantError> {
        let invalid = || InstantError::InvalidOffset { hours: utc_offset_hours };
        if !utc_offset_hours.is_finite() {
            return Err(invalid());
        }
        let seconds = (utc_offset_hours * 3600.0).round() as i32;
        let offset = FixedOffset::east_opt(seconds).ok_or_else(invalid)?;
        offset
            .from_local_datetime(&NaiveDateTime::new(date, time))
            .single()
            .map(Self)
            .ok_or_else(invalid)
    }

    /// Parse `YYYY-MM-DD` and `HH:MM[:SS]` wall-clock strings.
    pub fn parse_local(date: &str, time: &str, utc_offset_hours: f64) -> Result<Self, InstantError> {
        let date = date.trim();
        let time = time.trim();
        let parsed_date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
            InstantError::InvalidDate {
                input: date.to_string(),
            }
        })?;
        let parsed_time = NaiveTime::parse_from_str(time, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
            .map_err(|_| InstantError::InvalidTime {
                input: time.to_string(),
            })?;
        Self::from_local(parsed_date, parsed_time, utc_offset_hours)
    }

    pub fn datetime(&self) -> DateTime<FixedOffset> {
        self.0
    }

    pub fn utc(&self) -> DateTime<Utc> {
        self.0.with_timezone(&Utc)
    }

    /// Shift by whole days, keeping the offset.
    pub fn add_days(&self, days: i64) -> Self {
        Self(self.0 + chrono::Duration::days(days))
    }

    /// Julian Date (UT).
    pub fn julian_day(&self) -> f64 {
        let utc = self.utc();
        let seconds = utc.timestamp() as f64 + f64::from(utc.timestamp_subsec_nanos()) * 1e-9;
        seconds / 86_400.0 + UNIX_EPOCH_JD
    }

    /// Julian centuries since J2000.0.
    pub fn centuries_since_j2000(&self) -> f64 {
        (self.julian_day() - J2000_JD) / DAYS_PER_CENTURY
    }

    /// Local wall-clock hour as a fraction, e.g. 23.6 for 23:36.
    pub fn local_hour_of_day(&self) -> f64 {
        f64::from(self.0.hour()) + f64::from(self.0.minute()) / 60.0
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S %:z"))
    }
}

/// Greenwich mean sidereal time in hours `[0, 24)`.
///
/// IAU 1982 polynomial in UT (Meeus, eq. 12.4).
pub fn mean_sidereal_time_hours(jd_ut: f64) -> f64 {
    let d = jd_ut - J2000_JD;
    let t = d / DAYS_PER_CENTURY;
    let degrees = 280.460_618_37 + 360.985_647_366_29 * d + 0.000_387_933 * t * t
        - t * t * t / 38_710_000.0;
    degrees.rem_euclid(360.0) / 15.0
}
