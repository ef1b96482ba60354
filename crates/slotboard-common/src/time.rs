//! Timestamp, offset and zone parsing shared by the model and the config layer.

use std::fmt;
use std::str::FromStr;

use chrono::{
    DateTime, Duration, FixedOffset, Local, MappedLocalTime, NaiveDate, NaiveDateTime, NaiveTime,
    Offset, TimeZone,
};
use chrono_tz::Tz;

use crate::error::ModelError;

const HOURS_PER_DAY: i64 = 24;

/// Naive layouts accepted when a timestamp has no zone designator.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Step used to walk out of a daylight-saving gap.
const GAP_STEP_MINUTES: i64 = 15;
const MAX_GAP_STEPS: i64 = 16;

/// Fold any integer hour offset into `0..24`.
pub fn normalize_hour(value: i64) -> u8 {
    // rem_euclid keeps the result in 0..24 for negative input
    value.rem_euclid(HOURS_PER_DAY) as u8
}

/// Time zone used to read timestamps and lay out slot times.
///
/// `Local` and `Named` follow daylight-saving rules, so two days of the same
/// report can sit at different UTC offsets. `Fixed` never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Zone {
    /// The machine's zone.
    #[default]
    Local,
    Fixed(FixedOffset),
    /// An IANA zone such as `Europe/Lisbon`.
    Named(Tz),
}

/// Offset of a [`Zone`] at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneOffset {
    zone: Zone,
    fixed: FixedOffset,
}

impl Offset for ZoneOffset {
    fn fix(&self) -> FixedOffset {
        self.fixed
    }
}

impl fmt::Display for ZoneOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.fixed, f)
    }
}

impl Zone {
    fn tagged(&self, fixed: FixedOffset) -> ZoneOffset {
        ZoneOffset { zone: *self, fixed }
    }
}

impl TimeZone for Zone {
    type Offset = ZoneOffset;

    fn from_offset(offset: &ZoneOffset) -> Self {
        offset.zone
    }

    fn offset_from_local_date(&self, local: &NaiveDate) -> MappedLocalTime<ZoneOffset> {
        self.offset_from_local_datetime(&local.and_time(NaiveTime::MIN))
    }

    fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> MappedLocalTime<ZoneOffset> {
        let fixed = match self {
            Zone::Local => Local.offset_from_local_datetime(local),
            Zone::Fixed(offset) => offset.offset_from_local_datetime(local),
            Zone::Named(tz) => tz.offset_from_local_datetime(local).map(|o| o.fix()),
        };
        fixed.map(|o| self.tagged(o))
    }

    fn offset_from_utc_date(&self, utc: &NaiveDate) -> ZoneOffset {
        self.offset_from_utc_datetime(&utc.and_time(NaiveTime::MIN))
    }

    fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> ZoneOffset {
        let fixed = match self {
            Zone::Local => Local.offset_from_utc_datetime(utc),
            Zone::Fixed(offset) => offset.offset_from_utc_datetime(utc),
            Zone::Named(tz) => tz.offset_from_utc_datetime(utc).fix(),
        };
        self.tagged(fixed)
    }
}

impl From<FixedOffset> for Zone {
    fn from(offset: FixedOffset) -> Self {
        Zone::Fixed(offset)
    }
}

impl From<Tz> for Zone {
    fn from(tz: Tz) -> Self {
        Zone::Named(tz)
    }
}

/// Accepts `local`, anything [`parse_utc_offset`] takes, or an IANA name.
impl FromStr for Zone {
    type Err = ModelError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("local") {
            return Ok(Zone::Local);
        }
        if let Ok(offset) = parse_utc_offset(trimmed) {
            return Ok(Zone::Fixed(offset));
        }
        trimmed
            .parse::<Tz>()
            .map(Zone::Named)
            .map_err(|_| ModelError::InvalidTimeZone(raw.to_string()))
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Local => f.write_str("local"),
            Zone::Fixed(offset) => write!(f, "{}", offset),
            Zone::Named(tz) => f.write_str(tz.name()),
        }
    }
}

/// Place a wall-clock time in `tz`.
///
/// Ambiguous times (clocks turned back) take the earlier instant. Times that
/// fall in a gap (clocks turned forward) move to the first valid quarter hour
/// after it.
pub fn resolve_local<Z: TimeZone>(tz: &Z, naive: NaiveDateTime) -> DateTime<Z> {
    if let Some(dt) = tz.from_local_datetime(&naive).earliest() {
        return dt;
    }
    (1..=MAX_GAP_STEPS)
        .find_map(|step| {
            let shifted = naive + Duration::minutes(step * GAP_STEP_MINUTES);
            tz.from_local_datetime(&shifted).earliest()
        })
        .unwrap_or_else(|| tz.from_utc_datetime(&naive))
}

/// Parse a backend timestamp into the given zone.
///
/// RFC 3339 values are converted into `tz`; naive values are read as local
/// time in `tz`. Returns `None` for anything else.
pub fn parse_timestamp<Z: TimeZone>(raw: &str, tz: &Z) -> Option<DateTime<Z>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(tz));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| resolve_local(tz, naive))
}

/// Parse a UTC offset such as `+02:00`, `-0530`, `+5`, `Z` or `UTC`.
pub fn parse_utc_offset(raw: &str) -> Result<FixedOffset, ModelError> {
    let trimmed = raw.trim();
    let invalid = || ModelError::InvalidUtcOffset(raw.to_string());

    if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(invalid);
    }

    let (sign, rest) = match trimmed.chars().next() {
        Some('+') => (1, &trimmed[1..]),
        Some('-') => (-1, &trimmed[1..]),
        _ => return Err(invalid()),
    };

    let (hours, minutes) = if let Some((h, m)) = rest.split_once(':') {
        (h, m)
    } else if rest.len() == 4 {
        rest.split_at(2)
    } else {
        (rest, "0")
    };

    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if !(0..=14).contains(&hours) || !(0..60).contains(&minutes) {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}
