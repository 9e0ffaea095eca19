use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};

use crate::ValidationError;

/// Instant normalized to UTC, the canonical timestamp of every datapoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcInstant(OffsetDateTime);

impl UtcInstant {
    /// Parse an RFC3339 timestamp, normalizing any offset to UTC.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let parsed =
            OffsetDateTime::parse(input, &Rfc3339).map_err(|_| ValidationError::InvalidTimestamp {
                value: input.to_owned(),
            })?;
        Ok(Self(parsed.to_offset(UtcOffset::UTC)))
    }

    pub fn from_unix_millis(millis: i64) -> Result<Self, ValidationError> {
        OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
            .map(Self)
            .map_err(|_| ValidationError::TimestampOutOfRange { millis })
    }

    pub fn unix_millis(self) -> i64 {
        (self.0.unix_timestamp_nanos() / 1_000_000) as i64
    }

    pub fn into_inner(self) -> OffsetDateTime {
        self.0
    }
}

impl Display for UtcInstant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_utc_iso(*self))
    }
}

impl Serialize for UtcInstant {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_utc_iso(*self))
    }
}

impl<'de> Deserialize<'de> for UtcInstant {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

/// Format an instant as `YYYY-MM-DDTHH:mm:ss.sssZ`.
///
/// This is the projection written into export rows and the exact encoding of
/// the backend's `starttime`/`endtime` query bounds.
pub fn format_utc_iso(instant: UtcInstant) -> String {
    let utc = instant.into_inner();
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
        utc.year(),
        utc.month() as u8,
        utc.day(),
        utc.hour(),
        utc.minute(),
        utc.second(),
        utc.millisecond(),
    )
}

/// Format an instant under an explicit offset as `YYYY-MM-DDTHH:mm:ss±HH:MM`.
///
/// No fractional seconds; offset sign is `+` for zero or east-of-UTC offsets.
/// The offset is a parameter rather than ambient environment state so the
/// function stays pure; callers wanting the process-local offset resolve it
/// once at the boundary and pass it in.
pub fn format_local_iso(instant: UtcInstant, offset: UtcOffset) -> String {
    let local = instant.into_inner().to_offset(offset);
    let (hours, minutes, _) = offset.as_hms();
    let sign = if offset.whole_seconds() < 0 { '-' } else { '+' };
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}{}{:02}:{:02}",
        local.year(),
        local.month() as u8,
        local.day(),
        local.hour(),
        local.minute(),
        local.second(),
        sign,
        hours.unsigned_abs(),
        minutes.unsigned_abs(),
    )
}

/// Parse a calendar date in `YYYY-MM-DD` form.
pub fn parse_date(input: &str) -> Result<Date, ValidationError> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(input.trim(), format).map_err(|_| ValidationError::InvalidDate {
        value: input.to_owned(),
    })
}

/// Start of `date` in UTC: 00:00:00.000.
pub fn day_start_utc(date: Date) -> UtcInstant {
    UtcInstant(date.midnight().assume_utc())
}

/// End of `date` in UTC: 23:59:59.999, making the requested span inclusive of
/// the whole final day regardless of the caller's local timezone.
pub fn day_end_utc(date: Date) -> UtcInstant {
    let end = date
        .with_hms_milli(23, 59, 59, 999)
        .expect("23:59:59.999 is a valid time of day");
    UtcInstant(end.assume_utc())
}
