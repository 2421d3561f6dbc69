//! ISO 8601 timezone conversion
//!
//! An input carrying its own offset (`Z` or `+HH:MM`) is an instant, and the
//! source zone is ignored. A naive input is wall-clock time in the source
//! zone, which is then required.

use crate::error::RawLinkError;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone};
use chrono_tz::Tz;
use tracing::debug;

/// Source zone used by the CLI when none is given
pub const DEFAULT_SOURCE_TIMEZONE: &str = "UTC";

/// Target zone used by the CLI when none is given
pub const DEFAULT_TARGET_TIMEZONE: &str = "Asia/Tokyo";

/// Formats accepted for a naive datetime
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Whether `input` ends in `Z` or a `+HH:MM`/`-HH:MM` offset
pub fn has_offset(input: &str) -> bool {
    let input = input.trim();
    if input.ends_with('Z') {
        return true;
    }
    let bytes = input.as_bytes();
    let Some(tail) = bytes.len().checked_sub(6).map(|start| &bytes[start..]) else {
        return false;
    };
    matches!(tail[0], b'+' | b'-')
        && tail[1].is_ascii_digit()
        && tail[2].is_ascii_digit()
        && tail[3] == b':'
        && tail[4].is_ascii_digit()
        && tail[5].is_ascii_digit()
}

/// Look up an IANA zone name such as `Asia/Tokyo`
pub fn parse_timezone(name: &str) -> Result<Tz, RawLinkError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| RawLinkError::UnknownTimezone(name.to_string()))
}

/// Convert an ISO 8601 datetime into zone `to`
///
/// `from` is only consulted when `input` has no offset. The result keeps
/// millisecond precision and uses `Z` when the target is UTC.
pub fn convert_datetime(input: &str, from: Option<&str>, to: &str) -> Result<String, RawLinkError> {
    let input = input.trim();
    let target = parse_timezone(to)?;

    let instant = if has_offset(input) {
        parse_with_offset(input)?
    } else {
        let from = from.ok_or(RawLinkError::MissingSourceTimezone)?;
        let source = parse_timezone(from)?;
        let naive = parse_naive(input)?;
        source
            .from_local_datetime(&naive)
            .earliest()
            .ok_or_else(|| RawLinkError::NonexistentLocalTime {
                local: input.to_string(),
                timezone: source.name().to_string(),
            })?
            .fixed_offset()
    };

    let converted = instant.with_timezone(&target).fixed_offset();
    debug!(input, to = target.name(), "Converted datetime");
    Ok(converted.to_rfc3339_opts(SecondsFormat::Millis, is_utc(target)))
}

fn is_utc(tz: Tz) -> bool {
    matches!(tz, Tz::UTC | Tz::Etc__UTC)
}

fn parse_with_offset(input: &str) -> Result<DateTime<FixedOffset>, RawLinkError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt);
    }
    // RFC 3339 wants seconds; ISO 8601 lets them go
    let normalized = match input.strip_suffix('Z') {
        Some(rest) => format!("{}+00:00", rest),
        None => input.to_string(),
    };
    DateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M%:z")
        .map_err(|_| RawLinkError::InvalidDatetime(input.to_string()))
}

fn parse_naive(input: &str) -> Result<NaiveDateTime, RawLinkError> {
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| RawLinkError::InvalidDatetime(input.to_string()))
}
