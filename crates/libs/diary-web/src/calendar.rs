//! Date parsing and day boundaries.
//!
//! Two inputs are accepted wherever a date is expected: an RFC 3339 timestamp,
//! taken as the instant it names, or a bare date (optionally with a time of
//! day but no offset), taken in the server's local time zone.
//!
//! Parsed instants keep microsecond precision, the resolution of `timestamptz`.

use chrono::{
    DateTime, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound, TimeDelta,
    TimeZone, Utc,
};

use crate::prelude::*;

const DATE_FORMAT: &str = "%Y-%m-%d";
const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

const STORED_SUBSEC_DIGITS: u16 = 6;

/// Parses the `date` of an entry into the instant that gets stored.
pub fn parse_entry_date(raw: &str) -> Result<DateTime<Utc>> {
    parse_entry_date_in(raw, &Local)
}

/// Parses a day lookup, such as the `:date` path segment, into a calendar day.
pub fn parse_calendar_day(raw: &str) -> Result<NaiveDate> {
    parse_calendar_day_in(raw, &Local)
}

/// `[start, end)` of `day` in local server time.
pub fn local_day_bounds(day: NaiveDate) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    day_bounds(day, &Local)
}

pub fn parse_entry_date_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Result<DateTime<Utc>> {
    Ok(parse_instant(raw, tz)?.trunc_subsecs(STORED_SUBSEC_DIGITS))
}

fn parse_instant<Tz: TimeZone>(raw: &str, tz: &Tz) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Error::validation("\"date\" is required"));
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }
    if let Some(naive) = parse_naive_datetime(raw) {
        return resolve_local(&naive, tz).ok_or_else(invalid_date);
    }
    let day = NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| invalid_date())?;
    start_of_day(day, tz)
}

pub fn parse_calendar_day_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Result<NaiveDate> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(tz).date_naive());
    }
    if let Some(naive) = parse_naive_datetime(raw) {
        return Ok(naive.date());
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| invalid_date())
}

pub fn day_bounds<Tz: TimeZone>(
    day: NaiveDate,
    tz: &Tz,
) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let next = day.succ_opt().ok_or_else(invalid_date)?;
    Ok((start_of_day(day, tz)?, start_of_day(next, tz)?))
}

fn parse_naive_datetime(raw: &str) -> Option<NaiveDateTime> {
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

/// Midnight, or the first valid instant of the day when a DST gap swallows midnight.
fn start_of_day<Tz: TimeZone>(day: NaiveDate, tz: &Tz) -> Result<DateTime<Utc>> {
    let midnight = day.and_time(NaiveTime::MIN);
    resolve_local(&midnight, tz)
        .or_else(|| resolve_local(&(midnight + TimeDelta::hours(1)), tz))
        .ok_or_else(invalid_date)
}

fn resolve_local<Tz: TimeZone>(naive: &NaiveDateTime, tz: &Tz) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(naive) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => None,
    }
}

fn invalid_date() -> Error {
    Error::validation("\"date\" must be a valid date")
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn bare_date_is_local_midnight() -> Result<()> {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let parsed = parse_entry_date_in("2024-01-01", &tz)?;
        assert_eq!(parsed, Utc.with_ymd_and_hms(2023, 12, 31, 22, 0, 0).unwrap());
        Ok(())
    }

    #[test]
    fn rfc3339_keeps_the_instant() -> Result<()> {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let parsed = parse_entry_date_in("2024-01-01T10:30:00Z", &tz)?;
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 1, 10, 30, 0).unwrap());
        Ok(())
    }

    #[test]
    fn rejects_missing_and_garbage() {
        for raw in ["", "   ", "yesterday", "2024-13-01", "2024-02-30"] {
            assert!(matches!(
                parse_entry_date_in(raw, &Utc),
                Err(Error::Validation(_))
            ));
        }
    }

    #[test]
    fn sub_microsecond_digits_are_dropped() -> Result<()> {
        let exact = parse_entry_date_in("2024-01-01T00:00:00Z", &Utc)?;
        assert_eq!(parse_entry_date_in("2024-01-01T00:00:00.0000001Z", &Utc)?, exact);
        assert_ne!(parse_entry_date_in("2024-01-01T00:00:00.000001Z", &Utc)?, exact);
        Ok(())
    }

    #[test]
    fn bounds_cover_one_local_day() -> Result<()> {
        let tz = FixedOffset::west_opt(3 * 3600).unwrap();
        let (start, end) = day_bounds(ymd(2024, 1, 1), &tz)?;
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 1, 1, 3, 0, 0).unwrap());
        assert_eq!(end - start, TimeDelta::days(1));
        Ok(())
    }

    #[test]
    fn entry_with_time_of_day_falls_inside_its_day() -> Result<()> {
        let tz = FixedOffset::east_opt(3600).unwrap();
        let stored = parse_entry_date_in("2024-03-05T18:45", &tz)?;
        let (start, end) = day_bounds(parse_calendar_day_in("2024-03-05", &tz)?, &tz)?;
        assert!(start <= stored && stored < end);
        Ok(())
    }

    #[test]
    fn calendar_day_of_timestamp_is_local() -> Result<()> {
        let tz = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(
            parse_calendar_day_in("2024-01-01T20:00:00Z", &tz)?,
            ymd(2024, 1, 2)
        );
        Ok(())
    }
}
