use time::{macros::format_description, Date, OffsetDateTime, PrimitiveDateTime, Time};

use crate::error::ApiError;

/// Server-local wall clock, falling back to UTC when the local offset is unknown.
pub fn now_local() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

pub fn today() -> Date {
    now_local().date()
}

/// Parses a `YYYY-MM-DD` day.
pub fn parse_day(raw: &str) -> Result<Date, ApiError> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| ApiError::Validation(format!("invalid date '{raw}', expected YYYY-MM-DD")))
}

/// `date_str` query parameters default to the current server-local day.
pub fn day_or_today(raw: Option<&str>) -> Result<Date, ApiError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => parse_day(s),
        None => Ok(today()),
    }
}

/// Stamps `day` with the current server-local time of day.
pub fn at_current_time(day: Date) -> PrimitiveDateTime {
    let now = now_local().time();
    let time = Time::from_hms(now.hour(), now.minute(), now.second()).unwrap_or(Time::MIDNIGHT);
    PrimitiveDateTime::new(day, time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::{macros::date, UtcOffset};

    #[test]
    fn parses_iso_days() {
        assert_eq!(parse_day("2024-03-09").unwrap(), date!(2024 - 03 - 09));
        assert_eq!(parse_day(" 2024-12-31 ").unwrap(), date!(2024 - 12 - 31));
    }

    #[test]
    fn rejects_malformed_days() {
        let err = parse_day("09/03/2024").unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(parse_day("2024-02-30").is_err());
    }

    fn utc_shifted_today() -> Date {
        let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
        OffsetDateTime::now_utc().to_offset(offset).date()
    }

    #[test]
    fn missing_or_blank_day_means_today() {
        let before = utc_shifted_today();
        let missing = day_or_today(None).unwrap();
        let blank = day_or_today(Some("  ")).unwrap();
        let after = utc_shifted_today();
        // a midnight rollover between the reads is tolerated
        for day in [missing, blank] {
            assert!(day == before || day == after, "{day} is not {before} or {after}");
        }
    }

    #[test]
    fn current_time_keeps_the_requested_day() {
        let stamped = at_current_time(date!(2023 - 07 - 01));
        assert_eq!(stamped.date(), date!(2023 - 07 - 01));
        assert_eq!(stamped.nanosecond(), 0);
    }
}
