//! Parsing and display of the console's date, time and number formats.

use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveTime};

use crate::error::{HotelError, Result};

/// Display/parse pattern for dates (`dd-MM-yyyy`).
pub const DATE_FORMAT: &str = "%d-%m-%Y";
/// Display/parse pattern for times of day (`HH:mm`).
pub const TIME_FORMAT: &str = "%H:%M";
/// Earliest accepted simulated year.
pub const MIN_SIMULATION_YEAR: i32 = 2020;
/// Latest accepted simulated year.
pub const MAX_SIMULATION_YEAR: i32 = 2050;

/// Parse a `dd-MM-yyyy` date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| HotelError::InvalidDate(trimmed.to_string()))
}

/// Parse a simulated "hotel date", which must fall inside the supported years.
pub fn parse_simulation_date(input: &str) -> Result<NaiveDate> {
    let date = parse_date(input)?;
    if !(MIN_SIMULATION_YEAR..=MAX_SIMULATION_YEAR).contains(&date.year()) {
        return Err(HotelError::YearOutOfRange(date.year()));
    }
    Ok(date)
}

/// Parse an `HH:mm` time of day; `HH:mm:ss` is accepted as well.
pub fn parse_time(input: &str) -> Result<NaiveTime> {
    let trimmed = input.trim();
    NaiveTime::parse_from_str(trimmed, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| HotelError::InvalidTime(trimmed.to_string()))
}

/// Parse an integer field typed at the console.
pub fn parse_number<T: FromStr>(input: &str) -> Result<T> {
    let trimmed = input.trim();
    trimmed
        .parse::<T>()
        .map_err(|_| HotelError::InvalidNumber(trimmed.to_string()))
}

/// Render a date as `dd-MM-yyyy`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Render a time of day as `HH:mm`.
pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn parses_console_dates() {
        let date = parse_date(" 12-06-2025 ").expect("valid date");
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 6, 12).unwrap());
        assert_eq!(format_date(date), "12-06-2025");

        let err = parse_date("2025-06-12").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputFormat);
        assert!(parse_date("31-02-2025").is_err());
    }

    #[test]
    fn simulation_year_is_bounded() {
        assert!(parse_simulation_date("01-01-2020").is_ok());
        assert!(parse_simulation_date("31-12-2050").is_ok());
        assert_eq!(
            parse_simulation_date("31-12-2019"),
            Err(HotelError::YearOutOfRange(2019))
        );
        assert_eq!(
            parse_simulation_date("01-01-2051"),
            Err(HotelError::YearOutOfRange(2051))
        );
    }

    #[test]
    fn parses_times_of_day() {
        let time = parse_time("14:00").expect("valid time");
        assert_eq!(time, NaiveTime::from_hms_opt(14, 0, 0).unwrap());
        assert_eq!(format_time(time), "14:00");
        assert_eq!(
            parse_time("09:30:15").expect("seconds accepted"),
            NaiveTime::from_hms_opt(9, 30, 15).unwrap()
        );
        assert_eq!(
            parse_time("25:00"),
            Err(HotelError::InvalidTime("25:00".to_string()))
        );
    }

    #[test]
    fn rejects_non_numeric_input() {
        assert_eq!(parse_number::<u32>("42"), Ok(42));
        assert_eq!(
            parse_number::<u32>("-1"),
            Err(HotelError::InvalidNumber("-1".to_string()))
        );
        assert!(parse_number::<u32>("abc").is_err());
    }
}
