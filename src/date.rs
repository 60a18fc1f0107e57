//! Parsing and formatting of calendar dates.
//!
//! Dates are written as DD/MM/YYYY in JSON bodies. URL path parameters cannot
//! contain slashes, so they use underscores instead, e.g. `05_01_2024`.

use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::Error;

/// Date format for JSON bodies and responses, e.g. "05/01/2024".
const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[day]/[month]/[year]");

/// Parse a date in the DD/MM/YYYY format.
///
/// # Errors
///
/// Returns [Error::InvalidDateFormat] if `text` is not a valid date.
pub fn parse_date(text: &str) -> Result<Date, Error> {
    Date::parse(text.trim(), DATE_FORMAT).map_err(|_| Error::InvalidDateFormat(text.to_owned()))
}

/// Decode a date from a URL path parameter such as `05_01_2024`.
///
/// # Errors
///
/// Returns [Error::InvalidDateFormat] if the parameter is not a valid date.
pub fn parse_date_param(param: &str) -> Result<Date, Error> {
    parse_date(&param.replace('_', "/")).map_err(|_| Error::InvalidDateFormat(param.to_owned()))
}

/// Format `date` as DD/MM/YYYY.
pub fn format_date(date: Date) -> String {
    // Dates built by the time crate always have the components in the format.
    date.format(DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// Serde support for dates in the DD/MM/YYYY format.
///
/// Use with `#[serde(with = "crate::date::day_month_year")]`.
pub mod day_month_year {
    use serde::{Deserialize, Deserializer, Serializer, de};
    use time::Date;

    use super::{format_date, parse_date};

    /// Serialize `date` as a DD/MM/YYYY string.
    pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_date(*date))
    }

    /// Deserialize a DD/MM/YYYY string into a date.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        parse_date(&text).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod date_tests {
    use serde::{Deserialize, Serialize};
    use time::{Date, macros::date};

    use crate::{
        Error,
        date::{format_date, parse_date, parse_date_param},
    };

    #[test]
    fn parses_day_month_year() {
        assert_eq!(parse_date("05/01/2024"), Ok(date!(2024 - 01 - 05)));
    }

    #[test]
    fn parses_path_parameter_with_underscores() {
        assert_eq!(parse_date_param("10_01_2024"), Ok(date!(2024 - 01 - 10)));
    }

    #[test]
    fn rejects_month_first_dates() {
        assert_eq!(
            parse_date_param("01_31_2024"),
            Err(Error::InvalidDateFormat("01_31_2024".to_owned()))
        );
    }

    #[test]
    fn rejects_iso_dates() {
        assert_eq!(
            parse_date("2024-01-05"),
            Err(Error::InvalidDateFormat("2024-01-05".to_owned()))
        );
    }

    #[test]
    fn formats_with_zero_padding() {
        assert_eq!(format_date(date!(2024 - 03 - 07)), "07/03/2024");
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Dated {
        #[serde(with = "crate::date::day_month_year")]
        date: Date,
    }

    #[test]
    fn serde_uses_day_month_year() {
        let dated = Dated {
            date: date!(2024 - 12 - 25),
        };

        let json = serde_json::to_string(&dated).unwrap();
        assert_eq!(json, r#"{"date":"25/12/2024"}"#);

        let parsed: Dated = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, dated);
    }
}
