use chrono::{DateTime, FixedOffset, NaiveDate};

use super::error::{AppError, AppResult};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn datetime_to_string(datetime: DateTime<FixedOffset>) -> String {
    let offset = FixedOffset::east_opt(5 * 60 * 60 + 30 * 60).unwrap_or(*datetime.offset()); // +0530
    datetime
        .with_timezone(&offset)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

pub fn date_to_string_opt(date: Option<NaiveDate>) -> Option<String> {
    date.map(|x| x.format(DATE_FORMAT).to_string())
}

pub fn parse_date_opt(date: Option<&str>) -> AppResult<Option<NaiveDate>> {
    let Some(date) = date.map(str::trim).filter(|x| !x.is_empty()) else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map(Some)
        .map_err(|_| AppError::Validation(format!("invalid date {}, expected YYYY-MM-DD", date)))
}

/// Blank form inputs are stored as absent values.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|x| !x.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_opt() {
        assert_eq!(parse_date_opt(None).unwrap(), None);
        assert_eq!(parse_date_opt(Some("  ")).unwrap(), None);
        assert_eq!(
            parse_date_opt(Some("2024-11-02")).unwrap(),
            NaiveDate::from_ymd_opt(2024, 11, 2)
        );
        assert!(matches!(
            parse_date_opt(Some("02/11/2024")),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  ".to_string())), None);
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some("Pune".to_string())), Some("Pune".to_string()));
    }
}
