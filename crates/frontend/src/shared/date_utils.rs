/// Date and time formatting for tables and cards.
///
/// The API speaks UTC; the browser's offset is applied before display.
use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

/// Browser timezone as a chrono offset. Falls back to UTC off-browser.
pub fn browser_offset() -> FixedOffset {
    #[cfg(target_arch = "wasm32")]
    {
        // getTimezoneOffset is minutes *behind* UTC
        let minutes = js_sys::Date::new_0().get_timezone_offset() as i32;
        FixedOffset::west_opt(minutes * 60).unwrap_or_else(utc)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        utc()
    }
}

fn utc() -> FixedOffset {
    Utc.fix()
}

/// `02-05-2024 09:45`
pub fn format_datetime_in(dt: &DateTime<Utc>, offset: FixedOffset) -> String {
    dt.with_timezone(&offset).format("%d-%m-%Y %H:%M").to_string()
}

pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    format_datetime_in(dt, browser_offset())
}

pub fn format_opt_datetime(dt: Option<&DateTime<Utc>>) -> String {
    dt.map(format_datetime).unwrap_or_else(|| "—".to_string())
}

pub fn format_date(d: &NaiveDate) -> String {
    d.format("%d-%m-%Y").to_string()
}

/// Today in the browser's timezone.
pub fn today() -> NaiveDate {
    Utc::now().with_timezone(&browser_offset()).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime_with_offset() {
        let dt: DateTime<Utc> = "2024-05-02T13:45:00Z".parse().unwrap();
        let santiago = FixedOffset::west_opt(4 * 3600).unwrap();
        assert_eq!(format_datetime_in(&dt, santiago), "02-05-2024 09:45");
        assert_eq!(format_datetime_in(&dt, utc()), "02-05-2024 13:45");
    }

    #[test]
    fn test_format_date() {
        let d = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(format_date(&d), "31-12-2024");
        assert_eq!(format_opt_datetime(None), "—");
    }
}
