use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static DAY_MONTH_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{1,2})/([0-9]{1,2})/([0-9]{4})$").unwrap());

static DAY_MONTH_SHORT_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{1,2})/([0-9]{1,2})/([0-9]{2})$").unwrap());

static YEAR_MONTH_DAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{4})-([0-9]{1,2})-([0-9]{1,2})$").unwrap());

/// Unsigned digit groups with at most four year digits. Guards the fallback,
/// since chrono's `%Y` also takes a sign and longer years.
static FALLBACK_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[0-9]{1,2}/[0-9]{1,2}/[0-9]{1,4}|[0-9]{1,4}-[0-9]{1,2}-[0-9]{1,2})$").unwrap()
});

/// Formats tried when none of the strict shapes produce a date.
const FALLBACK_FORMATS: [&str; 3] = ["%d/%m/%Y", "%d/%m/%y", "%Y-%m-%d"];

/// Cell values the sheet uses to mean "no date yet".
const ABSENT_SENTINELS: [&str; 2] = ["#VALUE!", "em ser"];

/// Normalise a sheet date to `YYYY-MM-DD`, or `None` when it cannot be read.
pub fn normalize_date(raw: &str) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() || ABSENT_SENTINELS.contains(&value) {
        return None;
    }

    if let Some(caps) = DAY_MONTH_YEAR.captures(value) {
        if let Some(date) = checked_iso(&caps[3], &caps[2], &caps[1], 0) {
            return Some(date);
        }
    }

    if let Some(caps) = DAY_MONTH_SHORT_YEAR.captures(value) {
        if let Some(date) = checked_iso(&caps[3], &caps[2], &caps[1], 2000) {
            return Some(date);
        }
    }

    if let Some(caps) = YEAR_MONTH_DAY.captures(value) {
        if let Some(date) = checked_iso(&caps[1], &caps[2], &caps[3], 0) {
            return Some(date);
        }
    }

    if !FALLBACK_SHAPE.is_match(value) {
        return None;
    }

    FALLBACK_FORMATS.iter().find_map(|format| {
        NaiveDate::parse_from_str(value, format)
            .ok()
            .map(|date| date.format("%Y-%m-%d").to_string())
    })
}

/// Range-checks the components and zero-pads them. Day 31 is accepted for every month.
fn checked_iso(year: &str, month: &str, day: &str, year_offset: u32) -> Option<String> {
    let year = year.parse::<u32>().ok()? + year_offset;
    let month = month.parse::<u32>().ok()?;
    let day = day.parse::<u32>().ok()?;

    if !(1..=31).contains(&day) || !(1..=12).contains(&month) || year < 1900 {
        return None;
    }

    Some(format!("{year}-{month:02}-{day:02}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_month_year_is_zero_padded() {
        assert_eq!(normalize_date("1/3/2024").as_deref(), Some("2024-03-01"));
        assert_eq!(normalize_date("01/03/2024").as_deref(), Some("2024-03-01"));
        assert_eq!(normalize_date("31/12/1999").as_deref(), Some("1999-12-31"));
    }

    #[test]
    fn two_digit_years_land_in_this_century() {
        assert_eq!(normalize_date("5/7/24").as_deref(), Some("2024-07-05"));
        assert_eq!(normalize_date("5/7/99").as_deref(), Some("2099-07-05"));
    }

    #[test]
    fn iso_input_is_padded() {
        assert_eq!(normalize_date("2024-3-9").as_deref(), Some("2024-03-09"));
        assert_eq!(normalize_date("2023-11-30").as_deref(), Some("2023-11-30"));
    }

    #[test]
    fn blanks_and_sentinels_are_absent() {
        for value in ["", "   ", "#VALUE!", "em ser", " em ser "] {
            assert_eq!(normalize_date(value), None, "{value:?}");
        }
    }

    #[test]
    fn out_of_range_components_are_absent() {
        assert_eq!(normalize_date("32/01/2024"), None);
        assert_eq!(normalize_date("10/13/2024"), None);
        assert_eq!(normalize_date("0/5/2024"), None);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(normalize_date("  02/02/2022 ").as_deref(), Some("2022-02-02"));
    }

    #[test]
    fn day_31_passes_the_strict_shape() {
        assert_eq!(normalize_date("31/02/2024").as_deref(), Some("2024-02-31"));
    }

    #[test]
    fn old_years_fall_through_to_calendar_parse() {
        assert_eq!(normalize_date("15/06/1850").as_deref(), Some("1850-06-15"));
    }

    #[test]
    fn signed_and_long_years_are_absent() {
        for value in ["1/1/-2024", "1/1/+2024", "1/1/20245", "-2024-01-01", "+2024-1-1", "12024-01-01"] {
            assert_eq!(normalize_date(value), None, "{value:?}");
        }
    }

    #[test]
    fn free_text_is_absent() {
        assert_eq!(normalize_date("aguardando TCE"), None);
        assert_eq!(normalize_date("2024/03/01"), None);
    }

    #[test]
    fn every_valid_component_round_trips() {
        for year in [1900, 1987, 2024] {
            for month in 1..=12 {
                for day in [1, 9, 10, 28, 31] {
                    let raw = format!("{day}/{month}/{year}");
                    let expected = format!("{year}-{month:02}-{day:02}");
                    assert_eq!(normalize_date(&raw), Some(expected));
                }
            }
        }
    }
}
