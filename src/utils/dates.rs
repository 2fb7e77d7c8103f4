use chrono::{Days, NaiveDate};

/// Day zero of the day-count axis used by sampled prevalence series.
pub fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2019, 12, 30).unwrap_or(NaiveDate::MIN)
}

/// Calendar date of a (possibly negative) day count.
pub fn day_to_date(day: i64) -> Option<NaiveDate> {
    let offset = Days::new(day.unsigned_abs());
    if day >= 0 {
        epoch().checked_add_days(offset)
    } else {
        epoch().checked_sub_days(offset)
    }
}

pub fn day_to_iso_string(day: i64) -> String {
    match day_to_date(day) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => format!("day{}", day),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_is_day_zero() {
        assert_eq!(day_to_iso_string(0), "2019-12-30");
        assert_eq!(day_to_date(0), Some(epoch()));
    }

    #[test]
    fn days_cross_year_boundary() {
        assert_eq!(day_to_iso_string(2), "2020-01-01");
        assert_eq!(day_to_iso_string(-1), "2019-12-29");
        assert_eq!(day_to_iso_string(62), "2020-03-01");
    }

    #[test]
    fn out_of_range_day_falls_back_to_index() {
        assert_eq!(day_to_date(i64::MAX), None);
        assert_eq!(day_to_iso_string(i64::MAX), format!("day{}", i64::MAX));
    }
}
