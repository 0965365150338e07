// src/services/reports.rs
//
// Parameters of the reporting endpoints. The aggregations themselves run in
// SQL (see the `REPORTS` sections of the repositories).

use chrono::{Datelike, NaiveDate};

pub const DEFAULT_TOP_CUSTOMERS: usize = 5;
pub const MIN_ORDERS_FOR_AVERAGE: i64 = 3;
pub const MIN_ORDERS_PER_DAY: i64 = 2;

/// Year a monthly report covers: the requested one, else the year of `today`.
pub fn report_year(year: Option<i32>, today: NaiveDate) -> i32 {
    year.unwrap_or_else(|| today.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn report_year_defaults_to_the_current_year() {
        assert_eq!(report_year(None, day(2025, 12, 31)), 2025);
        assert_eq!(report_year(None, day(2026, 1, 1)), 2026);
    }

    #[test]
    fn report_year_prefers_the_requested_year() {
        assert_eq!(report_year(Some(2019), day(2025, 6, 15)), 2019);
    }
}
