//! Relative time windows for display.
//!
//! Slicing only drops rows; it never reorders them or touches indicator
//! values, which are computed over the full history beforehand.

use crate::domain::price::Dated;
use crate::domain::table::PreparedTable;
use chrono::{Days, Months, NaiveDate};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeWindow {
    LastWeek,
    LastMonth,
    LastThreeMonths,
    All,
}

impl TimeWindow {
    /// Earliest date kept, or `None` when nothing is cut.
    pub fn cutoff(self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            TimeWindow::LastWeek => today.checked_sub_days(Days::new(7)),
            TimeWindow::LastMonth => today.checked_sub_months(Months::new(1)),
            TimeWindow::LastThreeMonths => today.checked_sub_months(Months::new(3)),
            TimeWindow::All => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeWindow::LastWeek => "1 Week",
            TimeWindow::LastMonth => "1 Month",
            TimeWindow::LastThreeMonths => "3 Months",
            TimeWindow::All => "All",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "1week" | "lastweek" | "week" => Ok(TimeWindow::LastWeek),
            "1month" | "lastmonth" | "month" => Ok(TimeWindow::LastMonth),
            "3months" | "lastthreemonths" | "threemonths" => Ok(TimeWindow::LastThreeMonths),
            "all" => Ok(TimeWindow::All),
            _ => Err(format!("unknown time window '{}'", s)),
        }
    }
}

/// Keep rows dated on or after the window's cutoff, in their input order.
/// Undated rows only survive `All`.
pub fn slice_rows<T: Dated + Clone>(rows: &[T], window: TimeWindow, today: NaiveDate) -> Vec<T> {
    match window.cutoff(today) {
        None => rows.to_vec(),
        Some(cutoff) => rows
            .iter()
            .filter(|r| r.date().is_some_and(|d| d >= cutoff))
            .cloned()
            .collect(),
    }
}

pub fn slice(table: &PreparedTable, window: TimeWindow, today: NaiveDate) -> PreparedTable {
    PreparedTable::new(table.symbol(), slice_rows(table.rows(), window, today))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::price::RawPriceRecord;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dated(date: Option<NaiveDate>) -> RawPriceRecord {
        RawPriceRecord {
            date,
            close: Some(1.0),
            ..RawPriceRecord::default()
        }
    }

    #[test]
    fn cutoffs() {
        let today = ymd(2024, 3, 31);
        assert_eq!(TimeWindow::LastWeek.cutoff(today), Some(ymd(2024, 3, 24)));
        assert_eq!(TimeWindow::LastMonth.cutoff(today), Some(ymd(2024, 2, 29)));
        assert_eq!(TimeWindow::LastThreeMonths.cutoff(today), Some(ymd(2023, 12, 31)));
        assert_eq!(TimeWindow::All.cutoff(today), None);
    }

    #[test]
    fn last_week_is_inclusive_of_cutoff() {
        let today = ymd(2024, 1, 15);
        let rows = vec![
            dated(Some(ymd(2024, 1, 7))),
            dated(Some(ymd(2024, 1, 8))),
            dated(Some(ymd(2024, 1, 15))),
        ];

        let kept = slice_rows(&rows, TimeWindow::LastWeek, today);

        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].date, Some(ymd(2024, 1, 8)));
    }

    #[test]
    fn all_is_identity_including_undated_rows() {
        let rows = vec![dated(None), dated(Some(ymd(2020, 1, 1)))];
        assert_eq!(slice_rows(&rows, TimeWindow::All, ymd(2024, 1, 1)), rows);
    }

    #[test]
    fn undated_rows_dropped_by_relative_windows() {
        let rows = vec![dated(None), dated(Some(ymd(2024, 1, 1)))];
        let kept = slice_rows(&rows, TimeWindow::LastMonth, ymd(2024, 1, 2));
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn order_is_preserved() {
        let rows = vec![
            dated(Some(ymd(2024, 1, 10))),
            dated(Some(ymd(2024, 1, 9))),
            dated(Some(ymd(2024, 1, 11))),
        ];
        let kept = slice_rows(&rows, TimeWindow::LastMonth, ymd(2024, 1, 12));
        assert_eq!(kept, rows);
    }

    #[test]
    fn parse_labels_and_names() {
        assert_eq!("1 Week".parse::<TimeWindow>(), Ok(TimeWindow::LastWeek));
        assert_eq!("1 Month".parse::<TimeWindow>(), Ok(TimeWindow::LastMonth));
        assert_eq!("3 Months".parse::<TimeWindow>(), Ok(TimeWindow::LastThreeMonths));
        assert_eq!("last-three-months".parse::<TimeWindow>(), Ok(TimeWindow::LastThreeMonths));
        assert_eq!("ALL".parse::<TimeWindow>(), Ok(TimeWindow::All));
        assert!("fortnight".parse::<TimeWindow>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for w in [
            TimeWindow::LastWeek,
            TimeWindow::LastMonth,
            TimeWindow::LastThreeMonths,
            TimeWindow::All,
        ] {
            assert_eq!(w.to_string().parse::<TimeWindow>(), Ok(w));
        }
    }
}
