//! Calendar month periods for budgets and reports.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

/// A calendar month within a year.
///
/// Budgets are allocated and reports are computed per `Period`. The engine
/// never reads the wall clock: callers that want "the current month" resolve
/// it themselves and pass an explicit `Period`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    month: u32,
    year: i32,
}

impl Period {
    /// Creates a period, validating `month` is in `1..=12` and `year` is
    /// positive.
    pub fn new(month: u32, year: i32) -> ResultEngine<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidPeriod(format!(
                "month must be in 1..=12, got {month}"
            )));
        }
        if year <= 0 {
            return Err(EngineError::InvalidPeriod(format!(
                "year must be positive, got {year}"
            )));
        }
        Ok(Self { month, year })
    }

    /// The period a given date falls in.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            year: date.year(),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// The previous calendar month, wrapping January into December of the
    /// prior year.
    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                month: 12,
                year: self.year - 1,
            }
        } else {
            Self {
                month: self.month - 1,
                year: self.year,
            }
        }
    }

    /// Half-open date range `[first day, first day of next month)`.
    pub fn date_range(&self) -> ResultEngine<(NaiveDate, NaiveDate)> {
        let start = NaiveDate::from_ymd_opt(self.year, self.month, 1).ok_or_else(|| {
            EngineError::InvalidPeriod(format!("invalid period {}-{}", self.year, self.month))
        })?;
        let end = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        }
        .ok_or_else(|| {
            EngineError::InvalidPeriod(format!("invalid period {}-{}", self.year, self.month))
        })?;
        Ok((start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_month() {
        assert!(Period::new(0, 2024).is_err());
        assert!(Period::new(13, 2024).is_err());
        assert!(Period::new(6, 0).is_err());
    }

    #[test]
    fn previous_wraps_january() {
        let jan = Period::new(1, 2024).unwrap();
        assert_eq!(jan.previous(), Period::new(12, 2023).unwrap());

        let mar = Period::new(3, 2024).unwrap();
        assert_eq!(mar.previous(), Period::new(2, 2024).unwrap());
    }

    #[test]
    fn date_range_is_half_open() {
        let (start, end) = Period::new(3, 2024).unwrap().date_range().unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());

        let (start, end) = Period::new(12, 2024).unwrap().date_range().unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }

    #[test]
    fn from_date_matches_month_and_year() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
        assert_eq!(Period::from_date(date), Period::new(7, 2024).unwrap());
    }
}
