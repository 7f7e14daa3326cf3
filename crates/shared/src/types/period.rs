//! Period key identifying one trust-account statement per case.
//!
//! A period is a calendar (year, month) pair. Together with a case it
//! uniquely identifies a Cuenta Provisoria statement.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error for invalid period keys.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeriodError {
    /// Month must be in 1..=12.
    #[error("Month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),

    /// Year outside the supported range.
    #[error("Year {0} is outside the supported range")]
    InvalidYear(i32),
}

/// A calendar (year, month) pair identifying a statement period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PeriodKey {
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
}

impl PeriodKey {
    /// Creates a period key, validating the month and year.
    ///
    /// # Errors
    ///
    /// Returns an error if the month is not in 1..=12 or the year is
    /// outside 1900..=2200.
    pub const fn new(year: i32, month: u32) -> Result<Self, PeriodError> {
        if month < 1 || month > 12 {
            return Err(PeriodError::InvalidMonth(month));
        }
        if year < 1900 || year > 2200 {
            return Err(PeriodError::InvalidYear(year));
        }
        Ok(Self { year, month })
    }

    /// Returns the previous period, rolling January back to December of
    /// the prior year.
    #[must_use]
    pub const fn prev(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Returns the first calendar day of the period.
    #[must_use]
    pub fn first_day(self) -> NaiveDate {
        // Month is validated at construction.
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(self.year, 1, 1).unwrap_or_default())
    }

    /// Returns the last calendar day of the period.
    #[must_use]
    pub fn last_day(self) -> NaiveDate {
        let next_month_first = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        };

        next_month_first
            .and_then(|d| d.pred_opt())
            .unwrap_or_else(|| self.first_day())
    }

    /// Returns the Spanish month name, as used in court-facing documents.
    #[must_use]
    pub const fn month_name_es(self) -> &'static str {
        match self.month {
            1 => "enero",
            2 => "febrero",
            3 => "marzo",
            4 => "abril",
            5 => "mayo",
            6 => "junio",
            7 => "julio",
            8 => "agosto",
            9 => "septiembre",
            10 => "octubre",
            11 => "noviembre",
            12 => "diciembre",
            _ => "desconocido",
        }
    }
}

impl std::fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}
