//! Evaluation period arithmetic.
//!
//! Progression always judges the calendar month prior to the run date;
//! there is no explicit period parameter on the job trigger.

use std::fmt;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// A single calendar month whose metrics are being judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EvaluationPeriod {
    pub year: i32,
    /// 1-based calendar month (1 = January).
    pub month: i32,
}

impl EvaluationPeriod {
    /// The calendar month prior to `now`.
    ///
    /// January rolls back to December of the previous year.
    pub fn previous_month(now: Timestamp) -> Self {
        if now.month() == 1 {
            Self {
                year: now.year() - 1,
                month: 12,
            }
        } else {
            Self {
                year: now.year(),
                month: now.month() as i32 - 1,
            }
        }
    }
}

impl fmt::Display for EvaluationPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn previous_month_mid_year() {
        let now = Utc.with_ymd_and_hms(2025, 7, 15, 12, 0, 0).unwrap();
        let period = EvaluationPeriod::previous_month(now);
        assert_eq!(period, EvaluationPeriod { year: 2025, month: 6 });
    }

    #[test]
    fn previous_month_january_rolls_back_a_year() {
        let now = Utc.with_ymd_and_hms(2025, 1, 3, 0, 0, 0).unwrap();
        let period = EvaluationPeriod::previous_month(now);
        assert_eq!(
            period,
            EvaluationPeriod {
                year: 2024,
                month: 12
            }
        );
    }

    #[test]
    fn display_is_zero_padded() {
        let period = EvaluationPeriod { year: 2025, month: 3 };
        assert_eq!(period.to_string(), "2025-03");
    }
}
