use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// A guest's stay: check-in inclusive, check-out exclusive. The nights are
/// the calendar dates `[check_in, check_out)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

#[derive(Debug, thiserror::Error)]
pub enum StayRangeError {
    #[error("check-out {check_out} must be after check-in {check_in}")]
    Empty {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },
}

impl StayRange {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, StayRangeError> {
        if check_out <= check_in {
            return Err(StayRangeError::Empty {
                check_in,
                check_out,
            });
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Number of nights in the stay.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// The last occupied night (check-out minus one day).
    pub fn last_night(&self) -> NaiveDate {
        self.check_out - Duration::days(1)
    }

    /// Iterate the occupied nights in calendar order.
    pub fn iter_nights(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.check_in;
        (0..self.nights()).map(move |offset| start + Duration::days(offset))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.check_in <= date && date < self.check_out
    }
}
