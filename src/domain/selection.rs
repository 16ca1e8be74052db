use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::season::SeasonPolicy;

/// The in-progress check-in / check-out pair.
///
/// Only [`StaySelection::apply`] mutates it, and only with a change produced
/// by [`StaySelection::select`], so a check-out is never set without a valid
/// check-in before it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaySelection {
    check_in: Option<NaiveDate>,
    check_out: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionPhase {
    NoSelection,
    CheckInOnly,
    CompletePair,
}

/// Outcome of clicking an enabled day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    CheckIn(NaiveDate),
    CheckOut(NaiveDate),
}

impl StaySelection {
    #[must_use]
    pub fn check_in(&self) -> Option<NaiveDate> {
        self.check_in
    }

    #[must_use]
    pub fn check_out(&self) -> Option<NaiveDate> {
        self.check_out
    }

    #[must_use]
    pub fn phase(&self) -> SelectionPhase {
        match (self.check_in, self.check_out) {
            (Some(_), Some(_)) => SelectionPhase::CompletePair,
            (Some(_), None) => SelectionPhase::CheckInOnly,
            _ => SelectionPhase::NoSelection,
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase() == SelectionPhase::CompletePair
    }

    /// Decide what clicking `day` does. `None` means the day is disabled and
    /// the click is ignored.
    #[must_use]
    pub fn select(
        &self,
        day: NaiveDate,
        today: NaiveDate,
        policy: &SeasonPolicy,
    ) -> Option<SelectionChange> {
        if is_disabled(day, self, today, policy) {
            return None;
        }

        match (self.check_in, self.check_out) {
            (Some(check_in), None) if day > check_in => Some(SelectionChange::CheckOut(day)),
            _ => Some(SelectionChange::CheckIn(day)),
        }
    }

    pub fn apply(&mut self, change: SelectionChange) {
        match change {
            SelectionChange::CheckIn(day) => {
                self.check_in = Some(day);
                self.check_out = None;
            }
            SelectionChange::CheckOut(day) => self.check_out = Some(day),
        }
    }

    #[must_use]
    pub fn is_selected(&self, day: NaiveDate) -> bool {
        self.check_in == Some(day) || self.check_out == Some(day)
    }

    /// Strictly between a complete check-in and check-out.
    #[must_use]
    pub fn is_in_range(&self, day: NaiveDate) -> bool {
        match (self.check_in, self.check_out) {
            (Some(check_in), Some(check_out)) => day > check_in && day < check_out,
            _ => false,
        }
    }
}

/// Whether a calendar day can be clicked given the current selection.
///
/// Past days are always disabled. While a check-out is being picked, later
/// days must leave at least the minimum stay and every night up to them must
/// be open. The check-out day itself is not a night, so a stay may end on the
/// first day of a closed month. Every other day is enabled only inside the
/// open season.
#[must_use]
pub fn is_disabled(
    day: NaiveDate,
    selection: &StaySelection,
    today: NaiveDate,
    policy: &SeasonPolicy,
) -> bool {
    if day < today {
        return true;
    }

    if let (Some(check_in), None) = (selection.check_in, selection.check_out) {
        if day > check_in {
            if (day - check_in).num_days() < policy.minimum_nights {
                return true;
            }
            return check_in
                .iter_days()
                .take_while(|night| *night < day)
                .any(|night| !policy.is_open(night));
        }
    }

    !policy.is_open(day)
}
