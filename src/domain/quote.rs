use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::season::SeasonPolicy;

/// Nights and total price for a stay, in whole Euros.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayQuote {
    pub nights: u32,
    pub total_cost: u32,
}

impl StayQuote {
    /// Cleaning is included in the nightly rate.
    pub const CLEANING_FEE: u32 = 0;

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nights == 0
    }

    /// "4 nights", "1 night"
    #[must_use]
    pub fn nights_label(&self) -> String {
        if self.nights == 1 {
            "1 night".to_string()
        } else {
            format!("{} nights", self.nights)
        }
    }
}

/// Price every night from `check_in` up to, but not including, `check_out`.
#[must_use]
pub fn compute_stay(
    check_in: NaiveDate,
    check_out: Option<NaiveDate>,
    policy: &SeasonPolicy,
) -> StayQuote {
    let Some(check_out) = check_out.filter(|check_out| *check_out > check_in) else {
        return StayQuote::default();
    };

    check_in
        .iter_days()
        .take_while(|night| *night < check_out)
        .fold(StayQuote::default(), |quote, night| StayQuote {
            nights: quote.nights.saturating_add(1),
            total_cost: quote.total_cost.saturating_add(policy.nightly_rate(night)),
        })
}

/// Whole Euros with comma thousands separators, e.g. `€1,155`.
#[must_use]
pub fn format_euros(amount: u32) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("€{grouped}")
}
