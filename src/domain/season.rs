use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// The rentable season and the nightly rates charged inside it.
///
/// Months are 1-based (`5` is May). A date is open when its month falls in
/// `first_open_month..=last_open_month`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonPolicy {
    pub first_open_month: u32,
    pub last_open_month: u32,
    pub peak_months: Vec<u32>,
    pub peak_rate: u32,
    pub standard_rate: u32,
    pub minimum_nights: i64,
}

impl Default for SeasonPolicy {
    fn default() -> Self {
        Self {
            first_open_month: 5,
            last_open_month: 10,
            peak_months: vec![7, 8],
            peak_rate: 195,
            standard_rate: 165,
            minimum_nights: 4,
        }
    }
}

impl SeasonPolicy {
    #[must_use]
    pub fn is_open(&self, date: NaiveDate) -> bool {
        self.is_open_month(date.month())
    }

    #[must_use]
    pub fn is_open_month(&self, month: u32) -> bool {
        (self.first_open_month..=self.last_open_month).contains(&month)
    }

    #[must_use]
    pub fn is_peak(&self, date: NaiveDate) -> bool {
        self.peak_months.contains(&date.month())
    }

    /// Price of the night starting on `date`, in whole Euros.
    ///
    /// Only meaningful for open-season dates. A stay never contains a closed
    /// night, see [`crate::domain::selection::is_disabled`].
    #[must_use]
    pub fn nightly_rate(&self, date: NaiveDate) -> u32 {
        if self.is_peak(date) {
            self.peak_rate
        } else {
            self.standard_rate
        }
    }

    /// The rules summary shown next to the calendar before dates are chosen.
    #[must_use]
    pub fn rate_card(&self, max_guests: u8) -> RateCard {
        let standard_months = (self.first_open_month..=self.last_open_month)
            .filter(|month| !self.peak_months.contains(month))
            .collect();
        RateCard {
            standard_months,
            standard_rate: self.standard_rate,
            peak_months: self.peak_months.clone(),
            peak_rate: self.peak_rate,
            minimum_nights: self.minimum_nights,
            max_guests,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateCard {
    pub standard_months: Vec<u32>,
    pub standard_rate: u32,
    pub peak_months: Vec<u32>,
    pub peak_rate: u32,
    pub minimum_nights: i64,
    pub max_guests: u8,
}

/// Whether `date` lies in the default May to October season.
#[must_use]
pub fn is_open_season(date: NaiveDate) -> bool {
    SeasonPolicy::default().is_open(date)
}

/// Nightly rate under the default policy: 195 in July and August, 165 otherwise.
#[must_use]
pub fn nightly_rate(date: NaiveDate) -> u32 {
    SeasonPolicy::default().nightly_rate(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn season_runs_from_may_to_october() {
        assert!(!is_open_season(date(2027, 4, 30)));
        assert!(is_open_season(date(2027, 5, 1)));
        assert!(is_open_season(date(2027, 10, 31)));
        assert!(!is_open_season(date(2027, 11, 1)));
        assert!(!is_open_season(date(2027, 1, 15)));
    }

    #[test]
    fn july_and_august_are_peak() {
        assert_eq!(nightly_rate(date(2027, 7, 1)), 195);
        assert_eq!(nightly_rate(date(2027, 8, 31)), 195);
        assert_eq!(nightly_rate(date(2027, 5, 10)), 165);
        assert_eq!(nightly_rate(date(2027, 6, 30)), 165);
        assert_eq!(nightly_rate(date(2027, 9, 1)), 165);
        assert_eq!(nightly_rate(date(2027, 10, 31)), 165);
    }

    #[test]
    fn rate_card_splits_standard_and_peak_months() {
        let card = SeasonPolicy::default().rate_card(4);

        assert_eq!(card.standard_months, vec![5, 6, 9, 10]);
        assert_eq!(card.peak_months, vec![7, 8]);
        assert_eq!(card.minimum_nights, 4);
        assert_eq!(card.max_guests, 4);
    }
}
