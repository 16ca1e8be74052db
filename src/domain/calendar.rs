use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::season::SeasonPolicy;
use crate::domain::selection::{StaySelection, is_disabled};

/// The month currently shown in the booking calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CalendarMonth {
    year: i32,
    month: u32,
}

impl Default for CalendarMonth {
    fn default() -> Self {
        Self {
            year: 1970,
            month: 1,
        }
    }
}

impl CalendarMonth {
    /// `None` unless `month` is in `1..=12`.
    #[must_use]
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self::containing)
    }

    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Month the calendar opens on. Off-season visitors land on the next May
    /// rather than on a month with nothing to book.
    #[must_use]
    pub fn initial_for(today: NaiveDate, policy: &SeasonPolicy) -> Self {
        let current = Self::containing(today);
        if policy.is_open_month(current.month) {
            current
        } else if current.month > policy.last_open_month {
            Self {
                year: current.year + 1,
                month: policy.first_open_month,
            }
        } else {
            Self {
                year: current.year,
                month: policy.first_open_month,
            }
        }
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    #[must_use]
    pub fn month(&self) -> u32 {
        self.month
    }

    #[must_use]
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    #[must_use]
    pub fn days_in_month(&self) -> u32 {
        self.next().first_day().pred_opt().map_or(31, |last| last.day())
    }

    #[must_use]
    pub fn next(&self) -> Self {
        self.first_day()
            .checked_add_months(Months::new(1))
            .map_or(*self, Self::containing)
    }

    #[must_use]
    pub fn previous(&self) -> Self {
        self.first_day()
            .checked_sub_months(Months::new(1))
            .map_or(*self, Self::containing)
    }

    /// The previous month, unless that would scroll before the month `today`
    /// falls in.
    #[must_use]
    pub fn show_previous(&self, today: NaiveDate) -> Option<Self> {
        let previous = self.previous();
        (previous >= Self::containing(today)).then_some(previous)
    }

    /// "May 2027"
    #[must_use]
    pub fn label(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }

    /// Closed months get an "Off Season" note, except the one right after the
    /// season where departures are still possible.
    #[must_use]
    pub fn off_season_notice(&self, policy: &SeasonPolicy) -> bool {
        !policy.is_open_month(self.month) && self.month != policy.last_open_month % 12 + 1
    }
}

/// Calendar cells for `month`: one `None` per weekday before the 1st
/// (weeks start on Sunday), then every day of the month.
#[must_use]
pub fn month_grid(month: CalendarMonth) -> Vec<Option<NaiveDate>> {
    let first = month.first_day();
    let leading = first.weekday().num_days_from_sunday() as usize;

    std::iter::repeat_n(None, leading)
        .chain(first.iter_days().take(month.days_in_month() as usize).map(Some))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalendarCell {
    Empty,
    Day {
        date: NaiveDate,
        disabled: bool,
        selected: bool,
        in_range: bool,
    },
}

/// Everything the calendar panel needs for one render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarPage {
    pub month: CalendarMonth,
    pub label: String,
    pub off_season: bool,
    pub can_go_back: bool,
    pub cells: Vec<CalendarCell>,
}

impl CalendarPage {
    #[must_use]
    pub fn build(
        month: CalendarMonth,
        selection: &StaySelection,
        today: NaiveDate,
        policy: &SeasonPolicy,
    ) -> Self {
        let cells = month_grid(month)
            .into_iter()
            .map(|cell| match cell {
                None => CalendarCell::Empty,
                Some(date) => CalendarCell::Day {
                    date,
                    disabled: is_disabled(date, selection, today, policy),
                    selected: selection.is_selected(date),
                    in_range: selection.is_in_range(date),
                },
            })
            .collect();

        Self {
            month,
            label: month.label(),
            off_season: month.off_season_notice(policy),
            can_go_back: month.show_previous(today).is_some(),
            cells,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::selection::SelectionChange;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn month(y: i32, m: u32) -> CalendarMonth {
        CalendarMonth::new(y, m).unwrap()
    }

    #[test]
    fn grid_starts_on_the_right_weekday() {
        // 1 May 2027 is a Saturday.
        let grid = month_grid(month(2027, 5));

        assert_eq!(grid.len(), 6 + 31);
        assert!(grid[..6].iter().all(Option::is_none));
        assert_eq!(grid[6], Some(date(2027, 5, 1)));
        assert_eq!(grid.last(), Some(&Some(date(2027, 5, 31))));
    }

    #[test]
    fn grid_without_leading_blanks() {
        // 1 August 2027 is a Sunday.
        let grid = month_grid(month(2027, 8));

        assert_eq!(grid[0], Some(date(2027, 8, 1)));
        assert_eq!(grid.len(), 31);
    }

    #[test]
    fn february_length_follows_leap_years() {
        assert_eq!(month(2028, 2).days_in_month(), 29);
        assert_eq!(month(2027, 2).days_in_month(), 28);
        assert_eq!(month(2027, 12).days_in_month(), 31);
    }

    #[test]
    fn next_month_is_unbounded_and_wraps_years() {
        assert_eq!(month(2027, 12).next(), month(2028, 1));
        assert_eq!(month(2027, 5).next(), month(2027, 6));
    }

    #[test]
    fn previous_month_stops_at_current_month() {
        let today = date(2027, 6, 18);

        assert_eq!(month(2027, 6).show_previous(today), None);
        assert_eq!(month(2027, 7).show_previous(today), Some(month(2027, 6)));
        assert_eq!(month(2028, 1).show_previous(today), Some(month(2027, 12)));
    }

    #[test]
    fn initial_month_skips_the_off_season() {
        let policy = SeasonPolicy::default();

        assert_eq!(
            CalendarMonth::initial_for(date(2026, 11, 3), &policy),
            month(2027, 5)
        );
        assert_eq!(
            CalendarMonth::initial_for(date(2027, 2, 14), &policy),
            month(2027, 5)
        );
        assert_eq!(
            CalendarMonth::initial_for(date(2027, 8, 14), &policy),
            month(2027, 8)
        );
    }

    #[test]
    fn off_season_notice_skips_november() {
        let policy = SeasonPolicy::default();

        assert!(!month(2027, 11).off_season_notice(&policy));
        assert!(month(2027, 12).off_season_notice(&policy));
        assert!(month(2028, 3).off_season_notice(&policy));
        assert!(!month(2027, 7).off_season_notice(&policy));
    }

    #[test]
    fn label_names_month_and_year() {
        assert_eq!(month(2027, 5).label(), "May 2027");
    }

    #[test]
    fn page_classifies_cells() {
        let policy = SeasonPolicy::default();
        let today = date(2027, 5, 5);
        let mut selection = StaySelection::default();
        selection.apply(SelectionChange::CheckIn(date(2027, 5, 10)));
        selection.apply(SelectionChange::CheckOut(date(2027, 5, 14)));

        let page = CalendarPage::build(month(2027, 5), &selection, today, &policy);
        let day = |d: u32| {
            page.cells
                .iter()
                .find(|cell| {
                    matches!(cell, CalendarCell::Day { date: found, .. } if *found == date(2027, 5, d))
                })
                .cloned()
                .unwrap()
        };

        assert_eq!(page.label, "May 2027");
        assert!(!page.can_go_back);
        assert!(matches!(day(4), CalendarCell::Day { disabled: true, .. }));
        assert!(matches!(
            day(10),
            CalendarCell::Day {
                disabled: false,
                selected: true,
                in_range: false,
                ..
            }
        ));
        assert!(matches!(
            day(12),
            CalendarCell::Day {
                selected: false,
                in_range: true,
                ..
            }
        ));
        assert_eq!(
            page.cells
                .iter()
                .filter(|cell| **cell == CalendarCell::Empty)
                .count(),
            6
        );
    }
}
