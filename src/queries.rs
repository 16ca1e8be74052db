use chrono::NaiveDate;
use cqrs_es::persist::GenericQuery;
use cqrs_es::{EventEnvelope, View};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::calendar::{CalendarMonth, CalendarPage};
use crate::domain::contact::ContactDetails;
use crate::domain::events::ReservationEvent;
use crate::domain::guests::GuestCount;
use crate::domain::quote::{StayQuote, format_euros};
use crate::domain::reservation::{BookingPolicy, CheckoutStep, Reservation};
use crate::domain::season::RateCard;
use crate::domain::selection::{SelectionChange, StaySelection};
use crate::view_repository::MemViewRepository;

pub type ReservationViewRepository = MemViewRepository<ReservationView, Reservation>;

// Serializes each updated view into the in-memory repository and provides a
// `load` method to read it back for rendering.
pub type ReservationQuery = GenericQuery<ReservationViewRepository, ReservationView, Reservation>;

/// The read side of a reservation: everything the booking panel renders,
/// kept up to date as events are committed.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
pub struct ReservationView {
    pub id: Uuid,
    pub step: CheckoutStep,
    pub month: CalendarMonth,
    pub selection: StaySelection,
    pub quote: StayQuote,
    pub guests: GuestCount,
    pub contact: ContactDetails,
    pub payment_reference: Option<Uuid>,
}

// Events carry the priced quote, so no calculation happens here.
impl View<Reservation> for ReservationView {
    fn update(&mut self, event: &EventEnvelope<Reservation>) {
        match &event.payload {
            ReservationEvent::Started { id, month, guests } => {
                *self = ReservationView {
                    id: *id,
                    month: *month,
                    guests: *guests,
                    ..ReservationView::default()
                };
            }
            ReservationEvent::MonthShown { month } => self.month = *month,
            ReservationEvent::CheckInSelected { date } => {
                self.selection.apply(SelectionChange::CheckIn(*date));
                self.quote = StayQuote::default();
            }
            ReservationEvent::CheckOutSelected { date, quote } => {
                self.selection.apply(SelectionChange::CheckOut(*date));
                self.quote = *quote;
            }
            ReservationEvent::GuestsChanged { guests } => self.guests = *guests,
            ReservationEvent::ContactEntryOpened => self.step = CheckoutStep::ContactEntry,
            ReservationEvent::ContactUpdated { field, value } => {
                self.contact.set(*field, value.clone());
            }
            ReservationEvent::ReturnedToSelection => self.step = CheckoutStep::Selecting,
            ReservationEvent::PaymentHandoffRequested { reference, .. } => {
                self.step = CheckoutStep::Processing;
                self.payment_reference = Some(*reference);
            }
        }
    }
}

impl ReservationView {
    #[must_use]
    pub fn can_continue(&self) -> bool {
        self.step == CheckoutStep::Selecting && self.selection.is_complete()
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.step == CheckoutStep::ContactEntry && self.contact.is_complete()
    }
}

/// One render's worth of booking panel data, derived from a view and today's date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingScreen {
    pub step: CheckoutStep,
    pub calendar: Option<CalendarPage>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub nights: u32,
    pub nights_label: String,
    pub total: String,
    pub cleaning_fee: String,
    pub guests: u8,
    pub can_add_guest: bool,
    pub can_remove_guest: bool,
    pub can_continue: bool,
    pub can_submit: bool,
    pub rate_card: Option<RateCard>,
    pub contact: ContactDetails,
    pub payment_reference: Option<Uuid>,
}

impl BookingScreen {
    #[must_use]
    pub fn render(view: &ReservationView, today: NaiveDate, policy: &BookingPolicy) -> Self {
        let selecting = view.step == CheckoutStep::Selecting;
        let calendar = selecting
            .then(|| CalendarPage::build(view.month, &view.selection, today, &policy.season));
        // The rules card fills the summary slot until both dates are picked.
        let rate_card = (selecting && !view.selection.is_complete())
            .then(|| policy.season.rate_card(policy.guests.max));

        Self {
            step: view.step,
            calendar,
            check_in: view.selection.check_in(),
            check_out: view.selection.check_out(),
            nights: view.quote.nights,
            nights_label: view.quote.nights_label(),
            total: format_euros(view.quote.total_cost),
            cleaning_fee: format_euros(StayQuote::CLEANING_FEE),
            guests: view.guests.get(),
            can_add_guest: selecting && view.guests.can_increment(&policy.guests),
            can_remove_guest: selecting && view.guests.can_decrement(&policy.guests),
            can_continue: view.can_continue(),
            can_submit: view.can_submit(),
            rate_card,
            contact: view.contact.clone(),
            payment_reference: view.payment_reference,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::domain::contact::ContactField;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn envelope(
        id: Uuid,
        sequence: usize,
        payload: ReservationEvent,
    ) -> EventEnvelope<Reservation> {
        EventEnvelope {
            aggregate_id: id.to_string(),
            sequence,
            payload,
            metadata: HashMap::default(),
        }
    }

    fn replay(id: Uuid, events: Vec<ReservationEvent>) -> ReservationView {
        let mut view = ReservationView::default();
        for (i, event) in events.into_iter().enumerate() {
            view.update(&envelope(id, i + 1, event));
        }
        view
    }

    fn may_stay(id: Uuid) -> Vec<ReservationEvent> {
        vec![
            ReservationEvent::Started {
                id,
                month: CalendarMonth::new(2027, 5).unwrap(),
                guests: GuestCount::default(),
            },
            ReservationEvent::CheckInSelected {
                date: date(2027, 5, 10),
            },
            ReservationEvent::CheckOutSelected {
                date: date(2027, 5, 14),
                quote: StayQuote {
                    nights: 4,
                    total_cost: 660,
                },
            },
        ]
    }

    #[test]
    fn started_view() {
        let id = Uuid::new_v4();
        let view = replay(id, may_stay(id).into_iter().take(1).collect());

        assert_eq!(view.id, id);
        assert_eq!(view.step, CheckoutStep::Selecting);
        assert_eq!(view.guests.get(), 2);
        assert_eq!(view.quote, StayQuote::default());
        assert!(!view.can_continue());
    }

    #[test]
    fn priced_stay_summary() {
        let id = Uuid::new_v4();
        let view = replay(id, may_stay(id));

        assert_eq!(view.selection.check_in(), Some(date(2027, 5, 10)));
        assert_eq!(view.selection.check_out(), Some(date(2027, 5, 14)));
        assert_eq!(view.quote.nights, 4);
        assert_eq!(view.quote.total_cost, 660);
        assert!(view.can_continue());
    }

    #[test]
    fn contact_and_handoff() {
        let id = Uuid::new_v4();
        let reference = Uuid::new_v4();
        let mut events = may_stay(id);
        events.push(ReservationEvent::ContactEntryOpened);
        for field in ContactField::REQUIRED {
            events.push(ReservationEvent::ContactUpdated {
                field,
                value: "x".to_string(),
            });
        }

        let view = replay(id, events.clone());
        assert_eq!(view.step, CheckoutStep::ContactEntry);
        assert!(view.can_submit());
        assert!(!view.can_continue());

        events.push(ReservationEvent::PaymentHandoffRequested {
            reference,
            total_cost: 660,
        });
        let view = replay(id, events);
        assert_eq!(view.step, CheckoutStep::Processing);
        assert_eq!(view.payment_reference, Some(reference));
        assert!(!view.can_submit());
    }

    #[test]
    fn screen_shows_rate_card_until_dates_are_picked() {
        let id = Uuid::new_v4();
        let policy = BookingPolicy::default();
        let today = date(2027, 3, 1);

        let partial = replay(id, may_stay(id).into_iter().take(2).collect());
        let screen = BookingScreen::render(&partial, today, &policy);
        assert!(screen.rate_card.is_some());
        assert!(screen.calendar.is_some());
        assert_eq!(screen.total, "€0");
        assert!(!screen.can_continue);

        let complete = replay(id, may_stay(id));
        let screen = BookingScreen::render(&complete, today, &policy);
        assert!(screen.rate_card.is_none());
        assert_eq!(screen.nights_label, "4 nights");
        assert_eq!(screen.total, "€660");
        assert_eq!(screen.cleaning_fee, "€0");
        assert!(screen.can_add_guest);
        assert!(screen.can_remove_guest);
        assert!(screen.can_continue);
    }

    #[test]
    fn screen_hides_calendar_after_continue() {
        let id = Uuid::new_v4();
        let mut events = may_stay(id);
        events.push(ReservationEvent::ContactEntryOpened);
        let view = replay(id, events);

        let screen = BookingScreen::render(&view, date(2027, 3, 1), &BookingPolicy::default());

        assert_eq!(screen.step, CheckoutStep::ContactEntry);
        assert!(screen.calendar.is_none());
        assert!(!screen.can_add_guest);
        assert_eq!(screen.total, "€660");
    }
}
