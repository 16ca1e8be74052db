use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use cqrs_es::Aggregate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::calendar::{CalendarMonth, CalendarPage};
use crate::domain::commands::ReservationCommand;
use crate::domain::contact::ContactDetails;
use crate::domain::events::ReservationEvent;
use crate::domain::guests::{GuestCount, GuestLimits};
use crate::domain::quote::{StayQuote, compute_stay};
use crate::domain::season::SeasonPolicy;
use crate::domain::selection::{SelectionChange, StaySelection};
use crate::services::clock::Clock;
use crate::services::payment::{PaymentGateway, PaymentRequest};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Reservation {
    id: Uuid,
    step: CheckoutStep,
    month: CalendarMonth,
    selection: StaySelection,
    quote: StayQuote,
    guests: GuestCount,
    contact: ContactDetails,
    payment_reference: Option<Uuid>,
}

/// Which screen of the booking panel is showing.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CheckoutStep {
    #[default]
    Selecting,
    ContactEntry,
    Processing,
}

#[async_trait]
impl Aggregate for Reservation {
    type Command = ReservationCommand;
    type Event = ReservationEvent;
    type Error = ReservationError;
    type Services = ReservationServices;

    fn aggregate_type() -> String {
        "Reservation".to_string()
    }

    // Anything the page would show as disabled is answered with no events
    // rather than an error.
    async fn handle(
        &self,
        command: Self::Command,
        services: &Self::Services,
    ) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            ReservationCommand::Start { id } => {
                if self.is_started() {
                    Err(ReservationError::AlreadyStarted)
                } else if id.is_nil() {
                    Err(ReservationError::InvalidId)
                } else {
                    let today = services.clock().today();
                    Ok(vec![ReservationEvent::Started {
                        id,
                        month: CalendarMonth::initial_for(today, &services.policy().season),
                        guests: GuestCount::initial(&services.policy().guests),
                    }])
                }
            }
            _ if !self.is_started() => Err(ReservationError::NotFound),
            ReservationCommand::SelectDate { date } => Ok(self.select_date(date, services)),
            ReservationCommand::ShowNextMonth => Ok(self.while_selecting(|| {
                vec![ReservationEvent::MonthShown {
                    month: self.month.next(),
                }]
            })),
            ReservationCommand::ShowPreviousMonth => Ok(self.while_selecting(|| {
                self.month
                    .show_previous(services.clock().today())
                    .map(|month| ReservationEvent::MonthShown { month })
                    .into_iter()
                    .collect()
            })),
            ReservationCommand::AddGuest => Ok(self.while_selecting(|| {
                self.change_guests(self.guests.increment(&services.policy().guests))
            })),
            ReservationCommand::RemoveGuest => Ok(self.while_selecting(|| {
                self.change_guests(self.guests.decrement(&services.policy().guests))
            })),
            ReservationCommand::Continue => Ok(self.while_selecting(|| {
                if self.selection.is_complete() {
                    vec![ReservationEvent::ContactEntryOpened]
                } else {
                    vec![]
                }
            })),
            ReservationCommand::UpdateContact { field, value } => {
                if self.step == CheckoutStep::ContactEntry && self.contact.get(field) != value {
                    Ok(vec![ReservationEvent::ContactUpdated { field, value }])
                } else {
                    Ok(vec![])
                }
            }
            ReservationCommand::SubmitContact => self.submit_contact(services).await,
            ReservationCommand::Back => {
                if self.step == CheckoutStep::ContactEntry {
                    Ok(vec![ReservationEvent::ReturnedToSelection])
                } else {
                    Ok(vec![])
                }
            }
        }
    }

    fn apply(&mut self, event: Self::Event) {
        match event {
            ReservationEvent::Started { id, month, guests } => {
                self.id = id;
                self.step = CheckoutStep::Selecting;
                self.month = month;
                self.guests = guests;
            }
            ReservationEvent::MonthShown { month } => {
                self.month = month;
            }
            ReservationEvent::CheckInSelected { date } => {
                self.selection.apply(SelectionChange::CheckIn(date));
                self.quote = StayQuote::default();
            }
            ReservationEvent::CheckOutSelected { date, quote } => {
                self.selection.apply(SelectionChange::CheckOut(date));
                self.quote = quote;
            }
            ReservationEvent::GuestsChanged { guests } => {
                self.guests = guests;
            }
            ReservationEvent::ContactEntryOpened => {
                self.step = CheckoutStep::ContactEntry;
            }
            ReservationEvent::ContactUpdated { field, value } => {
                self.contact.set(field, value);
            }
            ReservationEvent::ReturnedToSelection => {
                self.step = CheckoutStep::Selecting;
            }
            ReservationEvent::PaymentHandoffRequested { reference, .. } => {
                self.step = CheckoutStep::Processing;
                self.payment_reference = Some(reference);
            }
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ReservationError {
    #[error("Reservation not found")]
    NotFound,
    #[error("Reservation already started")]
    AlreadyStarted,
    #[error("Reservation id must not be nil")]
    InvalidId,
    #[error("Payment handoff failed: {0}")]
    PaymentHandoff(String),
}

/// Season, pricing and guest rules the reservation is checked against.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingPolicy {
    pub season: SeasonPolicy,
    pub guests: GuestLimits,
}

pub struct ReservationServices {
    clock: Arc<dyn Clock>,
    payment: Arc<dyn PaymentGateway>,
    policy: BookingPolicy,
}

impl ReservationServices {
    pub fn new(
        clock: Arc<dyn Clock>,
        payment: Arc<dyn PaymentGateway>,
        policy: BookingPolicy,
    ) -> Self {
        Self {
            clock,
            payment,
            policy,
        }
    }

    #[must_use]
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    #[must_use]
    pub fn payment(&self) -> &Arc<dyn PaymentGateway> {
        &self.payment
    }

    #[must_use]
    pub fn policy(&self) -> &BookingPolicy {
        &self.policy
    }
}

impl Reservation {
    fn is_started(&self) -> bool {
        self.id != Uuid::default()
    }

    fn while_selecting(
        &self,
        events: impl FnOnce() -> Vec<ReservationEvent>,
    ) -> Vec<ReservationEvent> {
        if self.step == CheckoutStep::Selecting {
            events()
        } else {
            tracing::debug!(
                reservation_id = %self.id,
                step = ?self.step,
                "ignored outside date selection"
            );
            vec![]
        }
    }

    fn select_date(
        &self,
        date: NaiveDate,
        services: &ReservationServices,
    ) -> Vec<ReservationEvent> {
        self.while_selecting(|| {
            let today = services.clock().today();
            let season = &services.policy().season;
            match self.selection.select(date, today, season) {
                None => {
                    tracing::debug!(reservation_id = %self.id, %date, "disabled date ignored");
                    vec![]
                }
                Some(SelectionChange::CheckIn(date)) => {
                    vec![ReservationEvent::CheckInSelected { date }]
                }
                Some(SelectionChange::CheckOut(date)) => {
                    let quote = self
                        .selection
                        .check_in()
                        .map(|check_in| compute_stay(check_in, Some(date), season))
                        .unwrap_or_default();
                    vec![ReservationEvent::CheckOutSelected { date, quote }]
                }
            }
        })
    }

    fn change_guests(&self, guests: GuestCount) -> Vec<ReservationEvent> {
        if guests == self.guests {
            vec![]
        } else {
            vec![ReservationEvent::GuestsChanged { guests }]
        }
    }

    async fn submit_contact(
        &self,
        services: &ReservationServices,
    ) -> Result<Vec<ReservationEvent>, ReservationError> {
        if self.step != CheckoutStep::ContactEntry || !self.contact.is_complete() {
            return Ok(vec![]);
        }
        let (Some(check_in), Some(check_out)) =
            (self.selection.check_in(), self.selection.check_out())
        else {
            return Ok(vec![]);
        };

        let request = PaymentRequest {
            reservation_id: self.id,
            check_in,
            check_out,
            guests: self.guests.get(),
            total_cost: self.quote.total_cost,
            contact: self.contact.clone(),
        };
        let handoff = services
            .payment()
            .begin_checkout(&request)
            .await
            .map_err(|e| ReservationError::PaymentHandoff(e.to_string()))?;

        Ok(vec![ReservationEvent::PaymentHandoffRequested {
            reference: handoff.reference,
            total_cost: self.quote.total_cost,
        }])
    }
}

impl Reservation {
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    #[must_use]
    pub fn month(&self) -> CalendarMonth {
        self.month
    }

    #[must_use]
    pub fn selection(&self) -> &StaySelection {
        &self.selection
    }

    #[must_use]
    pub fn quote(&self) -> StayQuote {
        self.quote
    }

    #[must_use]
    pub fn guests(&self) -> GuestCount {
        self.guests
    }

    #[must_use]
    pub fn contact(&self) -> &ContactDetails {
        &self.contact
    }

    #[must_use]
    pub fn payment_reference(&self) -> Option<Uuid> {
        self.payment_reference
    }

    /// Whether "Continue" is enabled.
    #[must_use]
    pub fn can_continue(&self) -> bool {
        self.step == CheckoutStep::Selecting && self.selection.is_complete()
    }

    /// Whether "Proceed to Payment" is enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.step == CheckoutStep::ContactEntry && self.contact.is_complete()
    }

    #[must_use]
    pub fn calendar_page(&self, today: NaiveDate, policy: &SeasonPolicy) -> CalendarPage {
        CalendarPage::build(self.month, &self.selection, today, policy)
    }
}
