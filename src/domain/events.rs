use chrono::NaiveDate;
use cqrs_es::DomainEvent;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::calendar::CalendarMonth;
use crate::domain::contact::ContactField;
use crate::domain::guests::GuestCount;
use crate::domain::quote::StayQuote;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ReservationEvent {
    Started {
        id: Uuid,
        month: CalendarMonth,
        guests: GuestCount,
    },
    MonthShown {
        month: CalendarMonth,
    },
    CheckInSelected {
        date: NaiveDate,
    },
    CheckOutSelected {
        date: NaiveDate,
        quote: StayQuote,
    },
    GuestsChanged {
        guests: GuestCount,
    },
    ContactEntryOpened,
    ContactUpdated {
        field: ContactField,
        value: String,
    },
    ReturnedToSelection,
    PaymentHandoffRequested {
        reference: Uuid,
        total_cost: u32,
    },
}

impl DomainEvent for ReservationEvent {
    fn event_type(&self) -> String {
        let event_type: &str = match self {
            ReservationEvent::Started { .. } => "ReservationOpened",
            ReservationEvent::MonthShown { .. } => "MonthShown",
            ReservationEvent::CheckInSelected { .. } => "CheckInSelected",
            ReservationEvent::CheckOutSelected { .. } => "CheckOutSelected",
            ReservationEvent::GuestsChanged { .. } => "GuestsChanged",
            ReservationEvent::ContactEntryOpened => "ContactEntryOpened",
            ReservationEvent::ContactUpdated { .. } => "ContactUpdated",
            ReservationEvent::ReturnedToSelection => "ReturnedToSelection",
            ReservationEvent::PaymentHandoffRequested { .. } => "PaymentHandoffRequested",
        };
        event_type.to_string()
    }

    fn event_version(&self) -> String {
        "1.0".to_string()
    }
}
