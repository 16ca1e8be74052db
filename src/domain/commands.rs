use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::contact::ContactField;

#[derive(Debug, Deserialize)]
pub enum ReservationCommand {
    Start {
        id: Uuid,
    },
    SelectDate {
        date: NaiveDate,
    },
    ShowNextMonth,
    ShowPreviousMonth,
    AddGuest,
    RemoveGuest,
    Continue,
    UpdateContact {
        field: ContactField,
        value: String,
    },
    SubmitContact,
    Back,
}
