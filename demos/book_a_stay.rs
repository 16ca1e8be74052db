//! Walks one guest through the booking panel: dates, guests, contact details
//! and the simulated payment handoff.
//!
//! Run with: `cargo run --example book_a_stay`

use std::sync::Arc;

use chrono::NaiveDate;
use cqrs_es::{CqrsFramework, EventStore, mem_store::MemStore};
use uuid::Uuid;
use villa_booking::SimpleLoggingQuery;
use villa_booking::domain::commands::ReservationCommand;
use villa_booking::domain::contact::ContactField;
use villa_booking::domain::reservation::{BookingPolicy, Reservation, ReservationServices};
use villa_booking::services::clock::FixedClock;
use villa_booking::services::payment::SimulatedPaymentGateway;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    villa_booking::logging::init("debug");

    let today = NaiveDate::from_ymd_opt(2027, 2, 1).ok_or("bad date")?;
    let event_store = MemStore::<Reservation>::default();
    let services = ReservationServices::new(
        Arc::new(FixedClock(today)),
        Arc::new(SimulatedPaymentGateway),
        BookingPolicy::default(),
    );
    let cqrs = CqrsFramework::new(
        event_store.clone(),
        vec![Box::new(SimpleLoggingQuery {})],
        services,
    );

    let id = Uuid::new_v4();
    let aggregate_id = id.to_string();
    println!("Starting reservation {id} (today is {today})");

    let date = |m, d| NaiveDate::from_ymd_opt(2027, m, d).ok_or("bad date");
    let commands = vec![
        ReservationCommand::Start { id },
        ReservationCommand::SelectDate { date: date(7, 28)? },
        // Two nights is below the minimum stay, so this click is ignored.
        ReservationCommand::SelectDate { date: date(7, 30)? },
        ReservationCommand::SelectDate { date: date(8, 2)? },
        ReservationCommand::AddGuest,
        ReservationCommand::AddGuest,
        ReservationCommand::AddGuest,
        ReservationCommand::Continue,
        ReservationCommand::UpdateContact {
            field: ContactField::FirstName,
            value: "Ana".to_string(),
        },
        ReservationCommand::UpdateContact {
            field: ContactField::LastName,
            value: "Petrović".to_string(),
        },
        ReservationCommand::UpdateContact {
            field: ContactField::Email,
            value: "ana@example.com".to_string(),
        },
        ReservationCommand::UpdateContact {
            field: ContactField::Phone,
            value: "+385 91 555 0101".to_string(),
        },
        ReservationCommand::SubmitContact,
    ];
    for command in commands {
        cqrs.execute(&aggregate_id, command).await?;
    }

    let events = event_store.load_events(&aggregate_id).await?;
    println!("\n=== Reservation {id} Event History ===");
    for (i, event) in events.iter().enumerate() {
        println!("Event {}: {:?}", i + 1, event.payload);
    }

    Ok(())
}
