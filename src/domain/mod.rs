pub mod calendar;
pub mod commands;
pub mod contact;
pub mod events;
pub mod guests;
pub mod quote;
pub mod reservation;
pub mod season;
pub mod selection;
