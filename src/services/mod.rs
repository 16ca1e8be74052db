pub mod clock;
pub mod payment;
