use std::sync::Arc;

use cqrs_es::AggregateError;
use cqrs_es::persist::{PersistenceError, ViewRepository};
use uuid::Uuid;

use crate::config::{BookingConfig, ReservationCqrs, cqrs_framework};
use crate::domain::commands::ReservationCommand;
use crate::domain::reservation::{BookingPolicy, ReservationError};
use crate::queries::{BookingScreen, ReservationViewRepository};
use crate::services::clock::{Clock, SystemClock};
use crate::services::payment::{PaymentGateway, SimulatedPaymentGateway};

#[derive(Clone)]
pub struct ApplicationState {
    pub cqrs: Arc<ReservationCqrs>,
    pub reservation_views: Arc<ReservationViewRepository>,
    pub clock: Arc<dyn Clock>,
    pub policy: BookingPolicy,
}

/// Wires the reservation aggregate to the system clock and the simulated
/// payment processor.
#[must_use]
pub fn new_application_state(config: &BookingConfig) -> ApplicationState {
    ApplicationState::with_services(
        config,
        Arc::new(SystemClock),
        Arc::new(SimulatedPaymentGateway),
    )
}

impl ApplicationState {
    #[must_use]
    pub fn with_services(
        config: &BookingConfig,
        clock: Arc<dyn Clock>,
        payment: Arc<dyn PaymentGateway>,
    ) -> Self {
        let (cqrs, reservation_views) = cqrs_framework(config, clock.clone(), payment);
        Self {
            cqrs,
            reservation_views,
            clock,
            policy: config.policy.clone(),
        }
    }

    /// Open a new booking panel session.
    ///
    /// # Errors
    ///
    /// Returns an error if the event store rejects the command.
    pub async fn start(&self) -> Result<Uuid, AggregateError<ReservationError>> {
        let id = Uuid::new_v4();
        self.execute(id, ReservationCommand::Start { id }).await?;
        Ok(id)
    }

    /// # Errors
    ///
    /// Returns an error if the aggregate or event store rejects the command.
    pub async fn execute(
        &self,
        id: Uuid,
        command: ReservationCommand,
    ) -> Result<(), AggregateError<ReservationError>> {
        tracing::debug!(reservation_id = %id, ?command, "executing command");
        self.cqrs.execute(&id.to_string(), command).await
    }

    /// Current booking panel data for `id`, or `None` if it was never started.
    ///
    /// # Errors
    ///
    /// Returns an error if the view repository fails.
    pub async fn screen(&self, id: Uuid) -> Result<Option<BookingScreen>, PersistenceError> {
        let view = self.reservation_views.load(&id.to_string()).await?;
        Ok(view.map(|view| BookingScreen::render(&view, self.clock.today(), &self.policy)))
    }
}
