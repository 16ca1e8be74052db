use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::contact::ContactDetails;

/// What the payment processor is told about a stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub reservation_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u8,
    pub total_cost: u32,
    pub contact: ContactDetails,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentHandoff {
    pub reference: Uuid,
}

/// The external processor the guest is redirected to after entering their
/// details. Redirecting and settling the payment happen on its side.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn begin_checkout(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentHandoff, Box<dyn std::error::Error + Send + Sync>>;
}

/// Stands in for a hosted checkout: hands back a fresh reference and does no I/O.
pub struct SimulatedPaymentGateway;

#[async_trait]
impl PaymentGateway for SimulatedPaymentGateway {
    async fn begin_checkout(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentHandoff, Box<dyn std::error::Error + Send + Sync>> {
        let reference = Uuid::new_v4();
        tracing::info!(
            reservation_id = %request.reservation_id,
            %reference,
            total_cost = request.total_cost,
            "simulated payment handoff"
        );
        Ok(PaymentHandoff { reference })
    }
}

/// Always hands back the same reference, so events can be asserted exactly.
pub struct FixedPaymentGateway(pub Uuid);

#[async_trait]
impl PaymentGateway for FixedPaymentGateway {
    async fn begin_checkout(
        &self,
        _request: &PaymentRequest,
    ) -> Result<PaymentHandoff, Box<dyn std::error::Error + Send + Sync>> {
        Ok(PaymentHandoff { reference: self.0 })
    }
}
