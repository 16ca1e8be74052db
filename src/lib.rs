pub mod config;
pub mod domain;
pub mod logging;
pub mod page;
pub mod queries;
pub mod services;
pub mod state;
pub mod view_repository;

use async_trait::async_trait;
use cqrs_es::{Aggregate, EventEnvelope, Query};

/// Logs every committed event at debug level.
pub struct SimpleLoggingQuery {}

#[async_trait]
impl<A> Query<A> for SimpleLoggingQuery
where
    A: Aggregate,
{
    async fn dispatch(&self, aggregate_id: &str, events: &[EventEnvelope<A>]) {
        for event in events {
            tracing::debug!(
                aggregate_id,
                sequence = event.sequence,
                payload = ?event.payload,
                "event committed"
            );
        }
    }
}
