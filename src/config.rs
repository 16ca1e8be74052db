use std::str::FromStr;
use std::sync::Arc;

use cqrs_es::mem_store::MemStore;
use cqrs_es::{CqrsFramework, Query};
use thiserror::Error;

use crate::SimpleLoggingQuery;
use crate::domain::guests::GuestLimits;
use crate::domain::reservation::{BookingPolicy, Reservation, ReservationServices};
use crate::domain::season::SeasonPolicy;
use crate::queries::{ReservationQuery, ReservationViewRepository};
use crate::services::clock::Clock;
use crate::services::payment::PaymentGateway;

pub type ReservationCqrs = CqrsFramework<Reservation, MemStore<Reservation>>;

/// Settings read from the environment (and `.env`, when present).
#[derive(Debug, Clone, PartialEq)]
pub struct BookingConfig {
    pub policy: BookingPolicy,
    pub log_level: String,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            policy: BookingPolicy::default(),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key} has invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
    #[error("{key} must be at least {min}, got {value}")]
    TooSmall {
        key: &'static str,
        min: i64,
        value: i64,
    },
}

impl BookingConfig {
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed or is out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed or is out of range.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let season = SeasonPolicy {
            peak_rate: parse_or(&lookup, "VILLA_PEAK_RATE", defaults.policy.season.peak_rate)?,
            standard_rate: parse_or(
                &lookup,
                "VILLA_STANDARD_RATE",
                defaults.policy.season.standard_rate,
            )?,
            minimum_nights: parse_or(
                &lookup,
                "VILLA_MINIMUM_NIGHTS",
                defaults.policy.season.minimum_nights,
            )?,
            ..defaults.policy.season
        };
        at_least("VILLA_MINIMUM_NIGHTS", season.minimum_nights, 1)?;

        let guests = GuestLimits {
            max: parse_or(&lookup, "VILLA_MAX_GUESTS", defaults.policy.guests.max)?,
            ..defaults.policy.guests
        };
        at_least("VILLA_MAX_GUESTS", i64::from(guests.max), i64::from(guests.min))?;
        let guests = GuestLimits {
            initial: guests.initial.min(guests.max),
            ..guests
        };

        Ok(Self {
            policy: BookingPolicy { season, guests },
            log_level: lookup("VILLA_LOG_LEVEL").unwrap_or(defaults.log_level),
        })
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

fn at_least(key: &'static str, value: i64, min: i64) -> Result<(), ConfigError> {
    if value < min {
        Err(ConfigError::TooSmall { key, min, value })
    } else {
        Ok(())
    }
}

#[must_use]
pub fn cqrs_framework(
    config: &BookingConfig,
    clock: Arc<dyn Clock>,
    payment: Arc<dyn PaymentGateway>,
) -> (Arc<ReservationCqrs>, Arc<ReservationViewRepository>) {
    // Logs each committed event.
    let simple_query = SimpleLoggingQuery {};

    // Keeps the booking panel's read model current.
    let view_repo = Arc::new(ReservationViewRepository::new());
    let mut reservation_query = ReservationQuery::new(view_repo.clone());
    reservation_query.use_error_handler(Box::new(|e| {
        tracing::error!(error = %e, "reservation view update failed");
    }));

    let queries: Vec<Box<dyn Query<Reservation>>> =
        vec![Box::new(simple_query), Box::new(reservation_query)];
    let services = ReservationServices::new(clock, payment, config.policy.clone());

    (
        Arc::new(CqrsFramework::new(MemStore::default(), queries, services)),
        view_repo,
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_variables() {
        let config = BookingConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config, BookingConfig::default());
        assert_eq!(config.policy.season.peak_rate, 195);
        assert_eq!(config.policy.season.standard_rate, 165);
        assert_eq!(config.policy.season.minimum_nights, 4);
        assert_eq!(config.policy.guests.max, 4);
    }

    #[test]
    fn overrides_from_variables() {
        let config = BookingConfig::from_lookup(lookup(&[
            ("VILLA_PEAK_RATE", "210"),
            ("VILLA_STANDARD_RATE", " 170 "),
            ("VILLA_MINIMUM_NIGHTS", "3"),
            ("VILLA_MAX_GUESTS", "6"),
            ("VILLA_LOG_LEVEL", "debug"),
        ]))
        .unwrap();

        assert_eq!(config.policy.season.peak_rate, 210);
        assert_eq!(config.policy.season.standard_rate, 170);
        assert_eq!(config.policy.season.minimum_nights, 3);
        assert_eq!(config.policy.guests.max, 6);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn single_guest_capacity_lowers_initial_count() {
        let config = BookingConfig::from_lookup(lookup(&[("VILLA_MAX_GUESTS", "1")])).unwrap();

        assert_eq!(config.policy.guests.initial, 1);
    }

    #[test]
    fn unparsable_value() {
        let err = BookingConfig::from_lookup(lookup(&[("VILLA_PEAK_RATE", "lots")])).unwrap_err();

        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "VILLA_PEAK_RATE",
                value: "lots".to_string()
            }
        );
    }

    #[test]
    fn zero_minimum_stay_is_rejected() {
        let err =
            BookingConfig::from_lookup(lookup(&[("VILLA_MINIMUM_NIGHTS", "0")])).unwrap_err();

        assert_eq!(
            err,
            ConfigError::TooSmall {
                key: "VILLA_MINIMUM_NIGHTS",
                min: 1,
                value: 0
            }
        );
    }
}
