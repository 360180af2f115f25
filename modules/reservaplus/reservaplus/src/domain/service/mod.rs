use std::sync::Arc;

use super::clock::Clock;
use crate::config::ReservaPlusConfig;
use super::store::KeyValueStore;

mod account;
mod plans;
mod registration;

// ============================================================================
// Service Configuration
// ============================================================================

pub struct ServiceConfig {
    pub max_token_length: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_token_length: 512,
        }
    }
}

impl From<&ReservaPlusConfig> for ServiceConfig {
    fn from(cfg: &ReservaPlusConfig) -> Self {
        Self {
            max_token_length: cfg.registration.max_token_length,
        }
    }
}

// ============================================================================
// Service Implementation
// ============================================================================

/// Plan catalog reader plus the registration and account status resolvers.
///
/// Stateless apart from the shared store handle; one instance serves every
/// request of the process.
pub struct Service {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    config: ServiceConfig,
}

impl Service {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>, config: ServiceConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }
}
