//! ReservaPlus Module Implementation
//!
//! The public API is defined in `reservaplus-sdk` and re-exported here.

pub use reservaplus_sdk::{
    AccountStatus, PlanSummary, RegistrationStatus, ReservaPlusClientV1, ReservaPlusError,
};

pub mod api;
pub mod config;
pub mod domain;
pub mod infra;

pub use api::rest::auth::{AuthState, TokenVerifier};
pub use api::rest::routes::router;
pub use config::{AuthConfig, ReservaPlusConfig, StoreBackend, StoreConfig};
pub use domain::catalog::static_catalog;
pub use domain::clock::{Clock, SystemClock};
pub use domain::local_client::LocalClient;
pub use domain::service::{Service, ServiceConfig};
pub use domain::store::KeyValueStore;
pub use infra::storage::build_store;
