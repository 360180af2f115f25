//! ReservaPlus SDK
//!
//! This crate provides the public API for the reservaplus module:
//! - `ReservaPlusClientV1` trait for in-process consumers
//! - Model types (`PlanSummary`, `RegistrationStatus`, `AccountStatus`, ...)
//! - Error type (`ReservaPlusError`)
//!
//! ```ignore
//! let status = client.check_registration("abc123").await?;
//! println!("{}", status.selected_plan.name);
//! ```

#![forbid(unsafe_code)]

pub mod api;
pub mod errors;
pub mod models;

pub use api::ReservaPlusClientV1;
pub use errors::ReservaPlusError;
pub use models::{
    AccountProfile, AccountStatus, Organization, PlanSummary, ProfileOrganization,
    RegistrationStatus, RegistrationUserData, SelectedPlan, UserInfo,
};
