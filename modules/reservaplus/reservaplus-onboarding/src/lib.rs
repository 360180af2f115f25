//! Onboarding progress estimation.
//!
//! Probes the three account-scoped collections (organization, professionals,
//! services) concurrently and reduces the outcome to a coarse step index.

pub mod config;
pub mod error;
pub mod http;
pub mod progress;
pub mod resources;

pub use config::OnboardingClientConfig;
pub use error::ProbeError;
pub use http::HttpOnboardingResources;
pub use progress::{OnboardingProgress, STAGE_COUNT, Stage, estimate_progress, needs_onboarding};
pub use resources::{FetchOutcome, OnboardingResources, Resource};
