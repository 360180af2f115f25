use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ProbeError;
use crate::resources::{FetchOutcome, OnboardingResources, Resource};

pub const STAGE_COUNT: usize = 6;

/// Onboarding stages, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Welcome = 0,
    Organization = 1,
    Professionals = 2,
    Services = 3,
    Configuration = 4,
    Complete = 5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OnboardingProgress {
    pub step: usize,
    pub completed: [bool; STAGE_COUNT],
}

impl OnboardingProgress {
    /// Conservative result used whenever a probe fails.
    #[must_use]
    pub fn from_start() -> Self {
        Self::from_completed([true, false, false, false, false, false])
    }

    /// `step` is the first incomplete stage. When every stage is complete it
    /// stays at 0.
    #[must_use]
    pub fn from_completed(completed: [bool; STAGE_COUNT]) -> Self {
        let step = completed.iter().position(|done| !done).unwrap_or(0);
        Self { step, completed }
    }

    #[must_use]
    pub fn is_done(&self, stage: Stage) -> bool {
        self.completed[stage as usize]
    }
}

struct Probes {
    organization: FetchOutcome,
    professionals: FetchOutcome,
    services: FetchOutcome,
}

async fn probe_all<R>(resources: &R) -> Result<Probes, ProbeError>
where
    R: OnboardingResources + ?Sized,
{
    let (organization, professionals, services) = tokio::join!(
        resources.fetch(Resource::Organization),
        resources.fetch(Resource::Professionals),
        resources.fetch(Resource::Services),
    );
    Ok(Probes {
        organization: organization?,
        professionals: professionals?,
        services: services?,
    })
}

async fn try_estimate<R>(resources: &R) -> Result<OnboardingProgress, ProbeError>
where
    R: OnboardingResources + ?Sized,
{
    let probes = probe_all(resources).await?;

    let mut completed = [false; STAGE_COUNT];
    completed[Stage::Welcome as usize] = true;
    completed[Stage::Organization as usize] = probes.organization.success;
    completed[Stage::Professionals as usize] = probes.professionals.has_items()?;
    completed[Stage::Services as usize] = probes.services.has_items()?;

    Ok(OnboardingProgress::from_completed(completed))
}

/// Estimate how far the account has progressed through onboarding.
///
/// Never fails: any transport or decode error yields
/// [`OnboardingProgress::from_start`].
pub async fn estimate_progress<R>(resources: &R) -> OnboardingProgress
where
    R: OnboardingResources + ?Sized,
{
    match try_estimate(resources).await {
        Ok(progress) => {
            debug!(step = progress.step, "estimated onboarding progress");
            progress
        }
        Err(e) => {
            warn!(error = %e, "onboarding probe failed, assuming fresh start");
            OnboardingProgress::from_start()
        }
    }
}

/// Whether the account still has to go through onboarding.
///
/// Complete means the organization exists and both the professionals and
/// services collections are non-empty. Fails open: any error returns `true`.
pub async fn needs_onboarding<R>(resources: &R) -> bool
where
    R: OnboardingResources + ?Sized,
{
    let complete = async {
        let probes = probe_all(resources).await?;
        Ok::<_, ProbeError>(
            probes.organization.success
                && probes.professionals.has_items()?
                && probes.services.has_items()?,
        )
    };

    match complete.await {
        Ok(complete) => !complete,
        Err(e) => {
            warn!(error = %e, "onboarding check failed, assuming onboarding is needed");
            true
        }
    }
}
