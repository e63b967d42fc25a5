use std::sync::Arc;

use chrono::Utc;

use super::catalog::{CountrySummary, VisaCatalog};
use super::domain::Profile;
use super::evaluation::{EligibilityEngine, ScoringConfig};
use super::intake::{ProfileGuard, ProfileViolation};
use super::recommendation::Recommendation;
use super::remote::RecommendationSource;
use super::repository::{ProfileRecord, ProfileRepository, RepositoryError, UserId};

/// Service composing the intake guard, profile repository, local engine and
/// optional remote source.
pub struct AdvisorService<R> {
    guard: ProfileGuard,
    repository: Arc<R>,
    engine: Arc<EligibilityEngine>,
    remote: Option<Arc<dyn RecommendationSource>>,
}

impl<R> AdvisorService<R>
where
    R: ProfileRepository + 'static,
{
    pub fn new(repository: Arc<R>, catalog: Arc<VisaCatalog>, config: ScoringConfig) -> Self {
        Self::with_engine(repository, EligibilityEngine::new(catalog, config))
    }

    pub fn with_engine(repository: Arc<R>, engine: EligibilityEngine) -> Self {
        Self {
            guard: ProfileGuard,
            repository,
            engine: Arc::new(engine),
            remote: None,
        }
    }

    /// Consult `source` before the local engine.
    pub fn with_remote(mut self, source: Arc<dyn RecommendationSource>) -> Self {
        self.remote = Some(source);
        self
    }

    pub fn engine(&self) -> &EligibilityEngine {
        &self.engine
    }

    /// Produce recommendations, preferring the remote source when configured.
    ///
    /// Never fails: any remote error is logged and answered by the local engine.
    pub async fn recommend(&self, profile: &Profile) -> Vec<Recommendation> {
        if let Some(remote) = &self.remote {
            match remote.recommend(profile).await {
                Ok(recommendations) => {
                    tracing::info!(
                        source = remote.name(),
                        count = recommendations.len(),
                        "remote recommendations received"
                    );
                    return recommendations;
                }
                Err(error) => {
                    tracing::warn!(
                        source = remote.name(),
                        error = %error,
                        "remote recommendations unavailable; using local scoring"
                    );
                }
            }
        }

        let recommendations = self.engine.score(profile);
        let best = recommendations.first().map(Recommendation::summary);
        tracing::debug!(
            purpose = %profile.purpose,
            count = recommendations.len(),
            best = best.as_deref(),
            "local recommendations computed"
        );
        recommendations
    }

    /// Validate and store the profile for `user_id`.
    pub fn save_profile(
        &self,
        user_id: UserId,
        profile: Profile,
    ) -> Result<ProfileRecord, AdvisorServiceError> {
        let profile = self.guard.accept(profile)?;
        let record = ProfileRecord::from_profile(user_id, &profile, Utc::now());
        let stored = self.repository.upsert(record)?;
        tracing::info!(user = %stored.id.0, purpose = %stored.purpose, "profile saved");
        Ok(stored)
    }

    pub fn profile(&self, user_id: &UserId) -> Result<ProfileRecord, AdvisorServiceError> {
        let record = self
            .repository
            .fetch(user_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Score the stored profile of `user_id`.
    pub async fn recommend_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Recommendation>, AdvisorServiceError> {
        let profile = Profile::from(self.profile(user_id)?);
        Ok(self.recommend(&profile).await)
    }

    pub fn countries(&self) -> Vec<CountrySummary> {
        self.engine.catalog().countries()
    }
}

/// Error raised by the advisor service.
#[derive(Debug, thiserror::Error)]
pub enum AdvisorServiceError {
    #[error(transparent)]
    Intake(#[from] ProfileViolation),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
