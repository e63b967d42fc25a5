//! Immigration profile intake, eligibility scoring and recommendation delivery.

pub mod catalog;
pub mod domain;
pub(crate) mod evaluation;
pub(crate) mod intake;
pub mod recommendation;
pub mod remote;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use catalog::{
    CatalogError, CountryEntry, CountrySummary, PointCategory, VisaCatalog, VisaDefinition,
};
pub use domain::{EducationLevel, LanguageBand, MaritalStatus, Profile, Purpose, UnknownPurpose};
pub use evaluation::{BlendStrategy, CategoryRule, EligibilityEngine, RuleTable, ScoringConfig};
pub use intake::{ProfileGuard, ProfileViolation};
pub use recommendation::{
    DependentFunds, FundsStanding, Recommendation, RequiredFunds, ScoredPoint, VisaTypeBreakdown,
};
pub use remote::{RecommendationSource, RemoteError, RemoteRecommender};
pub use repository::{ProfileRecord, ProfileRepository, RepositoryError, UserId};
pub use router::advisor_router;
pub use service::{AdvisorService, AdvisorServiceError};
