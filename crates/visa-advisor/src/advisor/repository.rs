use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{EducationLevel, MaritalStatus, Profile, Purpose};

/// Identity of the authenticated user owning a stored profile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Persisted profile row; field names follow the backend's snake_case schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub id: UserId,
    pub age: u32,
    pub education: String,
    pub work_experience: u32,
    pub language_score: String,
    pub preferred_countries: Vec<String>,
    pub purpose: Purpose,
    pub available_funds: u64,
    pub field_of_study: String,
    pub marital_status: String,
    pub number_of_dependents: u32,
    pub spouse_included: bool,
    pub updated_at: DateTime<Utc>,
}

impl ProfileRecord {
    pub fn from_profile(id: UserId, profile: &Profile, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            age: profile.age,
            education: profile.education.label().to_string(),
            work_experience: profile.work_experience,
            language_score: profile.language_score.clone(),
            preferred_countries: profile.preferred_countries.clone(),
            purpose: profile.purpose,
            available_funds: profile.available_funds,
            field_of_study: profile.field_of_study.clone(),
            marital_status: profile.marital_status.label().to_string(),
            number_of_dependents: profile.number_of_dependents,
            spouse_included: profile.spouse_included,
            updated_at,
        }
    }
}

impl From<ProfileRecord> for Profile {
    fn from(record: ProfileRecord) -> Self {
        Profile {
            age: record.age,
            education: EducationLevel::from(record.education.as_str()),
            field_of_study: record.field_of_study,
            work_experience: record.work_experience,
            language_score: record.language_score,
            available_funds: record.available_funds,
            marital_status: MaritalStatus::from(record.marital_status.as_str()),
            spouse_included: record.spouse_included,
            number_of_dependents: record.number_of_dependents,
            purpose: record.purpose,
            preferred_countries: record.preferred_countries,
        }
    }
}

/// Storage abstraction over the managed profile backend.
pub trait ProfileRepository: Send + Sync {
    /// Insert or replace the record keyed by `record.id`.
    fn upsert(&self, record: ProfileRecord) -> Result<ProfileRecord, RepositoryError>;
    fn fetch(&self, id: &UserId) -> Result<Option<ProfileRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("profile not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
