use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::advisor::catalog::{CountryEntry, PointCategory, VisaCatalog, VisaDefinition};
use crate::advisor::domain::{EducationLevel, MaritalStatus, Profile, Purpose};
use crate::advisor::evaluation::{EligibilityEngine, ScoringConfig};
use crate::advisor::recommendation::Recommendation;
use crate::advisor::remote::{RecommendationSource, RemoteError};
use crate::advisor::repository::{ProfileRecord, ProfileRepository, RepositoryError, UserId};
use crate::advisor::service::AdvisorService;

/// Strong candidate: every tracked category at its top band.
pub(super) fn strong_profile() -> Profile {
    Profile {
        age: 30,
        education: EducationLevel::Phd,
        field_of_study: "Software Engineering".to_string(),
        work_experience: 6,
        language_score: "advanced".to_string(),
        available_funds: 50_000,
        marital_status: MaritalStatus::Single,
        spouse_included: false,
        number_of_dependents: 0,
        purpose: Purpose::Work,
        preferred_countries: vec!["Canada".to_string()],
    }
}

/// Weak candidate: every tracked category at its lowest band.
pub(super) fn weak_profile() -> Profile {
    Profile {
        age: 22,
        education: EducationLevel::HighSchool,
        field_of_study: "Undeclared".to_string(),
        work_experience: 0,
        language_score: "basic".to_string(),
        available_funds: 1_000,
        marital_status: MaritalStatus::Single,
        spouse_included: false,
        number_of_dependents: 0,
        purpose: Purpose::Study,
        preferred_countries: vec!["Canada".to_string()],
    }
}

/// Mid-range candidate used for ranking scenarios.
pub(super) fn moderate_profile(countries: &[&str]) -> Profile {
    Profile {
        age: 30,
        education: EducationLevel::Masters,
        field_of_study: "Accounting".to_string(),
        work_experience: 4,
        language_score: "intermediate".to_string(),
        available_funds: 30_000,
        marital_status: MaritalStatus::Married,
        spouse_included: false,
        number_of_dependents: 0,
        purpose: Purpose::Work,
        preferred_countries: countries.iter().map(|country| country.to_string()).collect(),
    }
}

pub(super) fn engine() -> EligibilityEngine {
    EligibilityEngine::new(Arc::new(VisaCatalog::standard()), ScoringConfig::default())
}

/// Canada with two work pathways carrying explicit household increments.
pub(super) fn multi_visa_catalog() -> VisaCatalog {
    let pathway = |name: &str, base_score: f64, min_funds: u64, spouse: u64, dependent: u64| {
        VisaDefinition {
            purpose: Purpose::Work,
            name: name.to_string(),
            description: format!("{name} pathway"),
            base_score,
            min_funds,
            spouse_funds: Some(spouse),
            dependent_funds: Some(dependent),
            processing_time: if base_score > 0.82 {
                "6-8 months".to_string()
            } else {
                "15-19 months".to_string()
            },
            points: vec![
                PointCategory::new("Work Experience", 30, "Relevant experience"),
                PointCategory::new("Job Offer", 20, "Valid job offer"),
                PointCategory::new("Education", 25, "Education level and field"),
                PointCategory::new("Language", 25, "Language proficiency"),
            ],
        }
    };

    VisaCatalog::new(vec![CountryEntry {
        name: "Canada".to_string(),
        aliases: vec!["CA".to_string()],
        requirements: Vec::new(),
        visas: vec![
            pathway("Provincial Nominee Program", 0.8, 15_000, 4_500, 3_500),
            pathway("Express Entry", 0.85, 13_000, 4_000, 3_000),
        ],
    }])
    .expect("multi visa catalog validates")
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<UserId, ProfileRecord>>>,
}

impl ProfileRepository for MemoryRepository {
    fn upsert(&self, record: ProfileRecord) -> Result<ProfileRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &UserId) -> Result<Option<ProfileRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

pub(super) struct UnavailableRepository;

impl ProfileRepository for UnavailableRepository {
    fn upsert(&self, _record: ProfileRecord) -> Result<ProfileRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &UserId) -> Result<Option<ProfileRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Remote source answering with a fixed list.
pub(super) struct StaticSource(pub(super) Vec<Recommendation>);

#[async_trait]
impl RecommendationSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn recommend(&self, _profile: &Profile) -> Result<Vec<Recommendation>, RemoteError> {
        Ok(self.0.clone())
    }
}

/// Remote source whose payload never parses.
pub(super) struct MalformedSource;

#[async_trait]
impl RecommendationSource for MalformedSource {
    fn name(&self) -> &str {
        "malformed"
    }

    async fn recommend(&self, _profile: &Profile) -> Result<Vec<Recommendation>, RemoteError> {
        let error = serde_json::from_str::<Vec<Recommendation>>("{\"recommendations\": 3}")
            .expect_err("payload is not a list");
        Err(RemoteError::Payload(error))
    }
}

pub(super) fn remote_recommendation(name: &str) -> Recommendation {
    serde_json::from_value(serde_json::json!({
        "name": name,
        "score": 0.91,
        "requirements": ["Valid passport"],
        "processingTime": "3-6 months",
        "visaTypes": [],
        "fundsRequired": 12000,
        "dependentFunds": { "spouse": 0, "perDependent": 0 },
        "eligibilityReason": "Suggested by remote advisor",
        "isEligible": true
    }))
    .expect("remote recommendation parses")
}

pub(super) fn build_service() -> (AdvisorService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = AdvisorService::new(
        repository.clone(),
        Arc::new(VisaCatalog::standard()),
        ScoringConfig::default(),
    );
    (service, repository)
}

/// Serve `router` on an ephemeral local port and return its base URL.
pub(super) async fn spawn_remote(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("remote serves");
    });
    format!("http://{addr}")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
