use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;
use visa_advisor::advisor::{
    AdvisorService, ProfileRecord, ProfileRepository, RemoteRecommender, RepositoryError,
    ScoringConfig, UserId, VisaCatalog,
};
use visa_advisor::config::AdvisorConfig;
use visa_advisor::error::AppError;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local profile store; contents are lost on restart.
#[derive(Default, Clone)]
pub(crate) struct InMemoryProfileRepository {
    records: Arc<Mutex<HashMap<UserId, ProfileRecord>>>,
}

impl ProfileRepository for InMemoryProfileRepository {
    fn upsert(&self, record: ProfileRecord) -> Result<ProfileRecord, RepositoryError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("profile store poisoned".to_string()))?;
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &UserId) -> Result<Option<ProfileRecord>, RepositoryError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("profile store poisoned".to_string()))?;
        Ok(guard.get(id).cloned())
    }
}

pub(crate) fn load_catalog(config: &AdvisorConfig) -> Result<Arc<VisaCatalog>, AppError> {
    let catalog = match &config.catalog_path {
        Some(path) => {
            let catalog = VisaCatalog::from_path(path)?;
            info!(
                path = %path.display(),
                countries = catalog.entries().len(),
                "loaded visa catalog"
            );
            catalog
        }
        None => VisaCatalog::standard(),
    };
    Ok(Arc::new(catalog))
}

/// Wire the advisor service from configuration. `use_remote = false` forces local scoring.
pub(crate) fn build_service(
    config: &AdvisorConfig,
    repository: Arc<InMemoryProfileRepository>,
    use_remote: bool,
) -> Result<AdvisorService<InMemoryProfileRepository>, AppError> {
    let catalog = load_catalog(config)?;
    let service =
        AdvisorService::new(repository, catalog, ScoringConfig::with_blend(config.blend));

    match (&config.remote, use_remote) {
        (Some(remote), true) => {
            let recommender = RemoteRecommender::new(remote)?;
            info!(url = %recommender.url(), "remote recommendations enabled");
            Ok(service.with_remote(Arc::new(recommender)))
        }
        _ => Ok(service),
    }
}
