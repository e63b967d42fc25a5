use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::Profile;
use super::remote::RemoteResponse;
use super::repository::{ProfileRepository, RepositoryError, UserId};
use super::service::{AdvisorService, AdvisorServiceError};

/// Body of a scoring request; mirrors the remote function contract.
#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub profile: Profile,
}

/// Router builder exposing scoring, catalog and profile endpoints.
pub fn advisor_router<R>(service: Arc<AdvisorService<R>>) -> Router
where
    R: ProfileRepository + 'static,
{
    Router::new()
        .route("/api/v1/recommendations", post(recommend_handler::<R>))
        .route("/api/v1/countries", get(countries_handler::<R>))
        .route(
            "/api/v1/profiles/:user_id",
            get(profile_handler::<R>).put(save_profile_handler::<R>),
        )
        .route(
            "/api/v1/profiles/:user_id/recommendations",
            post(user_recommendations_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn recommend_handler<R>(
    State(service): State<Arc<AdvisorService<R>>>,
    axum::Json(request): axum::Json<RecommendationRequest>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    let recommendations = service.recommend(&request.profile).await;
    (StatusCode::OK, axum::Json(RemoteResponse { recommendations })).into_response()
}

pub(crate) async fn countries_handler<R>(
    State(service): State<Arc<AdvisorService<R>>>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    let countries = service.countries();
    (StatusCode::OK, axum::Json(json!({ "countries": countries }))).into_response()
}

pub(crate) async fn save_profile_handler<R>(
    State(service): State<Arc<AdvisorService<R>>>,
    Path(user_id): Path<String>,
    axum::Json(profile): axum::Json<Profile>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    match service.save_profile(UserId(user_id), profile) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn profile_handler<R>(
    State(service): State<Arc<AdvisorService<R>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    match service.profile(&UserId(user_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn user_recommendations_handler<R>(
    State(service): State<Arc<AdvisorService<R>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    match service.recommend_for_user(&UserId(user_id)).await {
        Ok(recommendations) => {
            (StatusCode::OK, axum::Json(RemoteResponse { recommendations })).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: AdvisorServiceError) -> Response {
    let status = match &error {
        AdvisorServiceError::Intake(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AdvisorServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        AdvisorServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
