use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{http::HeaderMap, http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};

use super::common::*;
use crate::advisor::catalog::VisaCatalog;
use crate::advisor::evaluation::ScoringConfig;
use crate::advisor::remote::{RecommendationSource, RemoteError, RemoteRecommender};
use crate::advisor::repository::{RepositoryError, UserId};
use crate::advisor::service::{AdvisorService, AdvisorServiceError};
use crate::config::RemoteConfig;

fn remote_for(
    url: String,
    api_key: Option<&str>,
    timeout: Duration,
) -> Arc<dyn RecommendationSource> {
    let config = RemoteConfig {
        url,
        api_key: api_key.map(str::to_string),
        timeout,
    };
    Arc::new(RemoteRecommender::new(&config).expect("client builds"))
}

#[tokio::test]
async fn local_engine_answers_without_remote() {
    let (service, _) = build_service();
    let profile = strong_profile();

    let recommendations = service.recommend(&profile).await;

    assert_eq!(recommendations, engine().score(&profile));
}

#[tokio::test]
async fn remote_results_are_passed_through_unchanged() {
    let (service, _) = build_service();
    let remote = vec![remote_recommendation("Portugal"), remote_recommendation("Canada")];
    let service = service.with_remote(Arc::new(StaticSource(remote.clone())));

    let recommendations = service.recommend(&strong_profile()).await;

    assert_eq!(recommendations, remote);
}

#[tokio::test]
async fn malformed_remote_payload_falls_back_to_local() {
    let (service, _) = build_service();
    let service = service.with_remote(Arc::new(MalformedSource));
    let profile = moderate_profile(&["Canada", "UK"]);

    let recommendations = service.recommend(&profile).await;

    assert_eq!(recommendations, engine().score(&profile));
}

#[tokio::test]
async fn http_remote_receives_profile_and_bearer_token() {
    let seen: Arc<Mutex<Option<(String, Value)>>> = Arc::default();
    let captured = seen.clone();
    let router = Router::new().route(
        "/recommend",
        post(move |headers: HeaderMap, Json(body): Json<Value>| {
            let captured = captured.clone();
            async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                *captured.lock().expect("capture lock") = Some((auth, body));
                Json(json!({ "recommendations": [remote_recommendation("Ireland")] }))
            }
        }),
    );
    let base = spawn_remote(router).await;

    let (service, _) = build_service();
    let service = service.with_remote(remote_for(
        format!("{base}/recommend"),
        Some("secret-key"),
        Duration::from_secs(5),
    ));

    let recommendations = service.recommend(&strong_profile()).await;

    assert_eq!(recommendations, vec![remote_recommendation("Ireland")]);
    let (auth, body) = seen.lock().expect("capture lock").clone().expect("remote called");
    assert_eq!(auth, "Bearer secret-key");
    assert_eq!(body["profile"]["purpose"], "work");
    assert_eq!(body["profile"]["preferredCountries"][0], "Canada");
}

#[tokio::test]
async fn http_remote_failures_fall_back_to_local() {
    let router = Router::new()
        .route(
            "/error",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model overloaded") }),
        )
        .route(
            "/not-a-list",
            post(|| async { Json(json!({ "recommendations": { "name": "Canada" } })) }),
        )
        .route("/not-json", post(|| async { "plain text" }))
        .route(
            "/slow",
            post(|| async {
                tokio::time::sleep(Duration::from_millis(500)).await;
                Json(json!({ "recommendations": [] }))
            }),
        );
    let base = spawn_remote(router).await;
    let profile = moderate_profile(&["Australia", "Canada"]);
    let expected = engine().score(&profile);

    for path in ["/error", "/not-a-list", "/not-json", "/slow"] {
        let (service, _) = build_service();
        let service = service.with_remote(remote_for(
            format!("{base}{path}"),
            None,
            Duration::from_millis(100),
        ));

        assert_eq!(service.recommend(&profile).await, expected, "fallback for {path}");
    }
}

#[tokio::test]
async fn http_remote_error_variants_are_distinguishable() {
    let router = Router::new().route(
        "/error",
        post(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
    );
    let base = spawn_remote(router).await;
    let remote = remote_for(format!("{base}/error"), None, Duration::from_secs(5));

    let error = remote
        .recommend(&strong_profile())
        .await
        .expect_err("status error");

    match error {
        RemoteError::Status { status, body } => {
            assert_eq!(status, 502);
            assert_eq!(body, "upstream down");
        }
        other => panic!("unexpected error {other}"),
    }
}

#[tokio::test]
async fn unreachable_remote_falls_back_to_local() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let (service, _) = build_service();
    let service = service.with_remote(remote_for(
        format!("http://{addr}/recommend"),
        None,
        Duration::from_secs(1),
    ));
    let profile = weak_profile();

    assert_eq!(service.recommend(&profile).await, engine().score(&profile));
}

#[tokio::test]
async fn saved_profiles_drive_user_recommendations() {
    let (service, repository) = build_service();
    let user = UserId("user-42".to_string());
    let mut profile = moderate_profile(&[" Canada ", "UK"]);
    profile.spouse_included = true;

    let stored = service
        .save_profile(user.clone(), profile.clone())
        .expect("profile saved");
    assert_eq!(stored.preferred_countries, vec!["Canada", "UK"]);
    assert!(repository
        .records
        .lock()
        .expect("repository lock")
        .contains_key(&user));

    let fetched = service.profile(&user).expect("profile fetched");
    assert_eq!(fetched, stored);

    profile.preferred_countries = vec!["Canada".to_string(), "UK".to_string()];
    let recommendations = service.recommend_for_user(&user).await.expect("recommended");
    assert_eq!(recommendations, engine().score(&profile));
}

#[tokio::test]
async fn saving_again_replaces_the_stored_profile() {
    let (service, repository) = build_service();
    let user = UserId("user-7".to_string());

    service
        .save_profile(user.clone(), strong_profile())
        .expect("first save");
    let mut updated = strong_profile();
    updated.purpose = crate::advisor::domain::Purpose::Study;
    service.save_profile(user.clone(), updated).expect("second save");

    let records = repository.records.lock().expect("repository lock");
    assert_eq!(records.len(), 1);
    assert_eq!(records[&user].purpose, crate::advisor::domain::Purpose::Study);
}

#[tokio::test]
async fn missing_and_invalid_profiles_surface_errors() {
    let (service, _) = build_service();
    let user = UserId("nobody".to_string());

    assert!(matches!(
        service.recommend_for_user(&user).await,
        Err(AdvisorServiceError::Repository(RepositoryError::NotFound))
    ));

    let mut invalid = strong_profile();
    invalid.preferred_countries.clear();
    assert!(matches!(
        service.save_profile(user.clone(), invalid),
        Err(AdvisorServiceError::Intake(_))
    ));
    assert!(matches!(
        service.profile(&user),
        Err(AdvisorServiceError::Repository(RepositoryError::NotFound))
    ));
}

#[tokio::test]
async fn repository_outage_is_reported() {
    let service = AdvisorService::new(
        Arc::new(UnavailableRepository),
        Arc::new(VisaCatalog::standard()),
        ScoringConfig::default(),
    );

    let error = service
        .save_profile(UserId("user-1".to_string()), strong_profile())
        .expect_err("repository offline");

    assert!(matches!(
        error,
        AdvisorServiceError::Repository(RepositoryError::Unavailable(_))
    ));
    assert_eq!(service.countries().len(), 3);
}
