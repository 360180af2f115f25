#![allow(clippy::unwrap_used, clippy::expect_used)]

use httpmock::prelude::*;
use reservaplus_onboarding::{
    HttpOnboardingResources, OnboardingClientConfig, OnboardingProgress, OnboardingResources,
    Resource, estimate_progress, needs_onboarding,
};
use serde_json::json;

fn resources(server: &MockServer, token: Option<&str>) -> HttpOnboardingResources {
    let config = OnboardingClientConfig {
        api_base_url: server.base_url(),
        timeout_ms: 2_000,
    };
    HttpOnboardingResources::new(&config, token.map(str::to_owned)).unwrap()
}

#[tokio::test]
async fn fetch_sends_bearer_and_reports_status() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/organizations/me/")
                .header("authorization", "Bearer tok-1");
            then.status(200).json_body(json!({ "id": "org-1" }));
        })
        .await;

    let outcome = resources(&server, Some("tok-1"))
        .fetch(Resource::Organization)
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(outcome.success);
    assert_eq!(
        serde_json::from_slice::<serde_json::Value>(&outcome.body).unwrap(),
        json!({ "id": "org-1" })
    );
}

#[tokio::test]
async fn error_status_is_an_outcome_not_an_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/organizations/me/");
            then.status(404).body("not found");
        })
        .await;

    let outcome = resources(&server, None)
        .fetch(Resource::Organization)
        .await
        .unwrap();
    assert!(!outcome.success);
}

#[tokio::test]
async fn progress_against_live_endpoints() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/organizations/me/");
            then.status(200).json_body(json!({ "id": "org-1", "name": "Spa" }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/organizations/professionals/");
            then.status(200)
                .json_body(json!({ "results": [{ "id": 1 }], "count": 1 }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/organizations/services/");
            then.status(200).json_body(json!([]));
        })
        .await;

    let resources = resources(&server, Some("tok"));
    let progress = estimate_progress(&resources).await;
    assert_eq!(progress.completed, [true, true, true, false, false, false]);
    assert_eq!(progress.step, 3);
    assert!(needs_onboarding(&resources).await);
}

#[tokio::test]
async fn unreachable_api_degrades_to_start() {
    let config = OnboardingClientConfig {
        // Port 9 (discard) on localhost is expected to refuse connections.
        api_base_url: "http://127.0.0.1:9/".to_owned(),
        timeout_ms: 2_000,
    };
    let resources = HttpOnboardingResources::new(&config, None).unwrap();

    assert_eq!(
        estimate_progress(&resources).await,
        OnboardingProgress::from_start()
    );
    assert!(needs_onboarding(&resources).await);
}
