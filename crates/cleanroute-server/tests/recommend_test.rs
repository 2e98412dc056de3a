//! Recommendation endpoint integration tests.
//!
//! Tests the end-to-end route-fetch + scoring + ranking flow.
//!
//! Run with: cargo test --test recommend_test -- --ignored
//! Requires a running cleanroute server with provider keys configured.

use reqwest::Client;
use serde_json::json;

fn base_url() -> String {
    std::env::var("CLEANROUTE_TEST_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Recommend between two Delhi-area points and check the ranking shape.
#[tokio::test]
#[ignore]
async fn recommend_returns_ranked_routes() {
    let client = Client::new();
    let base = base_url();

    let resp = client
        .post(format!("{}/v1/recommend", base))
        .json(&json!({
            "start": {"lat": 28.6315, "lon": 77.2167},
            "end": {"lat": 28.4595, "lon": 77.0266},
            "samples": 12
        }))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success(), "status {}", resp.status());

    let body: serde_json::Value = resp.json().await.unwrap();
    let routes = body["routes"].as_array().unwrap();
    assert!(!routes.is_empty());

    // Best first, and the best id matches the head of the list.
    assert_eq!(body["best_route_id"], routes[0]["route_id"]);
    let scores: Vec<f64> = routes
        .iter()
        .map(|r| r["metrics"]["healthiness_score"].as_f64().unwrap())
        .collect();
    for pair in scores.windows(2) {
        assert!(pair[0] >= pair[1], "routes not sorted: {:?}", scores);
    }

    // Metrics are within their documented ranges.
    for route in routes {
        let metrics = &route["metrics"];
        assert!(metrics["healthiness_score"].as_f64().unwrap() >= 0.0);
        assert!(metrics["healthiness_score"].as_f64().unwrap() <= 100.0);
        assert!(metrics["samples_used"].as_u64().unwrap() >= 1);
    }
}

/// A request with no usable endpoint input is rejected up front.
#[tokio::test]
#[ignore]
async fn recommend_rejects_empty_request() {
    let client = Client::new();
    let base = base_url();

    let resp = client
        .post(format!("{}/v1/recommend", base))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 422);
}

/// Repeating an identical request must return identical metrics (the
/// memoization layer may answer, but must not change results).
#[tokio::test]
#[ignore]
async fn repeated_requests_are_stable() {
    let client = Client::new();
    let base = base_url();
    let request = json!({
        "start": {"lat": 28.6315, "lon": 77.2167},
        "end": {"lat": 28.4595, "lon": 77.0266},
        "samples": 10
    });

    let first: serde_json::Value = client
        .post(format!("{}/v1/recommend", base))
        .json(&request)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let second: serde_json::Value = client
        .post(format!("{}/v1/recommend", base))
        .json(&request)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(first["routes"], second["routes"]);
    assert_eq!(first["best_route_id"], second["best_route_id"]);
}
