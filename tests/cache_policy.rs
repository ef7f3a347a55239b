use axum::http::StatusCode;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::response::Response;
use http_body_util::BodyExt;
use serde::Serialize;
use serde_json::{Value, json};

use creatuno::cache::{
    CachePolicy, EndpointClass, EndpointPolicies, Visibility, cached_json, private_cached_json,
    public_cached_json,
};

#[derive(Serialize)]
struct Listing {
    items: Vec<&'static str>,
    total: u32,
}

fn cache_control(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(CACHE_CONTROL)
        .iter()
        .map(|value| value.to_str().expect("ascii header").to_string())
        .collect()
}

async fn body_json(response: Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn public_helper_uses_listing_defaults() {
    let response = public_cached_json(json!({"ok": true}), None, None);

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        cache_control(&response),
        vec!["public, max-age=60, stale-while-revalidate=300"]
    );
    assert_eq!(
        response.headers().get(CONTENT_TYPE).expect("content type"),
        "application/json"
    );
    assert_eq!(body_json(response).await, json!({"ok": true}));
}

#[tokio::test]
async fn public_helper_honours_explicit_windows() {
    let response = public_cached_json(json!([1, 2, 3]), Some(300), Some(600));
    assert_eq!(
        cache_control(&response),
        vec!["public, max-age=300, stale-while-revalidate=600"]
    );
    assert_eq!(body_json(response).await, json!([1, 2, 3]));
}

#[tokio::test]
async fn zero_stale_window_is_omitted() {
    let response = public_cached_json(json!({}), Some(120), Some(0));
    assert_eq!(cache_control(&response), vec!["public, max-age=120"]);
}

#[tokio::test]
async fn private_helper_never_advertises_stale_window() {
    for max_age in [None, Some(0), Some(45)] {
        let response = private_cached_json(json!({"unread": 2}), max_age);
        let header = cache_control(&response);
        assert_eq!(header.len(), 1);
        assert!(header[0].starts_with("private, "));
        assert!(!header[0].contains("public"));
        assert!(!header[0].contains("stale-while-revalidate"));
    }

    let response = private_cached_json(json!({"unread": 2}), None);
    assert_eq!(cache_control(&response), vec!["private, max-age=0"]);
    assert_eq!(body_json(response).await, json!({"unread": 2}));
}

#[tokio::test]
async fn struct_payload_is_encoded_verbatim() {
    let payload = Listing {
        items: vec!["a", "b"],
        total: 2,
    };
    let response = cached_json(payload, CachePolicy::public().max_age(30));

    assert_eq!(cache_control(&response), vec!["public, max-age=30"]);
    assert_eq!(
        body_json(response).await,
        json!({"items": ["a", "b"], "total": 2})
    );
}

#[tokio::test]
async fn body_round_trips_for_every_json_shape() {
    let payloads = [
        json!(null),
        json!(true),
        json!(false),
        json!(42),
        json!(-1.5),
        json!("x"),
        json!([]),
        json!({}),
        json!({
            "stats": {"creatives": 5, "ratio": 0.25, "tags": ["a", null, true]},
            "pages": [[1, 2], [{"deep": {"deeper": [{"deepest": "ok"}]}}]],
            "empty": null
        }),
    ];

    for payload in payloads {
        let response = cached_json(payload.clone(), CachePolicy::public().max_age(10));
        assert_eq!(response.status(), StatusCode::OK, "{payload}");
        assert_eq!(body_json(response).await, payload);

        let response = private_cached_json(payload.clone(), None);
        assert_eq!(body_json(response).await, payload);
    }
}

#[tokio::test]
async fn explicit_status_is_preserved() {
    let policy = CachePolicy::private().status(StatusCode::ACCEPTED);
    let response = cached_json(json!({"queued": true}), policy);

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert_eq!(cache_control(&response), vec!["private, max-age=0"]);
}

#[test]
fn default_policy_is_public_with_zero_freshness() {
    let policy = CachePolicy::default();
    assert_eq!(policy.visibility, Visibility::Public);
    assert_eq!(policy.max_age_seconds, 0);
    assert_eq!(policy.stale_while_revalidate_seconds, 0);
    assert_eq!(policy.status, StatusCode::OK);
    assert_eq!(policy.to_string(), "public, max-age=0");
}

#[test]
fn selector_keeps_user_data_private() {
    let policies = EndpointPolicies::default();
    let policy = policies.select(EndpointClass::UserScoped);
    assert!(policy.is_private());
    assert_eq!(policy.header_value(), "private, max-age=0");

    for class in [
        EndpointClass::PlatformStats,
        EndpointClass::PublicListing,
        EndpointClass::Fallback,
    ] {
        assert!(!policies.select(class).is_private(), "{class:?}");
    }
}
