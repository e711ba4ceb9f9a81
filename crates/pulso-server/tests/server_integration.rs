//! Integration tests for the Pulso Vital HTTP Server.
//!
//! These tests verify the API endpoints by making HTTP requests
//! to the router without starting a live network listener.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use pulso_server::create_app;

/// Helper to create a test app without authentication.
fn test_app() -> axum::Router {
    create_app(None)
}

/// Helper to create a test app that requires an API key.
fn secured_app() -> axum::Router {
    create_app(Some("secret".to_string()))
}

fn compute_request(body: &Value) -> Request<Body> {
    Request::post("/compute")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ============================================================================
// Service Descriptor and Health Tests
// ============================================================================

#[tokio::test]
async fn get_root_returns_service_descriptor() {
    let app = test_app();

    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["service"], "Pulso Vital - Financial Calculations Service");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn health_returns_ok() {
    let app = test_app();

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "ok": true }));
}

#[tokio::test]
async fn health_ignores_authentication() {
    let app = secured_app();

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

// ============================================================================
// Compute Endpoint Tests
// ============================================================================

#[tokio::test]
async fn compute_returns_full_report() {
    let app = test_app();

    let payload = json!({
        "datos_crudos": {
            "economico": { "ingresos_fijos": "52.000,00", "egresos_fijos": 30_000 },
            "patrimonial": { "inversiones": 600_000, "seguro_vida": 400_000 }
        }
    });

    let response = app.oneshot(compute_request(&payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["raw"]["ingresos_totales_mensuales"], 52_000.0);
    assert_eq!(
        body["formatted"]["operacion_final"]["ingresos_totales"],
        "52.000,00"
    );
    assert!(body["notes"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn compute_accepts_flags() {
    let app = test_app();

    let payload = json!({
        "datos_crudos": { "economico": { "credito_mensual": 2_000 } },
        "flags": { "credito_incluido_en_egresos": true }
    });

    let response = app.oneshot(compute_request(&payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["raw"]["credito_mensual"], 0.0);
    assert_eq!(body["notes"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn compute_requires_datos_crudos() {
    let app = test_app();

    let response = app
        .oneshot(compute_request(&json!({ "flags": {} })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn compute_rejects_malformed_json() {
    let app = test_app();

    let request = Request::post("/compute")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Authentication Tests
// ============================================================================

#[tokio::test]
async fn compute_without_key_is_unauthorized() {
    let app = secured_app();

    let payload = json!({ "datos_crudos": {} });
    let response = app.oneshot(compute_request(&payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await, json!({ "detail": "Unauthorized" }));
}

#[tokio::test]
async fn compute_with_wrong_key_is_unauthorized() {
    let app = secured_app();

    let request = Request::post("/compute")
        .header("content-type", "application/json")
        .header("x-api-key", "wrong")
        .body(Body::from(json!({ "datos_crudos": {} }).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn compute_with_correct_key_succeeds() {
    let app = secured_app();

    let request = Request::post("/compute")
        .header("content-type", "application/json")
        .header("X-API-Key", "secret")
        .body(Body::from(json!({ "datos_crudos": {} }).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["raw"]["nivel_riesgo_patrimonial"], "Alto");
}

// ============================================================================
// Invalid Route Tests
// ============================================================================

#[tokio::test]
async fn invalid_route_returns_404() {
    let app = test_app();

    let response = app
        .oneshot(Request::get("/invalid/route").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
