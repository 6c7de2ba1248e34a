//! # API REST
//!
//! REST API implementation for the intake service.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialisation, CORS, request size limits)
//!
//! Uses `api-shared` for wire types and `intake-core` for reconciliation.

#![warn(rust_2018_idioms)]

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{HealthRes, HealthService, ListFieldsRes, PayloadReq, ReconcileReq, ReconcileRes};
use intake_core::{reconcile, reconcile_with_report, AliasTable, CoreConfig, ReconciledRecord};

/// Application state for the REST API server
///
/// Holds configuration resolved once at startup; handlers never read the environment.
#[derive(Clone)]
pub struct AppState {
    cfg: Arc<CoreConfig>,
}

impl AppState {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, list_fields, reconcile_extraction, build_payload),
    components(schemas(
        HealthRes,
        ListFieldsRes,
        api_shared::FieldDescriptor,
        ReconcileReq,
        ReconcileRes,
        PayloadReq,
        ReconciledRecord,
    ))
)]
pub struct ApiDoc;

/// Build the REST router with OpenAPI docs and permissive CORS.
pub fn router(cfg: Arc<CoreConfig>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/fields", get(list_fields))
        .route("/reconcile", post(reconcile_extraction))
        .route("/payload", post(build_payload))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(AppState::new(cfg))
}

type ApiError = (StatusCode, &'static str);

fn check_entry_limit(state: &AppState, entries: usize) -> Result<(), ApiError> {
    let limit = state.cfg.max_entries();
    if entries > limit {
        tracing::warn!(entries, limit, "rejecting oversized extraction document");
        return Err((StatusCode::PAYLOAD_TOO_LARGE, "too many entries"));
    }
    Ok(())
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/fields",
    responses(
        (status = 200, description = "Target fields with display metadata and aliases", body = ListFieldsRes)
    )
)]
/// List the eight target fields in display order
///
/// Includes the labels, placeholders and input steps the form renders, and every canonical alias
/// that resolves to each field.
#[axum::debug_handler]
async fn list_fields(State(_state): State<AppState>) -> Json<ListFieldsRes> {
    Json(ListFieldsRes::from_table(AliasTable::builtin()))
}

#[utoipa::path(
    post,
    path = "/reconcile",
    request_body = ReconcileReq,
    responses(
        (status = 200, description = "Reconciled record and coverage", body = ReconcileRes),
        (status = 413, description = "Too many extracted entries"),
        (status = 422, description = "Malformed request body")
    )
)]
/// Reconcile recognition output into the eight-field record
///
/// Unknown labels are ignored and non-numeric values become `0`; the response reports both so a
/// misread document can be told apart from genuine zero measurements.
///
/// # Errors
/// Returns `413 Payload Too Large` if:
/// - `extracted` holds more entries than the configured limit.
#[axum::debug_handler]
async fn reconcile_extraction(
    State(state): State<AppState>,
    Json(req): Json<ReconcileReq>,
) -> Result<Json<ReconcileRes>, ApiError> {
    check_entry_limit(&state, req.entry_count())?;

    let raw = req.extracted.unwrap_or_default();
    let report = reconcile_with_report(&raw);
    tracing::info!(
        entries = raw.len(),
        resolved = report.resolved.len(),
        ignored = report.ignored_labels.len(),
        invalid = report.invalid_values.len(),
        "reconciled extraction"
    );

    Ok(Json(ReconcileRes::from_report(
        report,
        AliasTable::builtin().version(),
    )))
}

#[utoipa::path(
    post,
    path = "/payload",
    request_body = PayloadReq,
    responses(
        (status = 200, description = "Flat prediction payload", body = ReconciledRecord),
        (status = 413, description = "Too many values"),
        (status = 422, description = "Malformed request body")
    )
)]
/// Normalise form values into the prediction payload
///
/// Values are matched and coerced exactly like extracted labels, so the payload always carries
/// all eight fields as finite numbers.
///
/// # Errors
/// Returns `413 Payload Too Large` if:
/// - `values` holds more entries than the configured limit.
#[axum::debug_handler]
async fn build_payload(
    State(state): State<AppState>,
    Json(req): Json<PayloadReq>,
) -> Result<Json<ReconciledRecord>, ApiError> {
    check_entry_limit(&state, req.values.len())?;
    Ok(Json(reconcile(&req.values)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_router(max_entries: usize) -> Router {
        let cfg = CoreConfig::new("127.0.0.1:0".parse().unwrap(), max_entries).unwrap();
        router(Arc::new(cfg))
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_reports_ok() {
        let (status, body) = get_json(test_router(16), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn test_fields_lists_eight_fields() {
        let (status, body) = get_json(test_router(16), "/fields").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["fields"].as_array().unwrap().len(), 8);
        assert_eq!(body["fields"][7]["key"], "age");
        assert_eq!(body["alias_table_version"], 1);
    }

    #[tokio::test]
    async fn test_reconcile_end_to_end() {
        let (status, body) = post_json(
            test_router(16),
            "/reconcile",
            json!({"extracted": {
                "Pregnancies": "2",
                "Glucose": 148,
                "Diabetes Pedigree Function": "0.627",
                "unrelatedNote": "n/a"
            }}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["record"],
            json!({
                "pregnancies": 2.0,
                "glucose": 148.0,
                "bloodPressure": 0.0,
                "skinThickness": 0.0,
                "insulin": 0.0,
                "bmi": 0.0,
                "diabetesPedigreeFunction": 0.627,
                "age": 0.0
            })
        );
        assert_eq!(body["ignored_labels"], json!(["unrelatedNote"]));
        assert_eq!(body["coverage"], 0.375);
    }

    #[tokio::test]
    async fn test_reconcile_null_extracted_is_all_zero() {
        let (status, body) =
            post_json(test_router(16), "/reconcile", json!({"extracted": null})).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["record"]
            .as_object()
            .unwrap()
            .values()
            .all(|v| v == &json!(0.0)));
        assert_eq!(body["coverage"], 0.0);
    }

    #[tokio::test]
    async fn test_reconcile_rejects_too_many_entries() {
        let (status, _) = post_json(
            test_router(2),
            "/reconcile",
            json!({"extracted": {"a": 1, "b": 2, "c": 3}}),
        )
        .await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_reconcile_rejects_non_object_extracted() {
        let (status, _) =
            post_json(test_router(16), "/reconcile", json!({"extracted": [1, 2]})).await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn test_payload_normalises_form_values() {
        let (status, body) = post_json(
            test_router(16),
            "/payload",
            json!({"values": {"bloodPressure": "72", "bmi": "abc", "age": 50, "DPF": "0.627"}}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["bloodPressure"], 72.0);
        assert_eq!(body["bmi"], 0.0);
        assert_eq!(body["age"], 50.0);
        assert_eq!(body["diabetesPedigreeFunction"], 0.627);
        assert_eq!(body.as_object().unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_payload_later_alias_overrides_wire_name() {
        let (status, body) = post_json(
            test_router(16),
            "/payload",
            json!({"values": {"bloodPressure": 80, "systolic": "120"}}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["bloodPressure"], 120.0);
        assert!(body.get("systolic").is_none());
    }

    #[tokio::test]
    async fn test_swagger_ui_and_openapi_document_are_served() {
        let request = Request::builder()
            .uri("/swagger-ui/")
            .body(Body::empty())
            .unwrap();
        let response = test_router(16).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let (status, body) = get_json(test_router(16), "/api-docs/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"].get("/reconcile").is_some());
        assert!(body["paths"].get("/payload").is_some());
    }
}
