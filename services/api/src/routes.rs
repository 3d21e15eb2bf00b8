use crate::infra::{AppState, AssessmentService};
use ai_maturity::assessment::{
    ClassificationPolicy, PopulationReport, ReferenceRow, SubmissionReport,
};
use ai_maturity::error::AppError;
use ai_maturity::survey::{RejectedRow, SurveyDataset, SurveyImporter};
use axum::extract::{Path, Query};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ReportQuery {
    #[serde(default)]
    pub(crate) submission_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssessRequest {
    pub(crate) csv: String,
    #[serde(default)]
    pub(crate) submission_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SubmissionListEntry {
    pub(crate) submission_id: String,
    pub(crate) respondent_name: String,
    pub(crate) hospital_name: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct SubmissionListResponse {
    pub(crate) source: String,
    pub(crate) loaded_at: DateTime<Utc>,
    pub(crate) submissions: Vec<SubmissionListEntry>,
    pub(crate) rejected_rows: Vec<RejectedRow>,
}

#[derive(Debug, Serialize)]
pub(crate) struct LevelsResponse {
    pub(crate) policy: ClassificationPolicy,
    pub(crate) levels: Vec<ReferenceRow>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub(crate) enum ReportResponse {
    Submission(Box<SubmissionReport>),
    Population {
        #[serde(flatten)]
        report: Box<PopulationReport>,
        #[serde(skip_serializing_if = "Option::is_none")]
        not_found: Option<String>,
    },
}

pub(crate) fn with_assessment_routes(service: Arc<AssessmentService>) -> axum::Router {
    axum::Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/submissions",
            axum::routing::get(list_submissions_endpoint),
        )
        .route(
            "/api/v1/submissions/:submission_id",
            axum::routing::get(submission_report_endpoint),
        )
        .route("/api/v1/report", axum::routing::get(report_endpoint))
        .route("/api/v1/summary", axum::routing::get(summary_endpoint))
        .route("/api/v1/levels", axum::routing::get(levels_endpoint))
        .route("/api/v1/assess", axum::routing::post(assess_endpoint))
        .layer(Extension(service))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn list_submissions_endpoint(
    Extension(service): Extension<Arc<AssessmentService>>,
) -> Result<Json<SubmissionListResponse>, AppError> {
    let dataset = service.load_dataset_blocking().await?;
    let submissions = dataset
        .submissions
        .iter()
        .map(|submission| SubmissionListEntry {
            submission_id: submission.submission_id.clone(),
            respondent_name: submission.respondent_name.clone(),
            hospital_name: submission.hospital_name.clone(),
        })
        .collect();

    Ok(Json(SubmissionListResponse {
        source: dataset.source,
        loaded_at: dataset.loaded_at,
        submissions,
        rejected_rows: dataset.rejected_rows,
    }))
}

pub(crate) async fn submission_report_endpoint(
    Extension(service): Extension<Arc<AssessmentService>>,
    Path(submission_id): Path<String>,
) -> Result<Json<SubmissionReport>, AppError> {
    let dataset = service.load_dataset_blocking().await?;
    let submission = dataset.find(&submission_id)?;
    Ok(Json(service.engine().submission_report(submission)?))
}

pub(crate) async fn report_endpoint(
    Extension(service): Extension<Arc<AssessmentService>>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<ReportResponse>, AppError> {
    let dataset = service.load_dataset_blocking().await?;
    Ok(Json(report_with_fallback(
        &service,
        &dataset,
        query.submission_id,
    )?))
}

pub(crate) async fn summary_endpoint(
    Extension(service): Extension<Arc<AssessmentService>>,
) -> Result<Json<PopulationReport>, AppError> {
    let dataset = service.load_dataset_blocking().await?;
    Ok(Json(service.engine().population_report(&dataset.submissions)?))
}

pub(crate) async fn levels_endpoint(
    Extension(service): Extension<Arc<AssessmentService>>,
) -> Json<LevelsResponse> {
    let engine = service.engine();
    Json(LevelsResponse {
        policy: engine.config().policy,
        levels: engine.reference_table(None),
    })
}

/// Scores an export posted in the request body instead of the configured
/// sources. An unknown `submission_id` is a 404 here.
pub(crate) async fn assess_endpoint(
    Extension(service): Extension<Arc<AssessmentService>>,
    Json(payload): Json<AssessRequest>,
) -> Result<Json<ReportResponse>, AppError> {
    let AssessRequest { csv, submission_id } = payload;
    let dataset = SurveyImporter::from_text(&csv, "request body")?;
    let engine = service.engine();

    let response = match submission_id.filter(|id| !id.trim().is_empty()) {
        Some(id) => {
            let submission = dataset.find(&id)?;
            ReportResponse::Submission(Box::new(engine.submission_report(submission)?))
        }
        None => ReportResponse::Population {
            report: Box::new(engine.population_report(&dataset.submissions)?),
            not_found: None,
        },
    };
    Ok(Json(response))
}

fn report_with_fallback(
    service: &AssessmentService,
    dataset: &SurveyDataset,
    submission_id: Option<String>,
) -> Result<ReportResponse, AppError> {
    let engine = service.engine();
    let requested = submission_id.filter(|id| !id.trim().is_empty());

    if let Some(id) = requested.as_deref() {
        match dataset.find(id) {
            Ok(submission) => {
                return Ok(ReportResponse::Submission(Box::new(
                    engine.submission_report(submission)?,
                )));
            }
            Err(err) => warn!(error = %err, "falling back to population report"),
        }
    }

    Ok(ReportResponse::Population {
        report: Box::new(engine.population_report(&dataset.submissions)?),
        not_found: requested.map(|id| id.trim().to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::testing::{write_survey, SAMPLE_CSV};
    use ai_maturity::assessment::MaturityEngine;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::Value;
    use std::path::PathBuf;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn app_with_paths(paths: Vec<PathBuf>) -> axum::Router {
        let service = Arc::new(AssessmentService::new(MaturityEngine::default(), paths));
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(true)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        with_assessment_routes(service).layer(Extension(state))
    }

    fn sample_app(name: &str) -> axum::Router {
        app_with_paths(vec![write_survey(name, SAMPLE_CSV)])
    }

    async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.expect("request handled");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request builds")
    }

    #[tokio::test]
    async fn health_and_readiness_respond() {
        let (status, body) = send(app_with_paths(Vec::new()), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        let (status, body) = send(app_with_paths(Vec::new()), get("/ready")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
    }

    #[tokio::test]
    async fn submission_report_scores_the_requested_row() {
        let (status, body) = send(
            sample_app("route-submission"),
            get("/api/v1/submissions/101"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["submission"]["hospital_name"], "RS Harapan");
        assert_eq!(body["level"]["level"], 4);
        assert_eq!(body["level"]["name"], "Scale-Up");
        let weighted = body["breakdown"]["weighted_total"]
            .as_f64()
            .expect("weighted total");
        assert!((weighted - 11.1).abs() < 1e-9);
        assert_eq!(body["reference"].as_array().map(Vec::len), Some(5));
    }

    #[tokio::test]
    async fn unknown_submission_is_not_found() {
        let (status, body) = send(
            sample_app("route-missing"),
            get("/api/v1/submissions/999"),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["submission_id"], "999");
    }

    #[tokio::test]
    async fn incomplete_submission_is_unprocessable() {
        let (status, body) = send(
            sample_app("route-incomplete"),
            get("/api/v1/submissions/103"),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"]
            .as_str()
            .is_some_and(|message| message.contains("Dimensi 2")));
    }

    #[tokio::test]
    async fn report_falls_back_to_population_for_unknown_ids() {
        let (status, body) = send(
            sample_app("route-fallback"),
            get("/api/v1/report?submission_id=nope"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["scope"], "population");
        assert_eq!(body["not_found"], "nope");
        assert_eq!(body["summary"]["submission_count"], 2);
        assert_eq!(body["summary"]["skipped"][0]["submission_id"], "103");
    }

    #[tokio::test]
    async fn report_returns_submission_scope_for_known_ids() {
        let (status, body) = send(
            sample_app("route-known"),
            get("/api/v1/report?submission_id=102"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["scope"], "submission");
        assert_eq!(body["level"]["level"], 5);
    }

    #[tokio::test]
    async fn unavailable_sources_return_service_unavailable() {
        let (status, body) = send(
            app_with_paths(vec![PathBuf::from("./missing-survey.csv")]),
            get("/api/v1/summary"),
        )
        .await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["attempts"][0]["source"], "./missing-survey.csv");
    }

    #[tokio::test]
    async fn levels_lists_the_reference_table() {
        let (status, body) = send(app_with_paths(Vec::new()), get("/api/v1/levels")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["policy"], "rescaled_range");
        let ranges: Vec<&str> = body["levels"]
            .as_array()
            .expect("levels array")
            .iter()
            .filter_map(|row| row["range"].as_str())
            .collect();
        assert_eq!(ranges, vec!["15-27", "28-39", "40-51", "52-63", "64-75"]);
    }

    #[tokio::test]
    async fn assess_scores_posted_csv() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/assess")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({ "csv": SAMPLE_CSV, "submission_id": "101" }).to_string(),
            ))
            .expect("request builds");

        let (status, body) = send(app_with_paths(Vec::new()), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["scope"], "submission");
        assert_eq!(body["submission"]["submission_id"], "101");
    }

    #[tokio::test]
    async fn assess_rejects_exports_missing_columns() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/assess")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({ "csv": "Submission ID,Dimensi 1\n1,2\n" }).to_string(),
            ))
            .expect("request builds");

        let (status, body) = send(app_with_paths(Vec::new()), request).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"]
            .as_str()
            .is_some_and(|message| message.contains("Nama Rumah Sakit")));
    }
}
