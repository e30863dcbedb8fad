use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use serde_json::json;
use tracing::warn;

use crate::AirRouteError;
use crate::display::MapView;
use crate::models::{BuildRequest, RouteAirQualityReport};
use crate::session::{BuildOutcome, BuildSession, DisplayedReport};

/// A displayed report with its map model
#[derive(Serialize)]
pub struct ReportResponse<'a> {
    pub generation: u64,
    pub report: &'a RouteAirQualityReport,
    pub map: MapView,
}

impl<'a> From<&'a DisplayedReport> for ReportResponse<'a> {
    fn from(displayed: &'a DisplayedReport) -> Self {
        Self {
            generation: displayed.generation,
            report: &displayed.report,
            map: MapView::from_report(&displayed.report),
        }
    }
}

/// Pipeline errors rendered as the single user-facing notification
pub struct ApiError(AirRouteError);

impl From<AirRouteError> for ApiError {
    fn from(err: AirRouteError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            AirRouteError::Validation { .. } => StatusCode::BAD_REQUEST,
            AirRouteError::NotFound { .. } => StatusCode::NOT_FOUND,
            AirRouteError::NoRoute { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AirRouteError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            AirRouteError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.0.user_message(),
            "kind": self.0.code(),
        }));

        (status, body).into_response()
    }
}

pub fn router(session: Arc<BuildSession>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/report", get(current_report).post(submit_report))
        .with_state(session)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "version": crate::VERSION }))
}

async fn submit_report(
    State(session): State<Arc<BuildSession>>,
    payload: Result<Json<BuildRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Unreadable build request: {}", rejection.body_text());
        AirRouteError::validation(rejection.body_text())
    })?;

    match session.submit(request).await? {
        BuildOutcome::Displayed(displayed) => {
            Ok(Json(ReportResponse::from(&displayed)).into_response())
        }
        BuildOutcome::Superseded { generation, latest } => Ok((
            StatusCode::CONFLICT,
            Json(json!({
                "error": "A newer request replaced this one",
                "generation": generation,
                "latest": latest,
            })),
        )
            .into_response()),
    }
}

async fn current_report(State(session): State<Arc<BuildSession>>) -> Response {
    match session.current().await {
        Some(displayed) => Json(ReportResponse::from(&displayed)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}
