//! HTTP handler functions for the `SecureCheck` API.

use actix_web::{HttpResponse, web};
use securecheck_analytics::{
    AnalyticsError, build_all_charts, report_names, stop_duration_options,
};
use securecheck_analytics_models::ReportTier;
use securecheck_server_models::{
    ApiCharts, ApiError, ApiHealth, ApiPrediction, ApiReportList, ApiReportOutcome,
    ApiStopDurations, ApiTable, ReportListParams, RunReportRequest,
};
use securecheck_stop_models::NewStopLog;

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/stops`
///
/// Returns every row of `police_check`. An unreachable store yields an
/// empty table with a `diagnostic`.
pub async fn stops(state: web::Data<AppState>) -> HttpResponse {
    let (snapshot, diagnostic) = state.dashboard.fetch_full_table_with_diagnostic().await;
    HttpResponse::Ok().json(ApiTable::with_diagnostic(&snapshot, diagnostic))
}

/// `GET /api/reports`
///
/// Lists the report names of one menu in menu order.
pub async fn reports(params: web::Query<ReportListParams>) -> HttpResponse {
    let tier = params.tier.unwrap_or(ReportTier::Advanced);
    HttpResponse::Ok().json(ApiReportList {
        tier,
        heading: tier.heading().to_string(),
        names: report_names(tier).into_iter().map(str::to_string).collect(),
    })
}

/// `POST /api/reports/run`
pub async fn run_report(
    state: web::Data<AppState>,
    body: web::Json<RunReportRequest>,
) -> HttpResponse {
    match state.dashboard.run_report(body.tier, &body.name).await {
        Ok(outcome) => HttpResponse::Ok().json(ApiReportOutcome::from(&outcome)),
        Err(e @ AnalyticsError::UnknownReportName { .. }) => {
            log::warn!("Rejected report request: {e}");
            HttpResponse::NotFound().json(ApiError {
                error: e.to_string(),
            })
        }
        Err(e) => {
            log::error!("Failed to run report: {e}");
            HttpResponse::BadRequest().json(ApiError {
                error: e.to_string(),
            })
        }
    }
}

/// `GET /api/charts`
///
/// Returns all three chart datasets built from one snapshot.
pub async fn charts(state: web::Data<AppState>) -> HttpResponse {
    let (snapshot, diagnostic) = state.dashboard.fetch_full_table_with_diagnostic().await;
    HttpResponse::Ok().json(ApiCharts {
        charts: build_all_charts(&snapshot),
        diagnostic,
    })
}

/// `GET /api/stop-durations`
pub async fn stop_durations(state: web::Data<AppState>) -> HttpResponse {
    let (snapshot, diagnostic) = state.dashboard.fetch_full_table_with_diagnostic().await;
    HttpResponse::Ok().json(ApiStopDurations {
        options: stop_duration_options(&snapshot),
        diagnostic,
    })
}

/// `POST /api/predict`
///
/// Predicts the violation and outcome for an entered stop. The stop is not
/// stored.
pub async fn predict(state: web::Data<AppState>, body: web::Json<NewStopLog>) -> HttpResponse {
    let (snapshot, diagnostic) = state.dashboard.fetch_full_table_with_diagnostic().await;
    match securecheck_analytics::predict(&snapshot, &body) {
        Ok(prediction) => HttpResponse::Ok().json(ApiPrediction {
            prediction,
            diagnostic,
        }),
        Err(e) => {
            log::warn!("Rejected prediction request: {e}");
            HttpResponse::BadRequest().json(ApiError {
                error: e.to_string(),
            })
        }
    }
}
