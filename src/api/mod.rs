use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::core::{AssumptionField, Assumptions, Dashboard, DashboardSnapshot};
use crate::error::ServeError;

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

/// A control value as the browser sends it: JSON bodies carry numbers, query
/// strings and text inputs carry strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    fn as_text(&self) -> String {
        match self {
            RawValue::Number(v) => v.to_string(),
            RawValue::Text(s) => s.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct MetricsPayload {
    monthly_price: Option<RawValue>,
    yearly_price: Option<RawValue>,
    conversion_rate: Option<RawValue>,
    profit_margin: Option<RawValue>,
    retention_months: Option<RawValue>,
    yearly_retention_years: Option<RawValue>,
    yearly_ratio: Option<RawValue>,
    impressions: Option<RawValue>,
    app_store_cut: Option<RawValue>,
}

impl MetricsPayload {
    fn fields(&self) -> [(AssumptionField, Option<&RawValue>); 9] {
        [
            (AssumptionField::MonthlyPrice, self.monthly_price.as_ref()),
            (AssumptionField::YearlyPrice, self.yearly_price.as_ref()),
            (AssumptionField::ConversionRate, self.conversion_rate.as_ref()),
            (AssumptionField::ProfitMargin, self.profit_margin.as_ref()),
            (AssumptionField::RetentionMonths, self.retention_months.as_ref()),
            (
                AssumptionField::YearlyRetentionYears,
                self.yearly_retention_years.as_ref(),
            ),
            (AssumptionField::YearlyRatio, self.yearly_ratio.as_ref()),
            (AssumptionField::Impressions, self.impressions.as_ref()),
            (AssumptionField::AppStoreCut, self.app_store_cut.as_ref()),
        ]
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route("/api/defaults", get(defaults_handler))
        .route(
            "/api/metrics",
            get(metrics_get_handler).post(metrics_post_handler),
        )
        .fallback(not_found_handler)
}

pub async fn run_http_server(port: u16) -> Result<(), ServeError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServeError::Bind { addr, source })?;
    info!(%addr, "dashboard listening");
    info!("local access: http://127.0.0.1:{port}/");

    axum::serve(listener, router())
        .await
        .map_err(ServeError::Serve)
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn defaults_handler() -> Response {
    json_response(StatusCode::OK, Assumptions::default())
}

async fn metrics_get_handler(Query(payload): Query<MetricsPayload>) -> Response {
    metrics_handler_impl(payload).await
}

async fn metrics_post_handler(Json(payload): Json<MetricsPayload>) -> Response {
    metrics_handler_impl(payload).await
}

async fn metrics_handler_impl(payload: MetricsPayload) -> Response {
    let snapshot = snapshot_from_payload(&payload);
    debug!(
        impressions = snapshot.assumptions.impressions,
        revenue = snapshot.metrics.revenue,
        profit = snapshot.metrics.profit,
        "metrics computed"
    );
    json_response(StatusCode::OK, snapshot)
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn payload_from_json(json: &str) -> Result<MetricsPayload, String> {
    serde_json::from_str::<MetricsPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))
}

fn dashboard_from_payload(payload: &MetricsPayload) -> Dashboard {
    let mut dashboard = Dashboard::new(Assumptions::default());
    for (field, raw) in payload.fields() {
        if let Some(raw) = raw {
            dashboard.set(field, &raw.as_text());
        }
    }
    dashboard
}

#[cfg(test)]
fn assumptions_from_payload(payload: &MetricsPayload) -> Assumptions {
    *dashboard_from_payload(payload).assumptions()
}

fn snapshot_from_payload(payload: &MetricsPayload) -> DashboardSnapshot {
    dashboard_from_payload(payload).snapshot()
}
