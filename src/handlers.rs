use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::{StatusCode, header},
    response::{Html, IntoResponse},
};
use tracing::debug;

use crate::{
    AppState,
    error::ApiError,
    models::{EventRecord, ReservationQuery},
};

pub const ICS_CONTENT_TYPE: &str = "text/calendar; charset=utf-8";
pub const ICS_CONTENT_DISPOSITION: &str = "attachment; filename=\"reservation.ics\"";

const INDEX_HTML: &str = include_str!("../static/index.html");

#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Reservation form", content_type = "text/html")),
    tag = "ics"
)]
pub async fn root() -> impl IntoResponse {
    Html(INDEX_HTML)
}

#[utoipa::path(get, path = "/healthz/live", tag = "ics")]
pub async fn healthz_live() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(get, path = "/healthz/ready", tag = "ics")]
pub async fn healthz_ready() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(
    get,
    path = "/generate-ics",
    params(ReservationQuery),
    responses(
        (status = 200, description = "iCalendar file", content_type = "text/calendar"),
        (status = 400, description = "dtstart or dtend is missing", content_type = "text/plain")
    ),
    tag = "ics"
)]
pub async fn generate_ics(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(pairs) = query?;
    let query: ReservationQuery = pairs.into_iter().collect();
    let event = EventRecord::from_query(query, &state.settings.default_summary)?;

    let body = state.exporter.generate(&event);
    debug!(
        dtstart = %event.dtstart,
        dtend = %event.dtend,
        "Generated reservation calendar"
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, ICS_CONTENT_TYPE),
            (header::CONTENT_DISPOSITION, ICS_CONTENT_DISPOSITION),
        ],
        body,
    ))
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not found".into())
}
