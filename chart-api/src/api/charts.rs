//! Chart persistence endpoints

use axum::{extract::State, response::Json};

use crate::api::error::ApiError;
use crate::charts::ChartRecord;
use crate::schema::{PushChartRequest, PushChartResponse};
use crate::state::AppState;

/// Handler for POST /push-chart
///
/// Appends a chart record to the chart file and echoes it back.
///
/// Request body:
/// ```json
/// { "name": "revenue", "data": {"x": [1, 2]}, "meta": {"owner": "ops"} }
/// ```
///
/// Response:
/// ```json
/// {
///   "saved": true,
///   "record": {
///     "id": "2026-10-18T09:15:02.123456Z",
///     "name": "revenue",
///     "data": {"x": [1, 2]},
///     "meta": {"owner": "ops"}
///   }
/// }
/// ```
pub async fn push_chart_handler(
    State(state): State<AppState>,
    Json(request): Json<PushChartRequest>,
) -> Result<Json<PushChartResponse>, ApiError> {
    let record = state
        .charts()
        .push_chart(request.name, request.data, request.meta)
        .await
        .map_err(ApiError::internal)?;

    Ok(Json(PushChartResponse {
        saved: true,
        record,
    }))
}

/// Handler for GET /charts
///
/// Returns every stored chart record in insertion order.
pub async fn list_charts_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<ChartRecord>>, ApiError> {
    let records = state
        .charts()
        .list_charts()
        .await
        .map_err(ApiError::internal)?;

    Ok(Json(records))
}
