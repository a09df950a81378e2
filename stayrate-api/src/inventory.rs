use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use stayrate_core::{RoomDateState, RoomInventoryRecord};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct InventoryChangeRequest {
    pub hotel_id: Uuid,
    pub room_type_id: Uuid,
    pub dates: Vec<NaiveDate>,
    pub count: i32,
}

#[derive(Debug, Serialize)]
pub struct InventoryChangeResponse {
    pub status: String,
}

/// POST /v1/inventory/reserve
///
/// All requested nights are held atomically or the call fails with
/// `INSUFFICIENT_INVENTORY`; there are no partial holds.
pub async fn reserve(
    State(state): State<AppState>,
    Json(req): Json<InventoryChangeRequest>,
) -> Result<Json<InventoryChangeResponse>, AppError> {
    if req.dates.is_empty() || req.count <= 0 {
        return Err(AppError::BadRequest(
            "at least one date and a positive count are required".into(),
        ));
    }
    state
        .inventory
        .check_and_reserve(req.hotel_id, req.room_type_id, &req.dates, req.count)
        .await?;
    Ok(Json(InventoryChangeResponse {
        status: "RESERVED".into(),
    }))
}

/// POST /v1/inventory/release
///
/// Inverse of reserve; retried cancellations are no-ops.
pub async fn release(
    State(state): State<AppState>,
    Json(req): Json<InventoryChangeRequest>,
) -> Result<Json<InventoryChangeResponse>, AppError> {
    if req.count <= 0 {
        return Err(AppError::BadRequest("a positive count is required".into()));
    }
    state
        .inventory
        .release(req.hotel_id, req.room_type_id, &req.dates, req.count)
        .await?;
    Ok(Json(InventoryChangeResponse {
        status: "RELEASED".into(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct InventoryQuery {
    pub hotel_id: Uuid,
    pub room_type_id: Uuid,
    pub date: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct InventoryStateResponse {
    #[serde(flatten)]
    pub record: RoomInventoryRecord,
    pub state: RoomDateState,
}

/// GET /v1/inventory
pub async fn get_record(
    State(state): State<AppState>,
    Query(query): Query<InventoryQuery>,
) -> Result<Json<InventoryStateResponse>, AppError> {
    let record = state
        .inventory
        .get_record(query.hotel_id, query.room_type_id, query.date)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "no inventory record for room type {} on {}",
                query.room_type_id, query.date
            ))
        })?;
    let state = record.state();
    Ok(Json(InventoryStateResponse {
        record,
        state,
    }))
}

/// PUT /v1/admin/inventory — operator upsert of the counters.
pub async fn upsert_record(
    State(state): State<AppState>,
    Json(record): Json<RoomInventoryRecord>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.inventory.upsert_record(&record).await?;
    Ok(Json(json!({ "status": "OK" })))
}
