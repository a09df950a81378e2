use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use stayrate_core::Promotion;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EligibleQuery {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub today: Option<NaiveDate>,
}

/// GET /v1/hotels/{hotel_id}/room-types/{room_type_id}/promotions
///
/// The full eligible set for the stay; the caller picks one explicitly,
/// nothing is auto-applied.
pub async fn list_eligible(
    State(state): State<AppState>,
    Path((hotel_id, room_type_id)): Path<(Uuid, Uuid)>,
    Query(query): Query<EligibleQuery>,
) -> Result<Json<Vec<Promotion>>, AppError> {
    let room_type = state
        .catalog
        .get_room_type(room_type_id)
        .await
        .map_err(AppError::Storage)?
        .filter(|rt| rt.hotel_id == hotel_id)
        .ok_or_else(|| AppError::NotFound(format!("room type {room_type_id} not found")))?;

    let today = query.today.unwrap_or_else(|| Utc::now().date_naive());
    let eligible = state
        .quotes
        .list_eligible_promotions(room_type.id, query.check_in, query.check_out, today)
        .await?;
    Ok(Json(eligible))
}
