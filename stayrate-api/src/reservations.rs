use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use stayrate_core::{PriceQuote, ReservationRoomLine};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ConfirmRoomRequest {
    pub hotel_id: Uuid,
    pub quote: PriceQuote,
    #[serde(default = "default_count")]
    pub count: i32,
}

fn default_count() -> i32 {
    1
}

/// POST /v1/reservations/{reservation_id}/rooms
///
/// Booking confirmation boundary: hold the inventory for every night of
/// the accepted quote, then persist the room line with the quoted nightly
/// snapshot. Later promotion edits never touch the persisted line.
pub async fn create_room_line(
    State(state): State<AppState>,
    Path(reservation_id): Path<Uuid>,
    Json(req): Json<ConfirmRoomRequest>,
) -> Result<Json<ReservationRoomLine>, AppError> {
    let dates: Vec<NaiveDate> = req.quote.nights.iter().map(|n| n.date).collect();
    if dates.is_empty() {
        return Err(AppError::BadRequest("quote has no nights".into()));
    }

    state
        .inventory
        .check_and_reserve(req.hotel_id, req.quote.room_type_id, &dates, req.count)
        .await?;

    let line = ReservationRoomLine::from_quote(reservation_id, &req.quote);
    if let Err(err) = state.reservations.create_room_line(&line).await {
        // Don't leak the hold if the line cannot be persisted.
        let _ = state
            .inventory
            .release(req.hotel_id, req.quote.room_type_id, &dates, req.count)
            .await;
        return Err(AppError::Storage(err));
    }

    Ok(Json(line))
}

/// GET /v1/reservations/{reservation_id}/rooms
pub async fn list_room_lines(
    State(state): State<AppState>,
    Path(reservation_id): Path<Uuid>,
) -> Result<Json<Vec<ReservationRoomLine>>, AppError> {
    let lines = state
        .reservations
        .list_room_lines(reservation_id)
        .await
        .map_err(AppError::Storage)?;
    Ok(Json(lines))
}
