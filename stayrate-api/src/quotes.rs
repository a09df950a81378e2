use axum::{extract::State, Json};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use stayrate_core::{PriceQuote, StayQuoteRequest};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct QuoteRequestBody {
    pub room_type_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default)]
    pub infants: u32,
    pub promotion_code: Option<String>,
    #[serde(default)]
    pub breakfast: bool,
    #[serde(default)]
    pub extra_bed: bool,
    #[serde(default)]
    pub baby_cot: bool,
    /// Booking date for promotion window checks; defaults to the host
    /// clock.
    pub today: Option<NaiveDate>,
}

/// POST /v1/quotes
pub async fn create_quote(
    State(state): State<AppState>,
    Json(body): Json<QuoteRequestBody>,
) -> Result<Json<PriceQuote>, AppError> {
    let request = StayQuoteRequest {
        room_type_id: body.room_type_id,
        check_in: body.check_in,
        check_out: body.check_out,
        adults: body.adults,
        children: body.children,
        infants: body.infants,
        promotion_code: body.promotion_code,
        breakfast: body.breakfast,
        extra_bed: body.extra_bed,
        baby_cot: body.baby_cot,
        today: body.today.unwrap_or_else(|| Utc::now().date_naive()),
    };

    let quote = state.quotes.get_quote(&request).await?;
    Ok(Json(quote))
}
