use axum::{
    extract::{Path, State},
    routing::{post, put},
    Json, Router,
};
use chrono::{Duration, NaiveDate};
use serde::Deserialize;
use serde_json::json;
use stayrate_core::{
    CatalogError, ExtraRates, Hotel, Promotion, PromotionBenefit, PromotionDailyRate, RoomType,
    Season, SeasonRate,
};
use stayrate_pricing::SeasonCalendar;
use uuid::Uuid;

use crate::error::AppError;
use crate::inventory;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/admin/hotels", post(create_hotel).get(list_hotels))
        .route(
            "/v1/admin/hotels/{hotel_id}/room-types",
            post(create_room_type).get(list_room_types),
        )
        .route(
            "/v1/admin/hotels/{hotel_id}/seasons",
            post(create_season).get(list_seasons),
        )
        .route("/v1/admin/season-rates", put(upsert_season_rate))
        .route(
            "/v1/admin/hotels/{hotel_id}/promotions",
            post(create_promotion),
        )
        .route(
            "/v1/admin/promotions/{promotion_id}",
            axum::routing::delete(delete_promotion),
        )
        .route(
            "/v1/admin/inventory",
            put(inventory::upsert_record).get(inventory::get_record),
        )
}

#[derive(Debug, Deserialize)]
pub struct CreateHotelRequest {
    pub name: String,
}

/// POST /v1/admin/hotels
async fn create_hotel(
    State(state): State<AppState>,
    Json(req): Json<CreateHotelRequest>,
) -> Result<Json<Hotel>, AppError> {
    let hotel = Hotel::new(req.name);
    state
        .catalog
        .create_hotel(&hotel)
        .await
        .map_err(AppError::Storage)?;
    Ok(Json(hotel))
}

/// GET /v1/admin/hotels
async fn list_hotels(State(state): State<AppState>) -> Result<Json<Vec<Hotel>>, AppError> {
    let hotels = state.catalog.list_hotels().await.map_err(AppError::Storage)?;
    Ok(Json(hotels))
}

#[derive(Debug, Deserialize)]
pub struct CreateRoomTypeRequest {
    pub name: String,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default)]
    pub extras: ExtraRates,
}

/// POST /v1/admin/hotels/{hotel_id}/room-types
async fn create_room_type(
    State(state): State<AppState>,
    Path(hotel_id): Path<Uuid>,
    Json(req): Json<CreateRoomTypeRequest>,
) -> Result<Json<RoomType>, AppError> {
    let mut room_type = RoomType::new(hotel_id, req.name, req.extras);
    room_type.display_order = req.display_order;
    state
        .catalog
        .create_room_type(&room_type)
        .await
        .map_err(AppError::Storage)?;
    Ok(Json(room_type))
}

/// GET /v1/admin/hotels/{hotel_id}/room-types
async fn list_room_types(
    State(state): State<AppState>,
    Path(hotel_id): Path<Uuid>,
) -> Result<Json<Vec<RoomType>>, AppError> {
    let room_types = state
        .catalog
        .list_room_types(hotel_id)
        .await
        .map_err(AppError::Storage)?;
    Ok(Json(room_types))
}

#[derive(Debug, Deserialize)]
pub struct CreateSeasonRequest {
    pub label: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// POST /v1/admin/hotels/{hotel_id}/seasons
///
/// Overlap with an existing season is a configuration conflict rejected
/// here, never layered silently.
async fn create_season(
    State(state): State<AppState>,
    Path(hotel_id): Path<Uuid>,
    Json(req): Json<CreateSeasonRequest>,
) -> Result<Json<Season>, AppError> {
    if req.end_date < req.start_date {
        return Err(AppError::BadRequest(
            "end_date must not precede start_date".into(),
        ));
    }
    let season = Season {
        id: Uuid::new_v4(),
        hotel_id,
        label: req.label,
        start_date: req.start_date,
        end_date: req.end_date,
    };

    let mut seasons = state
        .catalog
        .list_seasons(hotel_id)
        .await
        .map_err(AppError::Storage)?;
    seasons.push(season.clone());
    SeasonCalendar::try_new(seasons)?;

    state
        .catalog
        .create_season(&season)
        .await
        .map_err(AppError::Storage)?;
    Ok(Json(season))
}

/// GET /v1/admin/hotels/{hotel_id}/seasons
async fn list_seasons(
    State(state): State<AppState>,
    Path(hotel_id): Path<Uuid>,
) -> Result<Json<Vec<Season>>, AppError> {
    let seasons = state
        .catalog
        .list_seasons(hotel_id)
        .await
        .map_err(AppError::Storage)?;
    Ok(Json(seasons))
}

/// PUT /v1/admin/season-rates
async fn upsert_season_rate(
    State(state): State<AppState>,
    Json(rate): Json<SeasonRate>,
) -> Result<Json<serde_json::Value>, AppError> {
    state
        .catalog
        .upsert_season_rate(&rate)
        .await
        .map_err(AppError::Storage)?;
    Ok(Json(json!({ "status": "OK" })))
}

#[derive(Debug, Deserialize)]
pub struct DailyRateInput {
    pub room_type_id: Uuid,
    pub stay_date: NaiveDate,
    pub nightly_cents: i64,
    pub min_nights: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePromotionRequest {
    pub code: String,
    pub name: String,
    pub booking_start: NaiveDate,
    pub booking_end: NaiveDate,
    pub stay_start: NaiveDate,
    pub stay_end: NaiveDate,
    #[serde(default = "default_benefit")]
    pub benefit: PromotionBenefit,
    pub daily_rates: Vec<DailyRateInput>,
}

fn default_benefit() -> PromotionBenefit {
    PromotionBenefit::RateOverride
}

/// POST /v1/admin/hotels/{hotel_id}/promotions
///
/// Every advertised room type must have a daily-rate row for every night
/// of the stay window; a gap would only surface at quote time as an
/// excluded promotion, so it is rejected here instead.
async fn create_promotion(
    State(state): State<AppState>,
    Path(hotel_id): Path<Uuid>,
    Json(req): Json<CreatePromotionRequest>,
) -> Result<Json<Promotion>, AppError> {
    if req.booking_end < req.booking_start || req.stay_end < req.stay_start {
        return Err(AppError::BadRequest("window end precedes its start".into()));
    }
    if req.daily_rates.is_empty() {
        return Err(AppError::BadRequest(
            "a promotion needs daily rates for at least one room type".into(),
        ));
    }

    let promotion = Promotion {
        id: Uuid::new_v4(),
        hotel_id,
        code: req.code,
        name: req.name,
        booking_start: req.booking_start,
        booking_end: req.booking_end,
        stay_start: req.stay_start,
        stay_end: req.stay_end,
        is_active: true,
        benefit: req.benefit,
    };

    let daily_rates: Vec<PromotionDailyRate> = req
        .daily_rates
        .into_iter()
        .map(|input| PromotionDailyRate {
            promotion_id: promotion.id,
            room_type_id: input.room_type_id,
            stay_date: input.stay_date,
            nightly_cents: input.nightly_cents,
            min_nights: input.min_nights,
        })
        .collect();

    validate_stay_window_coverage(&promotion, &daily_rates)?;

    state
        .catalog
        .create_promotion(&promotion, &daily_rates)
        .await
        .map_err(AppError::Storage)?;
    Ok(Json(promotion))
}

fn validate_stay_window_coverage(
    promotion: &Promotion,
    daily_rates: &[PromotionDailyRate],
) -> Result<(), AppError> {
    let mut room_type_ids: Vec<Uuid> = daily_rates.iter().map(|r| r.room_type_id).collect();
    room_type_ids.sort_unstable();
    room_type_ids.dedup();

    let mut missing = Vec::new();
    for room_type_id in room_type_ids {
        let mut date = promotion.stay_start;
        while date <= promotion.stay_end {
            let covered = daily_rates
                .iter()
                .any(|r| r.room_type_id == room_type_id && r.stay_date == date);
            if !covered {
                missing.push(date);
            }
            date += Duration::days(1);
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        missing.sort_unstable();
        missing.dedup();
        Err(CatalogError::IncompleteDailyRates {
            missing_dates: missing,
        }
        .into())
    }
}

/// DELETE /v1/admin/promotions/{promotion_id} — retires the promotion and
/// its daily rates. Persisted reservation lines keep their snapshots.
async fn delete_promotion(
    State(state): State<AppState>,
    Path(promotion_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    state
        .catalog
        .delete_promotion(promotion_id)
        .await
        .map_err(AppError::Storage)?;
    Ok(Json(json!({ "status": "OK" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn promo(stay_start: &str, stay_end: &str) -> Promotion {
        Promotion {
            id: Uuid::new_v4(),
            hotel_id: Uuid::new_v4(),
            code: "EARLYWINTER2025".into(),
            name: "Early winter".into(),
            booking_start: d("2025-11-01"),
            booking_end: d("2025-12-31"),
            stay_start: d(stay_start),
            stay_end: d(stay_end),
            is_active: true,
            benefit: PromotionBenefit::RateOverride,
        }
    }

    fn rate(promotion: &Promotion, room_type_id: Uuid, date: &str) -> PromotionDailyRate {
        PromotionDailyRate {
            promotion_id: promotion.id,
            room_type_id,
            stay_date: d(date),
            nightly_cents: 10_000,
            min_nights: None,
        }
    }

    #[test]
    fn full_stay_window_coverage_is_accepted() {
        let promotion = promo("2026-01-05", "2026-01-06");
        let rt = Uuid::new_v4();
        let rates = vec![
            rate(&promotion, rt, "2026-01-05"),
            rate(&promotion, rt, "2026-01-06"),
        ];
        assert!(validate_stay_window_coverage(&promotion, &rates).is_ok());
    }

    #[test]
    fn coverage_gap_is_rejected_naming_the_date() {
        let promotion = promo("2026-01-05", "2026-01-07");
        let rt = Uuid::new_v4();
        let rates = vec![
            rate(&promotion, rt, "2026-01-05"),
            rate(&promotion, rt, "2026-01-07"),
        ];
        let err = validate_stay_window_coverage(&promotion, &rates).unwrap_err();
        match err {
            AppError::Catalog(CatalogError::IncompleteDailyRates { missing_dates }) => {
                assert_eq!(missing_dates, vec![d("2026-01-06")]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
