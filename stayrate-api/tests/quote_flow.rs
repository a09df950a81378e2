//! End-to-end quote and booking flow over the in-memory backends.

use std::sync::Arc;

use chrono::NaiveDate;
use stayrate_core::{
    CatalogRepository, ExtraRates, Hotel, InventoryError, InventoryLedger, Promotion,
    PromotionBenefit, PromotionDailyRate, QuoteError, RoomInventoryRecord, RoomType, Season,
    SeasonRate, StayQuoteRequest,
};
use stayrate_inventory::MemoryInventoryLedger;
use stayrate_pricing::{MemoryCatalog, QuoteService};
use uuid::Uuid;

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

struct Fixture {
    catalog: Arc<MemoryCatalog>,
    inventory: MemoryInventoryLedger,
    quotes: QuoteService,
    hotel: Hotel,
    room_type: RoomType,
}

/// Winter season covering January 2026 at $90/night, plus the
/// EARLYWINTER2025 promotion overriding two nights at $100/$110.
async fn fixture() -> Fixture {
    let catalog = Arc::new(MemoryCatalog::new());

    let hotel = Hotel::new("Harbor View");
    catalog.create_hotel(&hotel).await.unwrap();

    let room_type = RoomType::new(
        hotel.id,
        "Deluxe Twin",
        ExtraRates {
            breakfast_adult_cents: 1_500,
            breakfast_child_cents: 800,
            breakfast_infant_cents: 0,
            extra_bed_cents: 3_000,
            baby_cot_cents: 1_000,
        },
    );
    catalog.create_room_type(&room_type).await.unwrap();

    let season = Season {
        id: Uuid::new_v4(),
        hotel_id: hotel.id,
        label: "Winter 2026".into(),
        start_date: d("2026-01-01"),
        end_date: d("2026-02-28"),
    };
    catalog.create_season(&season).await.unwrap();
    catalog
        .upsert_season_rate(&SeasonRate {
            season_id: season.id,
            room_type_id: room_type.id,
            nightly_cents: 9_000,
        })
        .await
        .unwrap();

    let promotion = Promotion {
        id: Uuid::new_v4(),
        hotel_id: hotel.id,
        code: "EARLYWINTER2025".into(),
        name: "Early winter".into(),
        booking_start: d("2025-11-01"),
        booking_end: d("2025-12-31"),
        stay_start: d("2026-01-05"),
        stay_end: d("2026-01-06"),
        is_active: true,
        benefit: PromotionBenefit::RateOverride,
    };
    let daily_rates = vec![
        PromotionDailyRate {
            promotion_id: promotion.id,
            room_type_id: room_type.id,
            stay_date: d("2026-01-05"),
            nightly_cents: 10_000,
            min_nights: None,
        },
        PromotionDailyRate {
            promotion_id: promotion.id,
            room_type_id: room_type.id,
            stay_date: d("2026-01-06"),
            nightly_cents: 11_000,
            min_nights: None,
        },
    ];
    catalog
        .create_promotion(&promotion, &daily_rates)
        .await
        .unwrap();

    let quotes = QuoteService::new(catalog.clone(), "USD");

    Fixture {
        catalog,
        inventory: MemoryInventoryLedger::new(),
        quotes,
        hotel,
        room_type,
    }
}

fn quote_request(fixture: &Fixture) -> StayQuoteRequest {
    StayQuoteRequest {
        room_type_id: fixture.room_type.id,
        check_in: d("2026-01-05"),
        check_out: d("2026-01-07"),
        adults: 2,
        children: 0,
        infants: 0,
        promotion_code: Some("EARLYWINTER2025".into()),
        breakfast: true,
        extra_bed: false,
        baby_cot: false,
        today: d("2025-12-01"),
    }
}

#[tokio::test]
async fn early_winter_promotion_quote_totals() {
    let fx = fixture().await;

    let quote = fx.quotes.get_quote(&quote_request(&fx)).await.unwrap();

    assert_eq!(quote.room_subtotal_cents, 21_000);
    assert_eq!(quote.extras.breakfast_cents, 6_000);
    assert_eq!(quote.grand_total_cents, 27_000);
    assert_eq!(quote.promotion_code.as_deref(), Some("EARLYWINTER2025"));
    assert_eq!(quote.nights.len(), 2);
}

#[tokio::test]
async fn season_rates_apply_without_a_promotion_code() {
    let fx = fixture().await;
    let mut request = quote_request(&fx);
    request.promotion_code = None;
    request.breakfast = false;

    let quote = fx.quotes.get_quote(&request).await.unwrap();

    assert_eq!(quote.room_subtotal_cents, 18_000);
    assert!(quote.promotion_code.is_none());
}

#[tokio::test]
async fn unknown_promotion_code_is_rejected() {
    let fx = fixture().await;
    let mut request = quote_request(&fx);
    request.promotion_code = Some("SUMMER2099".into());

    let err = fx.quotes.get_quote(&request).await.unwrap_err();
    assert!(matches!(err, QuoteError::PromoNotApplicable { .. }));
}

#[tokio::test]
async fn stay_outside_every_rate_source_names_missing_dates() {
    let fx = fixture().await;
    let mut request = quote_request(&fx);
    request.promotion_code = None;
    request.check_in = d("2026-03-10");
    request.check_out = d("2026-03-12");

    let err = fx.quotes.get_quote(&request).await.unwrap_err();
    match err {
        QuoteError::IncompleteRateCoverage { missing_dates } => {
            assert_eq!(missing_dates, vec![d("2026-03-10"), d("2026-03-11")]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn quote_then_reserve_then_release_round_trip() {
    let fx = fixture().await;

    for date in ["2026-01-05", "2026-01-06"] {
        fx.inventory
            .upsert_record(&RoomInventoryRecord {
                hotel_id: fx.hotel.id,
                room_type_id: fx.room_type.id,
                date: d(date),
                available: 3,
                allocated: None,
                reserved: 0,
            })
            .await
            .unwrap();
    }

    let quote = fx.quotes.get_quote(&quote_request(&fx)).await.unwrap();
    let dates: Vec<NaiveDate> = quote.nights.iter().map(|n| n.date).collect();

    fx.inventory
        .check_and_reserve(fx.hotel.id, fx.room_type.id, &dates, 2)
        .await
        .unwrap();

    // Only one room left on each night now.
    let err = fx
        .inventory
        .check_and_reserve(fx.hotel.id, fx.room_type.id, &dates, 2)
        .await
        .unwrap_err();
    assert!(matches!(err, InventoryError::Insufficient { .. }));

    fx.inventory
        .release(fx.hotel.id, fx.room_type.id, &dates, 2)
        .await
        .unwrap();
    let record = fx
        .inventory
        .get_record(fx.hotel.id, fx.room_type.id, d("2026-01-05"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.reserved, 0);
}

#[tokio::test]
async fn retired_promotion_disappears_from_quoting() {
    let fx = fixture().await;

    let promotions = fx.catalog.list_active_promotions(fx.hotel.id).await.unwrap();
    let promo_id = promotions[0].id;
    fx.catalog.delete_promotion(promo_id).await.unwrap();

    let err = fx.quotes.get_quote(&quote_request(&fx)).await.unwrap_err();
    assert!(matches!(err, QuoteError::PromoNotApplicable { .. }));
}
