use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use stayrate_core::{
    CatalogRepository, PriceQuote, Promotion, QuoteError, RoomType, StayQuoteRequest,
};
use stayrate_shared::{Cents, StayRange};
use tracing::debug;
use uuid::Uuid;

use crate::aggregator;
use crate::calendar::SeasonCalendar;
use crate::matcher::{self, CandidatePromotion, PromotionSelection};
use crate::resolver;

/// Orchestrates one quote: loads reference data through the catalog port,
/// runs matcher, resolver and aggregator. Stateless apart from the port
/// handle; each call is one synchronous computation over a small date
/// range.
pub struct QuoteService {
    catalog: Arc<dyn CatalogRepository>,
    currency: String,
}

impl QuoteService {
    pub fn new(catalog: Arc<dyn CatalogRepository>, currency: impl Into<String>) -> Self {
        Self {
            catalog,
            currency: currency.into(),
        }
    }

    pub async fn get_quote(&self, request: &StayQuoteRequest) -> Result<PriceQuote, QuoteError> {
        let stay = request.stay()?;
        let room_type = self.room_type(request.room_type_id).await?;

        let candidates = self.load_candidates(&room_type, &stay).await?;
        let selection = matcher::select(
            candidates,
            &stay,
            request.today,
            request.promotion_code.as_deref(),
        )?;
        let selected = match &selection {
            PromotionSelection::Promotion(candidate) => Some(candidate),
            PromotionSelection::SeasonOnly => None,
        };

        let calendar = self.calendar(room_type.hotel_id).await?;
        let season_rates = self
            .season_rates_for_stay(&calendar, &stay, room_type.id)
            .await?;

        let nights = resolver::resolve_nights(&stay, selected, &calendar, &season_rates)?;
        debug!(
            room_type = %room_type.id,
            nights = nights.len(),
            promotion = ?request.promotion_code,
            "resolved stay"
        );

        let benefit = selected.map(|c| c.promotion.benefit.clone());
        Ok(aggregator::aggregate(
            request,
            &room_type,
            nights,
            benefit.as_ref(),
            &self.currency,
        ))
    }

    /// The full eligible set for a stay; selection stays with the caller.
    pub async fn list_eligible_promotions(
        &self,
        room_type_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
        today: NaiveDate,
    ) -> Result<Vec<Promotion>, QuoteError> {
        let stay = StayRange::new(check_in, check_out)?;
        let room_type = self.room_type(room_type_id).await?;
        let candidates = self.load_candidates(&room_type, &stay).await?;
        Ok(matcher::eligible_promotions(&candidates, &stay, today))
    }

    async fn room_type(&self, id: Uuid) -> Result<RoomType, QuoteError> {
        self.catalog
            .get_room_type(id)
            .await
            .map_err(QuoteError::Storage)?
            .ok_or(QuoteError::RoomTypeNotFound(id))
    }

    async fn load_candidates(
        &self,
        room_type: &RoomType,
        stay: &StayRange,
    ) -> Result<Vec<CandidatePromotion>, QuoteError> {
        let promotions = self
            .catalog
            .list_active_promotions(room_type.hotel_id)
            .await
            .map_err(QuoteError::Storage)?;

        let mut candidates = Vec::with_capacity(promotions.len());
        for promotion in promotions {
            let rates = self
                .catalog
                .list_daily_rates(promotion.id, room_type.id, stay.check_in(), stay.check_out())
                .await
                .map_err(QuoteError::Storage)?;
            candidates.push(CandidatePromotion::new(promotion, rates));
        }
        Ok(candidates)
    }

    async fn calendar(&self, hotel_id: Uuid) -> Result<SeasonCalendar, QuoteError> {
        let seasons = self
            .catalog
            .list_seasons(hotel_id)
            .await
            .map_err(QuoteError::Storage)?;
        // Overlaps are rejected at write time; finding one here means the
        // stored reference data is inconsistent.
        SeasonCalendar::try_new(seasons).map_err(|e| QuoteError::Storage(Box::new(e)))
    }

    async fn season_rates_for_stay(
        &self,
        calendar: &SeasonCalendar,
        stay: &StayRange,
        room_type_id: Uuid,
    ) -> Result<HashMap<Uuid, Cents>, QuoteError> {
        let mut rates = HashMap::new();
        for night in stay.iter_nights() {
            let Some(season) = calendar.season_for(night) else {
                continue;
            };
            if rates.contains_key(&season.id) {
                continue;
            }
            if let Some(rate) = self
                .catalog
                .get_season_rate(season.id, room_type_id)
                .await
                .map_err(QuoteError::Storage)?
            {
                rates.insert(season.id, rate.nightly_cents);
            }
        }
        Ok(rates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryCatalog;
    use stayrate_core::{
        ExtraRates, Hotel, PromotionBenefit, PromotionDailyRate, RateSource, Season, SeasonRate,
    };

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    struct Fixture {
        service: QuoteService,
        room_type_id: Uuid,
    }

    /// Hotel with an off-peak season at $80/night and the EARLYWINTER2025
    /// promotion priced $100/$110 for 2026-01-05..07.
    async fn fixture(promo_dates: &[(&str, i64)]) -> Fixture {
        let catalog = Arc::new(MemoryCatalog::new());
        let hotel = Hotel::new("Harbor View");
        catalog.create_hotel(&hotel).await.unwrap();

        let room_type = RoomType::new(
            hotel.id,
            "Deluxe Twin",
            ExtraRates {
                breakfast_adult_cents: 1_500,
                ..Default::default()
            },
        );
        catalog.create_room_type(&room_type).await.unwrap();

        let season = Season {
            id: Uuid::new_v4(),
            hotel_id: hotel.id,
            label: "off-peak".into(),
            start_date: d("2026-01-01"),
            end_date: d("2026-02-28"),
        };
        catalog.create_season(&season).await.unwrap();
        catalog
            .upsert_season_rate(&SeasonRate {
                season_id: season.id,
                room_type_id: room_type.id,
                nightly_cents: 8_000,
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
            stay_start: d("2026-01-01"),
            stay_end: d("2026-01-31"),
            is_active: true,
            benefit: PromotionBenefit::RateOverride,
        };
        let rates: Vec<PromotionDailyRate> = promo_dates
            .iter()
            .map(|(date, cents)| PromotionDailyRate {
                promotion_id: promotion.id,
                room_type_id: room_type.id,
                stay_date: d(date),
                nightly_cents: *cents,
                min_nights: None,
            })
            .collect();
        catalog.create_promotion(&promotion, &rates).await.unwrap();

        Fixture {
            service: QuoteService::new(catalog, "USD"),
            room_type_id: room_type.id,
        }
    }

    fn request(fixture: &Fixture, code: Option<&str>) -> StayQuoteRequest {
        StayQuoteRequest {
            room_type_id: fixture.room_type_id,
            check_in: d("2026-01-05"),
            check_out: d("2026-01-07"),
            adults: 2,
            children: 0,
            infants: 0,
            promotion_code: code.map(str::to_string),
            breakfast: true,
            extra_bed: false,
            baby_cot: false,
            today: d("2025-12-01"),
        }
    }

    #[tokio::test]
    async fn promotion_quote_matches_early_winter_scenario() {
        let f = fixture(&[("2026-01-05", 10_000), ("2026-01-06", 11_000)]).await;
        let quote = f
            .service
            .get_quote(&request(&f, Some("EARLYWINTER2025")))
            .await
            .unwrap();

        assert_eq!(quote.room_subtotal_cents, 21_000);
        assert_eq!(quote.extras.breakfast_cents, 6_000);
        assert_eq!(quote.grand_total_cents, 27_000);
        assert!(quote.nights.iter().all(|n| n.source == RateSource::Promotion));
    }

    #[tokio::test]
    async fn no_code_falls_back_to_season_rates() {
        let f = fixture(&[("2026-01-05", 10_000), ("2026-01-06", 11_000)]).await;
        let quote = f.service.get_quote(&request(&f, None)).await.unwrap();
        assert_eq!(quote.room_subtotal_cents, 16_000);
        assert!(quote.nights.iter().all(|n| n.source == RateSource::Season));
        assert!(quote.promotion_code.is_none());
    }

    #[tokio::test]
    async fn partially_covered_promotion_is_not_applicable() {
        // Daily rate only for the first night; the promotion is excluded
        // entirely, it does not price a subset of nights.
        let f = fixture(&[("2026-01-05", 10_000)]).await;
        let err = f
            .service
            .get_quote(&request(&f, Some("EARLYWINTER2025")))
            .await
            .unwrap_err();
        assert!(matches!(err, QuoteError::PromoNotApplicable { .. }));

        // Without the code the season still covers both nights.
        let quote = f.service.get_quote(&request(&f, None)).await.unwrap();
        assert_eq!(quote.room_subtotal_cents, 16_000);

        let eligible = f
            .service
            .list_eligible_promotions(
                f.room_type_id,
                d("2026-01-05"),
                d("2026-01-07"),
                d("2025-12-01"),
            )
            .await
            .unwrap();
        assert!(eligible.is_empty());
    }

    #[tokio::test]
    async fn eligible_list_is_surfaced_not_auto_applied() {
        let f = fixture(&[("2026-01-05", 10_000), ("2026-01-06", 11_000)]).await;
        let eligible = f
            .service
            .list_eligible_promotions(
                f.room_type_id,
                d("2026-01-05"),
                d("2026-01-07"),
                d("2025-12-01"),
            )
            .await
            .unwrap();
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].code, "EARLYWINTER2025");
    }

    #[tokio::test]
    async fn unknown_room_type_is_reported() {
        let f = fixture(&[]).await;
        let mut req = request(&f, None);
        req.room_type_id = Uuid::new_v4();
        let err = f.service.get_quote(&req).await.unwrap_err();
        assert!(matches!(err, QuoteError::RoomTypeNotFound(_)));
    }
}
