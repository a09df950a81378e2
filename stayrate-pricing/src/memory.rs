use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use stayrate_core::{
    BoxError, CatalogRepository, Hotel, Promotion, PromotionDailyRate, RoomType, Season,
    SeasonRate,
};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Inner {
    hotels: Vec<Hotel>,
    room_types: Vec<RoomType>,
    seasons: Vec<Season>,
    season_rates: HashMap<(Uuid, Uuid), SeasonRate>,
    promotions: Vec<Promotion>,
    daily_rates: Vec<PromotionDailyRate>,
}

/// In-memory catalog implementing the storage port, so the quote pipeline
/// is testable without a live database. Also backs the API integration
/// tests.
#[derive(Default)]
pub struct MemoryCatalog {
    inner: RwLock<Inner>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogRepository for MemoryCatalog {
    async fn create_hotel(&self, hotel: &Hotel) -> Result<(), BoxError> {
        self.inner.write().await.hotels.push(hotel.clone());
        Ok(())
    }

    async fn list_hotels(&self) -> Result<Vec<Hotel>, BoxError> {
        Ok(self.inner.read().await.hotels.clone())
    }

    async fn create_room_type(&self, room_type: &RoomType) -> Result<(), BoxError> {
        self.inner.write().await.room_types.push(room_type.clone());
        Ok(())
    }

    async fn get_room_type(&self, id: Uuid) -> Result<Option<RoomType>, BoxError> {
        Ok(self
            .inner
            .read()
            .await
            .room_types
            .iter()
            .find(|rt| rt.id == id)
            .cloned())
    }

    async fn list_room_types(&self, hotel_id: Uuid) -> Result<Vec<RoomType>, BoxError> {
        let inner = self.inner.read().await;
        let mut room_types: Vec<RoomType> = inner
            .room_types
            .iter()
            .filter(|rt| rt.hotel_id == hotel_id)
            .cloned()
            .collect();
        room_types.sort_by_key(|rt| rt.display_order);
        Ok(room_types)
    }

    async fn create_season(&self, season: &Season) -> Result<(), BoxError> {
        self.inner.write().await.seasons.push(season.clone());
        Ok(())
    }

    async fn list_seasons(&self, hotel_id: Uuid) -> Result<Vec<Season>, BoxError> {
        Ok(self
            .inner
            .read()
            .await
            .seasons
            .iter()
            .filter(|s| s.hotel_id == hotel_id)
            .cloned()
            .collect())
    }

    async fn upsert_season_rate(&self, rate: &SeasonRate) -> Result<(), BoxError> {
        self.inner
            .write()
            .await
            .season_rates
            .insert((rate.season_id, rate.room_type_id), rate.clone());
        Ok(())
    }

    async fn get_season_rate(
        &self,
        season_id: Uuid,
        room_type_id: Uuid,
    ) -> Result<Option<SeasonRate>, BoxError> {
        Ok(self
            .inner
            .read()
            .await
            .season_rates
            .get(&(season_id, room_type_id))
            .cloned())
    }

    async fn create_promotion(
        &self,
        promotion: &Promotion,
        daily_rates: &[PromotionDailyRate],
    ) -> Result<(), BoxError> {
        let mut inner = self.inner.write().await;
        inner.promotions.push(promotion.clone());
        inner.daily_rates.extend_from_slice(daily_rates);
        Ok(())
    }

    async fn list_active_promotions(&self, hotel_id: Uuid) -> Result<Vec<Promotion>, BoxError> {
        Ok(self
            .inner
            .read()
            .await
            .promotions
            .iter()
            .filter(|p| p.hotel_id == hotel_id && p.is_active)
            .cloned()
            .collect())
    }

    async fn list_daily_rates(
        &self,
        promotion_id: Uuid,
        room_type_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PromotionDailyRate>, BoxError> {
        Ok(self
            .inner
            .read()
            .await
            .daily_rates
            .iter()
            .filter(|r| {
                r.promotion_id == promotion_id
                    && r.room_type_id == room_type_id
                    && r.stay_date >= from
                    && r.stay_date < to
            })
            .cloned()
            .collect())
    }

    async fn delete_promotion(&self, id: Uuid) -> Result<(), BoxError> {
        let mut inner = self.inner.write().await;
        inner.promotions.retain(|p| p.id != id);
        // Daily rates are retired with the promotion.
        inner.daily_rates.retain(|r| r.promotion_id != id);
        Ok(())
    }
}
