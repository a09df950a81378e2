use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::{BoxError, InventoryError};
use crate::models::{
    Hotel, Promotion, PromotionDailyRate, ReservationRoomLine, RoomInventoryRecord, RoomType,
    Season, SeasonRate,
};

/// Storage port for reference data: hotels, room types, seasons,
/// promotions and their rates. Read-mostly; mutated only by operator CRUD.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn create_hotel(&self, hotel: &Hotel) -> Result<(), BoxError>;

    async fn list_hotels(&self) -> Result<Vec<Hotel>, BoxError>;

    async fn create_room_type(&self, room_type: &RoomType) -> Result<(), BoxError>;

    async fn get_room_type(&self, id: Uuid) -> Result<Option<RoomType>, BoxError>;

    async fn list_room_types(&self, hotel_id: Uuid) -> Result<Vec<RoomType>, BoxError>;

    async fn create_season(&self, season: &Season) -> Result<(), BoxError>;

    async fn list_seasons(&self, hotel_id: Uuid) -> Result<Vec<Season>, BoxError>;

    async fn upsert_season_rate(&self, rate: &SeasonRate) -> Result<(), BoxError>;

    async fn get_season_rate(
        &self,
        season_id: Uuid,
        room_type_id: Uuid,
    ) -> Result<Option<SeasonRate>, BoxError>;

    /// Create a promotion together with its daily-rate rows.
    async fn create_promotion(
        &self,
        promotion: &Promotion,
        daily_rates: &[PromotionDailyRate],
    ) -> Result<(), BoxError>;

    async fn list_active_promotions(&self, hotel_id: Uuid) -> Result<Vec<Promotion>, BoxError>;

    /// Daily-rate rows for one promotion and room type over `[from, to)`.
    async fn list_daily_rates(
        &self,
        promotion_id: Uuid,
        room_type_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PromotionDailyRate>, BoxError>;

    /// Retire a promotion; its daily-rate rows go with it.
    async fn delete_promotion(&self, id: Uuid) -> Result<(), BoxError>;
}

/// Storage port for the room inventory ledger, the only mutable shared
/// state in this core. Implementations must make `check_and_reserve`
/// atomic across all requested dates: all nights succeed or none do, and
/// concurrent attempts for the same (hotel, room type, date) serialize.
#[async_trait]
pub trait InventoryLedger: Send + Sync {
    async fn check_and_reserve(
        &self,
        hotel_id: Uuid,
        room_type_id: Uuid,
        dates: &[NaiveDate],
        count: i32,
    ) -> Result<(), InventoryError>;

    /// Exact inverse of `check_and_reserve`, used on cancellation.
    /// Idempotent: releasing an already-released line is a no-op.
    async fn release(
        &self,
        hotel_id: Uuid,
        room_type_id: Uuid,
        dates: &[NaiveDate],
        count: i32,
    ) -> Result<(), InventoryError>;

    async fn get_record(
        &self,
        hotel_id: Uuid,
        room_type_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<RoomInventoryRecord>, InventoryError>;

    /// Operator upsert of the counters; rejects `reserved > capacity`.
    async fn upsert_record(&self, record: &RoomInventoryRecord) -> Result<(), InventoryError>;
}

/// Storage port for persisted reservation-room lines (the reservation line
/// builder boundary).
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn create_room_line(&self, line: &ReservationRoomLine) -> Result<Uuid, BoxError>;

    async fn list_room_lines(
        &self,
        reservation_id: Uuid,
    ) -> Result<Vec<ReservationRoomLine>, BoxError>;
}
