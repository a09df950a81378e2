use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use stayrate_core::{
    BoxError, CatalogRepository, ExtraRates, Hotel, Promotion, PromotionBenefit,
    PromotionDailyRate, RoomType, Season, SeasonRate,
};
use uuid::Uuid;

pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Row structs for type-safe mapping without a compile-time database.
#[derive(sqlx::FromRow)]
struct HotelRow {
    id: Uuid,
    name: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<HotelRow> for Hotel {
    fn from(row: HotelRow) -> Self {
        Hotel {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct RoomTypeRow {
    id: Uuid,
    hotel_id: Uuid,
    name: String,
    display_order: i32,
    breakfast_adult_cents: i64,
    breakfast_child_cents: i64,
    breakfast_infant_cents: i64,
    extra_bed_cents: i64,
    baby_cot_cents: i64,
}

impl From<RoomTypeRow> for RoomType {
    fn from(row: RoomTypeRow) -> Self {
        RoomType {
            id: row.id,
            hotel_id: row.hotel_id,
            name: row.name,
            display_order: row.display_order,
            extras: ExtraRates {
                breakfast_adult_cents: row.breakfast_adult_cents,
                breakfast_child_cents: row.breakfast_child_cents,
                breakfast_infant_cents: row.breakfast_infant_cents,
                extra_bed_cents: row.extra_bed_cents,
                baby_cot_cents: row.baby_cot_cents,
            },
        }
    }
}

#[derive(sqlx::FromRow)]
struct SeasonRow {
    id: Uuid,
    hotel_id: Uuid,
    label: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl From<SeasonRow> for Season {
    fn from(row: SeasonRow) -> Self {
        Season {
            id: row.id,
            hotel_id: row.hotel_id,
            label: row.label,
            start_date: row.start_date,
            end_date: row.end_date,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PromotionRow {
    id: Uuid,
    hotel_id: Uuid,
    code: String,
    name: String,
    booking_start: NaiveDate,
    booking_end: NaiveDate,
    stay_start: NaiveDate,
    stay_end: NaiveDate,
    is_active: bool,
    benefit: serde_json::Value,
}

impl PromotionRow {
    fn into_promotion(self) -> Result<Promotion, BoxError> {
        let benefit: PromotionBenefit = serde_json::from_value(self.benefit)?;
        Ok(Promotion {
            id: self.id,
            hotel_id: self.hotel_id,
            code: self.code,
            name: self.name,
            booking_start: self.booking_start,
            booking_end: self.booking_end,
            stay_start: self.stay_start,
            stay_end: self.stay_end,
            is_active: self.is_active,
            benefit,
        })
    }
}

#[derive(sqlx::FromRow)]
struct DailyRateRow {
    promotion_id: Uuid,
    room_type_id: Uuid,
    stay_date: NaiveDate,
    nightly_cents: i64,
    min_nights: Option<i64>,
}

impl From<DailyRateRow> for PromotionDailyRate {
    fn from(row: DailyRateRow) -> Self {
        PromotionDailyRate {
            promotion_id: row.promotion_id,
            room_type_id: row.room_type_id,
            stay_date: row.stay_date,
            nightly_cents: row.nightly_cents,
            min_nights: row.min_nights,
        }
    }
}

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    async fn create_hotel(&self, hotel: &Hotel) -> Result<(), BoxError> {
        sqlx::query("INSERT INTO hotels (id, name, created_at) VALUES ($1, $2, $3)")
            .bind(hotel.id)
            .bind(&hotel.name)
            .bind(hotel.created_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_hotels(&self) -> Result<Vec<Hotel>, BoxError> {
        let rows: Vec<HotelRow> =
            sqlx::query_as("SELECT id, name, created_at FROM hotels ORDER BY name")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create_room_type(&self, room_type: &RoomType) -> Result<(), BoxError> {
        sqlx::query(
            r#"
            INSERT INTO room_types
                (id, hotel_id, name, display_order, breakfast_adult_cents,
                 breakfast_child_cents, breakfast_infant_cents, extra_bed_cents, baby_cot_cents)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(room_type.id)
        .bind(room_type.hotel_id)
        .bind(&room_type.name)
        .bind(room_type.display_order)
        .bind(room_type.extras.breakfast_adult_cents)
        .bind(room_type.extras.breakfast_child_cents)
        .bind(room_type.extras.breakfast_infant_cents)
        .bind(room_type.extras.extra_bed_cents)
        .bind(room_type.extras.baby_cot_cents)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_room_type(&self, id: Uuid) -> Result<Option<RoomType>, BoxError> {
        let row: Option<RoomTypeRow> = sqlx::query_as(
            "SELECT id, hotel_id, name, display_order, breakfast_adult_cents, \
             breakfast_child_cents, breakfast_infant_cents, extra_bed_cents, baby_cot_cents \
             FROM room_types WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Into::into))
    }

    async fn list_room_types(&self, hotel_id: Uuid) -> Result<Vec<RoomType>, BoxError> {
        let rows: Vec<RoomTypeRow> = sqlx::query_as(
            "SELECT id, hotel_id, name, display_order, breakfast_adult_cents, \
             breakfast_child_cents, breakfast_infant_cents, extra_bed_cents, baby_cot_cents \
             FROM room_types WHERE hotel_id = $1 ORDER BY display_order, name",
        )
        .bind(hotel_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create_season(&self, season: &Season) -> Result<(), BoxError> {
        sqlx::query(
            "INSERT INTO seasons (id, hotel_id, label, start_date, end_date) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(season.id)
        .bind(season.hotel_id)
        .bind(&season.label)
        .bind(season.start_date)
        .bind(season.end_date)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_seasons(&self, hotel_id: Uuid) -> Result<Vec<Season>, BoxError> {
        let rows: Vec<SeasonRow> = sqlx::query_as(
            "SELECT id, hotel_id, label, start_date, end_date \
             FROM seasons WHERE hotel_id = $1 ORDER BY start_date",
        )
        .bind(hotel_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn upsert_season_rate(&self, rate: &SeasonRate) -> Result<(), BoxError> {
        sqlx::query(
            r#"
            INSERT INTO season_rates (season_id, room_type_id, nightly_cents)
            VALUES ($1, $2, $3)
            ON CONFLICT (season_id, room_type_id)
            DO UPDATE SET nightly_cents = EXCLUDED.nightly_cents
            "#,
        )
        .bind(rate.season_id)
        .bind(rate.room_type_id)
        .bind(rate.nightly_cents)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_season_rate(
        &self,
        season_id: Uuid,
        room_type_id: Uuid,
    ) -> Result<Option<SeasonRate>, BoxError> {
        let row: Option<(i64,)> = sqlx::query_as(
            "SELECT nightly_cents FROM season_rates \
             WHERE season_id = $1 AND room_type_id = $2",
        )
        .bind(season_id)
        .bind(room_type_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|(nightly_cents,)| SeasonRate {
            season_id,
            room_type_id,
            nightly_cents,
        }))
    }

    async fn create_promotion(
        &self,
        promotion: &Promotion,
        daily_rates: &[PromotionDailyRate],
    ) -> Result<(), BoxError> {
        let benefit = serde_json::to_value(&promotion.benefit)?;
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO promotions
                (id, hotel_id, code, name, booking_start, booking_end,
                 stay_start, stay_end, is_active, benefit)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(promotion.id)
        .bind(promotion.hotel_id)
        .bind(&promotion.code)
        .bind(&promotion.name)
        .bind(promotion.booking_start)
        .bind(promotion.booking_end)
        .bind(promotion.stay_start)
        .bind(promotion.stay_end)
        .bind(promotion.is_active)
        .bind(benefit)
        .execute(&mut *tx)
        .await?;

        for rate in daily_rates {
            sqlx::query(
                r#"
                INSERT INTO promotion_daily_rates
                    (promotion_id, room_type_id, stay_date, nightly_cents, min_nights)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(rate.promotion_id)
            .bind(rate.room_type_id)
            .bind(rate.stay_date)
            .bind(rate.nightly_cents)
            .bind(rate.min_nights)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn list_active_promotions(&self, hotel_id: Uuid) -> Result<Vec<Promotion>, BoxError> {
        let rows: Vec<PromotionRow> = sqlx::query_as(
            "SELECT id, hotel_id, code, name, booking_start, booking_end, \
             stay_start, stay_end, is_active, benefit \
             FROM promotions WHERE hotel_id = $1 AND is_active ORDER BY code",
        )
        .bind(hotel_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(PromotionRow::into_promotion).collect()
    }

    async fn list_daily_rates(
        &self,
        promotion_id: Uuid,
        room_type_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PromotionDailyRate>, BoxError> {
        let rows: Vec<DailyRateRow> = sqlx::query_as(
            "SELECT promotion_id, room_type_id, stay_date, nightly_cents, min_nights \
             FROM promotion_daily_rates \
             WHERE promotion_id = $1 AND room_type_id = $2 \
               AND stay_date >= $3 AND stay_date < $4 \
             ORDER BY stay_date",
        )
        .bind(promotion_id)
        .bind(room_type_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete_promotion(&self, id: Uuid) -> Result<(), BoxError> {
        // Daily rates cascade with the promotion.
        sqlx::query("DELETE FROM promotions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
