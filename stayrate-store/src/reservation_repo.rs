use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use stayrate_core::{BoxError, NightPrice, ReservationRepository, ReservationRoomLine};
use uuid::Uuid;

pub struct PgReservationRepository {
    pool: PgPool,
}

impl PgReservationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct RoomLineRow {
    id: Uuid,
    reservation_id: Uuid,
    room_type_id: Uuid,
    check_in: NaiveDate,
    check_out: NaiveDate,
    nights: serde_json::Value,
    promotion_code: Option<String>,
    room_subtotal_cents: i64,
    extras_total_cents: i64,
    grand_total_cents: i64,
    currency: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl RoomLineRow {
    fn into_line(self) -> Result<ReservationRoomLine, BoxError> {
        let nights: Vec<NightPrice> = serde_json::from_value(self.nights)?;
        Ok(ReservationRoomLine {
            id: self.id,
            reservation_id: self.reservation_id,
            room_type_id: self.room_type_id,
            check_in: self.check_in,
            check_out: self.check_out,
            nights,
            promotion_code: self.promotion_code,
            room_subtotal_cents: self.room_subtotal_cents,
            extras_total_cents: self.extras_total_cents,
            grand_total_cents: self.grand_total_cents,
            currency: self.currency,
            created_at: self.created_at,
        })
    }
}

#[async_trait]
impl ReservationRepository for PgReservationRepository {
    async fn create_room_line(&self, line: &ReservationRoomLine) -> Result<Uuid, BoxError> {
        let nights = serde_json::to_value(&line.nights)?;
        sqlx::query(
            r#"
            INSERT INTO reservation_room_lines
                (id, reservation_id, room_type_id, check_in, check_out, nights,
                 promotion_code, room_subtotal_cents, extras_total_cents,
                 grand_total_cents, currency, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(line.id)
        .bind(line.reservation_id)
        .bind(line.room_type_id)
        .bind(line.check_in)
        .bind(line.check_out)
        .bind(nights)
        .bind(&line.promotion_code)
        .bind(line.room_subtotal_cents)
        .bind(line.extras_total_cents)
        .bind(line.grand_total_cents)
        .bind(&line.currency)
        .bind(line.created_at)
        .execute(&self.pool)
        .await?;
        Ok(line.id)
    }

    async fn list_room_lines(
        &self,
        reservation_id: Uuid,
    ) -> Result<Vec<ReservationRoomLine>, BoxError> {
        let rows: Vec<RoomLineRow> = sqlx::query_as(
            "SELECT id, reservation_id, room_type_id, check_in, check_out, nights, \
             promotion_code, room_subtotal_cents, extras_total_cents, \
             grand_total_cents, currency, created_at \
             FROM reservation_room_lines WHERE reservation_id = $1 ORDER BY created_at",
        )
        .bind(reservation_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(RoomLineRow::into_line).collect()
    }
}
