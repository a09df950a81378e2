use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use stayrate_core::{InventoryError, InventoryLedger, RoomInventoryRecord};
use tracing::debug;
use uuid::Uuid;

/// Postgres inventory ledger. Reservation runs in one transaction with
/// `FOR UPDATE` row locks, so concurrent bookings for the same
/// (hotel, room type, date) serialize on the row and a multi-night
/// reservation commits all nights or none.
pub struct PgInventoryLedger {
    pool: PgPool,
}

impl PgInventoryLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn storage(err: sqlx::Error) -> InventoryError {
    InventoryError::Storage(Box::new(err))
}

#[derive(sqlx::FromRow)]
struct InventoryRow {
    hotel_id: Uuid,
    room_type_id: Uuid,
    date: NaiveDate,
    available: i32,
    allocated: Option<i32>,
    reserved: i32,
}

impl From<InventoryRow> for RoomInventoryRecord {
    fn from(row: InventoryRow) -> Self {
        RoomInventoryRecord {
            hotel_id: row.hotel_id,
            room_type_id: row.room_type_id,
            date: row.date,
            available: row.available,
            allocated: row.allocated,
            reserved: row.reserved,
        }
    }
}

const SELECT_FOR_UPDATE: &str = "SELECT hotel_id, room_type_id, date, available, allocated, reserved \
     FROM room_inventory \
     WHERE hotel_id = $1 AND room_type_id = $2 AND date = $3 \
     FOR UPDATE";

#[async_trait]
impl InventoryLedger for PgInventoryLedger {
    async fn check_and_reserve(
        &self,
        hotel_id: Uuid,
        room_type_id: Uuid,
        dates: &[NaiveDate],
        count: i32,
    ) -> Result<(), InventoryError> {
        let mut tx = self.pool.begin().await.map_err(storage)?;

        // Lock and validate every night before touching any counter; an
        // early return rolls the transaction back.
        for date in dates {
            let row: Option<InventoryRow> = sqlx::query_as(SELECT_FOR_UPDATE)
                .bind(hotel_id)
                .bind(room_type_id)
                .bind(date)
                .fetch_optional(&mut *tx)
                .await
                .map_err(storage)?;
            let record: RoomInventoryRecord = row
                .ok_or(InventoryError::NotFound {
                    room_type_id,
                    date: *date,
                })?
                .into();
            if record.remaining() < count {
                return Err(InventoryError::Insufficient {
                    date: *date,
                    requested: count,
                    remaining: record.remaining(),
                });
            }
        }

        for date in dates {
            sqlx::query(
                "UPDATE room_inventory SET reserved = reserved + $4 \
                 WHERE hotel_id = $1 AND room_type_id = $2 AND date = $3",
            )
            .bind(hotel_id)
            .bind(room_type_id)
            .bind(date)
            .bind(count)
            .execute(&mut *tx)
            .await
            .map_err(storage)?;
        }

        tx.commit().await.map_err(storage)?;
        debug!(%room_type_id, nights = dates.len(), count, "reserved inventory");
        Ok(())
    }

    async fn release(
        &self,
        hotel_id: Uuid,
        room_type_id: Uuid,
        dates: &[NaiveDate],
        count: i32,
    ) -> Result<(), InventoryError> {
        let mut tx = self.pool.begin().await.map_err(storage)?;
        for date in dates {
            // GREATEST keeps a retried cancellation a no-op.
            sqlx::query(
                "UPDATE room_inventory SET reserved = GREATEST(reserved - $4, 0) \
                 WHERE hotel_id = $1 AND room_type_id = $2 AND date = $3",
            )
            .bind(hotel_id)
            .bind(room_type_id)
            .bind(date)
            .bind(count)
            .execute(&mut *tx)
            .await
            .map_err(storage)?;
        }
        tx.commit().await.map_err(storage)?;
        Ok(())
    }

    async fn get_record(
        &self,
        hotel_id: Uuid,
        room_type_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<RoomInventoryRecord>, InventoryError> {
        let row: Option<InventoryRow> = sqlx::query_as(
            "SELECT hotel_id, room_type_id, date, available, allocated, reserved \
             FROM room_inventory \
             WHERE hotel_id = $1 AND room_type_id = $2 AND date = $3",
        )
        .bind(hotel_id)
        .bind(room_type_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;
        Ok(row.map(Into::into))
    }

    async fn upsert_record(&self, record: &RoomInventoryRecord) -> Result<(), InventoryError> {
        if record.reserved > record.capacity() {
            return Err(InventoryError::CounterInvariant {
                reserved: record.reserved,
                capacity: record.capacity(),
            });
        }
        sqlx::query(
            r#"
            INSERT INTO room_inventory (hotel_id, room_type_id, date, available, allocated, reserved)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (hotel_id, room_type_id, date)
            DO UPDATE SET available = EXCLUDED.available,
                          allocated = EXCLUDED.allocated,
                          reserved = EXCLUDED.reserved
            "#,
        )
        .bind(record.hotel_id)
        .bind(record.room_type_id)
        .bind(record.date)
        .bind(record.available)
        .bind(record.allocated)
        .bind(record.reserved)
        .execute(&self.pool)
        .await
        .map_err(storage)?;
        Ok(())
    }
}
