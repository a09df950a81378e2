use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use stayrate_core::{InventoryError, InventoryLedger, RoomInventoryRecord};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

type Key = (Uuid, Uuid, NaiveDate);

/// In-memory inventory ledger. All counters live behind one mutex, so a
/// multi-night check-and-reserve is a single atomic unit: every night is
/// validated before any is mutated, and concurrent attempts for the same
/// (hotel, room type, date) serialize on the lock.
#[derive(Default)]
pub struct MemoryInventoryLedger {
    records: Mutex<HashMap<Key, RoomInventoryRecord>>,
}

impl MemoryInventoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InventoryLedger for MemoryInventoryLedger {
    async fn check_and_reserve(
        &self,
        hotel_id: Uuid,
        room_type_id: Uuid,
        dates: &[NaiveDate],
        count: i32,
    ) -> Result<(), InventoryError> {
        let mut records = self.records.lock().await;

        // Validate every night first; nothing is decremented on failure.
        for date in dates {
            let record = records
                .get(&(hotel_id, room_type_id, *date))
                .ok_or(InventoryError::NotFound {
                    room_type_id,
                    date: *date,
                })?;
            if record.remaining() < count {
                return Err(InventoryError::Insufficient {
                    date: *date,
                    requested: count,
                    remaining: record.remaining(),
                });
            }
        }

        for date in dates {
            if let Some(record) = records.get_mut(&(hotel_id, room_type_id, *date)) {
                record.reserved += count;
            }
        }
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
        let mut records = self.records.lock().await;
        // Saturating: releasing an already-released line is a no-op, since
        // cancellation may be retried by the caller.
        for date in dates {
            if let Some(record) = records.get_mut(&(hotel_id, room_type_id, *date)) {
                record.reserved = record.reserved.saturating_sub(count);
            }
        }
        Ok(())
    }

    async fn get_record(
        &self,
        hotel_id: Uuid,
        room_type_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<RoomInventoryRecord>, InventoryError> {
        Ok(self
            .records
            .lock()
            .await
            .get(&(hotel_id, room_type_id, date))
            .cloned())
    }

    async fn upsert_record(&self, record: &RoomInventoryRecord) -> Result<(), InventoryError> {
        if record.reserved > record.capacity() {
            return Err(InventoryError::CounterInvariant {
                reserved: record.reserved,
                capacity: record.capacity(),
            });
        }
        self.records.lock().await.insert(
            (record.hotel_id, record.room_type_id, record.date),
            record.clone(),
        );
        Ok(())
    }
}
