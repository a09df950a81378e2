use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use stayrate_shared::{Cents, StayRange};
use uuid::Uuid;

use crate::quote::{NightPrice, PriceQuote};

/// A property in the catalog. Owns room types, seasons and promotions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hotel {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Hotel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }
}

/// Per-person and per-item add-on charges carried by a room type, consumed
/// by the price aggregator. Breakfast rates are per person per night; extra
/// bed and baby cot are flat one-time charges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraRates {
    pub breakfast_adult_cents: Cents,
    pub breakfast_child_cents: Cents,
    pub breakfast_infant_cents: Cents,
    pub extra_bed_cents: Cents,
    pub baby_cot_cents: Cents,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomType {
    pub id: Uuid,
    pub hotel_id: Uuid,
    pub name: String,
    /// Cosmetic ordering in operator listings; not part of rate resolution.
    pub display_order: i32,
    pub extras: ExtraRates,
}

impl RoomType {
    pub fn new(hotel_id: Uuid, name: impl Into<String>, extras: ExtraRates) -> Self {
        Self {
            id: Uuid::new_v4(),
            hotel_id,
            name: name.into(),
            display_order: 0,
            extras,
        }
    }
}

/// An operator-defined season: an inclusive `[start_date, end_date]` date
/// interval tagged with a label. Seasons of one hotel must not overlap;
/// conflicting inserts are rejected at write time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Season {
    pub id: Uuid,
    pub hotel_id: Uuid,
    pub label: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Season {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    pub fn overlaps(&self, other: &Season) -> bool {
        self.start_date <= other.end_date && other.start_date <= self.end_date
    }
}

/// Fallback nightly price for a (season, room type) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonRate {
    pub season_id: Uuid,
    pub room_type_id: Uuid,
    pub nightly_cents: Cents,
}

/// The closed set of promotion benefit kinds. Daily override rates are the
/// common case (`RateOverride`); the remaining kinds adjust the room
/// subtotal and are matched exhaustively by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PromotionBenefit {
    RateOverride,
    DiscountPercent { percent: f64 },
    FixedDiscount { amount_cents: Cents },
    FreeNights { nights: u32 },
}

/// A promotion carries two independent windows: the booking window (when it
/// may be sold, checked against "today") and the stay window (which calendar
/// nights it may price). Both are inclusive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Promotion {
    pub id: Uuid,
    pub hotel_id: Uuid,
    pub code: String,
    pub name: String,
    pub booking_start: NaiveDate,
    pub booking_end: NaiveDate,
    pub stay_start: NaiveDate,
    pub stay_end: NaiveDate,
    pub is_active: bool,
    pub benefit: PromotionBenefit,
}

impl Promotion {
    /// May this promotion be sold today?
    pub fn bookable_on(&self, today: NaiveDate) -> bool {
        self.booking_start <= today && today <= self.booking_end
    }

    /// Does the stay window fully contain the requested stay? The last
    /// occupied night must not extend past `stay_end`.
    pub fn covers_stay(&self, stay: &StayRange) -> bool {
        self.stay_start <= stay.check_in() && stay.last_night() <= self.stay_end
    }
}

/// Authoritative nightly price for (promotion, room type, date). One row per
/// covered night; rows are deleted when the promotion is retired.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromotionDailyRate {
    pub promotion_id: Uuid,
    pub room_type_id: Uuid,
    pub stay_date: NaiveDate,
    pub nightly_cents: Cents,
    /// Minimum total night count for the whole stay, if constrained.
    pub min_nights: Option<i64>,
}

/// Per-date inventory state derived from the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomDateState {
    Open,
    Full,
}

/// Inventory counters for one (hotel, room type, date). `allocated` is an
/// optional operator-set sales ceiling; when set the sellable capacity is
/// `min(allocated, available)`, otherwise `available`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomInventoryRecord {
    pub hotel_id: Uuid,
    pub room_type_id: Uuid,
    pub date: NaiveDate,
    pub available: i32,
    pub allocated: Option<i32>,
    pub reserved: i32,
}

impl RoomInventoryRecord {
    pub fn capacity(&self) -> i32 {
        match self.allocated {
            Some(allocated) => allocated.min(self.available),
            None => self.available,
        }
    }

    pub fn remaining(&self) -> i32 {
        self.capacity() - self.reserved
    }

    pub fn state(&self) -> RoomDateState {
        if self.reserved >= self.capacity() {
            RoomDateState::Full
        } else {
            RoomDateState::Open
        }
    }
}

/// Persisted acceptance of a price quote against a reservation. Stores the
/// nightly price snapshot and promotion code as quoted; later promotion
/// edits never touch it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationRoomLine {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub room_type_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: Vec<NightPrice>,
    pub promotion_code: Option<String>,
    pub room_subtotal_cents: Cents,
    pub extras_total_cents: Cents,
    pub grand_total_cents: Cents,
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

impl ReservationRoomLine {
    pub fn from_quote(reservation_id: Uuid, quote: &PriceQuote) -> Self {
        Self {
            id: Uuid::new_v4(),
            reservation_id,
            room_type_id: quote.room_type_id,
            check_in: quote.check_in,
            check_out: quote.check_out,
            nights: quote.nights.clone(),
            promotion_code: quote.promotion_code.clone(),
            room_subtotal_cents: quote.room_subtotal_cents,
            extras_total_cents: quote.extras.total_cents,
            grand_total_cents: quote.grand_total_cents,
            currency: quote.currency.clone(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn record(available: i32, allocated: Option<i32>, reserved: i32) -> RoomInventoryRecord {
        RoomInventoryRecord {
            hotel_id: Uuid::new_v4(),
            room_type_id: Uuid::new_v4(),
            date: d("2026-01-05"),
            available,
            allocated,
            reserved,
        }
    }

    #[test]
    fn allocation_ceiling_caps_capacity() {
        assert_eq!(record(10, None, 0).capacity(), 10);
        assert_eq!(record(10, Some(6), 0).capacity(), 6);
        // An allocation above available never raises capacity.
        assert_eq!(record(10, Some(15), 0).capacity(), 10);
    }

    #[test]
    fn state_follows_reserved_counter() {
        assert_eq!(record(5, None, 4).state(), RoomDateState::Open);
        assert_eq!(record(5, None, 5).state(), RoomDateState::Full);
        assert_eq!(record(5, Some(3), 3).state(), RoomDateState::Full);
    }

    #[test]
    fn promotion_windows_are_inclusive() {
        let promo = Promotion {
            id: Uuid::new_v4(),
            hotel_id: Uuid::new_v4(),
            code: "EARLYWINTER2025".into(),
            name: "Early winter".into(),
            booking_start: d("2025-11-01"),
            booking_end: d("2025-12-31"),
            stay_start: d("2026-01-01"),
            stay_end: d("2026-01-31"),
            is_active: true,
            benefit: PromotionBenefit::RateOverride,
        };
        assert!(promo.bookable_on(d("2025-11-01")));
        assert!(promo.bookable_on(d("2025-12-31")));
        assert!(!promo.bookable_on(d("2026-01-01")));

        let stay = StayRange::new(d("2026-01-30"), d("2026-02-01")).unwrap();
        // Last night is 2026-01-31, still inside the stay window.
        assert!(promo.covers_stay(&stay));
        let stay = StayRange::new(d("2026-01-31"), d("2026-02-02")).unwrap();
        assert!(!promo.covers_stay(&stay));
    }
}
