use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use stayrate_shared::{Cents, StayRange, StayRangeError};
use uuid::Uuid;

/// Where a night's price came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RateSource {
    Promotion,
    Season,
    None,
}

/// One resolved night of a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NightPrice {
    pub date: NaiveDate,
    pub nightly_cents: Cents,
    pub source: RateSource,
    pub promotion_code: Option<String>,
}

/// A quote request. Transient; never persisted. `today` is the booking
/// date the promotion booking windows are checked against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StayQuoteRequest {
    pub room_type_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub adults: u32,
    pub children: u32,
    pub infants: u32,
    pub promotion_code: Option<String>,
    /// Breakfast is a per-stay flag, charged per person per night.
    #[serde(default)]
    pub breakfast: bool,
    #[serde(default)]
    pub extra_bed: bool,
    #[serde(default)]
    pub baby_cot: bool,
    pub today: NaiveDate,
}

impl StayQuoteRequest {
    pub fn stay(&self) -> Result<StayRange, StayRangeError> {
        StayRange::new(self.check_in, self.check_out)
    }
}

/// Itemized add-on charges of a quote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtrasBreakdown {
    pub breakfast_cents: Cents,
    pub extra_bed_cents: Cents,
    pub baby_cot_cents: Cents,
    pub total_cents: Cents,
}

/// A fully resolved quote: one priced entry per night, extras, totals.
/// Transient; becomes durable only as a `ReservationRoomLine` snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceQuote {
    pub room_type_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: Vec<NightPrice>,
    pub promotion_code: Option<String>,
    pub room_subtotal_cents: Cents,
    /// Benefit adjustment subtracted from the room subtotal, zero for
    /// rate-override promotions.
    pub benefit_discount_cents: Cents,
    pub extras: ExtrasBreakdown,
    pub grand_total_cents: Cents,
    pub currency: String,
}
