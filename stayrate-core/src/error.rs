use chrono::NaiveDate;
use uuid::Uuid;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Quote-time failures. Every variant maps to a stable wire code via
/// [`QuoteError::code`]; the route layer is responsible for user-facing
/// messaging.
#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    /// At least one night has neither a promotion daily rate nor a season
    /// rate. The whole quote fails; a partial total is never returned.
    #[error("no nightly rate for {missing_dates:?}")]
    IncompleteRateCoverage { missing_dates: Vec<NaiveDate> },

    #[error("stay of {stay_nights} nights is below the promotion minimum of {required}")]
    MinNightsNotMet { required: i64, stay_nights: i64 },

    #[error("promotion {code} is not applicable to this stay")]
    PromoNotApplicable { code: String },

    #[error("room type not found: {0}")]
    RoomTypeNotFound(Uuid),

    #[error(transparent)]
    InvalidStayRange(#[from] stayrate_shared::StayRangeError),

    #[error("storage error: {0}")]
    Storage(#[source] BoxError),
}

impl QuoteError {
    pub fn code(&self) -> &'static str {
        match self {
            QuoteError::IncompleteRateCoverage { .. } => "INCOMPLETE_RATE_COVERAGE",
            QuoteError::MinNightsNotMet { .. } => "MIN_NIGHTS_NOT_MET",
            QuoteError::PromoNotApplicable { .. } => "PROMO_NOT_APPLICABLE",
            QuoteError::RoomTypeNotFound(_) => "ROOM_TYPE_NOT_FOUND",
            QuoteError::InvalidStayRange(_) => "INVALID_STAY_RANGE",
            QuoteError::Storage(_) => "STORAGE_ERROR",
        }
    }
}

/// Inventory ledger failures. `Insufficient` is local to the attempt; the
/// caller retries with different dates or room type, never the core.
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("insufficient inventory on {date}: requested {requested}, remaining {remaining}")]
    Insufficient {
        date: NaiveDate,
        requested: i32,
        remaining: i32,
    },

    #[error("no inventory record for room type {room_type_id} on {date}")]
    NotFound {
        room_type_id: Uuid,
        date: NaiveDate,
    },

    #[error("counter invariant violated: reserved {reserved} exceeds capacity {capacity}")]
    CounterInvariant { reserved: i32, capacity: i32 },

    #[error("storage error: {0}")]
    Storage(#[source] BoxError),
}

impl InventoryError {
    pub fn code(&self) -> &'static str {
        match self {
            InventoryError::Insufficient { .. } => "INSUFFICIENT_INVENTORY",
            InventoryError::NotFound { .. } => "INVENTORY_NOT_FOUND",
            InventoryError::CounterInvariant { .. } => "COUNTER_INVARIANT",
            InventoryError::Storage(_) => "STORAGE_ERROR",
        }
    }
}

/// Reference-data configuration conflicts, rejected at write time.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("season {label} overlaps an existing season")]
    OverlappingSeasons { label: String },

    #[error("promotion daily rates do not cover the stay window: {missing_dates:?}")]
    IncompleteDailyRates { missing_dates: Vec<NaiveDate> },

    #[error("storage error: {0}")]
    Storage(#[source] BoxError),
}

impl CatalogError {
    pub fn code(&self) -> &'static str {
        match self {
            CatalogError::OverlappingSeasons { .. } => "OVERLAPPING_SEASONS",
            CatalogError::IncompleteDailyRates { .. } => "INCOMPLETE_DAILY_RATES",
            CatalogError::Storage(_) => "STORAGE_ERROR",
        }
    }
}
