pub mod error;
pub mod models;
pub mod quote;
pub mod repository;

pub use error::{BoxError, CatalogError, InventoryError, QuoteError};
pub use models::{
    ExtraRates, Hotel, Promotion, PromotionBenefit, PromotionDailyRate, ReservationRoomLine,
    RoomDateState, RoomInventoryRecord, RoomType, Season, SeasonRate,
};
pub use quote::{ExtrasBreakdown, NightPrice, PriceQuote, RateSource, StayQuoteRequest};
pub use repository::{CatalogRepository, InventoryLedger, ReservationRepository};
