pub mod aggregator;
pub mod calendar;
pub mod matcher;
pub mod memory;
pub mod resolver;
pub mod service;

pub use calendar::SeasonCalendar;
pub use matcher::{CandidatePromotion, PromotionSelection};
pub use memory::MemoryCatalog;
pub use service::QuoteService;
