pub mod money;
pub mod stay;

pub use money::Cents;
pub use stay::{StayRange, StayRangeError};
