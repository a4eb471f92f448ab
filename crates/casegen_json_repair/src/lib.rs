mod error;
mod resilient;
mod salvage;

pub use error::{JsonRepairError, Result};
pub use resilient::{Parsed, ParseStrategy, from_str};
pub use salvage::salvage;
