mod context;
mod error;
mod failure;
mod generation;
mod metrics;
mod scenario;
mod session;
mod test_case;

pub use context::*;
pub use error::*;
pub use failure::*;
pub use generation::*;
pub use metrics::*;
pub use scenario::*;
pub use session::*;
pub use test_case::*;
