//! Common utilities and types for rankplot

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{RankplotError, Result};
pub use logging::{init_logging, LoggingConfig};
pub use types::*;
