//! # ragmon-core - Core Domain Types
//!
//! Foundation crate for ragmon. Provides domain types, error handling,
//! dot-path config mapping, and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, chrono, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`LogRecord`] - A single backend log line with level and timestamp
//! - [`LogLevel`] - Log severity (Debug, Info, Warn, Error)
//! - [`FileEntry`] - One ingested document as reported by the backend
//! - [`SplitterMethod`] - Chunking method a document was indexed with
//! - [`ServiceStatus`] - Whether the chat service is running
//! - [`RingBuffer`] - Fixed-capacity FIFO buffer for rolling history
//!
//! ### Config Paths (`path`)
//! - [`FieldPath`] - Validated dot-joined key sequence (`retrieval.top_k`)
//! - [`flatten_assign()`] - Write one leaf into a nested config value
//! - [`flatten_read()`] - Read one leaf out of a nested config value
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use ragmon_core::prelude::*;
//! ```

pub mod error;
pub mod logging;
pub mod path;
pub mod types;

/// Prelude for common imports used throughout all ragmon crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result, ResultExt};
pub use path::{flatten_assign, flatten_read, FieldPath};
pub use types::{
    FileEntry, LogLevel, LogRecord, RingBuffer, ServiceStatus, SplitterMethod, LOG_BUFFER_CAPACITY,
};
