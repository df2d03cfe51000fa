//! # okspot core
//!
//! Shared building blocks for the okspot OKEx client.
//!
//! - **Timing** - wall-clock nanosecond stamps, ISO-8601 signing timestamps, latency timers
//! - **Fixed-point arithmetic** - exact decimal prices and sizes
//! - **Client order ids** - exchange-valid `client_oid` generation with nanoid
//! - **Unified logging** - tracing subscriber setup and logging macros

pub mod fixed;
pub mod id_gen;
pub mod logging;
pub mod timing;

pub use fixed::{Fixed, FixedError};
pub use id_gen::{ClientOid, ClientOidError};
pub use logging::init_logging;
pub use timing::{PerfTimer, Timestamp, nanos};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixed::{Fixed, FixedError};
    pub use crate::id_gen::{ClientOid, ClientOidError, generate_client_oid};
    pub use crate::logging::init_logging;
    pub use crate::timing::{PerfTimer, Timestamp, nanos};

    // Common external types
    pub use chrono::{DateTime, Utc};
    pub use monoio;
    pub use serde::{Deserialize, Serialize};
}
