//! # okspot exchanges
//!
//! OKEx v3 spot trading REST client.
//!
//! ## Architecture
//!
//! - **monoio-based HTTPS client** - single-threaded async with rustls
//! - **Transport seam** - endpoints build requests, a [`Transport`] signs and sends them
//! - **Two error kinds** - exchange API errors pass through, everything else carries operation context
//! - **Fixed-point arithmetic** - exact decimal prices, sizes and fees

pub mod errors;
pub mod http;
pub mod okex;
pub mod traits;

// Re-export main types
pub use errors::{ApiError, ApiErrorKind, ExchangeError, Result};
pub use http::MonoioHttpsClient;
pub use okex::{OkexConfig, OkexExchange, RestTransport, SpotRestClient};
pub use traits::{Method, QueryParams, Transport};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::errors::{ApiError, ApiErrorKind, ExchangeError, Result};
    pub use crate::okex::types::*;
    pub use crate::okex::{OkexConfig, OkexCredentials, OkexExchange, RestTransport, SpotRestClient};
    pub use crate::traits::{Method, QueryParams, Transport};
    pub use okspot_core::prelude::*;
}
