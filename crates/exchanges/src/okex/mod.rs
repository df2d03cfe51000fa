//! OKEx v3 spot trading
//!
//! Signed REST client over monoio, with exact decimal amounts and
//! microsecond request timing.

pub mod auth;
pub mod rest;
pub mod spot;
pub mod types;

use crate::errors::Result;
use okspot_core::nanos;
use tracing::info;

pub use auth::{OkexCredentials, OkexSigner};
pub use rest::{OkexConfig, RestTransport};
pub use spot::{BatchCancelResults, BatchOrderResults, SpotRestClient};
pub use types::*;

/// OKEx exchange client
pub struct OkexExchange {
    config: OkexConfig,
    spot: SpotRestClient<RestTransport>,
}

impl OkexExchange {
    pub fn new(config: OkexConfig) -> Result<Self> {
        info!("🚀 Initializing OKEx exchange");
        info!("   Base URL: {}", config.base_url);
        info!("   Timeout: {}ms", config.timeout_ms);
        info!("   Timing: {}", config.enable_timing);

        let transport = RestTransport::new(config.clone())?;
        Ok(Self {
            config,
            spot: SpotRestClient::new(transport),
        })
    }

    pub fn config(&self) -> &OkexConfig {
        &self.config
    }

    /// Spot order endpoints
    pub fn spot(&self) -> &SpotRestClient<RestTransport> {
        &self.spot
    }

    /// Test connectivity and measure round trip latency in microseconds
    pub async fn ping(&self) -> Result<u64> {
        let start = nanos();
        self.spot.server_time().await?;
        let latency_micros = (nanos() - start) / 1000;

        info!("🏓 OKEx ping: {}μs", latency_micros);
        Ok(latency_micros)
    }
}
