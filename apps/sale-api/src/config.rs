//! Sale API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. Invalid values are fatal at startup; nothing here is reloaded
//! at runtime.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Sale API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleConfig {
    /// gRPC server port
    pub grpc_port: u16,

    /// Address of the external product catalog service
    pub catalog_addr: String,

    /// Per-call timeout for catalog lookups
    pub catalog_timeout: Duration,

    /// Delay between streamed fulfillment stages
    pub stage_delay: Duration,
}

impl SaleConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = SaleConfig {
            grpc_port: env::var("GRPC_PORT")
                .unwrap_or_else(|_| "50052".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("GRPC_PORT".to_string()))?,

            catalog_addr: env::var("CATALOG_ADDR")
                .unwrap_or_else(|_| "http://localhost:50051".to_string()),

            catalog_timeout: Duration::from_millis(
                env::var("CATALOG_TIMEOUT_MS")
                    .unwrap_or_else(|_| "1000".to_string())
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("CATALOG_TIMEOUT_MS".to_string()))?,
            ),

            stage_delay: Duration::from_millis(
                env::var("STAGE_DELAY_MS")
                    .unwrap_or_else(|_| "2000".to_string())
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("STAGE_DELAY_MS".to_string()))?,
            ),
        };

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
