//! # Gateway Client Interface
//!
//! The surrounding SDK hands every component a gateway client. The frame
//! core only ever calls `get_configuration()`; `request()` belongs to the
//! integrations' own network flows.

use crate::entities::Configuration;
use crate::errors::GatewayError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A request forwarded to the payment gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayRequest {
    /// HTTP method.
    pub method: String,
    /// Gateway endpoint, relative to the client's base URL.
    pub endpoint: String,
    /// Request body.
    pub data: Value,
}

/// Gateway client consumed by frame components.
#[async_trait]
pub trait GatewayClient: Send + Sync {
    /// Current configuration. Must be JSON-serializable.
    fn get_configuration(&self) -> Configuration;

    /// Send a request to the gateway.
    async fn request(&self, request: GatewayRequest) -> Result<Value, GatewayError>;
}

/// Client that serves a fixed configuration and performs no network I/O.
#[derive(Debug, Clone, Default)]
pub struct StaticGatewayClient {
    configuration: Configuration,
}

impl StaticGatewayClient {
    /// Create a client serving `configuration`.
    #[must_use]
    pub fn new(configuration: Configuration) -> Self {
        Self { configuration }
    }
}

#[async_trait]
impl GatewayClient for StaticGatewayClient {
    fn get_configuration(&self) -> Configuration {
        self.configuration.clone()
    }

    async fn request(&self, _request: GatewayRequest) -> Result<Value, GatewayError> {
        Err(GatewayError::Unsupported)
    }
}
