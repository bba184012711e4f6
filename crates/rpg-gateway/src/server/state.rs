//! Gateway state
//!
//! Shared dependencies for the socket endpoint.

use std::sync::Arc;
use std::time::Duration;

use rpg_common::GatewayConfig;
use rpg_service::ServiceContext;

use crate::connection::ChannelRouter;

/// Gateway application state
#[derive(Clone)]
pub struct GatewayState {
    /// Room registry, also the service layer's realtime emitter
    router: Arc<ChannelRouter>,
    /// Service context for token checks and membership lookups
    services: Arc<ServiceContext>,
    config: Arc<GatewayConfig>,
}

impl GatewayState {
    pub fn new(
        router: Arc<ChannelRouter>,
        services: Arc<ServiceContext>,
        config: GatewayConfig,
    ) -> Self {
        Self {
            router,
            services,
            config: Arc::new(config),
        }
    }

    pub fn router(&self) -> &ChannelRouter {
        &self.router
    }

    pub fn services(&self) -> &ServiceContext {
        &self.services
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_millis(self.config.heartbeat_interval_ms)
    }

    pub fn heartbeat_timeout(&self) -> Duration {
        Duration::from_millis(self.config.heartbeat_timeout_ms)
    }

    pub fn handshake_timeout(&self) -> Duration {
        Duration::from_millis(self.config.handshake_timeout_ms)
    }

    /// Outbound queue capacity per connection, at least one
    pub fn message_buffer(&self) -> usize {
        self.config.message_buffer.max(1)
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("router", &self.router)
            .field("config", &self.config)
            .finish()
    }
}
