//! Application state
//!
//! Holds the shared state for the Axum application: the service context,
//! the realtime gateway, the pool for readiness probes and configuration.

use std::sync::Arc;

use axum::extract::FromRef;
use rpg_common::{AppConfig, JwtService};
use rpg_db::PgPool;
use rpg_gateway::{ChannelRouter, GatewayState};
use rpg_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    service_context: Arc<ServiceContext>,
    gateway: GatewayState,
    pool: PgPool,
    config: Arc<AppConfig>,
}

impl AppState {
    /// The router must be the same one the service context emits through
    pub fn new(
        service_context: Arc<ServiceContext>,
        router: Arc<ChannelRouter>,
        pool: PgPool,
        config: AppConfig,
    ) -> Self {
        let gateway = GatewayState::new(router, service_context.clone(), config.gateway.clone());
        Self {
            service_context,
            gateway,
            pool,
            config: Arc::new(config),
        }
    }

    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    pub fn gateway(&self) -> &GatewayState {
        &self.gateway
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn jwt_service(&self) -> &JwtService {
        self.service_context.jwt_service()
    }
}

impl FromRef<AppState> for GatewayState {
    fn from_ref(state: &AppState) -> Self {
        state.gateway.clone()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("gateway", &self.gateway)
            .field("env", &self.config.app.env)
            .finish()
    }
}
