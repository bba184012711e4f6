//! `auth` handler

use rpg_service::SessionService;
use tracing::{debug, info, warn};

use super::{HandlerError, HandlerResult};
use crate::connection::{Connection, Identity};
use crate::server::GatewayState;

/// Binds a connection to the user named by an access token
pub struct AuthHandler;

impl AuthHandler {
    /// Verify `token` and bind the connection. A connection is authenticated
    /// at most once.
    pub fn handle(
        state: &GatewayState,
        connection: &Connection,
        token: Option<&str>,
    ) -> HandlerResult<()> {
        if connection.is_authenticated() {
            warn!(
                session_id = %connection.session_id(),
                "auth sent on an authenticated connection"
            );
            return Err(HandlerError::AlreadyAuthenticated);
        }

        let token = token.ok_or_else(|| {
            HandlerError::AuthenticationFailed("Token missing".to_string())
        })?;

        let user = SessionService::new(state.services())
            .authenticate(token)
            .map_err(|e| {
                debug!(error = %e, "Token validation failed");
                HandlerError::AuthenticationFailed(e.to_string())
            })?;

        state.router().authenticate(connection, Identity::from(&user));

        info!(
            session_id = %connection.session_id(),
            user_id = %user.id,
            "Socket authenticated"
        );
        Ok(())
    }
}
