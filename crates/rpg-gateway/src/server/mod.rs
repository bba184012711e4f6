//! WebSocket endpoint
//!
//! The socket shares the REST listener, so the gateway only contributes a
//! route. The host application supplies `GatewayState` through `FromRef`.

mod handler;
mod state;

pub use handler::socket_handler;
pub use state::GatewayState;

use axum::extract::FromRef;
use axum::routing::get;
use axum::Router;

/// Path of the WebSocket upgrade
pub const SOCKET_PATH: &str = "/socket";

/// Router exposing the socket endpoint for any state that can yield a
/// [`GatewayState`]
pub fn gateway_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    GatewayState: FromRef<S>,
{
    Router::new().route(SOCKET_PATH, get(socket_handler))
}
