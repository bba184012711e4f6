//! WebSocket handler
//!
//! Authenticates the upgrade, then runs the receive, send and heartbeat
//! tasks until one of them ends.

use std::borrow::Cow;
use std::time::Duration;

use axum::extract::ws::{CloseFrame, Message, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::response::IntoResponse;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use futures_util::stream::SplitStream;
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio::time::{interval, timeout, MissedTickBehavior};
use tracing::{debug, info, trace, warn};

use crate::connection::Connection;
use crate::handlers::{AuthHandler, EventDispatcher};
use crate::protocol::{CloseCode, SocketMessage};
use crate::server::GatewayState;

/// Time the send task gets to flush a close frame
const CLOSE_GRACE: Duration = Duration::from_secs(2);

/// Upgrade query string
#[derive(Debug, Default, Deserialize)]
pub struct SocketQuery {
    token: Option<String>,
}

/// Frames the socket tasks push to the send task besides events
#[derive(Debug, Clone, Copy)]
enum Control {
    Ping,
    Close(CloseCode),
}

/// `GET /socket`
pub async fn socket_handler(
    State(state): State<GatewayState>,
    Query(query): Query<SocketQuery>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let token = query
        .token
        .or_else(|| bearer.map(|TypedHeader(Authorization(b))| b.token().to_string()));
    ws.on_upgrade(move |socket| handle_socket(state, socket, token))
}

/// Handle an upgraded WebSocket connection
async fn handle_socket(state: GatewayState, socket: WebSocket, token: Option<String>) {
    let (tx, mut rx) = mpsc::channel::<SocketMessage>(state.message_buffer());
    let connection = state.router().register(tx);
    let session_id = connection.session_id().to_string();

    info!(session_id = %session_id, "WebSocket connection established");

    let (mut sink, mut stream) = socket.split();

    if let Err(code) = handshake(&state, &connection, &mut stream, token).await {
        info!(
            session_id = %session_id,
            close_code = code.as_u16(),
            reason = code.description(),
            "Socket rejected"
        );
        let _ = sink.send(close_frame(code)).await;
        state.router().disconnect(&session_id);
        return;
    }

    let (control_tx, mut control_rx) = mpsc::channel::<Control>(4);

    // Receive: every inbound frame refreshes liveness
    let state_recv = state.clone();
    let connection_recv = connection.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(frame) = stream.next().await {
            connection_recv.touch();
            match frame {
                Ok(Message::Text(text)) => {
                    if let Err(code) = handle_text(&state_recv, &connection_recv, &text).await {
                        return Some(code);
                    }
                }
                Ok(Message::Binary(_)) => {
                    debug!(
                        session_id = %connection_recv.session_id(),
                        "Binary frames not supported"
                    );
                    return Some(CloseCode::DecodeError);
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {}
                Ok(Message::Close(_)) => {
                    debug!(session_id = %connection_recv.session_id(), "Client closed connection");
                    return None;
                }
                Err(e) => {
                    warn!(
                        session_id = %connection_recv.session_id(),
                        error = %e,
                        "WebSocket error"
                    );
                    return None;
                }
            }
        }
        None
    });

    // Send: sole owner of the sink
    let session_id_send = session_id.clone();
    let mut send_task = tokio::spawn(async move {
        loop {
            tokio::select! {
                Some(control) = control_rx.recv() => match control {
                    Control::Ping => {
                        if sink.send(Message::Ping(Vec::new())).await.is_err() {
                            break;
                        }
                    }
                    Control::Close(code) => {
                        let _ = sink.send(close_frame(code)).await;
                        break;
                    }
                },
                outbound = rx.recv() => {
                    let Some(message) = outbound else { break };
                    match message.to_json() {
                        Ok(json) => {
                            if sink.send(Message::Text(json)).await.is_err() {
                                warn!(session_id = %session_id_send, "Failed to send message to WebSocket");
                                break;
                            }
                        }
                        Err(e) => warn!(session_id = %session_id_send, error = %e, "Failed to encode event"),
                    }
                }
            }
        }
        let _ = sink.close().await;
    });

    // Heartbeat: ping on every tick, close when silent for too long
    let connection_hb = connection.clone();
    let control_hb = control_tx.clone();
    let every = state.heartbeat_interval();
    let silence = state.heartbeat_timeout();
    let mut heartbeat_task = tokio::spawn(async move {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let idle = connection_hb.idle_for();
            if idle > silence {
                warn!(
                    session_id = %connection_hb.session_id(),
                    idle_ms = idle.as_millis(),
                    "Connection timed out"
                );
                return Some(CloseCode::SessionTimeout);
            }
            if control_hb.send(Control::Ping).await.is_err() {
                return None;
            }
        }
    });

    let (close, send_finished) = tokio::select! {
        result = &mut recv_task => (result.ok().flatten(), false),
        _ = &mut send_task => (None, true),
        result = &mut heartbeat_task => (result.ok().flatten(), false),
    };
    recv_task.abort();
    heartbeat_task.abort();

    if !send_finished {
        if let Some(code) = close {
            debug!(session_id = %session_id, close_code = code.as_u16(), "Closing connection");
            if control_tx.send(Control::Close(code)).await.is_ok() {
                let _ = timeout(CLOSE_GRACE, &mut send_task).await;
            }
        }
        send_task.abort();
    }

    let campaigns = state.router().disconnect(&session_id);
    info!(
        session_id = %session_id,
        user_id = ?connection.user_id(),
        presence_refreshed = campaigns.len(),
        "Connection closed"
    );
}

/// Authenticate from the upgrade token, or from a first `auth` frame that
/// must arrive within the handshake timeout
async fn handshake(
    state: &GatewayState,
    connection: &Connection,
    stream: &mut SplitStream<WebSocket>,
    token: Option<String>,
) -> Result<(), CloseCode> {
    if let Some(token) = token {
        return AuthHandler::handle(state, connection, Some(&token)).map_err(|e| {
            debug!(error = %e, "Upgrade token rejected");
            e.to_close_code()
        });
    }

    let message = timeout(state.handshake_timeout(), first_message(stream))
        .await
        .map_err(|_| CloseCode::NotAuthenticated)??;
    connection.touch();

    match EventDispatcher::dispatch(state, connection, &message).await {
        Ok(None) if connection.is_authenticated() => Ok(()),
        Ok(Some(code)) => Err(code),
        Ok(None) => Err(CloseCode::NotAuthenticated),
        Err(e) => {
            debug!(error = %e, "Handshake failed");
            Err(e.to_close_code())
        }
    }
}

/// First text frame, decoded
async fn first_message(stream: &mut SplitStream<WebSocket>) -> Result<SocketMessage, CloseCode> {
    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Text(text)) => {
                return SocketMessage::from_json(&text).map_err(|_| CloseCode::DecodeError);
            }
            Ok(Message::Binary(_)) => return Err(CloseCode::DecodeError),
            Ok(Message::Ping(_) | Message::Pong(_)) => {}
            Ok(Message::Close(_)) | Err(_) => break,
        }
    }
    Err(CloseCode::NotAuthenticated)
}

/// Decode and dispatch one text frame
async fn handle_text(
    state: &GatewayState,
    connection: &Connection,
    text: &str,
) -> Result<(), CloseCode> {
    let message = SocketMessage::from_json(text).map_err(|e| {
        debug!(
            session_id = %connection.session_id(),
            error = %e,
            "Failed to parse message"
        );
        CloseCode::DecodeError
    })?;

    trace!(session_id = %connection.session_id(), event = %message.event, "Received message");

    match EventDispatcher::dispatch(state, connection, &message).await {
        Ok(None) => Ok(()),
        Ok(Some(code)) => Err(code),
        Err(e) => {
            warn!(
                session_id = %connection.session_id(),
                error = %e,
                "Handler error"
            );
            Err(e.to_close_code())
        }
    }
}

fn close_frame(code: CloseCode) -> Message {
    Message::Close(Some(CloseFrame {
        code: code.as_u16(),
        reason: Cow::Borrowed(code.description()),
    }))
}
