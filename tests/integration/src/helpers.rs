//! Test helpers for integration tests
//!
//! Spawns the full application on an ephemeral port and wraps the HTTP and
//! socket clients the tests drive it with.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use futures_util::{SinkExt, StreamExt};
use reqwest::{Client, Response, StatusCode};
use rpg_api::{create_app, create_app_state};
use rpg_common::AppConfig;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

/// Client side of a realtime socket
pub type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// How long socket helpers wait for a frame
pub const SOCKET_WAIT: Duration = Duration::from_secs(5);

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub config: AppConfig,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()?).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = create_app_state(config.clone()).await?;
        let app = create_app(state);

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            config,
            handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    pub async fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    pub async fn post_auth<T: Serialize + ?Sized>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    pub async fn patch_auth<T: Serialize + ?Sized>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .client
            .patch(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    /// Open the realtime socket, optionally passing the token on the upgrade
    pub async fn socket(&self, token: Option<&str>) -> Result<Socket> {
        let url = match token {
            Some(token) => format!("ws://{}/socket?token={}", self.addr, token),
            None => format!("ws://{}/socket", self.addr),
        };
        let (socket, _) = connect_async(url).await.context("socket upgrade failed")?;
        Ok(socket)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Configuration from the environment, tuned for fast tests
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::from_env().map_err(|e| anyhow::anyhow!("Config error: {e}"))?;
    config.rate_limit.requests_per_second = 1000;
    config.rate_limit.burst = 1000;
    config.gateway.handshake_timeout_ms = 500;
    Ok(config)
}

/// Database-backed tests only run when a database is configured
pub fn check_test_env() -> bool {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }
    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status and return the error code from the body
pub async fn assert_error(response: Response, expected_status: StatusCode) -> Result<String> {
    let body: Value = assert_json(response, expected_status).await?;
    body["error"]["code"]
        .as_str()
        .map(str::to_string)
        .context("error body without a code")
}

/// Send one `{"event", "data"}` frame
pub async fn send_event(socket: &mut Socket, event: &str, data: Value) -> Result<()> {
    let frame = serde_json::json!({ "event": event, "data": data });
    socket.send(Message::text(frame.to_string())).await?;
    Ok(())
}

/// Wait for the next server event named `event`, skipping others
pub async fn next_event(socket: &mut Socket, event: &str) -> Result<Value> {
    tokio::time::timeout(SOCKET_WAIT, async {
        while let Some(frame) = socket.next().await {
            if let Message::Text(text) = frame? {
                let message: Value = serde_json::from_str(&text)?;
                if message["event"] == event {
                    return Ok(message["data"].clone());
                }
            }
        }
        anyhow::bail!("socket closed before {event}")
    })
    .await
    .with_context(|| format!("timed out waiting for {event}"))?
}

/// Wait for the server to close the socket and return the close code
pub async fn close_code(socket: &mut Socket) -> Result<u16> {
    tokio::time::timeout(SOCKET_WAIT, async {
        while let Some(frame) = socket.next().await {
            if let Message::Close(close) = frame? {
                return Ok(close.map_or(1005, |f| u16::from(f.code)));
            }
        }
        anyhow::bail!("socket ended without a close frame")
    })
    .await
    .context("timed out waiting for close")?
}

