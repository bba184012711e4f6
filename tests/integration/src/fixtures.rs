//! Test fixtures and data generators

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::helpers::{assert_json, TestServer};

static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Suffix unique across test runs sharing one database
pub fn unique_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos());
    format!("{nanos:x}{}", COUNTER.fetch_add(1, Ordering::SeqCst))
}

/// Signup body with unique name and email
pub fn signup_body() -> Value {
    let suffix = unique_suffix();
    json!({
        "nome": format!("Jogador {suffix}"),
        "apelido": format!("j{suffix}"),
        "email": format!("jogador{suffix}@example.com"),
        "senha": "segredo123",
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub email: String,
    pub nome: String,
    pub apelido: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginBody {
    pub access_token: String,
    pub refresh_token: String,
    pub user: SessionUser,
}

/// A registered and logged-in user
#[derive(Debug)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub token: String,
    pub refresh_token: String,
}

impl Account {
    /// Register a fresh user, then log in to learn its id
    pub async fn create(server: &TestServer) -> Result<Self> {
        let body = signup_body();
        let response = server.post("/cadastro", &body).await?;
        let _: TokenPair = assert_json(response, StatusCode::CREATED).await?;

        let response = server
            .post("/login", &json!({ "email": body["email"], "senha": body["senha"] }))
            .await?;
        let login: LoginBody = assert_json(response, StatusCode::OK).await?;

        Ok(Self {
            id: login.user.id,
            name: login.user.nome,
            email: login.user.email,
            token: login.access_token,
            refresh_token: login.refresh_token,
        })
    }
}

/// Create a campaign owned by `master` and return its id
pub async fn create_campaign(server: &TestServer, master: &Account) -> Result<i64> {
    let body = json!({
        "nome": format!("Campanha {}", unique_suffix()),
        "descricao": "Uma aventura de teste",
    });
    let response = server.post_auth("/criar-campanha", &master.token, &body).await?;
    let created: Value = assert_json(response, StatusCode::CREATED).await?;
    created["campanhaId"]
        .as_i64()
        .ok_or_else(|| anyhow::anyhow!("missing campanhaId in {created}"))
}

/// Request to join and have the master accept
pub async fn add_player(
    server: &TestServer,
    master: &Account,
    player: &Account,
    campaign_id: i64,
) -> Result<()> {
    let response = server
        .post_auth(&format!("/campanhas/{campaign_id}/entrar"), &player.token, &json!({}))
        .await?;
    let _: Value = assert_json(response, StatusCode::OK).await?;

    let response = server
        .post_auth(
            &format!("/campanhas/{campaign_id}/aceitar-pedido"),
            &master.token,
            &json!({ "usuarioId": player.id }),
        )
        .await?;
    let _: Value = assert_json(response, StatusCode::OK).await?;
    Ok(())
}
