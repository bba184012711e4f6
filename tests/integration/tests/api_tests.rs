//! REST API integration tests
//!
//! These tests need a PostgreSQL instance reachable through `DATABASE_URL`.
//! Migrations run on startup unless `DATABASE_RUN_MIGRATIONS=false`.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    add_player, assert_error, assert_json, check_test_env, create_campaign, signup_body, Account,
    TestServer,
};
use reqwest::StatusCode;
use rpg_common::JwtService;
use rpg_core::User;
use serde_json::{json, Value};

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    if !check_test_env() {
        return;
    }
    let server = TestServer::start().await.unwrap();

    let health: Value = assert_json(server.get("/health").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(health["status"], "healthy");

    let ready: Value = assert_json(server.get("/health/ready").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(ready["checks"]["database"], "healthy");
}

// ============================================================================
// Session
// ============================================================================

#[tokio::test]
async fn test_signup_login_and_profile() {
    if !check_test_env() {
        return;
    }
    let server = TestServer::start().await.unwrap();
    let account = Account::create(&server).await.unwrap();

    let profile: Value = assert_json(
        server.get_auth("/perfil", &account.token).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(profile["message"], "Acesso permitido");
    assert_eq!(profile["user"]["id"], account.id);
    assert_eq!(profile["user"]["nome"], account.name.as_str());
}

#[tokio::test]
async fn test_signup_conflicts() {
    if !check_test_env() {
        return;
    }
    let server = TestServer::start().await.unwrap();
    let body = signup_body();
    assert_json::<Value>(server.post("/cadastro", &body).await.unwrap(), StatusCode::CREATED)
        .await
        .unwrap();

    let mut same_email = signup_body();
    same_email["email"] = body["email"].clone();
    let code = assert_error(
        server.post("/cadastro", &same_email).await.unwrap(),
        StatusCode::CONFLICT,
    )
    .await
    .unwrap();
    assert_eq!(code, "EMAIL_ALREADY_EXISTS");

    let mut same_name = signup_body();
    same_name["nome"] = body["nome"].clone();
    let code = assert_error(
        server.post("/cadastro", &same_name).await.unwrap(),
        StatusCode::CONFLICT,
    )
    .await
    .unwrap();
    assert_eq!(code, "NAME_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_signup_validation() {
    if !check_test_env() {
        return;
    }
    let server = TestServer::start().await.unwrap();

    let mut short_password = signup_body();
    short_password["senha"] = json!("123");
    let code = assert_error(
        server.post("/cadastro", &short_password).await.unwrap(),
        StatusCode::BAD_REQUEST,
    )
    .await
    .unwrap();
    assert_eq!(code, "VALIDATION_ERROR");

    let code = assert_error(
        server.post("/cadastro", &json!({"nome": "x"})).await.unwrap(),
        StatusCode::BAD_REQUEST,
    )
    .await
    .unwrap();
    assert_eq!(code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    if !check_test_env() {
        return;
    }
    let server = TestServer::start().await.unwrap();
    let account = Account::create(&server).await.unwrap();

    let code = assert_error(
        server
            .post("/login", &json!({"email": account.email, "senha": "errada"}))
            .await
            .unwrap(),
        StatusCode::UNAUTHORIZED,
    )
    .await
    .unwrap();
    assert_eq!(code, "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_token_errors_are_distinguished() {
    if !check_test_env() {
        return;
    }
    let server = TestServer::start().await.unwrap();

    let code = assert_error(server.get("/perfil").await.unwrap(), StatusCode::UNAUTHORIZED)
        .await
        .unwrap();
    assert_eq!(code, "TOKEN_MISSING");

    let code = assert_error(
        server.get_auth("/perfil", "not-a-jwt").await.unwrap(),
        StatusCode::UNAUTHORIZED,
    )
    .await
    .unwrap();
    assert_eq!(code, "TOKEN_INVALID");

    let jwt = &server.config.jwt;
    let expired = JwtService::new(&jwt.access_secret, &jwt.refresh_secret, -3600, 3600)
        .issue_access_token(&User::new(
            1,
            "Ana".to_string(),
            "ana".to_string(),
            "ana@example.com".to_string(),
        ))
        .unwrap();
    let code = assert_error(
        server.get_auth("/perfil", &expired).await.unwrap(),
        StatusCode::UNAUTHORIZED,
    )
    .await
    .unwrap();
    assert_eq!(code, "TOKEN_EXPIRED");
}

#[tokio::test]
async fn test_refresh_and_logout() {
    if !check_test_env() {
        return;
    }
    let server = TestServer::start().await.unwrap();
    let account = Account::create(&server).await.unwrap();
    let body = json!({ "refreshToken": account.refresh_token });

    let refreshed: Value = assert_json(
        server.post("/refresh-token", &body).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    let access = refreshed["accessToken"].as_str().unwrap();
    assert_json::<Value>(server.get_auth("/perfil", access).await.unwrap(), StatusCode::OK)
        .await
        .unwrap();

    let logout: Value = assert_json(server.post("/logout", &body).await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(logout["message"], "Logout realizado com sucesso");

    let code = assert_error(
        server.post("/refresh-token", &body).await.unwrap(),
        StatusCode::UNAUTHORIZED,
    )
    .await
    .unwrap();
    assert_eq!(code, "INVALID_REFRESH_TOKEN");
}

// ============================================================================
// Campaigns and membership
// ============================================================================

#[tokio::test]
async fn test_join_accept_flow() {
    if !check_test_env() {
        return;
    }
    let server = TestServer::start().await.unwrap();
    let master = Account::create(&server).await.unwrap();
    let player = Account::create(&server).await.unwrap();
    let campaign_id = create_campaign(&server, &master).await.unwrap();
    let join_path = format!("/campanhas/{campaign_id}/entrar");

    let joined: Value = assert_json(
        server
            .post_auth(&join_path, &player.token, &json!({"mensagem": "posso entrar?"}))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(joined["pedido"]["status"], "pendente");

    let code = assert_error(
        server.post_auth(&join_path, &player.token, &json!({})).await.unwrap(),
        StatusCode::CONFLICT,
    )
    .await
    .unwrap();
    assert_eq!(code, "JOIN_REQUEST_PENDING");

    // The master's inbox holds the request
    let inbox: Vec<Value> = assert_json(
        server.get_auth("/notificacoes", &master.token).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert!(inbox
        .iter()
        .any(|n| n["tipo"] == "pedido" && n["usuario_id_referencia"] == player.id));

    // Only a master may accept
    let code = assert_error(
        server
            .post_auth(
                &format!("/campanhas/{campaign_id}/aceitar-pedido"),
                &player.token,
                &json!({"usuarioId": player.id}),
            )
            .await
            .unwrap(),
        StatusCode::FORBIDDEN,
    )
    .await
    .unwrap();
    assert_eq!(code, "FORBIDDEN");

    let accepted: Value = assert_json(
        server
            .post_auth(
                &format!("/campanhas/{campaign_id}/aceitar-pedido"),
                &master.token,
                &json!({"usuarioId": player.id.to_string()}),
            )
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(accepted["success"], true);
    assert_eq!(accepted["membro"]["papel"], "jogador");

    let code = assert_error(
        server.post_auth(&join_path, &player.token, &json!({})).await.unwrap(),
        StatusCode::CONFLICT,
    )
    .await
    .unwrap();
    assert_eq!(code, "ALREADY_MEMBER");

    // A second accept finds no pending request
    let code = assert_error(
        server
            .post_auth(
                &format!("/campanhas/{campaign_id}/aceitar-pedido"),
                &master.token,
                &json!({"usuarioId": player.id}),
            )
            .await
            .unwrap(),
        StatusCode::NOT_FOUND,
    )
    .await
    .unwrap();
    assert_eq!(code, "UNKNOWN_JOIN_REQUEST");

    let campaigns: Vec<Value> =
        assert_json(server.get("/campanhas").await.unwrap(), StatusCode::OK)
            .await
            .unwrap();
    let listed = campaigns
        .iter()
        .find(|c| c["id"] == campaign_id)
        .expect("campaign listed");
    assert_eq!(listed["mestres"], master.name.as_str());

    let inbox: Vec<Value> = assert_json(
        server.get_auth("/notificacoes", &player.token).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert!(inbox.iter().any(|n| n["tipo"] == "pedido_aceito"));
}

#[tokio::test]
async fn test_unknown_campaign_and_bad_path() {
    if !check_test_env() {
        return;
    }
    let server = TestServer::start().await.unwrap();
    let player = Account::create(&server).await.unwrap();

    let code = assert_error(
        server
            .post_auth("/campanhas/999999999/entrar", &player.token, &json!({}))
            .await
            .unwrap(),
        StatusCode::NOT_FOUND,
    )
    .await
    .unwrap();
    assert_eq!(code, "UNKNOWN_CAMPAIGN");

    let code = assert_error(
        server.get_auth("/campanha/abc", &player.token).await.unwrap(),
        StatusCode::BAD_REQUEST,
    )
    .await
    .unwrap();
    assert_eq!(code, "INVALID_PATH_PARAMETER");
}

#[tokio::test]
async fn test_promote_member() {
    if !check_test_env() {
        return;
    }
    let server = TestServer::start().await.unwrap();
    let master = Account::create(&server).await.unwrap();
    let player = Account::create(&server).await.unwrap();
    let campaign_id = create_campaign(&server, &master).await.unwrap();
    add_player(&server, &master, &player, campaign_id).await.unwrap();

    let promoted: Value = assert_json(
        server
            .patch_auth(
                &format!("/campanhas/{campaign_id}/promover"),
                &master.token,
                &json!({"userId": player.id}),
            )
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(promoted["membro"]["papel"], "mestre");
}

// ============================================================================
// Notifications
// ============================================================================

#[tokio::test]
async fn test_only_recipient_marks_read() {
    if !check_test_env() {
        return;
    }
    let server = TestServer::start().await.unwrap();
    let sender = Account::create(&server).await.unwrap();
    let recipient = Account::create(&server).await.unwrap();

    let created: Value = assert_json(
        server
            .post_auth(
                "/criar-notificacoes",
                &sender.token,
                &json!({"usuarioId": recipient.id, "mensagem": "Olá"}),
            )
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    let id = created["notificacao"]["id"].as_i64().unwrap();
    assert_eq!(created["notificacao"]["lida"], false);
    let path = format!("/notificacoes/{id}/lida");

    let code = assert_error(
        server.patch_auth(&path, &sender.token, &json!({})).await.unwrap(),
        StatusCode::FORBIDDEN,
    )
    .await
    .unwrap();
    assert_eq!(code, "NOT_RECIPIENT");

    assert_json::<Value>(
        server.patch_auth(&path, &recipient.token, &json!({})).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();

    let inbox: Vec<Value> = assert_json(
        server.get_auth("/notificacoes", &recipient.token).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert!(inbox.iter().any(|n| n["id"] == id && n["lida"] == true));
}

// ============================================================================
// Chat
// ============================================================================

#[tokio::test]
async fn test_chat_room_messages() {
    if !check_test_env() {
        return;
    }
    let server = TestServer::start().await.unwrap();
    let master = Account::create(&server).await.unwrap();
    let player = Account::create(&server).await.unwrap();
    let outsider = Account::create(&server).await.unwrap();
    let campaign_id = create_campaign(&server, &master).await.unwrap();
    add_player(&server, &master, &player, campaign_id).await.unwrap();

    let room: Value = assert_json(
        server
            .post_auth(
                &format!("/campanhas/{campaign_id}/salas"),
                &master.token,
                &json!({"nome": "Taverna"}),
            )
            .await
            .unwrap(),
        StatusCode::CREATED,
    )
    .await
    .unwrap();
    let room_id = room["salaId"].as_i64().unwrap();
    let messages_path = format!("/salas/{room_id}/mensagens");

    let posted: Value = assert_json(
        server
            .post_auth(&messages_path, &player.token, &json!({"mensagem": "Olá, mestre"}))
            .await
            .unwrap(),
        StatusCode::CREATED,
    )
    .await
    .unwrap();
    assert_eq!(posted["usuario_id"], player.id);

    let history: Vec<Value> = assert_json(
        server.get_auth(&messages_path, &master.token).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["mensagem"], "Olá, mestre");

    let code = assert_error(
        server.get_auth(&messages_path, &outsider.token).await.unwrap(),
        StatusCode::FORBIDDEN,
    )
    .await
    .unwrap();
    assert_eq!(code, "FORBIDDEN");
}
