//! Realtime socket integration tests
//!
//! These tests need a PostgreSQL instance reachable through `DATABASE_URL`.
//!
//! Run with: cargo test -p integration-tests --test socket_tests

use std::time::Duration;

use futures_util::SinkExt;
use integration_tests::{
    add_player, assert_json, check_test_env, close_code, create_campaign, next_event, send_event,
    Account, TestServer,
};
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio_tungstenite::tungstenite::Message;

/// Room joins are handled asynchronously by the server
async fn settle() {
    tokio::time::sleep(Duration::from_millis(200)).await;
}

#[tokio::test]
async fn test_room_event_before_auth_closes_4003() {
    if !check_test_env() {
        return;
    }
    let server = TestServer::start().await.unwrap();
    let mut socket = server.socket(None).await.unwrap();

    send_event(&mut socket, "entrarSalaChat", json!(1)).await.unwrap();
    assert_eq!(close_code(&mut socket).await.unwrap(), 4003);
}

#[tokio::test]
async fn test_silent_handshake_closes_4003() {
    if !check_test_env() {
        return;
    }
    let server = TestServer::start().await.unwrap();
    let mut socket = server.socket(None).await.unwrap();

    assert_eq!(close_code(&mut socket).await.unwrap(), 4003);
}

#[tokio::test]
async fn test_bad_upgrade_token_closes_4004() {
    if !check_test_env() {
        return;
    }
    let server = TestServer::start().await.unwrap();
    let mut socket = server.socket(Some("garbage")).await.unwrap();

    assert_eq!(close_code(&mut socket).await.unwrap(), 4004);
}

#[tokio::test]
async fn test_second_auth_closes_4005() {
    if !check_test_env() {
        return;
    }
    let server = TestServer::start().await.unwrap();
    let account = Account::create(&server).await.unwrap();
    let mut socket = server.socket(Some(&account.token)).await.unwrap();

    send_event(&mut socket, "auth", json!({"token": account.token}))
        .await
        .unwrap();
    assert_eq!(close_code(&mut socket).await.unwrap(), 4005);
}

#[tokio::test]
async fn test_binary_frame_closes_4002() {
    if !check_test_env() {
        return;
    }
    let server = TestServer::start().await.unwrap();
    let account = Account::create(&server).await.unwrap();
    let mut socket = server.socket(Some(&account.token)).await.unwrap();

    socket.send(Message::binary(vec![1, 2, 3])).await.unwrap();
    assert_eq!(close_code(&mut socket).await.unwrap(), 4002);
}

#[tokio::test]
async fn test_notification_reaches_inbox() {
    if !check_test_env() {
        return;
    }
    let server = TestServer::start().await.unwrap();
    let sender = Account::create(&server).await.unwrap();
    let recipient = Account::create(&server).await.unwrap();

    // Authenticate with a frame instead of the upgrade query
    let mut socket = server.socket(None).await.unwrap();
    send_event(
        &mut socket,
        "auth",
        json!({"token": format!("Bearer {}", recipient.token)}),
    )
    .await
    .unwrap();
    send_event(&mut socket, "entrarSalaUsuario", json!(recipient.id))
        .await
        .unwrap();
    settle().await;

    let response = server
        .post_auth(
            "/criar-notificacoes",
            &sender.token,
            &json!({"usuarioId": recipient.id, "mensagem": "Sessão hoje às 20h"}),
        )
        .await
        .unwrap();
    assert_json::<Value>(response, StatusCode::OK).await.unwrap();

    let pushed = next_event(&mut socket, "novaNotificacao").await.unwrap();
    assert_eq!(pushed["usuario_id"], recipient.id);
    assert_eq!(pushed["mensagem"], "Sessão hoje às 20h");
}

#[tokio::test]
async fn test_join_request_is_pushed_to_master() {
    if !check_test_env() {
        return;
    }
    let server = TestServer::start().await.unwrap();
    let master = Account::create(&server).await.unwrap();
    let player = Account::create(&server).await.unwrap();
    let campaign_id = create_campaign(&server, &master).await.unwrap();

    let mut socket = server.socket(Some(&master.token)).await.unwrap();
    send_event(&mut socket, "entrarSalaUsuario", json!(master.id.to_string()))
        .await
        .unwrap();
    settle().await;

    let response = server
        .post_auth(
            &format!("/campanhas/{campaign_id}/entrar"),
            &player.token,
            &json!({"mensagem": "quero jogar"}),
        )
        .await
        .unwrap();
    assert_json::<Value>(response, StatusCode::OK).await.unwrap();

    let pushed = next_event(&mut socket, "novaNotificacao").await.unwrap();
    assert_eq!(pushed["tipo"], "pedido");
    assert_eq!(pushed["campanha_id"], campaign_id);
    assert_eq!(pushed["usuario_id_referencia"], player.id);
}

#[tokio::test]
async fn test_chat_message_fan_out() {
    if !check_test_env() {
        return;
    }
    let server = TestServer::start().await.unwrap();
    let master = Account::create(&server).await.unwrap();
    let player = Account::create(&server).await.unwrap();
    let campaign_id = create_campaign(&server, &master).await.unwrap();
    add_player(&server, &master, &player, campaign_id).await.unwrap();

    let room: Value = assert_json(
        server
            .post_auth(
                &format!("/campanhas/{campaign_id}/salas"),
                &master.token,
                &json!({"nome": "Mesa"}),
            )
            .await
            .unwrap(),
        StatusCode::CREATED,
    )
    .await
    .unwrap();
    let room_id = room["salaId"].as_i64().unwrap();

    let mut socket = server.socket(Some(&player.token)).await.unwrap();
    send_event(&mut socket, "entrarSalaChat", json!(room_id)).await.unwrap();
    settle().await;

    let response = server
        .post_auth(
            &format!("/salas/{room_id}/mensagens"),
            &master.token,
            &json!({"mensagem": "Rolem iniciativa"}),
        )
        .await
        .unwrap();
    assert_json::<Value>(response, StatusCode::CREATED).await.unwrap();

    let pushed = next_event(&mut socket, "novaMensagem").await.unwrap();
    assert_eq!(pushed["sala_id"], room_id);
    assert_eq!(pushed["usuario_id"], master.id);
    assert_eq!(pushed["mensagem"], "Rolem iniciativa");
}

#[tokio::test]
async fn test_presence_in_campaign_room() {
    if !check_test_env() {
        return;
    }
    let server = TestServer::start().await.unwrap();
    let master = Account::create(&server).await.unwrap();
    let player = Account::create(&server).await.unwrap();
    let campaign_id = create_campaign(&server, &master).await.unwrap();
    add_player(&server, &master, &player, campaign_id).await.unwrap();

    let mut master_socket = server.socket(Some(&master.token)).await.unwrap();
    send_event(&mut master_socket, "join_campaign", json!(campaign_id))
        .await
        .unwrap();
    let online = next_event(&mut master_socket, "users_online").await.unwrap();
    assert_eq!(online["users"].as_array().unwrap().len(), 1);

    let mut player_socket = server.socket(Some(&player.token)).await.unwrap();
    send_event(&mut player_socket, "join_campaign", json!(campaign_id))
        .await
        .unwrap();
    let online = next_event(&mut master_socket, "users_online").await.unwrap();
    let ids: Vec<i64> = online["users"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|u| u["id"].as_i64())
        .collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&player.id));

    // Dropping the player's socket refreshes presence for the master
    drop(player_socket);
    let online = next_event(&mut master_socket, "users_online").await.unwrap();
    assert_eq!(online["users"][0]["id"], master.id);
    assert_eq!(online["users"].as_array().unwrap().len(), 1);
}
