// Connection lifecycle: session creation on connect, discard on close, identity

use std::time::{Duration, SystemTime};

use yahtzee_backend::mint_access_token;
use yahtzee_backend::services::UserId;
use yahtzee_backend::SecurityConfig;

use crate::support::websocket::{
    build_test_state, start_test_server, wait_for_sessions, TEST_JWT_SECRET,
};
use crate::support::websocket_client::WebSocketClient;

#[tokio::test]
async fn connect_creates_session_and_close_discards_it() -> Result<(), Box<dyn std::error::Error>>
{
    let (state, _sink) = build_test_state(11);
    let engine = state.engine.clone();
    let (server_handle, addr, server_join) = start_test_server(state).await?;

    let ws_url = format!("ws://{addr}/ws");
    let mut first = WebSocketClient::connect_retry(&ws_url, Duration::from_secs(1)).await?;
    let mut second = WebSocketClient::connect_retry(&ws_url, Duration::from_secs(1)).await?;
    wait_for_sessions(&engine, 2, Duration::from_secs(2)).await?;

    first.close().await?;
    wait_for_sessions(&engine, 1, Duration::from_secs(2)).await?;

    second.close().await?;
    wait_for_sessions(&engine, 0, Duration::from_secs(2)).await?;

    server_handle.stop(true).await;
    let _ = server_join.await;
    Ok(())
}

#[tokio::test]
async fn reconnect_starts_a_fresh_game() -> Result<(), Box<dyn std::error::Error>> {
    let (state, _sink) = build_test_state(12);
    let engine = state.engine.clone();
    let (server_handle, addr, server_join) = start_test_server(state).await?;
    let ws_url = format!("ws://{addr}/ws");

    let mut client = WebSocketClient::connect_retry(&ws_url, Duration::from_secs(1)).await?;
    client.roll().await?;
    client.roll().await?;
    client.close().await?;
    wait_for_sessions(&engine, 0, Duration::from_secs(2)).await?;

    let mut client = WebSocketClient::connect_retry(&ws_url, Duration::from_secs(1)).await?;
    let roll = client.roll().await?;
    assert_eq!(roll["rollCount"], 1, "state must not survive a reconnect");

    client.close().await?;
    server_handle.stop(true).await;
    let _ = server_join.await;
    Ok(())
}

#[tokio::test]
async fn token_identity_is_attached_to_the_session() -> Result<(), Box<dyn std::error::Error>> {
    let (state, _sink) = build_test_state(13);
    let engine = state.engine.clone();
    let security = SecurityConfig::new(TEST_JWT_SECRET);
    let token = mint_access_token("player-ws-identity", SystemTime::now(), &security)?;
    let (server_handle, addr, server_join) = start_test_server(state).await?;

    let ws_url = format!("ws://{addr}/ws?token={token}");
    let mut client = WebSocketClient::connect_retry(&ws_url, Duration::from_secs(1)).await?;
    wait_for_sessions(&engine, 1, Duration::from_secs(2)).await?;

    let ids = engine.registry().connection_ids();
    assert_eq!(ids.len(), 1);
    let session = engine.registry().get(ids[0]).ok_or("session missing")?;
    assert_eq!(
        session.lock().user_id(),
        Some(&UserId::new("player-ws-identity"))
    );

    client.close().await?;
    server_handle.stop(true).await;
    let _ = server_join.await;
    Ok(())
}
