//! Test fixtures: an in-process relay and a raw WebSocket client.

#![allow(dead_code)]

use std::{net::SocketAddr, time::Duration};

use futures_util::{SinkExt, StreamExt};
use sketchroom_server::{AppState, build_router, domain::RoomId};
use tokio::{net::TcpStream, task::JoinHandle};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Relay bound to an ephemeral port for the duration of a test
pub struct TestServer {
    addr: SocketAddr,
    pub state: AppState,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        let state = AppState::default();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");
        let app = build_router(state.clone());
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server failed");
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    pub async fn connect(&self) -> WsStream {
        let (ws, _) = connect_async(self.ws_url())
            .await
            .expect("Failed to connect WebSocket");
        ws
    }

    /// Wait until `room` has exactly `count` members (0 means the room is gone).
    pub async fn wait_for_members(&self, room: &str, count: usize) {
        let room_id = RoomId::new(room.to_string()).unwrap();
        for _ in 0..200 {
            let members = self
                .state
                .repository
                .get_room(&room_id)
                .await
                .map(|r| r.members.len())
                .unwrap_or(0);
            if members == count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("room '{room}' never reached {count} member(s)");
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub async fn send_json(ws: &mut WsStream, value: serde_json::Value) {
    ws.send(Message::Text(value.to_string().into()))
        .await
        .expect("Failed to send message");
}

/// Next text frame as JSON, or `None` if nothing arrives within `timeout`.
pub async fn recv_json_within(ws: &mut WsStream, timeout: Duration) -> Option<serde_json::Value> {
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        let frame = tokio::time::timeout_at(deadline, ws.next()).await.ok()??;
        if let Ok(Message::Text(text)) = frame {
            return Some(serde_json::from_str(text.as_str()).expect("Relay sent invalid JSON"));
        }
    }
}

pub async fn recv_json(ws: &mut WsStream) -> serde_json::Value {
    recv_json_within(ws, Duration::from_secs(2))
        .await
        .expect("Timed out waiting for a message")
}

/// Assert that no text frame arrives for a short while.
pub async fn assert_silent(ws: &mut WsStream) {
    if let Some(value) = recv_json_within(ws, Duration::from_millis(200)).await {
        panic!("expected no message, got {value}");
    }
}

pub fn segment_json() -> serde_json::Value {
    serde_json::json!({
        "from": {"x": 0.0, "y": 0.0},
        "to": {"x": 10.0, "y": 10.0},
        "color": "#ff0000",
        "width": 3
    })
}
