//! Test fixtures: an in-process relay and helpers for waiting on sessions.

#![allow(dead_code)]

use std::{future::Future, net::SocketAddr, time::Duration};

use sketchroom_client::{PixmapCanvas, SessionHandle, connect};
use sketchroom_server::{AppState, build_router, domain::RoomId};
use tokio::task::JoinHandle;

pub const WIDTH: u32 = 120;
pub const HEIGHT: u32 = 90;

/// Relay bound to an ephemeral port for the duration of a test
pub struct TestRelay {
    addr: SocketAddr,
    state: AppState,
    handle: JoinHandle<()>,
}

impl TestRelay {
    pub async fn start() -> Self {
        let state = AppState::default();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");
        let app = build_router(state.clone());
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test relay failed");
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    /// Connect a session to `room` and wait until the relay has registered the join.
    pub async fn join(&self, room: &str) -> SessionHandle<PixmapCanvas> {
        let before = self.member_count(room).await;
        let canvas = PixmapCanvas::new(WIDTH, HEIGHT).expect("Failed to create canvas");
        let handle = connect(&self.ws_url(), room_id(room), canvas)
            .await
            .expect("Failed to connect session");
        self.wait_for_members(room, before + 1).await;
        handle
    }

    pub async fn member_count(&self, room: &str) -> usize {
        self.state
            .repository
            .get_room(&room_id(room))
            .await
            .map(|r| r.members.len())
            .unwrap_or(0)
    }

    pub async fn wait_for_members(&self, room: &str, count: usize) {
        for _ in 0..200 {
            if self.member_count(room).await == count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("room '{room}' never reached {count} member(s)");
    }
}

impl Drop for TestRelay {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn room_id(room: &str) -> RoomId {
    RoomId::new(room.to_string()).expect("Invalid room id")
}

/// Current raster of a session.
pub async fn raster(handle: &SessionHandle<PixmapCanvas>) -> PixmapCanvas {
    handle
        .inspect(|session| session.canvas().clone())
        .await
        .expect("Session closed")
}

/// Poll `check` until it holds or two seconds pass.
pub async fn eventually<F, Fut>(mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    for _ in 0..200 {
        if check().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}

/// Wait until two sessions hold identical rasters.
pub async fn converged(
    a: &SessionHandle<PixmapCanvas>,
    b: &SessionHandle<PixmapCanvas>,
) -> bool {
    eventually(move || async move { raster(a).await == raster(b).await }).await
}
