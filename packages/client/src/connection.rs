//! WebSocket transport between a session and the relay.

use futures_util::{SinkExt, StreamExt};
use sketchroom_server::{domain::RoomId, infrastructure::dto::websocket::ServerMessage};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::{
    canvas::Canvas,
    error::ClientError,
    runtime::{SessionCommand, SessionHandle},
    session::{Outbox, Session},
};

/// Connect to the relay at `url` and start a session for `room_id`.
///
/// Two transport tasks run alongside the session task:
/// - the writer drains the session's outbox into the socket
/// - the reader turns relayed frames into [`SessionCommand::Remote`] and
///   reports [`SessionCommand::Disconnected`] when the socket closes
pub async fn connect<C>(
    url: &str,
    room_id: RoomId,
    canvas: C,
) -> Result<SessionHandle<C>, ClientError>
where
    C: Canvas + Send + 'static,
{
    let (ws, _) = connect_async(url).await?;
    tracing::info!("Connected to relay at {}", url);

    let (mut sink, mut stream) = ws.split();
    let (outbox, mut outbound) = Outbox::channel();
    let mut handle = SessionHandle::spawn(Session::new(room_id, canvas, outbox));

    let writer = tokio::spawn(async move {
        while let Some(message) = outbound.recv().await {
            let json = match serde_json::to_string(&message) {
                Ok(json) => json,
                Err(e) => {
                    tracing::warn!("Failed to serialize outbound message: {}", e);
                    continue;
                }
            };
            if let Err(e) = sink.send(Message::Text(json.into())).await {
                tracing::warn!("Failed to send to relay: {}", e);
                break;
            }
        }
        let _ = sink.close().await;
    });

    let commands = handle.command_sender();
    let reader = tokio::spawn(async move {
        while let Some(frame) = stream.next().await {
            let frame = match frame {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::warn!("WebSocket error: {}", e);
                    break;
                }
            };

            match frame {
                Message::Text(text) => match serde_json::from_str::<ServerMessage>(text.as_str()) {
                    Ok(message) => {
                        if commands.send(SessionCommand::Remote(message.into())).is_err() {
                            return;
                        }
                    }
                    Err(e) => tracing::warn!("Ignoring malformed frame from relay: {}", e),
                },
                Message::Close(_) => break,
                _ => {}
            }
        }

        tracing::info!("Relay connection closed");
        let _ = commands.send(SessionCommand::Disconnected);
    });

    handle.attach_transport(writer);
    handle.attach_transport(reader);
    Ok(handle)
}
