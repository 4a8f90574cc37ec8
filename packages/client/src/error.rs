//! Client error definitions.

use sketchroom_server::domain::ValueObjectError;
use thiserror::Error;

use crate::canvas::CanvasError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error(transparent)]
    Canvas(#[from] CanvasError),

    #[error("Invalid value: {0}")]
    InvalidValue(#[from] ValueObjectError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    /// The session task has stopped
    #[error("Session is closed")]
    SessionClosed,
}
