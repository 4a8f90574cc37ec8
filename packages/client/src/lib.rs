//! Drawing session for the Sketchroom shared whiteboard.
//!
//! A [`Session`] owns one client's view of one room: a local raster, a
//! bounded undo history and the rules for reconciling events from peers.
//! [`connect`] runs a session on its own task and wires it to the relay.

pub mod canvas;
pub mod cli;
pub mod connection;
pub mod error;
pub mod history;
pub mod runtime;
pub mod session;

pub use canvas::{Canvas, CanvasError, PixmapCanvas};
pub use connection::connect;
pub use error::ClientError;
pub use history::{UNDO_HISTORY_LIMIT, UndoHistory};
pub use runtime::{SessionCommand, SessionHandle};
pub use session::{Brush, Outbox, Session};
