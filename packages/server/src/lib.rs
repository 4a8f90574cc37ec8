//! Room relay for the Sketchroom shared whiteboard.
//!
//! Clients join named rooms over a WebSocket and every drawing event they
//! send is forwarded to the other members of the same room. The relay keeps
//! room membership only; it never stores drawing content.

pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use ui::{ServerConfig, build_router, run, state::AppState};
