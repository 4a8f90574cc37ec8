//! Utilities shared by the Sketchroom relay server and drawing client.

pub mod logger;
pub mod time;
