//! Domain layer for the whiteboard relay.
//!
//! This module contains the room membership model and the drawing value
//! objects exchanged between sessions. It is independent of data transfer
//! objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod event;
pub mod factory;
pub mod repository;
pub mod segment;
pub mod value_object;

pub use entity::{Member, Room};
pub use error::{RepositoryError, ValueObjectError};
pub use event::BoardEvent;
pub use factory::ConnectionIdFactory;
pub use repository::RoomRepository;
#[cfg(test)]
pub use repository::MockRoomRepository;
pub use segment::{Color, Point, Segment, StrokeWidth};
pub use value_object::{ConnectionId, RoomId, Snapshot, Timestamp};
