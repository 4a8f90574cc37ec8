//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// RoomId validation error
    #[error("RoomId cannot be empty")]
    RoomIdEmpty,

    /// RoomId too long error
    #[error("RoomId cannot exceed {max} bytes (got {actual})")]
    RoomIdTooLong { max: usize, actual: usize },

    /// ConnectionId invalid format error (not a valid UUID format)
    #[error("ConnectionId must be a valid UUID format (got: {0})")]
    ConnectionIdInvalidFormat(String),

    /// Color is not a `#rrggbb` hex string
    #[error("Color must be in #rrggbb format (got: {0})")]
    ColorInvalidFormat(String),

    /// Stroke width outside the allowed range
    #[error("Stroke width must be between {min} and {max} (got {actual})")]
    StrokeWidthOutOfRange { min: u8, max: u8, actual: u32 },

    /// Point coordinate is NaN or infinite
    #[error("Point coordinates must be finite")]
    PointNotFinite,

    /// Snapshot validation error
    #[error("Snapshot cannot be empty")]
    SnapshotEmpty,

    /// Snapshot too large error
    #[error("Snapshot cannot exceed {max} bytes (got {actual})")]
    SnapshotTooLarge { max: usize, actual: usize },
}

/// Errors raised by a [`RoomRepository`](super::RoomRepository) implementation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The connection is already registered
    #[error("Connection '{0}' is already registered")]
    DuplicateConnection(String),

    /// The connection is not registered
    #[error("Connection '{0}' not found")]
    ConnectionNotFound(String),

    /// The connection is not a member of the room
    #[error("Connection '{connection_id}' is not a member of room '{room_id}'")]
    NotAMember {
        connection_id: String,
        room_id: String,
    },
}
