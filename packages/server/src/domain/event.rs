//! Board events relayed between members of a room.

use super::{segment::Segment, value_object::Snapshot};

/// An event that changes the shared canvas of a room.
///
/// The relay forwards these to the other members of a room without
/// looking at their contents.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardEvent {
    /// One incremental stroke segment
    Segment(Segment),
    /// Blank the canvas
    Clear,
    /// Replace the canvas with a full encoded raster
    Snapshot(Snapshot),
}

impl BoardEvent {
    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            BoardEvent::Segment(_) => "segment",
            BoardEvent::Clear => "clear",
            BoardEvent::Snapshot(_) => "snapshot",
        }
    }
}
