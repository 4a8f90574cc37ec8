//! Drawing session: one client's view of one room's canvas.
//!
//! A [`Session`] is plain synchronous state. It is driven by a single task
//! (see [`crate::runtime`]) so all local input and remote events are applied
//! one at a time, in arrival order.

use sketchroom_server::domain::{BoardEvent, Color, Point, RoomId, Segment, Snapshot, StrokeWidth};
use sketchroom_server::infrastructure::dto::websocket::ClientMessage;
use tokio::sync::mpsc;

use crate::canvas::{Canvas, CanvasError};
use crate::history::UndoHistory;

/// Current color and width applied to new segments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Brush {
    pub color: Color,
    pub width: StrokeWidth,
}

/// Outbound event queue of a session, drained by the transport writer.
///
/// Emission is fire-and-forget: once the session is marked disconnected, or
/// when the writer is gone, events are dropped.
#[derive(Debug)]
pub struct Outbox {
    sender: mpsc::UnboundedSender<ClientMessage>,
    connected: bool,
}

impl Outbox {
    pub fn new(sender: mpsc::UnboundedSender<ClientMessage>) -> Self {
        Self {
            sender,
            connected: true,
        }
    }

    /// Create an outbox together with the receiving end the writer drains.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ClientMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    pub fn emit(&self, message: ClientMessage) {
        if !self.connected {
            tracing::trace!("Dropping outbound message: session disconnected");
            return;
        }
        if self.sender.send(message).is_err() {
            tracing::debug!("Dropping outbound message: writer is gone");
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected && !self.sender.is_closed()
    }

    pub fn mark_disconnected(&mut self) {
        self.connected = false;
    }
}

pub struct Session<C: Canvas> {
    room_id: RoomId,
    canvas: C,
    history: UndoHistory,
    stroke: Option<Point>,
    brush: Brush,
    outbox: Outbox,
}

impl<C: Canvas> Session<C> {
    pub fn new(room_id: RoomId, canvas: C, outbox: Outbox) -> Self {
        Self {
            room_id,
            canvas,
            history: UndoHistory::new(),
            stroke: None,
            brush: Brush::default(),
            outbox,
        }
    }

    /// Announce this session to the relay.
    pub fn join(&self) {
        tracing::info!("Joining room '{}'", self.room_id);
        self.outbox.emit(ClientMessage::JoinRoom(self.room_id.clone()));
    }

    /// Start a stroke at `point`, saving the current raster for undo.
    pub fn begin_stroke(&mut self, point: Point) {
        match self.canvas.export() {
            Ok(snapshot) => self.history.push(snapshot),
            Err(e) => tracing::warn!("Failed to save undo state: {}", e),
        }
        self.stroke = Some(point);
    }

    /// Draw from the last stroke point to `point`. No-op without a stroke in progress.
    pub fn extend_stroke(&mut self, point: Point) {
        let Some(last) = self.stroke else {
            return;
        };
        let segment = Segment::new(
            last,
            point,
            self.brush.color.clone(),
            self.brush.width,
        );
        self.canvas.draw_segment(&segment);
        self.emit(BoardEvent::Segment(segment));
        self.stroke = Some(point);
    }

    /// Finish the current stroke and flood a snapshot so peers repair lost segments.
    ///
    /// Without a stroke in progress nothing is sent, so a pointer leaving an idle
    /// canvas does not broadcast a snapshot.
    pub fn end_stroke(&mut self) {
        if self.stroke.take().is_none() {
            return;
        }
        self.emit_snapshot();
    }

    pub fn clear(&mut self) {
        self.canvas.clear();
        self.history.clear();
        self.stroke = None;
        self.emit(BoardEvent::Clear);
    }

    /// Restore the newest undo entry and share the result. No-op when history is empty.
    pub fn undo(&mut self) {
        let Some(snapshot) = self.history.pop() else {
            tracing::debug!("Nothing to undo");
            return;
        };
        if let Err(e) = self.canvas.import(&snapshot) {
            tracing::warn!("Failed to restore undo state: {}", e);
            return;
        }
        self.emit(BoardEvent::Snapshot(snapshot));
    }

    /// Apply an event relayed from another member of the room.
    pub fn apply_remote(&mut self, event: BoardEvent) {
        tracing::debug!("Applying remote '{}' event", event.kind());
        match event {
            BoardEvent::Segment(segment) => self.canvas.draw_segment(&segment),
            BoardEvent::Clear => {
                self.canvas.clear();
                self.history.clear();
            }
            BoardEvent::Snapshot(snapshot) => {
                if let Err(e) = self.canvas.import(&snapshot) {
                    tracing::warn!("Ignoring undecodable snapshot: {}", e);
                }
            }
        }
    }

    pub fn set_color(&mut self, color: Color) {
        self.brush.color = color;
    }

    pub fn set_width(&mut self, width: StrokeWidth) {
        self.brush.width = width;
    }

    /// Stop emitting. Local drawing keeps working.
    pub fn mark_disconnected(&mut self) {
        if self.outbox.is_connected() {
            tracing::warn!("Disconnected from relay; continuing offline");
        }
        self.outbox.mark_disconnected();
    }

    pub fn export(&self) -> Result<Snapshot, CanvasError> {
        self.canvas.export()
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn history(&self) -> &UndoHistory {
        &self.history
    }

    pub fn brush(&self) -> &Brush {
        &self.brush
    }

    pub fn is_stroke_in_progress(&self) -> bool {
        self.stroke.is_some()
    }

    pub fn is_connected(&self) -> bool {
        self.outbox.is_connected()
    }

    fn emit(&self, event: BoardEvent) {
        self.outbox
            .emit(ClientMessage::board_event(self.room_id.clone(), event));
    }

    fn emit_snapshot(&self) {
        match self.canvas.export() {
            Ok(snapshot) => self.emit(BoardEvent::Snapshot(snapshot)),
            Err(e) => tracing::warn!("Failed to export snapshot: {}", e),
        }
    }
}
