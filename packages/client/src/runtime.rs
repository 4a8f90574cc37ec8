//! Session task: one tokio task owns a [`Session`] and drains its command queue.
//!
//! Local input, remote events and inspection requests all go through the same
//! queue, so the session never needs a lock.

use sketchroom_server::domain::{BoardEvent, Color, Point, StrokeWidth};
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};

use crate::{canvas::Canvas, error::ClientError, session::Session};

type InspectFn<C> = Box<dyn FnOnce(&Session<C>) + Send>;

/// Work item for a session task.
pub enum SessionCommand<C: Canvas> {
    BeginStroke(Point),
    ExtendStroke(Point),
    EndStroke,
    Clear,
    Undo,
    SetColor(Color),
    SetWidth(StrokeWidth),
    /// An event relayed from another member of the room
    Remote(BoardEvent),
    /// The transport is gone
    Disconnected,
    /// Read session state from the task that owns it
    Inspect(InspectFn<C>),
    Shutdown,
}

/// Handle to a running session task.
pub struct SessionHandle<C: Canvas> {
    commands: mpsc::UnboundedSender<SessionCommand<C>>,
    task: Option<JoinHandle<Session<C>>>,
    transport: Vec<JoinHandle<()>>,
}

impl<C> SessionHandle<C>
where
    C: Canvas + Send + 'static,
{
    /// Start the session task. The session joins its room before handling any command.
    pub fn spawn(session: Session<C>) -> Self {
        let (commands, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run_session(session, rx));
        Self {
            commands,
            task: Some(task),
            transport: Vec::new(),
        }
    }

    /// Tie a transport task's lifetime to this handle.
    pub(crate) fn attach_transport(&mut self, task: JoinHandle<()>) {
        self.transport.push(task);
    }

    /// Sender for feeding the session from another task.
    pub fn command_sender(&self) -> mpsc::UnboundedSender<SessionCommand<C>> {
        self.commands.clone()
    }

    pub fn send(&self, command: SessionCommand<C>) -> Result<(), ClientError> {
        self.commands
            .send(command)
            .map_err(|_| ClientError::SessionClosed)
    }

    pub fn begin_stroke(&self, point: Point) -> Result<(), ClientError> {
        self.send(SessionCommand::BeginStroke(point))
    }

    pub fn extend_stroke(&self, point: Point) -> Result<(), ClientError> {
        self.send(SessionCommand::ExtendStroke(point))
    }

    pub fn end_stroke(&self) -> Result<(), ClientError> {
        self.send(SessionCommand::EndStroke)
    }

    pub fn clear(&self) -> Result<(), ClientError> {
        self.send(SessionCommand::Clear)
    }

    pub fn undo(&self) -> Result<(), ClientError> {
        self.send(SessionCommand::Undo)
    }

    pub fn set_color(&self, color: Color) -> Result<(), ClientError> {
        self.send(SessionCommand::SetColor(color))
    }

    pub fn set_width(&self, width: StrokeWidth) -> Result<(), ClientError> {
        self.send(SessionCommand::SetWidth(width))
    }

    /// Draw a whole stroke through `points`.
    pub fn stroke(&self, points: &[Point]) -> Result<(), ClientError> {
        let Some((first, rest)) = points.split_first() else {
            return Ok(());
        };
        self.begin_stroke(*first)?;
        for point in rest {
            self.extend_stroke(*point)?;
        }
        self.end_stroke()
    }

    /// Run `f` against the session after every command queued so far.
    pub async fn inspect<R, F>(&self, f: F) -> Result<R, ClientError>
    where
        F: FnOnce(&Session<C>) -> R + Send + 'static,
        R: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        self.send(SessionCommand::Inspect(Box::new(move |session| {
            let _ = tx.send(f(session));
        })))?;
        rx.await.map_err(|_| ClientError::SessionClosed)
    }

    /// Stop the session task and the transport, returning the final session state.
    pub async fn shutdown(mut self) -> Result<Session<C>, ClientError> {
        let _ = self.commands.send(SessionCommand::Shutdown);
        let task = self.task.take().ok_or(ClientError::SessionClosed)?;
        let session = task.await.map_err(|_| ClientError::SessionClosed)?;
        for transport in self.transport.drain(..) {
            transport.abort();
        }
        Ok(session)
    }
}

impl<C: Canvas> Drop for SessionHandle<C> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        for transport in self.transport.drain(..) {
            transport.abort();
        }
    }
}

async fn run_session<C: Canvas>(
    mut session: Session<C>,
    mut rx: mpsc::UnboundedReceiver<SessionCommand<C>>,
) -> Session<C> {
    session.join();

    while let Some(command) = rx.recv().await {
        match command {
            SessionCommand::BeginStroke(point) => session.begin_stroke(point),
            SessionCommand::ExtendStroke(point) => session.extend_stroke(point),
            SessionCommand::EndStroke => session.end_stroke(),
            SessionCommand::Clear => session.clear(),
            SessionCommand::Undo => session.undo(),
            SessionCommand::SetColor(color) => session.set_color(color),
            SessionCommand::SetWidth(width) => session.set_width(width),
            SessionCommand::Remote(event) => session.apply_remote(event),
            SessionCommand::Disconnected => session.mark_disconnected(),
            SessionCommand::Inspect(f) => f(&session),
            SessionCommand::Shutdown => break,
        }
    }

    tracing::debug!("Session task for room '{}' stopped", session.room_id());
    session
}
