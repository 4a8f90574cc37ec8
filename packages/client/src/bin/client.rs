//! Terminal client for the Sketchroom shared whiteboard.
//!
//! Joins a room on the relay and draws strokes typed at the prompt.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin sketchroom-client -- --url ws://127.0.0.1:5000/ws --room main
//! ```

use clap::Parser;
use rustyline::{DefaultEditor, error::ReadlineError};
use sketchroom_client::{
    ClientError, PixmapCanvas, SessionHandle,
    canvas::{DEFAULT_HEIGHT, DEFAULT_WIDTH},
    cli::{Command, HELP},
    connect,
};
use sketchroom_server::domain::RoomId;
use sketchroom_shared::logger::setup_logger;
use tokio::sync::mpsc;

#[derive(Debug, Parser)]
#[command(name = "sketchroom-client", version, about = "Draw on a Sketchroom board from the terminal")]
struct Args {
    /// Relay WebSocket URL
    #[arg(long, default_value = "ws://127.0.0.1:5000/ws")]
    url: String,

    /// Room to join
    #[arg(short, long, default_value = "main")]
    room: String,

    /// Canvas width in pixels
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: u32,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    if let Err(e) = run(args).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), ClientError> {
    let room_id = RoomId::new(args.room)?;
    let canvas = PixmapCanvas::new(args.width, args.height)?;
    let handle = connect(&args.url, room_id.clone(), canvas).await?;

    println!("Joined room '{}'. Type 'help' for commands.", room_id);

    let mut lines = spawn_line_reader();
    while let Some(line) = lines.recv().await {
        let line = match line {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        execute(&handle, command).await?;
    }

    handle.shutdown().await?;
    println!("Bye");
    Ok(())
}

async fn execute(handle: &SessionHandle<PixmapCanvas>, command: Command) -> Result<(), ClientError> {
    match command {
        Command::Color(color) => handle.set_color(color)?,
        Command::Width(width) => handle.set_width(width)?,
        Command::Stroke(points) => handle.stroke(&points)?,
        Command::Undo => handle.undo()?,
        Command::Clear => handle.clear()?,
        Command::Status => {
            let status = handle
                .inspect(|session| {
                    format!(
                        "room: {}\nbrush: {} width {}\nundo depth: {}\nconnected: {}",
                        session.room_id(),
                        session.brush().color,
                        session.brush().width,
                        session.history().len(),
                        session.is_connected()
                    )
                })
                .await?;
            println!("{}", status);
        }
        Command::Save(path) => {
            let png = handle.inspect(|session| session.canvas().encode_png()).await??;
            tokio::fs::write(&path, png).await?;
            println!("Saved {}", path.display());
        }
        Command::Help => println!("{}", HELP),
        Command::Quit => {}
    }
    Ok(())
}

/// Read prompt lines on a dedicated thread; rustyline blocks.
fn spawn_line_reader() -> mpsc::UnboundedReceiver<Result<String, ReadlineError>> {
    let (tx, rx) = mpsc::unbounded_channel();

    std::thread::spawn(move || {
        let mut editor = match DefaultEditor::new() {
            Ok(editor) => editor,
            Err(e) => {
                let _ = tx.send(Err(e));
                return;
            }
        };

        loop {
            let line = editor.readline("sketch> ");
            if let Ok(line) = &line {
                let _ = editor.add_history_entry(line.as_str());
            }
            let stop = line.is_err();
            if tx.send(line).is_err() || stop {
                break;
            }
        }
    });

    rx
}
