//! Interactive command parsing for the terminal client.

use std::path::PathBuf;

use sketchroom_server::domain::{Color, Point, StrokeWidth, ValueObjectError};
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  color <#rrggbb>          set the brush color
  width <1-50>             set the brush width
  stroke x,y x,y [x,y...]  draw a stroke through the given points
  undo                     revert the last stroke
  clear                    clear the board for everyone in the room
  status                   show room, brush, undo depth and connection
  save <path>              write the canvas as PNG
  help                     show this help
  quit                     leave the room";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Color(Color),
    Width(StrokeWidth),
    Stroke(Vec<Point>),
    Undo,
    Clear,
    Status,
    Save(PathBuf),
    Help,
    Quit,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command '{0}' (type 'help')")]
    Unknown(String),

    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),

    #[error("Invalid point '{0}', expected x,y")]
    InvalidPoint(String),

    #[error("A stroke needs at least two points")]
    TooFewPoints,

    #[error("Invalid width '{0}'")]
    InvalidWidth(String),

    #[error(transparent)]
    InvalidValue(#[from] ValueObjectError),
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?;

        match name.to_ascii_lowercase().as_str() {
            "color" => {
                let value = words.next().ok_or(CommandError::MissingArgument("color"))?;
                Ok(Command::Color(Color::new(value.to_string())?))
            }
            "width" => {
                let value = words.next().ok_or(CommandError::MissingArgument("width"))?;
                let width: u32 = value
                    .parse()
                    .map_err(|_| CommandError::InvalidWidth(value.to_string()))?;
                Ok(Command::Width(StrokeWidth::new(width)?))
            }
            "stroke" => {
                let points = words.map(parse_point).collect::<Result<Vec<_>, _>>()?;
                if points.len() < 2 {
                    return Err(CommandError::TooFewPoints);
                }
                Ok(Command::Stroke(points))
            }
            "undo" => Ok(Command::Undo),
            "clear" => Ok(Command::Clear),
            "status" => Ok(Command::Status),
            "save" => {
                let path = words.next().ok_or(CommandError::MissingArgument("save"))?;
                Ok(Command::Save(PathBuf::from(path)))
            }
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn parse_point(word: &str) -> Result<Point, CommandError> {
    let invalid = || CommandError::InvalidPoint(word.to_string());
    let (x, y) = word.split_once(',').ok_or_else(invalid)?;
    let x: f32 = x.trim().parse().map_err(|_| invalid())?;
    let y: f32 = y.trim().parse().map_err(|_| invalid())?;
    Point::new(x, y).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stroke() {
        // テスト項目: stroke コマンドは座標列をパースする
        // when (操作):
        let command = Command::parse("stroke 10,20 30.5,40 50,60").unwrap();

        // then (期待する結果):
        assert_eq!(
            command,
            Command::Stroke(vec![
                Point::new(10.0, 20.0).unwrap(),
                Point::new(30.5, 40.0).unwrap(),
                Point::new(50.0, 60.0).unwrap(),
            ])
        );
    }

    #[test]
    fn test_parse_stroke_errors() {
        // テスト項目: 座標が足りない、または不正な stroke はエラーになる
        // then (期待する結果):
        assert_eq!(
            Command::parse("stroke 1,2"),
            Err(CommandError::TooFewPoints)
        );
        assert_eq!(
            Command::parse("stroke 1,2 oops"),
            Err(CommandError::InvalidPoint("oops".to_string()))
        );
        assert_eq!(
            Command::parse("stroke 1,2 inf,3"),
            Err(CommandError::InvalidPoint("inf,3".to_string()))
        );
    }

    #[test]
    fn test_parse_brush_commands() {
        // テスト項目: color / width は値オブジェクトの検証を通る
        // then (期待する結果):
        assert_eq!(
            Command::parse("color #FF0000").unwrap(),
            Command::Color(Color::new("#ff0000".to_string()).unwrap())
        );
        assert_eq!(
            Command::parse("width 12").unwrap(),
            Command::Width(StrokeWidth::new(12).unwrap())
        );
        assert!(matches!(
            Command::parse("width 51"),
            Err(CommandError::InvalidValue(
                ValueObjectError::StrokeWidthOutOfRange { .. }
            ))
        ));
        assert!(matches!(
            Command::parse("color red"),
            Err(CommandError::InvalidValue(
                ValueObjectError::ColorInvalidFormat(_)
            ))
        ));
        assert_eq!(
            Command::parse("width"),
            Err(CommandError::MissingArgument("width"))
        );
    }

    #[test]
    fn test_parse_simple_commands() {
        // テスト項目: 引数なしのコマンドと未知のコマンド
        // then (期待する結果):
        assert_eq!(Command::parse("  undo ").unwrap(), Command::Undo);
        assert_eq!(Command::parse("CLEAR").unwrap(), Command::Clear);
        assert_eq!(Command::parse("status").unwrap(), Command::Status);
        assert_eq!(Command::parse("exit").unwrap(), Command::Quit);
        assert_eq!(
            Command::parse("save out.png").unwrap(),
            Command::Save(PathBuf::from("out.png"))
        );
        assert_eq!(Command::parse(""), Err(CommandError::Empty));
        assert_eq!(
            Command::parse("paint"),
            Err(CommandError::Unknown("paint".to_string()))
        );
    }
}
