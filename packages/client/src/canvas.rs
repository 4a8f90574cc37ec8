//! Raster drawing surface.
//!
//! [`Canvas`] is the seam between the session logic and whatever actually
//! holds pixels. [`PixmapCanvas`] is the tiny-skia implementation used by the
//! terminal client and the tests.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use sketchroom_server::domain::{Segment, Snapshot, ValueObjectError};
use thiserror::Error;
use tiny_skia::{
    Color, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform,
};

/// Default canvas width in pixels
pub const DEFAULT_WIDTH: u32 = 1000;
/// Default canvas height in pixels
pub const DEFAULT_HEIGHT: u32 = 700;

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("Canvas size must be non-zero (got {width}x{height})")]
    InvalidSize { width: u32, height: u32 },

    #[error("Snapshot is not a data URL")]
    NotADataUrl,

    #[error("Unsupported snapshot encoding: {0}")]
    UnsupportedEncoding(String),

    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Failed to encode PNG: {0}")]
    Encode(String),

    #[error("Failed to decode PNG: {0}")]
    Decode(String),

    #[error(transparent)]
    Snapshot(#[from] ValueObjectError),
}

/// A drawing surface a session renders into.
pub trait Canvas {
    /// Draw one straight segment with its color and width.
    fn draw_segment(&mut self, segment: &Segment);

    /// Encode the whole raster.
    fn export(&self) -> Result<Snapshot, CanvasError>;

    /// Replace the whole raster with a decoded snapshot.
    ///
    /// On error the raster must be left unchanged.
    fn import(&mut self, snapshot: &Snapshot) -> Result<(), CanvasError>;

    /// Reset to blank.
    fn clear(&mut self);
}

/// tiny-skia backed canvas.
///
/// Strokes use round caps and joins. Anti-aliasing is off, so every pixel is
/// either blank or an opaque stroke color and PNG snapshots reproduce the
/// raster exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct PixmapCanvas {
    pixmap: Pixmap,
}

impl PixmapCanvas {
    pub fn new(width: u32, height: u32) -> Result<Self, CanvasError> {
        let pixmap = Pixmap::new(width, height).ok_or(CanvasError::InvalidSize { width, height })?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Premultiplied RGBA bytes, row-major.
    pub fn pixels(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Straight (non-premultiplied) RGBA of one pixel.
    pub fn rgba_at(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    pub fn is_blank(&self) -> bool {
        self.pixmap.data().iter().all(|&b| b == 0)
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, CanvasError> {
        self.pixmap
            .encode_png()
            .map_err(|e| CanvasError::Encode(e.to_string()))
    }
}

impl Canvas for PixmapCanvas {
    fn draw_segment(&mut self, segment: &Segment) {
        let mut pb = PathBuilder::new();
        pb.move_to(segment.from.x, segment.from.y);
        pb.line_to(segment.to.x, segment.to.y);
        let Some(path) = pb.finish() else {
            return;
        };

        let (r, g, b) = segment.color.rgb();
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, 255);
        paint.anti_alias = false;

        let stroke = Stroke {
            width: f32::from(segment.width.value()),
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };

        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    fn export(&self) -> Result<Snapshot, CanvasError> {
        let png = self.encode_png()?;
        let data_url = format!("{PNG_DATA_URL_PREFIX}{}", STANDARD.encode(png));
        Ok(Snapshot::new(data_url)?)
    }

    fn import(&mut self, snapshot: &Snapshot) -> Result<(), CanvasError> {
        let (header, body) = snapshot
            .as_str()
            .split_once(',')
            .ok_or(CanvasError::NotADataUrl)?;
        if !header.starts_with("data:") {
            return Err(CanvasError::NotADataUrl);
        }
        if header != "data:image/png;base64" {
            return Err(CanvasError::UnsupportedEncoding(header.to_string()));
        }

        let bytes = STANDARD.decode(body)?;
        let decoded = Pixmap::decode_png(&bytes).map_err(|e| CanvasError::Decode(e.to_string()))?;

        if decoded.width() == self.width() && decoded.height() == self.height() {
            self.pixmap = decoded;
        } else {
            // A peer with a different canvas size: anchor at the top-left corner and clip
            self.pixmap.fill(Color::TRANSPARENT);
            self.pixmap.draw_pixmap(
                0,
                0,
                decoded.as_ref(),
                &PixmapPaint::default(),
                Transform::identity(),
                None,
            );
        }
        Ok(())
    }

    fn clear(&mut self) {
        self.pixmap.fill(Color::TRANSPARENT);
    }
}
