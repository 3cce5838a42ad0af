//! Draw operations produced by label planning.

use image::RgbImage;

use crate::text::FontFace;

/// A single drawing step on the label canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Paste a barcode raster with its top-left corner at `(x, y)`.
    Barcode { x: i64, y: i64, image: RgbImage },
    /// Draw (possibly multiline) text with its top-left anchor at `(x, y)`.
    Text {
        x: i64,
        y: i64,
        face: FontFace,
        size: f32,
        text: String,
    },
}

/// Canvas size plus the ordered ops that compose a label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPlan {
    pub width: u32,
    pub height: u32,
    pub ops: Vec<DrawOp>,
}

impl LabelPlan {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    /// The text op whose content equals `text`, if any.
    pub fn find_text(&self, text: &str) -> Option<&DrawOp> {
        self.ops
            .iter()
            .find(|op| matches!(op, DrawOp::Text { text: t, .. } if t == text))
    }

    /// All text contents, in drawing order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                DrawOp::Barcode { .. } => None,
            })
            .collect()
    }
}
