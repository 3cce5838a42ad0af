//! Label planning and painting.

use image::{ImageFormat, Rgb, RgbImage, imageops};
use std::io::Cursor;
use std::path::Path;

use super::plan::{DrawOp, LabelPlan};
use super::request::LabelRequest;
use crate::barcode;
use crate::error::LabelError;
use crate::layout::LayoutSpec;
use crate::text::{FontFace, FontSet, split_words, wrap};

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Renders labels for one layout with its fonts loaded.
pub struct LabelRenderer {
    layout: LayoutSpec,
    fonts: FontSet,
}

impl LabelRenderer {
    pub fn new(layout: LayoutSpec, fonts: FontSet) -> Self {
        Self { layout, fonts }
    }

    /// Load the layout's fonts from `font_dir` and build a renderer.
    pub fn with_font_dir(layout: LayoutSpec, font_dir: &Path) -> Result<Self, LabelError> {
        let fonts = FontSet::load(font_dir, &layout.fonts)?;
        Ok(Self::new(layout, fonts))
    }

    pub fn layout(&self) -> &LayoutSpec {
        &self.layout
    }

    /// Decide everything that goes on the label.
    pub fn plan(&self, request: &LabelRequest) -> Result<LabelPlan, LabelError> {
        let layout = &self.layout;
        let (width, height) = layout.pixel_size();
        let mut plan = LabelPlan::new(width, height);

        let mut qr = barcode::encode_qr(&request.primary_code)?;
        if let Some(edge) = layout.barcode.resize {
            qr = barcode::resize_square(&qr, edge);
        }
        plan.push(DrawOp::Barcode {
            x: layout.barcode.x,
            y: layout.barcode.y,
            image: qr,
        });

        plan.push(DrawOp::Text {
            x: layout.code.x,
            y: layout.code.y,
            face: FontFace::Regular,
            size: layout.code.size,
            text: request.primary_code.clone(),
        });

        if let Some(id) = &layout.id {
            plan.push(DrawOp::Text {
                x: id.x,
                y: id.y,
                face: FontFace::Regular,
                size: id.size_for(&request.secondary_id),
                text: request.secondary_id.clone(),
            });
        }

        let Some(body) = &layout.body else {
            return Ok(plan);
        };

        let mut words = split_words(&request.description);
        let mut body_y = body.y;

        if let (true, Some(leading)) = (request.prefix_flag, &body.leading) {
            if !words.is_empty() {
                let token = words.remove(0);
                // An empty token (leading space) takes no room.
                if !token.is_empty() {
                    plan.push(DrawOp::Text {
                        x: leading.x,
                        y: leading.y,
                        face: FontFace::Bold,
                        size: leading.size,
                        text: token.to_string(),
                    });
                    body_y += leading.body_shift;
                }
            }
        }

        let font = self.fonts.face(FontFace::Regular);
        let wrapped = wrap(&words, |line| font.width(line, body.size), body.max_line_width);
        if !wrapped.is_empty() {
            plan.push(DrawOp::Text {
                x: body.x,
                y: body_y,
                face: FontFace::Regular,
                size: body.size,
                text: wrapped,
            });
        }

        Ok(plan)
    }

    /// Execute a plan onto a fresh white canvas.
    pub fn paint(&self, plan: &LabelPlan) -> RgbImage {
        let mut canvas = RgbImage::from_pixel(plan.width, plan.height, WHITE);

        for op in &plan.ops {
            match op {
                DrawOp::Barcode { x, y, image } => {
                    imageops::replace(&mut canvas, image, *x, *y);
                }
                DrawOp::Text {
                    x,
                    y,
                    face,
                    size,
                    text,
                } => {
                    self.fonts.face(*face).draw(&mut canvas, *x, *y, *size, text);
                }
            }
        }

        canvas
    }

    /// Plan and paint a label.
    pub fn render(&self, request: &LabelRequest) -> Result<RgbImage, LabelError> {
        let plan = self.plan(request)?;
        Ok(self.paint(&plan))
    }
}

/// Encode a rendered label as PNG bytes.
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>, LabelError> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| LabelError::Image(format!("Failed to encode PNG: {}", e)))?;
    Ok(bytes)
}
