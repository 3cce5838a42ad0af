//! TTF font loading, measurement and rendering for label text.
//!
//! Sizes are pixels per em, the convention label layouts are written in.
//! Text is drawn with its ascender line at the anchor `y`, in black, with
//! anti-aliased edges blended onto the canvas.

use ab_glyph::{Font, FontArc, GlyphId, PxScale, ScaleFont, point};
use image::RgbImage;
use std::path::{Path, PathBuf};

use crate::error::LabelError;
use crate::layout::FontFiles;

/// Extra pixels between lines of multiline text.
pub const LINE_SPACING: f32 = 4.0;

/// Which face of the font family to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    Regular,
    Bold,
}

/// A loaded TTF font.
#[derive(Clone)]
pub struct LabelFont {
    font: FontArc,
}

impl LabelFont {
    /// Load a font file. A missing or invalid file is a configuration error.
    pub fn load(path: &Path) -> Result<Self, LabelError> {
        let data = std::fs::read(path).map_err(|e| LabelError::Font {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_bytes(data, path)
    }

    /// Parse font data. `origin` is only used in error messages.
    pub fn from_bytes(data: Vec<u8>, origin: &Path) -> Result<Self, LabelError> {
        let font = FontArc::try_from_vec(data).map_err(|e| LabelError::Font {
            path: origin.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Self { font })
    }

    /// Convert a pixels-per-em size to ab_glyph's height-based scale.
    fn scale(&self, size: f32) -> PxScale {
        match self.font.units_per_em() {
            Some(units_per_em) => PxScale::from(size * self.font.height_unscaled() / units_per_em),
            None => PxScale::from(size),
        }
    }

    /// Advance width of a single line of text, kerning included.
    ///
    /// Pair kerning narrows lines such as "AV" or "To", so a wrap driven by
    /// this width can break one word later than a measurement without it.
    pub fn width(&self, text: &str, size: f32) -> f32 {
        let scaled = self.font.as_scaled(self.scale(size));
        let mut width = 0.0f32;
        let mut prev: Option<GlyphId> = None;

        for ch in text.chars() {
            let id = self.font.glyph_id(ch);
            if let Some(prev) = prev {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            prev = Some(id);
        }

        width
    }

    /// Scaled ascent: distance from the anchor to the baseline.
    pub fn ascent(&self, size: f32) -> f32 {
        self.font.as_scaled(self.scale(size)).ascent()
    }

    /// Vertical distance between consecutive lines of multiline text.
    pub fn line_pitch(&self, size: f32) -> f32 {
        self.ascent(size) + LINE_SPACING
    }

    /// Draw text onto the canvas with its top-left anchor at `(x, y)`.
    ///
    /// `\n` starts a new line. Pixels falling outside the canvas are dropped.
    pub fn draw(&self, canvas: &mut RgbImage, x: i64, y: i64, size: f32, text: &str) {
        let pitch = self.line_pitch(size);
        for (i, line) in text.split('\n').enumerate() {
            let top = y as f32 + i as f32 * pitch;
            self.draw_line(canvas, x as f32, top, size, line);
        }
    }

    fn draw_line(&self, canvas: &mut RgbImage, x: f32, top: f32, size: f32, line: &str) {
        let scale = self.scale(size);
        let scaled = self.font.as_scaled(scale);
        let baseline = top + scaled.ascent();
        let (width, height) = canvas.dimensions();

        let mut caret_x = x;
        let mut prev: Option<GlyphId> = None;

        for ch in line.chars() {
            let id = self.font.glyph_id(ch);
            if let Some(prev) = prev {
                caret_x += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(scale, point(caret_x, baseline));
            caret_x += scaled.h_advance(id);
            prev = Some(id);

            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let px = gx as i64 + bounds.min.x as i64;
                let py = gy as i64 + bounds.min.y as i64;
                if px < 0 || py < 0 || px >= width as i64 || py >= height as i64 {
                    return;
                }
                let ink = coverage.clamp(0.0, 1.0);
                let pixel = canvas.get_pixel_mut(px as u32, py as u32);
                for channel in pixel.0.iter_mut() {
                    *channel = (*channel as f32 * (1.0 - ink)).round() as u8;
                }
            });
        }
    }
}

/// The regular and bold faces used by a layout.
#[derive(Clone)]
pub struct FontSet {
    regular: LabelFont,
    bold: LabelFont,
}

impl FontSet {
    /// Load both faces from `dir`. Absolute file names in `files` are used as-is.
    pub fn load(dir: &Path, files: &FontFiles) -> Result<Self, LabelError> {
        let regular = LabelFont::load(&resolve(dir, &files.regular))?;
        let bold = LabelFont::load(&resolve(dir, &files.bold))?;
        log::debug!(
            "Loaded fonts {} and {} from {}",
            files.regular.display(),
            files.bold.display(),
            dir.display()
        );
        Ok(Self { regular, bold })
    }

    pub fn face(&self, face: FontFace) -> &LabelFont {
        match face {
            FontFace::Regular => &self.regular,
            FontFace::Bold => &self.bold,
        }
    }
}

fn resolve(dir: &Path, file: &Path) -> PathBuf {
    if file.is_absolute() {
        file.to_path_buf()
    } else {
        dir.join(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn fonts() -> FontSet {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("fonts");
        FontSet::load(&dir, &FontFiles::default()).unwrap()
    }

    #[test]
    fn test_missing_font_is_config_error() {
        let err = FontSet::load(Path::new("/nonexistent"), &FontFiles::default())
            .err()
            .unwrap();
        match err {
            LabelError::Font { path, .. } => {
                assert_eq!(path, Path::new("/nonexistent/DejaVuSans.ttf"));
            }
            other => panic!("expected font error, got {other:?}"),
        }
    }

    #[test]
    fn test_width_applies_pair_kerning() {
        let font = fonts();
        let regular = font.face(FontFace::Regular);
        let apart = regular.width("A", 45.0) + regular.width("V", 45.0);
        assert!(regular.width("AV", 45.0) < apart);
    }

    #[test]
    fn test_invalid_font_data() {
        let result = LabelFont::from_bytes(b"not a font".to_vec(), Path::new("bogus.ttf"));
        assert!(matches!(result, Err(LabelError::Font { .. })));
    }

    #[test]
    fn test_width_grows_with_text_and_size() {
        let fonts = fonts();
        let font = fonts.face(FontFace::Regular);
        assert_eq!(font.width("", 45.0), 0.0);
        assert!(font.width("widget", 45.0) > font.width("wid", 45.0));
        assert!(font.width("widget", 45.0) > font.width("widget", 32.0));
    }

    #[test]
    fn test_bold_is_wider() {
        let fonts = fonts();
        let regular = fonts.face(FontFace::Regular).width("PROMO2024", 50.0);
        let bold = fonts.face(FontFace::Bold).width("PROMO2024", 50.0);
        assert!(bold > regular);
    }

    #[test]
    fn test_draw_inks_pixels_near_anchor() {
        let fonts = fonts();
        let mut canvas = RgbImage::from_pixel(200, 100, Rgb([255, 255, 255]));
        fonts
            .face(FontFace::Regular)
            .draw(&mut canvas, 10, 10, 45.0, "Hi");

        let inked: Vec<(u32, u32)> = canvas
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0[0] < 128)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert!(!inked.is_empty());
        assert!(inked.iter().all(|&(x, y)| x >= 10 && y >= 10));
    }

    #[test]
    fn test_draw_clips_outside_canvas() {
        let fonts = fonts();
        let mut canvas = RgbImage::from_pixel(20, 20, Rgb([255, 255, 255]));
        // Mostly off-canvas; must not panic.
        fonts
            .face(FontFace::Bold)
            .draw(&mut canvas, -30, -30, 50.0, "WWW\nWWW");
        fonts
            .face(FontFace::Regular)
            .draw(&mut canvas, 15, 15, 50.0, "WWW");
    }

    #[test]
    fn test_multiline_uses_line_pitch() {
        let fonts = fonts();
        let font = fonts.face(FontFace::Regular);
        let mut one = RgbImage::from_pixel(300, 200, Rgb([255, 255, 255]));
        let mut two = one.clone();
        font.draw(&mut one, 0, 0, 30.0, "x");
        font.draw(&mut two, 0, 0, 30.0, "x\nx");

        let lowest = |img: &RgbImage| {
            img.enumerate_pixels()
                .filter(|(_, _, p)| p.0[0] < 128)
                .map(|(_, y, _)| y)
                .max()
                .unwrap()
        };
        let shift = lowest(&two) - lowest(&one);
        assert!((shift as f32 - font.line_pitch(30.0)).abs() <= 2.0);
    }
}
