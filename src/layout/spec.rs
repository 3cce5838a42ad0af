//! Layout specification types and the built-in profiles.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::LabelError;

/// Millimeters per inch, for physical canvas conversion.
const MM_PER_INCH: f64 = 25.4;

/// Canvas size, either physical (converted at a resolution) or fixed pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Canvas {
    /// A physical label stock.
    Physical {
        width_mm: f64,
        height_mm: f64,
        dpi: u16,
    },
    /// A fixed pixel canvas.
    Pixels { width: u32, height: u32 },
}

impl Canvas {
    /// Canvas size in pixels.
    ///
    /// Physical sizes are truncated, not rounded: 70mm at 300 DPI is 826px.
    pub fn pixel_size(&self) -> (u32, u32) {
        match *self {
            Self::Physical {
                width_mm,
                height_mm,
                dpi,
            } => {
                let dots_per_mm = dpi as f64 / MM_PER_INCH;
                (
                    (width_mm * dots_per_mm) as u32,
                    (height_mm * dots_per_mm) as u32,
                )
            }
            Self::Pixels { width, height } => (width, height),
        }
    }
}

/// Font file names, resolved against the font directory at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontFiles {
    pub regular: PathBuf,
    pub bold: PathBuf,
}

impl Default for FontFiles {
    fn default() -> Self {
        Self {
            regular: PathBuf::from("DejaVuSans.ttf"),
            bold: PathBuf::from("DejaVuSans-Bold.ttf"),
        }
    }
}

/// Where the barcode raster is pasted.
///
/// Offsets may be negative or push the barcode past the right edge; the
/// overhang is cropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarcodePlacement {
    pub x: i64,
    pub y: i64,
    /// Square edge length to resize the barcode to before pasting.
    #[serde(default)]
    pub resize: Option<u32>,
}

/// A single-line text field. `size` is in pixels per em.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextField {
    pub x: i64,
    pub y: i64,
    pub size: f32,
}

/// The secondary identifier field, which drops to `small_size` when the
/// identifier is longer than `max_chars`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdField {
    pub x: i64,
    pub y: i64,
    pub size: f32,
    pub small_size: f32,
    pub max_chars: usize,
}

impl IdField {
    /// Font size for an identifier of the given text.
    pub fn size_for(&self, id: &str) -> f32 {
        if id.chars().count() > self.max_chars {
            self.small_size
        } else {
            self.size
        }
    }
}

/// Bold leading code drawn above the description body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadingCodeField {
    pub x: i64,
    pub y: i64,
    pub size: f32,
    /// How far the body moves down when a leading code is drawn.
    pub body_shift: i64,
}

/// The wrapped description block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyField {
    pub x: i64,
    pub y: i64,
    pub size: f32,
    pub max_line_width: f32,
    #[serde(default)]
    pub leading: Option<LeadingCodeField>,
}

/// # Layout Specification
///
/// Immutable geometry for one label kind. Rendering is a pure function of
/// a request, a layout and the loaded fonts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSpec {
    /// Human-readable name (e.g. "sign").
    pub name: String,
    pub canvas: Canvas,
    #[serde(default)]
    pub fonts: FontFiles,
    pub barcode: BarcodePlacement,
    /// The primary code, printed under or beside the barcode.
    pub code: TextField,
    #[serde(default)]
    pub id: Option<IdField>,
    #[serde(default)]
    pub body: Option<BodyField>,
}

impl LayoutSpec {
    /// # Sign Label (70mm x 30mm @ 300 DPI)
    ///
    /// ```text
    /// ┌───────────────────────────────┬───────────┐
    /// │ LEADING (bold)                │  ▓▓ QR ▓▓ │
    /// │ wrapped description ...       │  ▓▓▓▓▓▓▓▓ │
    /// │ ...                           │ CODE      │
    /// │                               │ ID        │
    /// └───────────────────────────────┴───────────┘
    /// ```
    ///
    /// The QR code sits 20px above the top edge and overhangs the right
    /// edge, which crops its quiet zone.
    pub fn sign() -> Self {
        let canvas = Canvas::Physical {
            width_mm: 70.0,
            height_mm: 30.0,
            dpi: 300,
        };
        let (width, height) = canvas.pixel_size();
        let (half_w, half_h) = ((width / 2) as i64, (height / 2) as i64);

        Self {
            name: "sign".to_string(),
            canvas,
            fonts: FontFiles::default(),
            barcode: BarcodePlacement {
                x: half_w + 150,
                y: -20,
                resize: None,
            },
            code: TextField {
                x: half_w + 195,
                y: half_h + 65,
                size: 45.0,
            },
            id: Some(IdField {
                x: half_w + 195,
                y: half_h + 115,
                size: 45.0,
                small_size: 32.0,
                max_chars: 10,
            }),
            body: Some(BodyField {
                x: 10,
                y: 10,
                size: 45.0,
                max_line_width: (half_w + 90) as f32,
                leading: Some(LeadingCodeField {
                    x: 10,
                    y: 10,
                    size: 50.0,
                    body_shift: 50,
                }),
            }),
        }
    }

    /// # Square Label (400 x 450 px)
    ///
    /// A 400px QR code with the code printed underneath.
    pub fn square() -> Self {
        Self {
            name: "square".to_string(),
            canvas: Canvas::Pixels {
                width: 400,
                height: 450,
            },
            fonts: FontFiles::default(),
            barcode: BarcodePlacement {
                x: 0,
                y: 0,
                resize: Some(400),
            },
            code: TextField {
                x: 10,
                y: 390,
                size: 45.0,
            },
            id: None,
            body: None,
        }
    }

    /// Canvas size in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        self.canvas.pixel_size()
    }

    /// List all built-in layouts.
    pub fn built_in() -> Vec<Self> {
        vec![Self::sign(), Self::square()]
    }

    /// Look up a built-in layout by name (case-insensitive).
    pub fn parse(name: &str) -> Result<Self, LabelError> {
        Self::built_in()
            .into_iter()
            .find(|l| l.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                LabelError::Layout(format!(
                    "Unknown layout '{}'. Use 'sign', 'square' or a path to a .json layout",
                    name
                ))
            })
    }

    /// Load a layout from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, LabelError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            LabelError::Layout(format!("Failed to read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&raw)
            .map_err(|e| LabelError::Layout(format!("Invalid layout {}: {}", path.display(), e)))
    }

    /// Resolve a CLI layout argument: a `.json` path or a built-in name.
    pub fn load(name_or_path: &str) -> Result<Self, LabelError> {
        if name_or_path.ends_with(".json") {
            Self::from_file(Path::new(name_or_path))
        } else {
            Self::parse(name_or_path)
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
