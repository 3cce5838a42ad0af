//! # signlabel - QR Sign Label Generator
//!
//! signlabel turns rows of (code, identifier, description) into printable
//! sign labels: a QR code of the code, the code and identifier as text, and
//! the description word-wrapped beside it. It provides:
//!
//! - **Layouts**: the 70x30mm@300dpi sign profile and a 400x450px square profile
//! - **Rendering**: QR encoding, font rasterization and greedy text wrapping
//! - **Row sources**: spreadsheets and PDF purchase orders
//! - **Distribution**: a mailbox-polling loop that mails labels back as a zip
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use signlabel::{LabelRenderer, LabelRequest, LayoutSpec};
//!
//! let renderer = LabelRenderer::with_font_dir(LayoutSpec::sign(), Path::new("fonts"))?;
//!
//! let request = LabelRequest::new("V000123", "9000555", "PROMO2024 Red widget");
//! let image = renderer.render(&request)?;
//! image.save("9000555.png").map_err(|e| signlabel::LabelError::Image(e.to_string()))?;
//!
//! # Ok::<(), signlabel::LabelError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`layout`] | Canvas size, field anchors and font sizes |
//! | [`text`] | Font loading, measurement and word wrapping |
//! | [`barcode`] | QR encoding to a raster |
//! | [`label`] | Per-row label planning and painting |
//! | [`batch`] | One PNG per row into an output directory |
//! | [`source`] | Spreadsheet and purchase-order row sources |
//! | [`distribute`] | Mailbox polling, zip packaging and SMTP delivery |
//! | [`error`] | Error types |

pub mod barcode;
pub mod batch;
pub mod distribute;
pub mod error;
pub mod label;
pub mod layout;
pub mod source;
pub mod text;

// Re-exports for convenience
pub use error::LabelError;
pub use label::{LabelRenderer, LabelRequest};
pub use layout::LayoutSpec;
