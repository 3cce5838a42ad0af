//! # Label Rendering
//!
//! Turns one row of label data into a composed raster image.
//!
//! ## Architecture
//!
//! ```text
//! LabelRequest ──plan()──→ LabelPlan (DrawOps) ──paint()──→ RgbImage
//!                  ↓
//!        - Encode QR barcode
//!        - Place code and id text
//!        - Split off the leading code
//!        - Wrap the description
//! ```
//!
//! Planning makes every layout decision; painting only executes the ops.
//! Both are pure: the same request and layout always give the same pixels.

mod plan;
mod renderer;
mod request;

pub use plan::{DrawOp, LabelPlan};
pub use renderer::{LabelRenderer, encode_png};
pub use request::{LEADING_CODE_MARKER, LabelRequest};
