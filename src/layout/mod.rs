//! # Label Layouts
//!
//! A [`LayoutSpec`] is the constant set of geometry and typography for one
//! kind of label: canvas size, where the barcode goes, and where each text
//! field is drawn.
//!
//! ## Built-in Layouts
//!
//! | Name | Canvas | Fields |
//! |------|--------|--------|
//! | `sign` | 70mm x 30mm @ 300 DPI (826 x 354 px) | code, id, wrapped description, leading code |
//! | `square` | 400 x 450 px | code |
//!
//! Custom layouts are JSON files with the same shape as the serialized
//! built-ins (see `signlabel profiles`).

pub mod spec;

pub use spec::{
    BarcodePlacement, BodyField, Canvas, FontFiles, IdField, LayoutSpec, LeadingCodeField,
    TextField,
};
