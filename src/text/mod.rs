//! # Text Layout
//!
//! Word wrapping and TTF font handling for label text.
//!
//! - [`wrap`]: greedy line filling against a pixel budget
//! - [`font`]: font loading, measurement and rasterization

pub mod font;
pub mod wrap;

pub use font::{FontFace, FontSet, LabelFont};
pub use wrap::{split_words, wrap};
