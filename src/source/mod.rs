//! # Row Sources
//!
//! Where label rows come from:
//!
//! - [`spreadsheet`]: first three columns of the first worksheet
//! - [`purchase_order`]: rows recovered from a PDF purchase order

pub mod purchase_order;
pub mod spreadsheet;

use crate::label::LabelRequest;

/// One input row: code, identifier (file name) and description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub code: String,
    pub id: String,
    pub description: String,
}

impl Row {
    pub fn new(
        code: impl Into<String>,
        id: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            id: id.into(),
            description: description.into(),
        }
    }

    pub fn to_request(&self) -> LabelRequest {
        LabelRequest::new(&self.code, &self.id, &self.description)
    }
}
