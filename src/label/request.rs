//! Per-row label input.

/// Identifiers starting with this character are customer-branded signs whose
/// description begins with a code of its own.
pub const LEADING_CODE_MARKER: char = '9';

/// One label to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRequest {
    /// Encoded verbatim into the barcode. Must be non-empty.
    pub primary_code: String,
    /// Printed on the label and used as the output file name.
    pub secondary_id: String,
    /// Free text, split on spaces for wrapping. May be empty.
    pub description: String,
    /// The first description word is a leading code drawn on its own.
    pub prefix_flag: bool,
}

impl LabelRequest {
    /// Build a request, deriving `prefix_flag` from the identifier.
    pub fn new(
        primary_code: impl Into<String>,
        secondary_id: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let secondary_id = secondary_id.into();
        let prefix_flag = secondary_id.starts_with(LEADING_CODE_MARKER);
        Self {
            primary_code: primary_code.into(),
            secondary_id,
            description: description.into(),
            prefix_flag,
        }
    }
}
