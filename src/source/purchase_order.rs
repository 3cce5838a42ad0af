//! Purchase-order row source.
//!
//! Orders arrive as PDF attachments named like `Purchase Order UPD-PO42.pdf`.
//! The order lines are recovered from the plain text of the first page:
//!
//! ```text
//! V000123  PROMO2024 Red widget set    21/03/2024
//! │        │                           │
//! code     description (may wrap)      due date, ends the record
//! ```
//!
//! Text extraction does not keep table rows apart reliably, so records are
//! delimited by their dates rather than by line breaks. Within the text
//! before a date, the record opens at the last item code: a 7-character
//! upper-case token containing at least one digit. A description therefore
//! never runs across another code, and header words such as `DELIVER` or
//! `SUBTOTAL` never qualify.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

use super::Row;
use crate::error::LabelError;

static ATTACHMENT_NAME: OnceLock<Regex> = OnceLock::new();
static DUE_DATE: OnceLock<Regex> = OnceLock::new();
static TOKEN: OnceLock<Regex> = OnceLock::new();

fn attachment_name() -> &'static Regex {
    ATTACHMENT_NAME.get_or_init(|| {
        Regex::new(r"(?i)^purchase[ _-]?order[ _-]+(?P<order>[A-Za-z0-9-]+)\.pdf$")
            .expect("attachment name pattern is valid")
    })
}

fn due_date() -> &'static Regex {
    DUE_DATE.get_or_init(|| {
        Regex::new(r"\b\d{2}/\d{2}/\d{4}\b").expect("due date pattern is valid")
    })
}

fn token() -> &'static Regex {
    TOKEN.get_or_init(|| Regex::new(r"\S+").expect("token pattern is valid"))
}

/// Whether a whitespace-delimited token is an item code.
fn is_item_code(token: &str) -> bool {
    token.len() == 7
        && token.starts_with(|c: char| c.is_ascii_uppercase())
        && token
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        && token.chars().any(|c| c.is_ascii_digit())
}

/// One line of a purchase order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub code: String,
    pub description: String,
    pub due: Option<NaiveDate>,
}

impl OrderLine {
    /// Label row for this line. The code doubles as the file name.
    pub fn to_row(&self) -> Row {
        Row::new(&self.code, &self.code, &self.description)
    }
}

/// Order identifier from a purchase-order attachment name, if it is one.
pub fn order_id_from_filename(filename: &str) -> Option<String> {
    attachment_name()
        .captures(filename.trim())
        .map(|caps| caps["order"].to_string())
}

/// Plain text of the document's first page.
pub fn first_page_text(pdf: &[u8]) -> Result<String, LabelError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(pdf)
        .map_err(|e| LabelError::Document(format!("Failed to extract PDF text: {}", e)))?;
    pages
        .into_iter()
        .next()
        .ok_or_else(|| LabelError::Document("PDF has no pages".to_string()))
}

/// Parse order lines out of page text.
///
/// Each date token closes a record. Text before a date with no item code in
/// it (addresses, totals, the order date) yields nothing. Descriptions
/// spanning several text lines are joined with single spaces.
pub fn parse_lines(text: &str) -> Vec<OrderLine> {
    let mut lines = Vec::new();
    let mut segment_start = 0;

    for date in due_date().find_iter(text) {
        let segment = &text[segment_start..date.start()];
        segment_start = date.end();

        let Some(code) = token()
            .find_iter(segment)
            .filter(|t| is_item_code(t.as_str()))
            .last()
        else {
            continue;
        };
        let due = NaiveDate::parse_from_str(date.as_str(), "%d/%m/%Y").ok();
        if due.is_none() {
            log::warn!(
                "Order line {} has an invalid date '{}'",
                code.as_str(),
                date.as_str()
            );
        }

        lines.push(OrderLine {
            code: code.as_str().to_string(),
            description: segment[code.end()..]
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" "),
            due,
        });
    }

    lines
}

/// Label rows from a purchase-order PDF.
pub fn read_rows(pdf: &[u8]) -> Result<Vec<Row>, LabelError> {
    let text = first_page_text(pdf)?;
    let lines = parse_lines(&text);
    log::info!("Found {} order lines", lines.len());
    Ok(lines.iter().map(OrderLine::to_row).collect())
}
