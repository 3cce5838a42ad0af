//! Spreadsheet row source.
//!
//! Reads the first worksheet of an `.xlsx`, `.xls`, `.xlsb` or `.ods` file.
//! Columns are positional: A = code, B = identifier, C = description.
//! Anything past column C is ignored.

use calamine::{Data, Range, Reader, open_workbook_auto};
use chrono::NaiveTime;
use std::path::Path;

use super::Row;
use crate::error::LabelError;

/// Read label rows from the first worksheet.
///
/// With `has_header` the first row is skipped.
pub fn read_rows(path: &Path, has_header: bool) -> Result<Vec<Row>, LabelError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| {
        LabelError::Spreadsheet(format!("Failed to open {}: {}", path.display(), e))
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| {
            LabelError::Spreadsheet(format!("{} has no worksheets", path.display()))
        })?
        .map_err(|e| {
            LabelError::Spreadsheet(format!("Failed to read {}: {}", path.display(), e))
        })?;

    let rows = rows_from_range(&range, has_header)?;
    log::info!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Convert a worksheet range to rows.
///
/// Columns are addressed absolutely: calamine trims leading empty columns
/// from the range, so an empty column A still reads as a missing code.
/// Fully blank rows are skipped. A row missing its code or identifier, or
/// holding an error cell, is an error that names its 1-based sheet row.
pub fn rows_from_range(range: &Range<Data>, has_header: bool) -> Result<Vec<Row>, LabelError> {
    let (first_row, first_col) = range
        .start()
        .map(|(row, col)| (row as usize, col as usize))
        .unwrap_or((0, 0));
    let skip = usize::from(has_header);
    let mut rows = Vec::new();

    for (index, cells) in range.rows().enumerate().skip(skip) {
        let sheet_row = first_row + index + 1;
        let column = |col: usize| -> Result<String, LabelError> {
            let Some(cell) = col.checked_sub(first_col).and_then(|i| cells.get(i)) else {
                return Ok(String::new());
            };
            cell_text(cell).map_err(|reason| LabelError::InvalidRow {
                row: sheet_row,
                reason: format!("column {}: {}", COLUMN_NAMES[col], reason),
            })
        };

        let (code, id, description) = (column(0)?, column(1)?, column(2)?);
        if code.trim().is_empty() && id.trim().is_empty() && description.trim().is_empty() {
            log::debug!("Skipping blank row {}", sheet_row);
            continue;
        }
        if code.trim().is_empty() {
            return Err(LabelError::InvalidRow {
                row: sheet_row,
                reason: "missing code in column A".to_string(),
            });
        }
        if id.trim().is_empty() {
            return Err(LabelError::InvalidRow {
                row: sheet_row,
                reason: "missing identifier in column B".to_string(),
            });
        }

        rows.push(Row {
            code,
            id,
            description,
        });
    }

    Ok(rows)
}

const COLUMN_NAMES: [&str; 3] = ["A", "B", "C"];

/// Text of a cell as it reads in the sheet.
///
/// Dates print as `YYYY-MM-DD` (with the time when it is not midnight)
/// rather than as the raw day serial. Formula errors such as `#N/A` are
/// rejected.
fn cell_text(cell: &Data) -> Result<String, String> {
    match cell {
        Data::DateTime(dt) if dt.is_duration() => {
            let secs = dt.as_duration().map(|d| d.num_seconds()).unwrap_or_default();
            Ok(format!("{}:{:02}:{:02}", secs / 3600, secs % 3600 / 60, secs % 60))
        }
        Data::DateTime(dt) => {
            let datetime = dt
                .as_datetime()
                .ok_or_else(|| format!("date serial {} is out of range", dt.as_f64()))?;
            if datetime.time() == NaiveTime::MIN {
                Ok(datetime.format("%Y-%m-%d").to_string())
            } else {
                Ok(datetime.format("%Y-%m-%d %H:%M:%S").to_string())
            }
        }
        Data::Error(e) => Err(format!("cell holds the error {}", e)),
        other => Ok(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{CellErrorType, ExcelDateTime, ExcelDateTimeType};
    use pretty_assertions::assert_eq;

    fn sheet(cells: &[&[Data]]) -> Range<Data> {
        let height = cells.len() as u32;
        let width = cells.iter().map(|r| r.len()).max().unwrap_or(1) as u32;
        let mut range = Range::new((0, 0), (height - 1, width - 1));
        for (r, row) in cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                range.set_value((r as u32, c as u32), cell.clone());
            }
        }
        range
    }

    fn s(v: &str) -> Data {
        Data::String(v.to_string())
    }

    #[test]
    fn test_rows_without_header() {
        let range = sheet(&[
            &[s("V000123"), s("9000555"), s("PROMO2024 Red widget")],
            &[s("V000124"), s("1000556"), s("Blue widget")],
        ]);
        let rows = rows_from_range(&range, false).unwrap();
        assert_eq!(
            rows,
            vec![
                Row::new("V000123", "9000555", "PROMO2024 Red widget"),
                Row::new("V000124", "1000556", "Blue widget"),
            ]
        );
    }

    #[test]
    fn test_header_row_skipped() {
        let range = sheet(&[
            &[s("Variant"), s("Tiger"), s("Description")],
            &[s("V000123"), s("9000555"), s("Red")],
        ]);
        let rows = rows_from_range(&range, true).unwrap();
        assert_eq!(rows, vec![Row::new("V000123", "9000555", "Red")]);
    }

    #[test]
    fn test_numeric_cells_print_plainly() {
        let range = sheet(&[&[s("V1"), Data::Float(9000555.0), Data::Int(7)]]);
        let rows = rows_from_range(&range, false).unwrap();
        assert_eq!(rows, vec![Row::new("V1", "9000555", "7")]);
    }

    #[test]
    fn test_missing_description_is_empty() {
        let range = sheet(&[&[s("V1"), s("100"), Data::Empty]]);
        let rows = rows_from_range(&range, false).unwrap();
        assert_eq!(rows[0].description, "");
    }

    #[test]
    fn test_two_column_sheet() {
        let range = sheet(&[&[s("V1"), s("100")]]);
        let rows = rows_from_range(&range, false).unwrap();
        assert_eq!(rows, vec![Row::new("V1", "100", "")]);
    }

    #[test]
    fn test_blank_rows_skipped() {
        let range = sheet(&[
            &[s("V1"), s("100"), s("a")],
            &[Data::Empty, Data::Empty, Data::Empty],
            &[s("V2"), s("200"), s("b")],
        ]);
        assert_eq!(rows_from_range(&range, false).unwrap().len(), 2);
    }

    #[test]
    fn test_missing_code_reports_sheet_row() {
        let range = sheet(&[
            &[s("Variant"), s("Tiger"), s("Description")],
            &[s("V1"), s("100"), s("a")],
            &[Data::Empty, s("200"), s("b")],
        ]);
        match rows_from_range(&range, true) {
            Err(LabelError::InvalidRow { row, reason }) => {
                assert_eq!(row, 3);
                assert!(reason.contains("code"));
            }
            other => panic!("expected invalid row, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_identifier_is_invalid() {
        let range = sheet(&[&[s("V1"), Data::Empty, s("a")]]);
        assert!(matches!(
            rows_from_range(&range, false),
            Err(LabelError::InvalidRow { row: 1, .. })
        ));
    }

    #[test]
    fn test_empty_column_a_is_missing_code() {
        // calamine starts this range at column B.
        let mut range = Range::new((0, 1), (0, 2));
        range.set_value((0, 1), s("9000555"));
        range.set_value((0, 2), s("PROMO Red"));

        match rows_from_range(&range, false) {
            Err(LabelError::InvalidRow { row, reason }) => {
                assert_eq!(row, 1);
                assert_eq!(reason, "missing code in column A");
            }
            other => panic!("expected invalid row, got {other:?}"),
        }
    }

    #[test]
    fn test_columns_stay_positional_when_range_is_offset() {
        let mut range = Range::new((2, 0), (3, 2));
        range.set_value((2, 0), s("Variant"));
        range.set_value((2, 1), s("Tiger"));
        range.set_value((3, 0), s("V1"));
        range.set_value((3, 1), s("100"));
        range.set_value((3, 2), s("Red"));

        let rows = rows_from_range(&range, true).unwrap();
        assert_eq!(rows, vec![Row::new("V1", "100", "Red")]);
    }

    #[test]
    fn test_date_cells_print_as_dates() {
        let march_21 = ExcelDateTime::new(45372.0, ExcelDateTimeType::DateTime, false);
        let range = sheet(&[&[s("V1"), s("100"), Data::DateTime(march_21)]]);
        let rows = rows_from_range(&range, false).unwrap();
        assert_eq!(rows[0].description, "2024-03-21");
    }

    #[test]
    fn test_error_cell_is_invalid_row() {
        let range = sheet(&[
            &[s("V1"), s("100"), s("a")],
            &[s("V2"), Data::Error(CellErrorType::NA), s("b")],
        ]);
        match rows_from_range(&range, false) {
            Err(LabelError::InvalidRow { row, reason }) => {
                assert_eq!(row, 2);
                assert!(reason.starts_with("column B"), "{reason}");
            }
            other => panic!("expected invalid row, got {other:?}"),
        }
    }

    #[test]
    fn test_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.xlsx");
        std::fs::write(&path, b"not a zip").unwrap();
        assert!(matches!(
            read_rows(&path, false),
            Err(LabelError::Spreadsheet(_))
        ));
    }
}
