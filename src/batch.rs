//! # Batch Rendering
//!
//! Renders one label per row and writes it to `<output_dir>/<id>.png`.
//!
//! The batch is fail-fast: the first row that cannot be rendered or written
//! aborts the run, leaving the files already written in place.

use image::ImageFormat;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::LabelError;
use crate::label::LabelRenderer;
use crate::source::Row;

/// Render every row and return the written file paths, in row order.
pub fn run(
    rows: &[Row],
    renderer: &LabelRenderer,
    output_dir: &Path,
) -> Result<Vec<PathBuf>, LabelError> {
    if !output_dir.is_dir() {
        return Err(LabelError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("output directory {} does not exist", output_dir.display()),
        )));
    }

    let mut written = Vec::with_capacity(rows.len());

    for (index, row) in rows.iter().enumerate() {
        let path = output_dir.join(format!("{}.png", row.id));
        render_one(row, renderer, &path).inspect_err(|e| {
            log::error!("Row {} ({}) failed: {}", index + 1, row.id, e);
        })?;
        log::debug!("Wrote {}", path.display());
        written.push(path);
    }

    log::info!(
        "Wrote {} labels to {} using the {} layout",
        written.len(),
        output_dir.display(),
        renderer.layout().name
    );
    Ok(written)
}

fn render_one(row: &Row, renderer: &LabelRenderer, path: &Path) -> Result<(), LabelError> {
    let image = renderer.render(&row.to_request())?;
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| LabelError::Image(format!("Failed to save {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutSpec;
    use pretty_assertions::assert_eq;

    fn renderer() -> LabelRenderer {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("fonts");
        LabelRenderer::with_font_dir(LayoutSpec::sign(), &dir).unwrap()
    }

    #[test]
    fn test_writes_one_png_per_row() {
        let out = tempfile::tempdir().unwrap();
        let rows = vec![
            Row::new("V000123", "9000555", "PROMO2024 Red widget"),
            Row::new("V000124", "1000556", "Blue widget"),
        ];
        let written = run(&rows, &renderer(), out.path()).unwrap();

        assert_eq!(
            written,
            vec![out.path().join("9000555.png"), out.path().join("1000556.png")]
        );
        let img = image::open(&written[0]).unwrap();
        assert_eq!((img.width(), img.height()), (826, 354));
    }

    #[test]
    fn test_empty_batch() {
        let out = tempfile::tempdir().unwrap();
        assert!(run(&[], &renderer(), out.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_output_directory() {
        let out = tempfile::tempdir().unwrap();
        let missing = out.path().join("nope");
        let rows = vec![Row::new("V1", "1", "")];
        assert!(matches!(
            run(&rows, &renderer(), &missing),
            Err(LabelError::Io(_))
        ));
    }

    #[test]
    fn test_failure_aborts_remaining_rows() {
        let out = tempfile::tempdir().unwrap();
        let rows = vec![
            Row::new("V1", "first", ""),
            Row::new("", "broken", ""),
            Row::new("V3", "never", ""),
        ];
        let result = run(&rows, &renderer(), out.path());

        assert!(matches!(result, Err(LabelError::Barcode(_))));
        assert!(out.path().join("first.png").exists());
        assert!(!out.path().join("never.png").exists());
    }
}
