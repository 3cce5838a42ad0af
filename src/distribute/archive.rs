//! Zip packaging of rendered labels.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::LabelError;

/// Archive file name for an order: `<order-id>_barcodes.zip`.
pub fn archive_name(order_id: &str) -> String {
    format!("{}_barcodes.zip", order_id)
}

/// Write `files` into a zip archive at `dest`, flat, under their file names.
pub fn zip_files(files: &[PathBuf], dest: &Path) -> Result<(), LabelError> {
    let archive_err = |e: zip::result::ZipError| {
        LabelError::Archive(format!("Failed to write {}: {}", dest.display(), e))
    };

    let mut zip = ZipWriter::new(File::create(dest)?);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for file in files {
        let name = file
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                LabelError::Archive(format!("Cannot archive {}: no file name", file.display()))
            })?;
        zip.start_file(name, options).map_err(archive_err)?;
        zip.write_all(&std::fs::read(file)?)?;
    }

    zip.finish().map_err(archive_err)?;
    log::debug!("Packed {} files into {}", files.len(), dest.display());
    Ok(())
}
