//! # QR Barcode Encoding
//!
//! Encodes a label's primary code as a QR symbol raster using the qrcode
//! crate: low error correction, the smallest version that fits, 10px
//! modules and a 4-module quiet zone.

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use qrcode::{EcLevel, QrCode};

use crate::error::LabelError;

/// Edge length of one QR module in pixels.
pub const MODULE_SIZE: u32 = 10;

/// Encode `data` as a black-on-white QR raster with quiet zone.
///
/// An empty payload is rejected rather than producing a blank symbol.
pub fn encode_qr(data: &str) -> Result<RgbImage, LabelError> {
    if data.is_empty() {
        return Err(LabelError::Barcode("cannot encode an empty code".to_string()));
    }

    let code = QrCode::with_error_correction_level(data, EcLevel::L)
        .map_err(|e| LabelError::Barcode(format!("QR code generation failed for '{}': {}", data, e)))?;

    Ok(code
        .render::<Rgb<u8>>()
        .quiet_zone(true)
        .module_dimensions(MODULE_SIZE, MODULE_SIZE)
        .build())
}

/// Resize a QR raster to a square of `edge` pixels.
///
/// Nearest-neighbour sampling keeps module edges hard.
pub fn resize_square(image: &RgbImage, edge: u32) -> RgbImage {
    imageops::resize(image, edge, edge, FilterType::Nearest)
}
