//! Quantization of projections to 8-bit grayscale images and PNG output.

use image::{ImageBuffer, Luma};
use ndarray::Array2;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::MipError;

/// 8-bit grayscale raster, row 0 of the projection on top.
pub type RasterImage = ImageBuffer<Luma<u8>, Vec<u8>>;

/// Quantize a projection to 8-bit intensities.
///
/// The caller is expected to have normalized the values to [0, 1]; no
/// normalization happens here. Each value is scaled by 255 and truncated,
/// with values outside the range clamping to 0 or 255 (so 0.5 maps to 127).
/// Array axis 0 becomes image rows and axis 1 becomes columns.
///
/// # Errors
///
/// Returns `Encoding` if the projection contains non-finite values.
pub fn rasterize(projection: &Array2<f64>) -> Result<RasterImage, MipError> {
    if !projection.iter().all(|v| v.is_finite()) {
        return Err(MipError::Encoding(
            "projection contains non-finite values".to_string(),
        ));
    }
    let (rows, cols) = projection.dim();
    let pixels: Vec<u8> = projection
        .rows()
        .into_iter()
        .flat_map(|row| row.into_iter().map(|v| (v * 255.0) as u8).collect::<Vec<u8>>())
        .collect();
    ImageBuffer::from_raw(cols as u32, rows as u32, pixels)
        .ok_or_else(|| MipError::Encoding("raster buffer construction failed".to_string()))
}

/// Write a raster as an 8-bit grayscale PNG with explicit pixel density.
///
/// The dpi value lands in the png pHYs chunk on both axes, converted to
/// pixels per meter.
pub fn save_png(image: &RasterImage, path: &Path, dpi: u32) -> Result<(), MipError> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, image.width(), image.height());
    encoder.set_color(png::ColorType::Grayscale);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: dots_per_meter(dpi),
        yppu: dots_per_meter(dpi),
        unit: png::Unit::Meter,
    }));
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())?;
    Ok(())
}

fn dots_per_meter(dpi: u32) -> u32 {
    (f64::from(dpi) * 1000.0 / 25.4).round() as u32
}
