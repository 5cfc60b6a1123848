use std::path::Path;

use image::{ImageFormat, RgbImage};
use ndarray::Array3;

use crate::consts::COLOR_CHANNEL_COUNT;
use crate::error::{Result, SkydiskError};
use crate::frame::Frame;

/// Load any image file as an 8-bit RGB frame.
///
/// A file that is missing or cannot be decoded is reported as
/// [`SkydiskError::MissingInput`], carrying the decoder error as its source.
pub fn load_rgb(path: &Path) -> Result<Frame> {
    let img = image::open(path).map_err(|source| SkydiskError::MissingInput {
        path: path.to_path_buf(),
        source,
    })?;
    Frame::new(rgb_to_array(img.into_rgb8()))
}

/// Convert a decoded `RgbImage` into frame layout.
pub fn rgb_to_array(img: RgbImage) -> Array3<u8> {
    let (w, h) = img.dimensions();
    Array3::from_shape_vec((h as usize, w as usize, COLOR_CHANNEL_COUNT), img.into_raw())
        .expect("RgbImage buffer is h*w*3")
}

/// Convert a frame into an `RgbImage`.
pub fn frame_to_rgb(frame: &Frame) -> RgbImage {
    let (h, w) = (frame.height(), frame.width());
    let mut img = RgbImage::new(w as u32, h as u32);
    for (x, y, px) in img.enumerate_pixels_mut() {
        px.0 = frame.pixel(y as usize, x as usize);
    }
    img
}

/// Save a frame as 8-bit RGB, choosing the format from the file extension
/// (PNG when the extension is missing or unknown).
pub fn save_rgb(frame: &Frame, path: &Path) -> Result<()> {
    frame.ensure_rgb()?;
    let img = frame_to_rgb(frame);
    match ImageFormat::from_path(path) {
        Ok(format) => img.save_with_format(path, format)?,
        Err(_) => img.save_with_format(path, ImageFormat::Png)?,
    }
    Ok(())
}
