//! PNG loading into chunked image and mask arrays

use std::path::Path;

use ndarray::{Array2, Array3};

use crate::collection::ChunkedArray;
use crate::io::configuration::{IMAGE_AXES, MASK_AXES};
use crate::io::error::{Result, SamplingError};

fn open(path: &Path) -> Result<image::DynamicImage> {
    image::open(path).map_err(|e| SamplingError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load a PNG as a `YXC` image with square chunks of `chunk_size` pixels
///
/// Channels are RGBA scaled to `[0, 1]` and stored as a single chunk along
/// `C`.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened or decoded
/// - `chunk_size` is zero
pub fn load_image(path: &Path, chunk_size: usize) -> Result<ChunkedArray<f32>> {
    let rgba = open(path)?.to_rgba8();
    let (width, height) = (rgba.width() as usize, rgba.height() as usize);
    let mut data = Array3::<f32>::zeros((height, width, 4));

    for (x, y, pixel) in rgba.enumerate_pixels() {
        for c in 0..4 {
            let value = pixel.0.get(c).copied().unwrap_or(0);
            if let Some(slot) = data.get_mut((y as usize, x as usize, c)) {
                *slot = f32::from(value) / 255.0;
            }
        }
    }

    ChunkedArray::new(data.into_dyn(), IMAGE_AXES, &[chunk_size, chunk_size, 4])
}

/// Load a PNG as a `YX` mask, truthy wherever luminance is nonzero
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded, or the image
/// has no pixels
pub fn load_mask(path: &Path) -> Result<ChunkedArray<u8>> {
    let luma = open(path)?.to_luma8();
    let (width, height) = (luma.width() as usize, luma.height() as usize);
    let mut data = Array2::<u8>::zeros((height, width));

    for (x, y, pixel) in luma.enumerate_pixels() {
        let value = pixel.0.first().copied().unwrap_or(0);
        if let Some(slot) = data.get_mut((y as usize, x as usize)) {
            *slot = u8::from(value > 0);
        }
    }

    ChunkedArray::single_chunk(data.into_dyn(), MASK_AXES)
}
