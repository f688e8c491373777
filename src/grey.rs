//! RGB to luma conversion backed by kornia.

use image::{GrayImage, RgbImage};
use kornia::{
    image::{Image, ImageSize, allocator::CpuAllocator},
    imgproc,
};

use crate::error::KolamError;

type CpuImage<T, const C: usize> = Image<T, C, CpuAllocator>;

/// Converts a colour raster to 8-bit luma.
pub fn to_gray(source: &RgbImage) -> Result<GrayImage, KolamError> {
    let (width, height) = source.dimensions();
    if width == 0 || height == 0 {
        return Ok(GrayImage::new(width, height));
    }

    let size = ImageSize {
        width: width as usize,
        height: height as usize,
    };
    let image = CpuImage::<u8, 3>::new(size, source.as_raw().clone(), CpuAllocator)?;
    let mut gray = CpuImage::<u8, 1>::from_size_val(size, 0u8, CpuAllocator)?;
    imgproc::color::gray_from_rgb_u8(&image, &mut gray)?;

    // Buffer length always matches width * height here.
    Ok(GrayImage::from_raw(width, height, gray.as_slice().to_vec())
        .unwrap_or_else(|| GrayImage::new(width, height)))
}
