use std::io::Cursor;

use anyhow::Context;
use image::{imageops::FilterType, DynamicImage, ImageOutputFormat, RgbImage};
use ndarray::Array4;

use crate::error::ScanError;

/// Decoded image as a `(1, H, W, 3)` float tensor with values in [0, 1],
/// the shape classifier adapters expect.
#[derive(Debug, Clone)]
pub struct ImageTensor {
    pixels: Array4<f32>,
}

impl ImageTensor {
    pub fn pixels(&self) -> &Array4<f32> {
        &self.pixels
    }

    pub fn shape(&self) -> [usize; 4] {
        let s = self.pixels.shape();
        [s[0], s[1], s[2], s[3]]
    }

    /// Flat copy in standard (batch, row, column, channel) layout.
    pub fn to_vec(&self) -> Vec<f32> {
        self.pixels.iter().copied().collect()
    }

    /// Re-encode as PNG for providers that take image uploads rather than
    /// raw tensors.
    pub fn to_png(&self) -> anyhow::Result<Vec<u8>> {
        let [_, height, width, _] = self.shape();
        let mut raw = Vec::with_capacity(height * width * 3);
        for value in self.pixels.iter() {
            raw.push((value * 255.0).round().clamp(0.0, 255.0) as u8);
        }
        let img = RgbImage::from_raw(width as u32, height as u32, raw)
            .context("tensor dimensions do not form an image")?;
        let mut out = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut out), ImageOutputFormat::Png)
            .context("encode png")?;
        Ok(out)
    }
}

/// Decodes raw upload bytes into the classifier input tensor.
#[derive(Debug, Clone, Copy)]
pub struct ImageNormalizer {
    target_size: u32,
}

impl ImageNormalizer {
    pub fn new(target_size: u32) -> Self {
        Self { target_size }
    }

    /// Corrupt bytes or an unsupported format are a terminal client error,
    /// never retried.
    pub fn normalize(&self, bytes: &[u8]) -> Result<ImageTensor, ScanError> {
        let decoded = image::load_from_memory(bytes).map_err(ScanError::DecodeFailure)?;
        let rgb = decoded
            .resize_exact(self.target_size, self.target_size, FilterType::Triangle)
            .to_rgb8();

        let (width, height) = (rgb.width() as usize, rgb.height() as usize);
        let mut pixels = Array4::<f32>::zeros((1, height, width, 3));
        for (x, y, pixel) in rgb.enumerate_pixels() {
            for channel in 0..3 {
                pixels[[0, y as usize, x as usize, channel]] =
                    f32::from(pixel.0[channel]) / 255.0;
            }
        }
        Ok(ImageTensor { pixels })
    }
}

#[cfg(test)]
pub(crate) mod image_tests {
    use super::*;
    use image::Rgb;

    /// A small valid PNG for pipeline tests.
    pub(crate) fn sample_png() -> Vec<u8> {
        let img = RgbImage::from_pixel(32, 24, Rgb([200, 120, 40]));
        let mut out = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut out), ImageOutputFormat::Png)
            .unwrap();
        out
    }

    #[test]
    fn test_normalize_shapes_and_scales() {
        let tensor = ImageNormalizer::new(224).normalize(&sample_png()).unwrap();
        assert_eq!(tensor.shape(), [1, 224, 224, 3]);
        for value in tensor.pixels().iter() {
            assert!((0.0..=1.0).contains(value));
        }
        // Uniform source image stays uniform after resize.
        let first = tensor.pixels()[[0, 0, 0, 0]];
        assert!((first - 200.0 / 255.0).abs() < 0.02);
    }

    #[test]
    fn test_normalize_respects_configured_resolution() {
        let tensor = ImageNormalizer::new(96).normalize(&sample_png()).unwrap();
        assert_eq!(tensor.shape(), [1, 96, 96, 3]);
    }

    #[test]
    fn test_corrupt_bytes_are_a_decode_failure() {
        let err = ImageNormalizer::new(224)
            .normalize(b"definitely not an image")
            .unwrap_err();
        assert!(matches!(err, ScanError::DecodeFailure(_)));
    }

    #[test]
    fn test_tensor_round_trips_through_png() {
        let tensor = ImageNormalizer::new(64).normalize(&sample_png()).unwrap();
        let png = tensor.to_png().unwrap();
        let again = ImageNormalizer::new(64).normalize(&png).unwrap();
        assert_eq!(again.shape(), [1, 64, 64, 3]);
    }
}
