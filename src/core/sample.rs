// src/core/sample.rs
//
// Decoded frame buffer used by every analyzer. One SampleBuffer holds a
// single image or video frame as an 8-bit RGB grid.

use thiserror::Error;

/// Errors raised while validating or constructing a sample buffer
#[derive(Debug, Error)]
pub enum SampleError {
    #[error("buffer has zero width or height ({width}x{height})")]
    EmptyBuffer { width: usize, height: usize },
    #[error("pixel data length {actual} does not match {width}x{height}x3 = {expected}")]
    LengthMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },
}

/// A decoded 8-bit RGB frame.
///
/// Row-major, interleaved R,G,B. Immutable once constructed; analyzers
/// derive transformed copies rather than mutating in place.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl SampleBuffer {
    /// Construct from interleaved RGB data, validating dimensions
    pub fn from_rgb(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self, SampleError> {
        if width == 0 || height == 0 {
            return Err(SampleError::EmptyBuffer { width, height });
        }
        let expected = width * height * 3;
        if pixels.len() != expected {
            return Err(SampleError::LengthMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Construct a constant-intensity buffer (mainly useful in tests)
    pub fn flat(width: usize, height: usize, rgb: [u8; 3]) -> Result<Self, SampleError> {
        let mut pixels = Vec::with_capacity(width * height * 3);
        for _ in 0..width * height {
            pixels.extend_from_slice(&rgb);
        }
        Self::from_rgb(width, height, pixels)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Interleaved RGB bytes, row-major
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Value of one channel at (x, y); channel 0=R, 1=G, 2=B
    #[inline]
    pub fn channel_at(&self, x: usize, y: usize, channel: usize) -> u8 {
        self.pixels[(y * self.width + x) * 3 + channel]
    }

    /// Extract a single channel as a row-major plane
    pub fn channel_plane(&self, channel: usize) -> Vec<u8> {
        self.pixels
            .chunks_exact(3)
            .map(|px| px[channel])
            .collect()
    }

    /// Convert to single-channel intensity (ITU-R BT.601 luma weights)
    pub fn to_gray(&self) -> GrayPlane {
        let data: Vec<f32> = self
            .pixels
            .chunks_exact(3)
            .map(|px| 0.299 * px[0] as f32 + 0.587 * px[1] as f32 + 0.114 * px[2] as f32)
            .collect();
        GrayPlane {
            width: self.width,
            height: self.height,
            data,
        }
    }
}

/// Single-channel float plane derived from a SampleBuffer.
///
/// Intensities stay on the 8-bit scale (0.0..=255.0) so that thresholds
/// expressed against 8-bit values apply directly.
#[derive(Debug, Clone)]
pub struct GrayPlane {
    pub width: usize,
    pub height: usize,
    pub data: Vec<f32>,
}

impl GrayPlane {
    pub fn new(width: usize, height: usize, data: Vec<f32>) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            width,
            height,
            data,
        }
    }

    #[inline]
    pub fn at(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    /// Sample with coordinates clamped to the plane bounds
    #[inline]
    pub fn at_clamped(&self, x: isize, y: isize) -> f32 {
        let x = x.clamp(0, self.width as isize - 1) as usize;
        let y = y.clamp(0, self.height as isize - 1) as usize;
        self.at(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_dimensions() {
        assert!(matches!(
            SampleBuffer::from_rgb(0, 4, vec![]),
            Err(SampleError::EmptyBuffer { .. })
        ));
    }

    #[test]
    fn test_rejects_length_mismatch() {
        assert!(matches!(
            SampleBuffer::from_rgb(2, 2, vec![0; 11]),
            Err(SampleError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_gray_conversion_weights() {
        let buf = SampleBuffer::from_rgb(1, 1, vec![255, 0, 0]).unwrap();
        let gray = buf.to_gray();
        assert!((gray.at(0, 0) - 0.299 * 255.0).abs() < 0.001);
    }

    #[test]
    fn test_channel_plane() {
        let buf = SampleBuffer::from_rgb(2, 1, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(buf.channel_plane(1), vec![2, 5]);
        assert_eq!(buf.channel_at(1, 0, 2), 6);
    }
}
