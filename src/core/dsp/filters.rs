//! Spatial filtering kernels used by the artifact detectors
//!
//! The per-pixel routines (local binary pattern, local entropy) have no
//! cross-pixel dependency, so they run as parallel row maps.

use rayon::prelude::*;

use super::stats::histogram_entropy;
use crate::core::sample::GrayPlane;

/// 5x5 binomial blur, border-clamped
pub fn gaussian_blur(plane: &GrayPlane) -> GrayPlane {
    const KERNEL: [f32; 5] = [1.0, 4.0, 6.0, 4.0, 1.0];
    let (w, h) = (plane.width, plane.height);

    // Horizontal pass
    let mut horizontal = vec![0.0f32; w * h];
    horizontal
        .par_chunks_exact_mut(w)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, out) in row.iter_mut().enumerate() {
                let mut sum = 0.0;
                for (k, &weight) in KERNEL.iter().enumerate() {
                    sum += weight * plane.at_clamped(x as isize + k as isize - 2, y as isize);
                }
                *out = sum / 16.0;
            }
        });

    // Vertical pass
    let blurred = GrayPlane::new(w, h, horizontal);
    let mut vertical = vec![0.0f32; w * h];
    vertical
        .par_chunks_exact_mut(w)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, out) in row.iter_mut().enumerate() {
                let mut sum = 0.0;
                for (k, &weight) in KERNEL.iter().enumerate() {
                    sum += weight * blurred.at_clamped(x as isize, y as isize + k as isize - 2);
                }
                *out = sum / 16.0;
            }
        });

    GrayPlane::new(w, h, vertical)
}

/// 4-neighbor Laplacian, border-clamped
pub fn laplacian(plane: &GrayPlane) -> GrayPlane {
    let (w, h) = (plane.width, plane.height);
    let mut data = vec![0.0f32; w * h];

    data.par_chunks_exact_mut(w)
        .enumerate()
        .for_each(|(y, row)| {
            let y = y as isize;
            for (x, out) in row.iter_mut().enumerate() {
                let x = x as isize;
                *out = plane.at_clamped(x - 1, y)
                    + plane.at_clamped(x + 1, y)
                    + plane.at_clamped(x, y - 1)
                    + plane.at_clamped(x, y + 1)
                    - 4.0 * plane.at_clamped(x, y);
            }
        });

    GrayPlane::new(w, h, data)
}

/// Canny-style binary edge map with fixed double thresholds.
///
/// Gaussian blur, Sobel gradient magnitude, then double thresholding:
/// strong edges (>= high) are kept outright, weak edges (>= low) are kept
/// only when an 8-neighbor is strong. Edge pixels are 255, the rest 0.
pub fn edge_map(plane: &GrayPlane, low: f32, high: f32) -> GrayPlane {
    let (w, h) = (plane.width, plane.height);
    let smoothed = gaussian_blur(plane);

    let mut magnitude = vec![0.0f32; w * h];
    magnitude
        .par_chunks_exact_mut(w)
        .enumerate()
        .for_each(|(y, row)| {
            let y = y as isize;
            for (x, out) in row.iter_mut().enumerate() {
                let x = x as isize;
                let gx = smoothed.at_clamped(x + 1, y - 1)
                    + 2.0 * smoothed.at_clamped(x + 1, y)
                    + smoothed.at_clamped(x + 1, y + 1)
                    - smoothed.at_clamped(x - 1, y - 1)
                    - 2.0 * smoothed.at_clamped(x - 1, y)
                    - smoothed.at_clamped(x - 1, y + 1);
                let gy = smoothed.at_clamped(x - 1, y + 1)
                    + 2.0 * smoothed.at_clamped(x, y + 1)
                    + smoothed.at_clamped(x + 1, y + 1)
                    - smoothed.at_clamped(x - 1, y - 1)
                    - 2.0 * smoothed.at_clamped(x, y - 1)
                    - smoothed.at_clamped(x + 1, y - 1);
                *out = (gx * gx + gy * gy).sqrt();
            }
        });

    let gradient = GrayPlane::new(w, h, magnitude);
    let mut edges = vec![0.0f32; w * h];
    edges
        .par_chunks_exact_mut(w)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, out) in row.iter_mut().enumerate() {
                let g = gradient.at(x, y);
                if g >= high {
                    *out = 255.0;
                } else if g >= low {
                    // Weak edge: keep if connected to a strong neighbor
                    let mut connected = false;
                    for dy in -1isize..=1 {
                        for dx in -1isize..=1 {
                            if gradient.at_clamped(x as isize + dx, y as isize + dy) >= high {
                                connected = true;
                            }
                        }
                    }
                    *out = if connected { 255.0 } else { 0.0 };
                }
            }
        });

    GrayPlane::new(w, h, edges)
}

// 8-neighbor ring at radius 1, fixed packing order
const LBP_OFFSETS: [(isize, isize); 8] = [
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Local binary pattern map (8 neighbors, radius 1).
///
/// Each interior pixel gets an 8-bit code packing neighbor >= center
/// comparisons; border pixels are left at 0.
pub fn local_binary_pattern(plane: &GrayPlane) -> GrayPlane {
    let (w, h) = (plane.width, plane.height);
    let mut codes = vec![0.0f32; w * h];

    codes
        .par_chunks_exact_mut(w)
        .enumerate()
        .for_each(|(y, row)| {
            if y == 0 || y == h - 1 {
                return;
            }
            for x in 1..w.saturating_sub(1) {
                let center = plane.at(x, y);
                let mut code = 0u32;
                for (bit, &(dx, dy)) in LBP_OFFSETS.iter().enumerate() {
                    let neighbor =
                        plane.at((x as isize + dx) as usize, (y as isize + dy) as usize);
                    if neighbor >= center {
                        code |= 1 << bit;
                    }
                }
                row[x] = code as f32;
            }
        });

    GrayPlane::new(w, h, codes)
}

/// Local entropy map over a sliding window with reflected borders.
///
/// Each pixel's value is the Shannon entropy (bits) of the 8-bit histogram
/// of its window neighborhood.
pub fn local_entropy(plane: &GrayPlane, window: usize) -> GrayPlane {
    let (w, h) = (plane.width, plane.height);
    let half = (window / 2) as isize;
    let mut entropy = vec![0.0f32; w * h];

    entropy
        .par_chunks_exact_mut(w)
        .enumerate()
        .for_each(|(y, row)| {
            let mut histogram = [0u32; 256];
            for (x, out) in row.iter_mut().enumerate() {
                histogram.fill(0);
                for dy in -half..=half {
                    for dx in -half..=half {
                        let v = reflect_at(plane, x as isize + dx, y as isize + dy);
                        let bin = (v.clamp(0.0, 255.0)) as usize;
                        histogram[bin] += 1;
                    }
                }
                *out = histogram_entropy(&histogram);
            }
        });

    GrayPlane::new(w, h, entropy)
}

/// Sample with reflected (mirror) border handling
#[inline]
fn reflect_at(plane: &GrayPlane, x: isize, y: isize) -> f32 {
    let reflect = |v: isize, len: isize| -> usize {
        let v = if v < 0 { -v } else { v };
        let v = if v >= len { 2 * (len - 1) - v } else { v };
        v.clamp(0, len - 1) as usize
    };
    plane.at(
        reflect(x, plane.width as isize),
        reflect(y, plane.height as isize),
    )
}

/// Halve resolution: blur then drop every other row/column
pub fn downsample_half(plane: &GrayPlane) -> GrayPlane {
    let smoothed = gaussian_blur(plane);
    let w = (plane.width / 2).max(1);
    let h = (plane.height / 2).max(1);

    let mut data = Vec::with_capacity(w * h);
    for y in 0..h {
        for x in 0..w {
            data.push(smoothed.at(x * 2, y * 2));
        }
    }
    GrayPlane::new(w, h, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_plane(w: usize, h: usize, value: f32) -> GrayPlane {
        GrayPlane::new(w, h, vec![value; w * h])
    }

    #[test]
    fn test_laplacian_flat_is_zero() {
        let lap = laplacian(&flat_plane(8, 8, 120.0));
        assert!(lap.data.iter().all(|&v| v.abs() < 0.001));
    }

    #[test]
    fn test_edge_map_flat_has_no_edges() {
        let edges = edge_map(&flat_plane(16, 16, 60.0), 100.0, 200.0);
        assert!(edges.data.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_edge_map_step_fires() {
        // Hard vertical step should produce strong edges
        let mut data = vec![0.0f32; 16 * 16];
        for y in 0..16 {
            for x in 8..16 {
                data[y * 16 + x] = 255.0;
            }
        }
        let edges = edge_map(&GrayPlane::new(16, 16, data), 100.0, 200.0);
        assert!(edges.data.iter().any(|&v| v == 255.0));
    }

    #[test]
    fn test_lbp_flat_codes() {
        // On a flat plane every neighbor equals center, so all 8 bits set
        let lbp = local_binary_pattern(&flat_plane(6, 6, 42.0));
        assert_eq!(lbp.at(2, 2), 255.0);
        // Border stays zero
        assert_eq!(lbp.at(0, 0), 0.0);
    }

    #[test]
    fn test_local_entropy_flat_is_zero() {
        let ent = local_entropy(&flat_plane(10, 10, 33.0), 7);
        assert!(ent.data.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_downsample_halves_dimensions() {
        let small = downsample_half(&flat_plane(10, 8, 50.0));
        assert_eq!(small.width, 5);
        assert_eq!(small.height, 4);
    }
}
