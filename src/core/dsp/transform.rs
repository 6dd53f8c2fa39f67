//! 2-D frequency transforms over intensity planes
//!
//! The FFT path reuses rustfft with a row pass followed by a column pass.
//! The DCT is a separable orthonormal DCT-II; frames are bounded by the
//! caller so the direct form is acceptable.

use anyhow::{bail, Result};
use num_complex::Complex;
use rayon::prelude::*;
use rustfft::FftPlanner;

use crate::core::sample::GrayPlane;

/// Log-scaled, DC-centered 2-D FFT magnitude spectrum.
///
/// Returns a plane of ln(|F| + 1) values with the zero-frequency bin
/// shifted to the center, matching the usual spectral display convention.
pub fn fft2d_log_magnitude(plane: &GrayPlane) -> Result<GrayPlane> {
    let (w, h) = (plane.width, plane.height);
    if w == 0 || h == 0 {
        bail!("cannot transform an empty plane");
    }

    let mut planner = FftPlanner::<f32>::new();
    let row_fft = planner.plan_fft_forward(w);
    let col_fft = planner.plan_fft_forward(h);

    let mut grid: Vec<Complex<f32>> = plane
        .data
        .iter()
        .map(|&v| Complex::new(v, 0.0))
        .collect();

    // Row pass
    for row in grid.chunks_exact_mut(w) {
        row_fft.process(row);
    }

    // Column pass through a gather/scatter scratch buffer
    let mut column = vec![Complex::new(0.0, 0.0); h];
    for x in 0..w {
        for y in 0..h {
            column[y] = grid[y * w + x];
        }
        col_fft.process(&mut column);
        for y in 0..h {
            grid[y * w + x] = column[y];
        }
    }

    let magnitude: Vec<f32> = grid.iter().map(|c| (c.norm() + 1.0).ln()).collect();

    Ok(fft_shift(&GrayPlane::new(w, h, magnitude)))
}

/// Swap quadrants so the DC bin sits at (width/2, height/2)
fn fft_shift(plane: &GrayPlane) -> GrayPlane {
    let (w, h) = (plane.width, plane.height);
    let (hx, hy) = (w / 2, h / 2);

    let mut shifted = vec![0.0f32; w * h];
    for y in 0..h {
        let sy = (y + hy) % h;
        for x in 0..w {
            let sx = (x + hx) % w;
            shifted[sy * w + sx] = plane.at(x, y);
        }
    }
    GrayPlane::new(w, h, shifted)
}

/// Orthonormal 1-D DCT-II
fn dct_1d(input: &[f32], output: &mut [f32]) {
    let n = input.len();
    let scale0 = (1.0 / n as f32).sqrt();
    let scale = (2.0 / n as f32).sqrt();

    for (k, out) in output.iter_mut().enumerate() {
        let sum: f32 = input
            .iter()
            .enumerate()
            .map(|(i, &v)| v * (std::f32::consts::PI / n as f32 * (i as f32 + 0.5) * k as f32).cos())
            .sum();
        *out = if k == 0 { sum * scale0 } else { sum * scale };
    }
}

/// Separable 2-D orthonormal DCT-II over a float plane
pub fn dct2d(plane: &GrayPlane) -> Result<GrayPlane> {
    let (w, h) = (plane.width, plane.height);
    if w == 0 || h == 0 {
        bail!("cannot transform an empty plane");
    }

    // Row pass
    let mut rows: Vec<f32> = vec![0.0; w * h];
    rows.par_chunks_exact_mut(w)
        .zip(plane.data.par_chunks_exact(w))
        .for_each(|(out, row)| dct_1d(row, out));

    // Column pass via transpose
    let transposed = transpose(&rows, w, h);
    let mut cols: Vec<f32> = vec![0.0; w * h];
    cols.par_chunks_exact_mut(h)
        .zip(transposed.par_chunks_exact(h))
        .for_each(|(out, col)| dct_1d(col, out));

    Ok(GrayPlane::new(w, h, transpose(&cols, h, w)))
}

fn transpose(data: &[f32], width: usize, height: usize) -> Vec<f32> {
    let mut out = vec![0.0f32; data.len()];
    for y in 0..height {
        for x in 0..width {
            out[x * height + y] = data[y * width + x];
        }
    }
    out
}
