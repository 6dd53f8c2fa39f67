//! Image-plane DSP utilities
//!
//! Shared building blocks for the analyzers: statistics, 2-D frequency
//! transforms, and spatial filter kernels.

pub mod filters;
pub mod stats;
pub mod transform;
