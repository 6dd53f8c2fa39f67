//! Forensic analysis algorithms
//!
//! Contains the per-frame signal analyzers and the cross-frame logic:
//! - AI-generation detection (spectral symmetry, DCT energy, statistics)
//! - Deepfake feature extraction (edges, blending, color, texture)
//! - Image forensics (ELA, noise consistency, CFA, compression artifacts)
//! - Frame aggregation and temporal consistency
//! - Risk assessment

mod aggregate;
mod ai_generation;
mod deepfake;
mod forensics;
mod risk;

pub use aggregate::{aggregate_frames, FrameAnalysis, VideoAggregate};
pub use ai_generation::{analyze_ai_generation, AiGenerationAnalysis};
pub use deepfake::{analyze_deepfake, DeepfakeAnalysis, FeatureSet};
pub use forensics::{analyze_forensics, ForensicsAnalysis};
pub use risk::assess_risk;
