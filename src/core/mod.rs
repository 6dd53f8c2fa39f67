//! Core analysis pipeline

pub mod analysis;
pub mod analyzer;
pub mod dsp;
pub mod sample;

pub use analysis::{
    aggregate_frames, analyze_ai_generation, analyze_deepfake, analyze_forensics, assess_risk,
    AiGenerationAnalysis, DeepfakeAnalysis, FeatureSet, ForensicsAnalysis, FrameAnalysis,
    VideoAggregate,
};
pub use analyzer::MediaAnalyzer;
pub use sample::{GrayPlane, SampleBuffer, SampleError};
