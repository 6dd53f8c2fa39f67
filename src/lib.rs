//! MediaCheckr - Heuristic authenticity analysis for images and video frames
//!
//! Estimates the likelihood that a still image or a sampled sequence of
//! video frames is a deepfake, wholly AI-generated, or digitally edited,
//! and folds the signals into an overall confidence and a coarse risk
//! classification.
//!
//! ## Signals
//!
//! - **AI-generation detection**: frequency-domain quadrant symmetry (a
//!   common GAN fingerprint), DCT high-frequency energy ratio, and
//!   color/entropy statistics
//! - **Deepfake features**: edge consistency, blending artifacts, color
//!   consistency, texture anomalies (local binary patterns)
//! - **Image forensics**: error-level analysis, cross-quadrant noise
//!   consistency, color-filter-array pattern variance, compression block
//!   and ringing artifacts
//! - **Video aggregation**: cross-frame means plus a temporal-consistency
//!   measure over up to 10 sampled frames
//!
//! Every analyzer is a pure function of one [`SampleBuffer`] and fails
//! soft: numerical failures degrade the affected result to a neutral
//! zero-confidence value carrying an error marker instead of aborting the
//! pipeline. All probabilities, confidences and risk scores are clamped
//! to [0, 1].
//!
//! The scores are documented heuristics, not validated detectors backed
//! by a trained model; treat them as screening signals.
//!
//! ## Module Structure
//!
//! - `core` - sample buffers, analyzers, DSP utilities, orchestration
//! - `cli` - terminal report rendering
//! - `config` - tunable weights and thresholds
//! - `detection` - serializable result types
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mediacheckr::{MediaAnalyzer, SampleBuffer};
//!
//! let buffer = SampleBuffer::from_rgb(width, height, rgb_bytes)?;
//! let report = MediaAnalyzer::new().analyze_image(&buffer);
//!
//! println!("risk: {:?} ({:.2})",
//!     report.risk_assessment.risk_level,
//!     report.risk_assessment.risk_score);
//! ```

// Core analysis functionality
pub mod core;

// Command-line interface
pub mod cli;

// Configuration and tuning
pub mod config;

// Analysis report types
pub mod detection;

// Re-export commonly used types at crate root for convenience
pub use config::{AnalysisConfig, DeepfakeWeights, IndicatorThresholds, RiskThresholds};
pub use crate::core::{
    aggregate_frames, assess_risk, AiGenerationAnalysis, DeepfakeAnalysis, FeatureSet,
    ForensicsAnalysis, FrameAnalysis, GrayPlane, MediaAnalyzer, SampleBuffer, SampleError,
    VideoAggregate,
};
pub use detection::{
    AuthenticityAnalysis, CompressionArtifacts, ConfidenceScores, MediaReport, RiskAssessment,
    RiskLevel, TechnicalAnalysis,
};
