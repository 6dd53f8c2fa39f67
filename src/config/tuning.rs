// src/config/tuning.rs
//
// Tunable weights and thresholds for the analysis pipeline. Defaults
// reproduce the reference heuristics; callers can override any group
// without touching analyzer logic.

use serde::{Deserialize, Serialize};

/// Weights for combining deepfake features into a single probability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeepfakeWeights {
    pub face_consistency: f32,
    pub blending_artifacts: f32,
    pub color_consistency: f32,
    pub texture_anomalies: f32,
}

impl Default for DeepfakeWeights {
    fn default() -> Self {
        Self {
            face_consistency: 0.3,
            blending_artifacts: 0.3,
            color_consistency: 0.2,
            texture_anomalies: 0.2,
        }
    }
}

/// Thresholds above which a forensic sub-score raises an editing indicator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorThresholds {
    /// Error-level analysis score
    pub ela: f32,
    /// Cross-quadrant noise consistency ratio
    pub noise_consistency: f32,
    /// Color-filter-array pattern score
    pub cfa: f32,
    /// Block compression artifact score
    pub block_artifacts: f32,
}

impl Default for IndicatorThresholds {
    fn default() -> Self {
        Self {
            ela: 0.1,
            noise_consistency: 0.3,
            cfa: 0.5,
            block_artifacts: 0.5,
        }
    }
}

/// Risk classification boundaries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// Risk score above which the level is HIGH
    pub high_score: f32,
    /// Risk score above which the level is MEDIUM
    pub medium_score: f32,
    /// Indicator count above which the level is HIGH
    pub high_indicators: usize,
    /// Indicator count above which the level is MEDIUM
    pub medium_indicators: usize,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            high_score: 0.8,
            medium_score: 0.5,
            high_indicators: 3,
            medium_indicators: 1,
        }
    }
}

/// Complete pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub deepfake_weights: DeepfakeWeights,
    pub indicator_thresholds: IndicatorThresholds,
    pub risk_thresholds: RiskThresholds,

    /// Sliding window side for the local entropy map (odd)
    pub entropy_window: usize,
    /// Fixed edge detector thresholds on the 8-bit gradient scale
    pub edge_low_threshold: f32,
    pub edge_high_threshold: f32,

    /// JPEG qualities for the error-level re-encoding round trip
    pub ela_quality_high: u8,
    pub ela_quality_low: u8,

    /// Linear scale divisors for raw variance scores
    pub laplacian_variance_scale: f32,
    pub color_variance_scale: f32,
    pub lbp_variance_scale: f32,
    pub cfa_variance_scale: f32,
    /// Divisor for the local-entropy stddev component
    pub entropy_std_scale: f32,

    /// Block artifact score boundaries for the compression level label
    pub compression_high: f32,
    pub compression_medium: f32,

    /// Upper bound on analyzed video frames
    pub max_frames: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            deepfake_weights: DeepfakeWeights::default(),
            indicator_thresholds: IndicatorThresholds::default(),
            risk_thresholds: RiskThresholds::default(),
            entropy_window: 7,
            edge_low_threshold: 100.0,
            edge_high_threshold: 200.0,
            ela_quality_high: 95,
            ela_quality_low: 75,
            laplacian_variance_scale: 1000.0,
            color_variance_scale: 10000.0,
            lbp_variance_scale: 1000.0,
            cfa_variance_scale: 1000.0,
            entropy_std_scale: 2.0,
            compression_high: 0.7,
            compression_medium: 0.3,
            max_frames: 10,
        }
    }
}
