// src/core/analysis/deepfake.rs
//
// Per-frame deepfake feature extraction: edge/structural consistency,
// blending artifacts, cross-channel color consistency, and texture
// anomalies, combined into a weighted probability.

use anyhow::Result;
use log::warn;

use crate::config::AnalysisConfig;
use crate::core::dsp::filters::{edge_map, laplacian, local_binary_pattern};
use crate::core::dsp::stats::{clamp01, mean, variance};
use crate::core::sample::SampleBuffer;

/// The four named features feeding the deepfake score, each in [0, 1]
#[derive(Debug, Clone, Default)]
pub struct FeatureSet {
    pub face_consistency: f32,
    pub blending_artifacts: f32,
    pub color_consistency: f32,
    pub texture_anomalies: f32,
}

impl FeatureSet {
    pub fn values(&self) -> [f32; 4] {
        [
            self.face_consistency,
            self.blending_artifacts,
            self.color_consistency,
            self.texture_anomalies,
        ]
    }
}

/// Result of deepfake analysis for one frame
#[derive(Debug, Clone)]
pub struct DeepfakeAnalysis {
    /// Likelihood the frame is a deepfake
    pub probability: f32,
    /// Agreement between the feature values
    pub confidence: f32,
    pub features: FeatureSet,
    /// Set when the analysis degraded to a neutral result
    pub error: Option<String>,
}

impl DeepfakeAnalysis {
    /// Authentic below the 0.5 decision point
    pub fn is_authentic(&self) -> bool {
        self.probability < 0.5
    }

    fn failed(message: String) -> Self {
        Self {
            probability: 0.0,
            confidence: 0.0,
            features: FeatureSet::default(),
            error: Some(message),
        }
    }
}

/// Analyze one frame for deepfake indicators.
///
/// Fails soft into the neutral "authentic" result on any internal failure.
pub fn analyze_deepfake(buffer: &SampleBuffer, config: &AnalysisConfig) -> DeepfakeAnalysis {
    match run_analysis(buffer, config) {
        Ok(analysis) => analysis,
        Err(e) => {
            warn!("deepfake analysis degraded: {e:#}");
            DeepfakeAnalysis::failed(e.to_string())
        }
    }
}

fn run_analysis(buffer: &SampleBuffer, config: &AnalysisConfig) -> Result<DeepfakeAnalysis> {
    let gray = buffer.to_gray();

    // Structural consistency proxy: mean intensity of the fixed-threshold
    // edge map.
    let edges = edge_map(&gray, config.edge_low_threshold, config.edge_high_threshold);
    let face_consistency = clamp01(mean(&edges.data) / 255.0);

    // Sharper-than-natural transitions show up as high Laplacian variance.
    let lap = laplacian(&gray);
    let blending_artifacts = clamp01(variance(&lap.data) / config.laplacian_variance_scale);

    let color_consistency = color_consistency_score(buffer, config);

    // Variance over interior codes only; the map's untouched border would
    // otherwise register as texture on its own.
    let lbp = local_binary_pattern(&gray);
    let mut interior = Vec::with_capacity(gray.width.saturating_sub(2) * gray.height.saturating_sub(2));
    for y in 1..gray.height.saturating_sub(1) {
        for x in 1..gray.width.saturating_sub(1) {
            interior.push(lbp.at(x, y));
        }
    }
    let texture_anomalies = clamp01(variance(&interior) / config.lbp_variance_scale);

    let features = FeatureSet {
        face_consistency,
        blending_artifacts,
        color_consistency,
        texture_anomalies,
    };

    let weights = &config.deepfake_weights;
    let probability = clamp01(
        features.face_consistency * weights.face_consistency
            + features.blending_artifacts * weights.blending_artifacts
            + features.color_consistency * weights.color_consistency
            + features.texture_anomalies * weights.texture_anomalies,
    );
    let confidence = clamp01(1.0 - variance(&features.values()));

    Ok(DeepfakeAnalysis {
        probability,
        confidence,
        features,
        error: None,
    })
}

/// Low cross-channel pixel variance reads as consistent lighting/tone
fn color_consistency_score(buffer: &SampleBuffer, config: &AnalysisConfig) -> f32 {
    let channel_variances: Vec<f32> = (0..3)
        .map(|c| {
            let plane: Vec<f32> = buffer.channel_plane(c).iter().map(|&v| v as f32).collect();
            variance(&plane)
        })
        .collect();

    clamp01(1.0 - clamp01(mean(&channel_variances) / config.color_variance_scale))
}
