// src/core/analysis/ai_generation.rs
//
// AI-generation detection combining three heuristic signals:
// frequency-domain symmetry (GAN artifacts), DCT high-frequency energy,
// and color/entropy statistics. These are reproduced scoring heuristics,
// not validated detectors backed by a trained model.

use anyhow::{bail, Result};
use log::warn;

use crate::config::AnalysisConfig;
use crate::core::dsp::stats::{clamp01, mean, stddev, variance};
use crate::core::dsp::transform::{dct2d, fft2d_log_magnitude};
use crate::core::dsp::filters::local_entropy;
use crate::core::sample::{GrayPlane, SampleBuffer};

/// Result of AI-generation analysis for one frame
#[derive(Debug, Clone)]
pub struct AiGenerationAnalysis {
    /// Likelihood the frame is wholly AI-generated
    pub probability: f32,
    /// Agreement between the three method scores
    pub confidence: f32,
    /// Frequency-domain quadrant symmetry score
    pub gan_artifacts: f32,
    /// DCT high-frequency energy ratio
    pub frequency_score: f32,
    /// Color spread + local entropy spread score
    pub statistical_score: f32,
    /// Set when the analysis degraded to a neutral result
    pub error: Option<String>,
}

impl AiGenerationAnalysis {
    fn failed(message: String) -> Self {
        Self {
            probability: 0.0,
            confidence: 0.0,
            gan_artifacts: 0.0,
            frequency_score: 0.0,
            statistical_score: 0.0,
            error: Some(message),
        }
    }
}

/// Analyze one frame for AI-generation indicators.
///
/// Fails soft: any internal numerical failure yields a zero-probability,
/// zero-confidence result with the error recorded, never a panic or Err.
pub fn analyze_ai_generation(buffer: &SampleBuffer, config: &AnalysisConfig) -> AiGenerationAnalysis {
    match run_analysis(buffer, config) {
        Ok(analysis) => analysis,
        Err(e) => {
            warn!("AI-generation analysis degraded: {e:#}");
            AiGenerationAnalysis::failed(e.to_string())
        }
    }
}

fn run_analysis(buffer: &SampleBuffer, config: &AnalysisConfig) -> Result<AiGenerationAnalysis> {
    let gray = buffer.to_gray();

    let gan_artifacts = spectral_symmetry_score(&gray)?;
    let frequency_score = high_frequency_ratio(&gray)?;
    let statistical_score = statistical_score(buffer, &gray, config);

    let scores = [gan_artifacts, frequency_score, statistical_score];
    let probability = clamp01(mean(&scores));
    let confidence = clamp01(1.0 - 2.0 * variance(&scores));

    Ok(AiGenerationAnalysis {
        probability,
        confidence,
        gan_artifacts,
        frequency_score,
        statistical_score,
        error: None,
    })
}

/// Quadrant asymmetry of the centered log-magnitude spectrum.
///
/// Generative models tend to leave symmetry anomalies in the frequency
/// domain; the score compares diagonal quadrant pair means normalized by
/// the overall spectral mean.
fn spectral_symmetry_score(gray: &GrayPlane) -> Result<f32> {
    let spectrum = fft2d_log_magnitude(gray)?;
    let overall = mean(&spectrum.data);
    if overall <= f32::EPSILON {
        bail!("degenerate spectrum: zero mean magnitude");
    }

    let (cx, cy) = (spectrum.width / 2, spectrum.height / 2);
    let q_bottom_right = quadrant_mean(&spectrum, cx..spectrum.width, cy..spectrum.height);
    let q_bottom_left = quadrant_mean(&spectrum, 0..cx, cy..spectrum.height);
    let q_top_left = quadrant_mean(&spectrum, 0..cx, 0..cy);
    let q_top_right = quadrant_mean(&spectrum, cx..spectrum.width, 0..cy);

    let symmetry = ((q_bottom_right - q_bottom_left).abs() + (q_top_left - q_top_right).abs())
        / (2.0 * overall);

    Ok(clamp01(symmetry))
}

fn quadrant_mean(
    plane: &GrayPlane,
    xs: std::ops::Range<usize>,
    ys: std::ops::Range<usize>,
) -> f32 {
    let count = xs.len() * ys.len();
    if count == 0 {
        return 0.0;
    }
    let mut sum = 0.0;
    for y in ys {
        for x in xs.clone() {
            sum += plane.at(x, y);
        }
    }
    sum / count as f32
}

/// Ratio of DCT energy in the high-frequency (bottom-right) quadrant
fn high_frequency_ratio(gray: &GrayPlane) -> Result<f32> {
    let normalized = GrayPlane::new(
        gray.width,
        gray.height,
        gray.data.iter().map(|&v| v / 255.0).collect(),
    );
    let dct = dct2d(&normalized)?;

    let total: f32 = dct.data.iter().map(|&v| v * v).sum();
    if total <= f32::EPSILON {
        return Ok(0.0);
    }

    let (cx, cy) = (dct.width / 2, dct.height / 2);
    let mut high = 0.0f32;
    for y in cy..dct.height {
        for x in cx..dct.width {
            high += dct.at(x, y) * dct.at(x, y);
        }
    }

    Ok(clamp01(high / total))
}

/// Color spread combined with local-entropy spread.
///
/// AI-generated frames often show flattened color variance and an unusual
/// entropy distribution compared to camera output.
fn statistical_score(buffer: &SampleBuffer, gray: &GrayPlane, config: &AnalysisConfig) -> f32 {
    let channel_stddevs: Vec<f32> = (0..3)
        .map(|c| {
            let plane: Vec<f32> = buffer.channel_plane(c).iter().map(|&v| v as f32).collect();
            stddev(&plane)
        })
        .collect();
    let color_spread = mean(&channel_stddevs) / 255.0;

    let entropy_map = local_entropy(gray, config.entropy_window);
    let entropy_spread = clamp01(stddev(&entropy_map.data) / config.entropy_std_scale);

    (color_spread + entropy_spread) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_buffer_scores_in_range() {
        let buffer = SampleBuffer::flat(32, 32, [128, 128, 128]).unwrap();
        let analysis = analyze_ai_generation(&buffer, &AnalysisConfig::default());

        assert!((0.0..=1.0).contains(&analysis.probability));
        assert!((0.0..=1.0).contains(&analysis.confidence));
        assert!((0.0..=1.0).contains(&analysis.gan_artifacts));
        assert!((0.0..=1.0).contains(&analysis.frequency_score));
        assert!((0.0..=1.0).contains(&analysis.statistical_score));
    }

    #[test]
    fn test_zero_buffer_fails_soft() {
        // An all-black frame has a degenerate spectrum; the analyzer must
        // degrade to a neutral result instead of erroring out.
        let buffer = SampleBuffer::flat(16, 16, [0, 0, 0]).unwrap();
        let analysis = analyze_ai_generation(&buffer, &AnalysisConfig::default());

        assert_eq!(analysis.probability, 0.0);
        assert_eq!(analysis.confidence, 0.0);
        assert!(analysis.error.is_some());
    }

    #[test]
    fn test_flat_buffer_has_low_statistical_spread() {
        let buffer = SampleBuffer::flat(24, 24, [90, 90, 90]).unwrap();
        let gray = buffer.to_gray();
        let score = statistical_score(&buffer, &gray, &AnalysisConfig::default());
        assert!(score < 0.01);
    }

    #[test]
    fn test_agreeing_scores_yield_high_confidence() {
        // Identical sub-scores have zero variance, so confidence is 1.0
        let scores = [0.4f32, 0.4, 0.4];
        let confidence = clamp01(1.0 - 2.0 * variance(&scores));
        assert!((confidence - 1.0).abs() < 0.001);
    }
}
