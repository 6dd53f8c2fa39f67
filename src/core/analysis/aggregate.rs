// src/core/analysis/aggregate.rs
//
// Combines per-frame analyzer outputs into a single verdict. Aggregation
// is order-independent: values are put into a canonical order before any
// floating-point reduction, so permuting the input frames yields a
// bit-identical aggregate.

use crate::core::analysis::ai_generation::AiGenerationAnalysis;
use crate::core::analysis::deepfake::DeepfakeAnalysis;
use crate::core::analysis::forensics::ForensicsAnalysis;
use crate::core::dsp::stats::clamp01;

/// All three analyzer results for a single frame
#[derive(Debug, Clone)]
pub struct FrameAnalysis {
    pub deepfake: DeepfakeAnalysis,
    pub ai_generation: AiGenerationAnalysis,
    pub forensics: ForensicsAnalysis,
}

impl FrameAnalysis {
    /// Mean of the three analyzer confidences
    pub fn confidence(&self) -> f32 {
        (self.deepfake.confidence + self.ai_generation.confidence + self.forensics.confidence)
            / 3.0
    }
}

/// Cross-frame aggregate for a sampled video clip
#[derive(Debug, Clone)]
pub struct VideoAggregate {
    pub is_authentic: bool,
    pub deepfake_probability: f32,
    pub ai_generated_probability: f32,
    /// Deduplicated union of per-frame indicators, canonically ordered
    pub editing_indicators: Vec<String>,
    pub overall_confidence: f32,
    pub deepfake_confidence: f32,
    pub ai_generation_confidence: f32,
    pub forensics_confidence: f32,
    /// 1 − min(variance of per-frame deepfake probability, 1)
    pub temporal_consistency: f32,
    pub frames_analyzed: usize,
}

impl VideoAggregate {
    /// Aggregate for a clip that yielded no analyzable frames
    fn empty() -> Self {
        Self {
            is_authentic: true,
            deepfake_probability: 0.0,
            ai_generated_probability: 0.0,
            editing_indicators: Vec::new(),
            overall_confidence: 0.0,
            deepfake_confidence: 0.0,
            ai_generation_confidence: 0.0,
            forensics_confidence: 0.0,
            temporal_consistency: 0.0,
            frames_analyzed: 0,
        }
    }
}

/// Combine per-frame analyses into one clip-level verdict
pub fn aggregate_frames(frames: &[FrameAnalysis]) -> VideoAggregate {
    if frames.is_empty() {
        return VideoAggregate::empty();
    }

    let deepfake_probs: Vec<f32> = frames.iter().map(|f| f.deepfake.probability).collect();
    let ai_probs: Vec<f32> = frames.iter().map(|f| f.ai_generation.probability).collect();

    let avg_deepfake = ordered_mean(&deepfake_probs);
    let avg_ai = ordered_mean(&ai_probs);
    let overall_confidence =
        ordered_mean(&frames.iter().map(|f| f.confidence()).collect::<Vec<_>>());

    let temporal_consistency = 1.0 - ordered_variance(&deepfake_probs).min(1.0);

    let mut editing_indicators: Vec<String> = Vec::new();
    for frame in frames {
        for indicator in &frame.forensics.editing_indicators {
            if !editing_indicators.contains(indicator) {
                editing_indicators.push(indicator.clone());
            }
        }
    }
    editing_indicators.sort();

    VideoAggregate {
        is_authentic: avg_deepfake < 0.5 && avg_ai < 0.5,
        deepfake_probability: clamp01(avg_deepfake),
        ai_generated_probability: clamp01(avg_ai),
        editing_indicators,
        overall_confidence: clamp01(overall_confidence),
        deepfake_confidence: clamp01(ordered_mean(
            &frames.iter().map(|f| f.deepfake.confidence).collect::<Vec<_>>(),
        )),
        ai_generation_confidence: clamp01(ordered_mean(
            &frames.iter().map(|f| f.ai_generation.confidence).collect::<Vec<_>>(),
        )),
        forensics_confidence: clamp01(ordered_mean(
            &frames.iter().map(|f| f.forensics.confidence).collect::<Vec<_>>(),
        )),
        temporal_consistency: clamp01(temporal_consistency),
        frames_analyzed: frames.len(),
    }
}

/// Mean over a canonically sorted copy, making the reduction independent
/// of input order down to the last bit
fn ordered_mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f32::total_cmp);
    sorted.iter().sum::<f32>() / sorted.len() as f32
}

/// Population variance over a canonically sorted copy
fn ordered_variance(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let m = ordered_mean(values);
    let mut squares: Vec<f32> = values.iter().map(|&v| (v - m) * (v - m)).collect();
    squares.sort_by(f32::total_cmp);
    squares.iter().sum::<f32>() / squares.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::analysis::deepfake::FeatureSet;
    use crate::detection::CompressionArtifacts;

    fn frame(deepfake_prob: f32, ai_prob: f32, indicators: &[&str]) -> FrameAnalysis {
        FrameAnalysis {
            deepfake: DeepfakeAnalysis {
                probability: deepfake_prob,
                confidence: 0.8,
                features: FeatureSet::default(),
                error: None,
            },
            ai_generation: AiGenerationAnalysis {
                probability: ai_prob,
                confidence: 0.6,
                gan_artifacts: 0.0,
                frequency_score: 0.0,
                statistical_score: 0.0,
                error: None,
            },
            forensics: ForensicsAnalysis {
                is_authentic: indicators.is_empty(),
                editing_indicators: indicators.iter().map(|s| s.to_string()).collect(),
                compression: CompressionArtifacts::default(),
                ela_score: 0.0,
                noise_consistency: 0.0,
                average_noise_level: 0.0,
                cfa_score: 0.0,
                confidence: 0.7,
                error: None,
            },
        }
    }

    #[test]
    fn test_empty_clip_defaults() {
        let agg = aggregate_frames(&[]);
        assert!(agg.is_authentic);
        assert_eq!(agg.deepfake_probability, 0.0);
        assert_eq!(agg.ai_generated_probability, 0.0);
        assert_eq!(agg.overall_confidence, 0.0);
        assert_eq!(agg.temporal_consistency, 0.0);
        assert_eq!(agg.frames_analyzed, 0);
        assert!(agg.editing_indicators.is_empty());
    }

    #[test]
    fn test_constant_probability_gives_full_temporal_consistency() {
        let frames: Vec<FrameAnalysis> = (0..5).map(|_| frame(0.9, 0.2, &[])).collect();
        let agg = aggregate_frames(&frames);
        assert_eq!(agg.temporal_consistency, 1.0);
        assert!((agg.deepfake_probability - 0.9).abs() < 0.001);
        assert_eq!(agg.frames_analyzed, 5);
    }

    #[test]
    fn test_authenticity_needs_both_probabilities_low() {
        let fake = aggregate_frames(&[frame(0.8, 0.1, &[])]);
        assert!(!fake.is_authentic);

        let synthetic = aggregate_frames(&[frame(0.1, 0.8, &[])]);
        assert!(!synthetic.is_authentic);

        let clean = aggregate_frames(&[frame(0.1, 0.1, &[])]);
        assert!(clean.is_authentic);
    }

    #[test]
    fn test_indicator_union_deduplicates() {
        let frames = vec![
            frame(0.1, 0.1, &["Inconsistent noise patterns"]),
            frame(0.1, 0.1, &["Heavy compression artifacts", "Inconsistent noise patterns"]),
        ];
        let agg = aggregate_frames(&frames);
        assert_eq!(agg.editing_indicators.len(), 2);
    }

    #[test]
    fn test_order_independence_is_bitwise() {
        let frames = vec![
            frame(0.13, 0.71, &["Inconsistent noise patterns"]),
            frame(0.57, 0.02, &[]),
            frame(0.31, 0.44, &["Heavy compression artifacts"]),
            frame(0.90, 0.16, &[]),
        ];
        let mut reversed = frames.clone();
        reversed.reverse();
        let mut rotated = frames.clone();
        rotated.rotate_left(2);

        let a = aggregate_frames(&frames);
        let b = aggregate_frames(&reversed);
        let c = aggregate_frames(&rotated);

        for other in [&b, &c] {
            assert_eq!(a.deepfake_probability.to_bits(), other.deepfake_probability.to_bits());
            assert_eq!(
                a.ai_generated_probability.to_bits(),
                other.ai_generated_probability.to_bits()
            );
            assert_eq!(a.overall_confidence.to_bits(), other.overall_confidence.to_bits());
            assert_eq!(a.temporal_consistency.to_bits(), other.temporal_consistency.to_bits());
            assert_eq!(a.editing_indicators, other.editing_indicators);
            assert_eq!(a.is_authentic, other.is_authentic);
        }
    }
}
