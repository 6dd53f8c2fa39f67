// src/core/analyzer.rs
//
// Pipeline orchestration. The three analyzers are pure functions of one
// frame, so per-frame work and per-clip frame work both fan out on the
// rayon pool; aggregation does not depend on completion order.

use chrono::Utc;
use log::debug;
use rayon::prelude::*;
use uuid::Uuid;

use crate::config::AnalysisConfig;
use crate::core::analysis::{
    aggregate_frames, analyze_ai_generation, analyze_deepfake, analyze_forensics, assess_risk,
    FrameAnalysis,
};
use crate::core::sample::SampleBuffer;
use crate::detection::{
    AuthenticityAnalysis, ConfidenceScores, MediaReport, TechnicalAnalysis,
};

/// Entry point for running the full pipeline on decoded frames
#[derive(Debug, Clone, Default)]
pub struct MediaAnalyzer {
    config: AnalysisConfig,
}

impl MediaAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run all three analyzers on one frame
    pub fn analyze_frame(&self, buffer: &SampleBuffer) -> FrameAnalysis {
        let ((deepfake, ai_generation), forensics) = rayon::join(
            || {
                rayon::join(
                    || analyze_deepfake(buffer, &self.config),
                    || analyze_ai_generation(buffer, &self.config),
                )
            },
            || analyze_forensics(buffer, &self.config),
        );

        FrameAnalysis {
            deepfake,
            ai_generation,
            forensics,
        }
    }

    /// Analyze a single still image
    pub fn analyze_image(&self, buffer: &SampleBuffer) -> MediaReport {
        debug!("analyzing image {}x{}", buffer.width(), buffer.height());
        let frame = self.analyze_frame(buffer);

        let indicator_count = frame.forensics.editing_indicators.len();
        let risk_assessment = assess_risk(
            frame.deepfake.probability,
            frame.ai_generation.probability,
            indicator_count,
            &self.config.risk_thresholds,
        );

        MediaReport {
            analysis_id: new_analysis_id(),
            timestamp: Utc::now(),
            authenticity_analysis: AuthenticityAnalysis {
                is_authentic: frame.deepfake.is_authentic(),
                deepfake_probability: frame.deepfake.probability,
                ai_generated_probability: frame.ai_generation.probability,
                editing_indicators: frame.forensics.editing_indicators.clone(),
                compression_artifacts: frame.forensics.compression.clone(),
            },
            technical_analysis: TechnicalAnalysis::Image {
                width: buffer.width(),
                height: buffer.height(),
                channels: 3,
            },
            confidence_scores: ConfidenceScores {
                overall_confidence: frame.confidence(),
                deepfake_confidence: frame.deepfake.confidence,
                ai_generation_confidence: frame.ai_generation.confidence,
                forensics_confidence: frame.forensics.confidence,
                temporal_consistency: None,
            },
            risk_assessment,
        }
    }

    /// Analyze an ordered sequence of sampled video frames.
    ///
    /// At most `max_frames` frames are analyzed; an empty sequence yields
    /// the neutral all-zero, authentic aggregate.
    pub fn analyze_video(&self, frames: &[SampleBuffer]) -> MediaReport {
        let bounded = &frames[..frames.len().min(self.config.max_frames)];
        debug!(
            "analyzing clip: {} of {} supplied frames",
            bounded.len(),
            frames.len()
        );

        let analyses: Vec<FrameAnalysis> = bounded
            .par_iter()
            .map(|frame| self.analyze_frame(frame))
            .collect();

        let aggregate = aggregate_frames(&analyses);
        let risk_assessment = assess_risk(
            aggregate.deepfake_probability,
            aggregate.ai_generated_probability,
            aggregate.editing_indicators.len(),
            &self.config.risk_thresholds,
        );

        let (frame_width, frame_height) = bounded
            .first()
            .map(|f| (f.width(), f.height()))
            .unwrap_or((0, 0));

        MediaReport {
            analysis_id: new_analysis_id(),
            timestamp: Utc::now(),
            authenticity_analysis: AuthenticityAnalysis {
                is_authentic: aggregate.is_authentic,
                deepfake_probability: aggregate.deepfake_probability,
                ai_generated_probability: aggregate.ai_generated_probability,
                editing_indicators: aggregate.editing_indicators.clone(),
                compression_artifacts: analyses
                    .first()
                    .map(|f| f.forensics.compression.clone())
                    .unwrap_or_default(),
            },
            technical_analysis: TechnicalAnalysis::Video {
                frames_analyzed: aggregate.frames_analyzed,
                frame_width,
                frame_height,
            },
            confidence_scores: ConfidenceScores {
                overall_confidence: aggregate.overall_confidence,
                deepfake_confidence: aggregate.deepfake_confidence,
                ai_generation_confidence: aggregate.ai_generation_confidence,
                forensics_confidence: aggregate.forensics_confidence,
                temporal_consistency: Some(aggregate.temporal_consistency),
            },
            risk_assessment,
        }
    }
}

fn new_analysis_id() -> String {
    format!("analysis_{}", Uuid::new_v4().simple())
}
