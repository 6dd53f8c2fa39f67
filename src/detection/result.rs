//! Report types returned by the analysis pipeline
//!
//! Every type here serializes directly; the CLI's `--json` output is the
//! serde view of `MediaReport`.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Coarse risk classification for an analyzed media item
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn symbol(&self) -> &'static str {
        match self {
            RiskLevel::Low => "✓",
            RiskLevel::Medium => "⚠",
            RiskLevel::High => "✗",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low manipulation risk",
            RiskLevel::Medium => "Possible manipulation",
            RiskLevel::High => "Likely manipulated or synthetic",
        }
    }
}

/// Risk classification with the scores that produced it
#[derive(Debug, Clone, Serialize)]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    pub risk_score: f32,
    pub factors: Vec<String>,
}

/// Compression artifact measurements from the forensics analyzer
#[derive(Debug, Clone, Default, Serialize)]
pub struct CompressionArtifacts {
    /// Discontinuity energy at 8-pixel block boundaries
    pub block_artifacts: f32,
    /// Edge-relative ringing magnitude
    pub ringing_artifacts: f32,
    /// "high" / "medium" / "low" by block artifact thresholds
    pub compression_level: String,
}

/// Authenticity verdict and the signals behind it
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticityAnalysis {
    pub is_authentic: bool,
    pub deepfake_probability: f32,
    pub ai_generated_probability: f32,
    pub editing_indicators: Vec<String>,
    pub compression_artifacts: CompressionArtifacts,
}

/// Media-type specific technical details
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "media_type", rename_all = "snake_case")]
pub enum TechnicalAnalysis {
    Image {
        width: usize,
        height: usize,
        channels: usize,
    },
    Video {
        frames_analyzed: usize,
        frame_width: usize,
        frame_height: usize,
    },
}

/// Per-analyzer and overall confidence values
#[derive(Debug, Clone, Serialize)]
pub struct ConfidenceScores {
    pub overall_confidence: f32,
    pub deepfake_confidence: f32,
    pub ai_generation_confidence: f32,
    pub forensics_confidence: f32,
    /// Only present for video input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporal_consistency: Option<f32>,
}

/// Complete analysis report for one media item
#[derive(Debug, Clone, Serialize)]
pub struct MediaReport {
    pub analysis_id: String,
    pub timestamp: DateTime<Utc>,
    pub authenticity_analysis: AuthenticityAnalysis,
    pub technical_analysis: TechnicalAnalysis,
    pub confidence_scores: ConfidenceScores,
    pub risk_assessment: RiskAssessment,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&RiskLevel::High).unwrap(), "\"HIGH\"");
        assert_eq!(serde_json::to_string(&RiskLevel::Low).unwrap(), "\"LOW\"");
    }

    #[test]
    fn test_risk_level_ordering() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
    }

    #[test]
    fn test_temporal_consistency_omitted_for_images() {
        let scores = ConfidenceScores {
            overall_confidence: 0.5,
            deepfake_confidence: 0.5,
            ai_generation_confidence: 0.5,
            forensics_confidence: 0.5,
            temporal_consistency: None,
        };
        let json = serde_json::to_string(&scores).unwrap();
        assert!(!json.contains("temporal_consistency"));
    }
}
