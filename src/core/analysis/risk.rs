// src/core/analysis/risk.rs
//
// Maps aggregated probabilities and indicator counts to a coarse risk
// classification with human-readable factors.

use crate::config::RiskThresholds;
use crate::core::dsp::stats::clamp01;
use crate::detection::{RiskAssessment, RiskLevel};

/// Classify overall manipulation risk.
///
/// The score is the mean of the deepfake and AI-generation probabilities;
/// the level escalates on either a high score or a high indicator count.
pub fn assess_risk(
    deepfake_probability: f32,
    ai_probability: f32,
    indicator_count: usize,
    thresholds: &RiskThresholds,
) -> RiskAssessment {
    let risk_score = clamp01((deepfake_probability + ai_probability) / 2.0);

    let risk_level = if risk_score > thresholds.high_score || indicator_count > thresholds.high_indicators
    {
        RiskLevel::High
    } else if risk_score > thresholds.medium_score
        || indicator_count > thresholds.medium_indicators
    {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    let factors = vec![
        format!("Deepfake probability: {deepfake_probability:.2}"),
        format!("AI generation probability: {ai_probability:.2}"),
        format!("Editing indicators found: {indicator_count}"),
    ];

    RiskAssessment {
        risk_level,
        risk_score,
        factors,
    }
}
