// tests/pipeline_test.rs
//
// End-to-end pipeline properties over synthetic frames: score ranges,
// degenerate inputs, aggregation order-independence, risk thresholds,
// and fail-soft behavior.

use mediacheckr::{
    aggregate_frames, assess_risk, MediaAnalyzer, RiskLevel, RiskThresholds, SampleBuffer,
    TechnicalAnalysis,
};

/// Deterministic pseudo-noise frame
fn noise_buffer(width: usize, height: usize, seed: u32) -> SampleBuffer {
    let mut state = seed.wrapping_mul(0x9e3779b9) | 1;
    let mut pixels = Vec::with_capacity(width * height * 3);
    for _ in 0..width * height * 3 {
        state = state.wrapping_mul(1664525).wrapping_add(1013904223);
        pixels.push((state >> 24) as u8);
    }
    SampleBuffer::from_rgb(width, height, pixels).unwrap()
}

/// Smooth diagonal gradient frame
fn gradient_buffer(width: usize, height: usize) -> SampleBuffer {
    let mut pixels = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let v = (((x + y) * 255) / (width + height - 2).max(1)) as u8;
            pixels.extend_from_slice(&[v, v / 2 + 40, 255 - v]);
        }
    }
    SampleBuffer::from_rgb(width, height, pixels).unwrap()
}

fn assert_unit_range(value: f32, name: &str) {
    assert!(
        (0.0..=1.0).contains(&value),
        "{name} = {value} out of [0, 1]"
    );
}

#[test]
fn test_every_reported_score_is_in_unit_range() {
    let analyzer = MediaAnalyzer::new();
    let buffers = [
        SampleBuffer::flat(48, 48, [180, 120, 60]).unwrap(),
        noise_buffer(48, 48, 7),
        gradient_buffer(64, 40),
    ];

    for buffer in &buffers {
        let report = analyzer.analyze_image(buffer);
        let auth = &report.authenticity_analysis;
        let conf = &report.confidence_scores;

        assert_unit_range(auth.deepfake_probability, "deepfake_probability");
        assert_unit_range(auth.ai_generated_probability, "ai_generated_probability");
        assert_unit_range(conf.overall_confidence, "overall_confidence");
        assert_unit_range(conf.deepfake_confidence, "deepfake_confidence");
        assert_unit_range(conf.ai_generation_confidence, "ai_generation_confidence");
        assert_unit_range(conf.forensics_confidence, "forensics_confidence");
        assert_unit_range(report.risk_assessment.risk_score, "risk_score");
        assert_unit_range(auth.compression_artifacts.block_artifacts, "block_artifacts");
        assert_unit_range(auth.compression_artifacts.ringing_artifacts, "ringing_artifacts");
    }
}

#[test]
fn test_flat_frame_reads_as_untouched() {
    let analyzer = MediaAnalyzer::new();
    let buffer = SampleBuffer::flat(64, 64, [128, 128, 128]).unwrap();
    let frame = analyzer.analyze_frame(&buffer);

    // Constant intensity: no texture, noise, or CFA signal
    assert!(frame.deepfake.features.texture_anomalies < 0.01);
    assert!(frame.forensics.noise_consistency < 0.01);
    assert!(frame.forensics.cfa_score < 0.01);
    assert!(frame.forensics.is_authentic);
    assert!(frame.forensics.editing_indicators.is_empty());
}

#[test]
fn test_empty_clip_yields_authentic_zero_report() {
    let report = MediaAnalyzer::new().analyze_video(&[]);

    assert!(report.authenticity_analysis.is_authentic);
    assert_eq!(report.authenticity_analysis.deepfake_probability, 0.0);
    assert_eq!(report.authenticity_analysis.ai_generated_probability, 0.0);
    assert_eq!(report.confidence_scores.overall_confidence, 0.0);
    assert_eq!(report.confidence_scores.temporal_consistency, Some(0.0));
    match report.technical_analysis {
        TechnicalAnalysis::Video { frames_analyzed, .. } => assert_eq!(frames_analyzed, 0),
        _ => panic!("expected video technical analysis"),
    }
}

#[test]
fn test_aggregation_is_frame_order_independent() {
    let analyzer = MediaAnalyzer::new();
    let buffers = [
        noise_buffer(32, 32, 1),
        gradient_buffer(32, 32),
        noise_buffer(32, 32, 99),
        SampleBuffer::flat(32, 32, [200, 30, 90]).unwrap(),
    ];

    let mut analyses: Vec<_> = buffers.iter().map(|b| analyzer.analyze_frame(b)).collect();
    let forward = aggregate_frames(&analyses);
    analyses.reverse();
    let backward = aggregate_frames(&analyses);

    assert_eq!(
        forward.deepfake_probability.to_bits(),
        backward.deepfake_probability.to_bits()
    );
    assert_eq!(
        forward.ai_generated_probability.to_bits(),
        backward.ai_generated_probability.to_bits()
    );
    assert_eq!(
        forward.overall_confidence.to_bits(),
        backward.overall_confidence.to_bits()
    );
    assert_eq!(
        forward.temporal_consistency.to_bits(),
        backward.temporal_consistency.to_bits()
    );
    assert_eq!(forward.editing_indicators, backward.editing_indicators);
}

#[test]
fn test_identical_frames_have_full_temporal_consistency() {
    let analyzer = MediaAnalyzer::new();
    let frames: Vec<SampleBuffer> = (0..5).map(|_| noise_buffer(32, 32, 42)).collect();
    let report = analyzer.analyze_video(&frames);

    // Zero cross-frame variance in the deepfake probability
    assert_eq!(report.confidence_scores.temporal_consistency, Some(1.0));
}

#[test]
fn test_risk_level_monotone_in_indicator_count() {
    let thresholds = RiskThresholds::default();

    assert_eq!(assess_risk(0.3, 0.3, 0, &thresholds).risk_level, RiskLevel::Low);
    assert_eq!(assess_risk(0.3, 0.3, 2, &thresholds).risk_level, RiskLevel::Medium);
    assert_eq!(assess_risk(0.3, 0.3, 4, &thresholds).risk_level, RiskLevel::High);
}

#[test]
fn test_risk_score_thresholds() {
    let thresholds = RiskThresholds::default();

    // Score alone suffices for HIGH
    assert_eq!(assess_risk(0.85, 0.85, 1, &thresholds).risk_level, RiskLevel::High);
    // MEDIUM on score with no indicators
    assert_eq!(assess_risk(0.6, 0.6, 0, &thresholds).risk_level, RiskLevel::Medium);
}

#[test]
fn test_analyzer_failure_degrades_without_aborting() {
    // An all-black frame makes the spectral-symmetry score degenerate;
    // that analyzer must fail soft while the full report still arrives.
    let analyzer = MediaAnalyzer::new();
    let buffer = SampleBuffer::flat(32, 32, [0, 0, 0]).unwrap();

    let frame = analyzer.analyze_frame(&buffer);
    assert_eq!(frame.ai_generation.confidence, 0.0);
    assert_eq!(frame.ai_generation.probability, 0.0);
    assert!(frame.ai_generation.error.is_some());

    let report = analyzer.analyze_image(&buffer);
    assert_unit_range(report.risk_assessment.risk_score, "risk_score");
    assert_unit_range(
        report.confidence_scores.overall_confidence,
        "overall_confidence",
    );
}

#[test]
fn test_json_report_round_trips_expected_fields() {
    let report = MediaAnalyzer::new().analyze_image(&gradient_buffer(32, 32));
    let json = serde_json::to_value(&report).unwrap();

    assert!(json["analysis_id"].as_str().unwrap().starts_with("analysis_"));
    assert!(json["authenticity_analysis"]["editing_indicators"].is_array());
    assert!(json["risk_assessment"]["risk_level"].is_string());
    assert_eq!(json["risk_assessment"]["factors"].as_array().unwrap().len(), 3);
    assert!(json["confidence_scores"].get("temporal_consistency").is_none());
}
