// src/cli/output.rs
//
// Human-readable report rendering for the terminal.

use colorful::Colorful;

use crate::detection::{MediaReport, RiskLevel, TechnicalAnalysis};

/// Print one analysis report
pub fn print_report(report: &MediaReport, verbose: bool) {
    let auth = &report.authenticity_analysis;
    let conf = &report.confidence_scores;
    let risk = &report.risk_assessment;

    match &report.technical_analysis {
        TechnicalAnalysis::Image { width, height, channels } => {
            println!("  Type: image ({width}x{height}, {channels} channels)");
        }
        TechnicalAnalysis::Video {
            frames_analyzed,
            frame_width,
            frame_height,
        } => {
            println!("  Type: video ({frames_analyzed} frames analyzed, {frame_width}x{frame_height})");
        }
    }

    let status = if auth.is_authentic {
        "✓ APPEARS AUTHENTIC".to_string().green()
    } else {
        "✗ MANIPULATION SUSPECTED".to_string().red()
    };
    println!("  Status: {status}");

    println!("  Deepfake probability: {:.2}", auth.deepfake_probability);
    println!("  AI-generated probability: {:.2}", auth.ai_generated_probability);
    println!("  Overall confidence: {:.2}", conf.overall_confidence);
    if let Some(temporal) = conf.temporal_consistency {
        println!("  Temporal consistency: {temporal:.2}");
    }

    let risk_line = format!(
        "{} {:?} (score {:.2})",
        risk.risk_level.symbol(),
        risk.risk_level,
        risk.risk_score
    );
    let risk_line = match risk.risk_level {
        RiskLevel::Low => risk_line.green(),
        RiskLevel::Medium => risk_line.yellow(),
        RiskLevel::High => risk_line.red(),
    };
    println!("  Risk: {risk_line}");

    if !auth.editing_indicators.is_empty() {
        println!("  Editing indicators:");
        for indicator in &auth.editing_indicators {
            println!("    • {}", indicator.clone().yellow());
        }
    }

    if verbose {
        println!("\n  Technical Details:");
        println!("    Analysis id: {}", report.analysis_id);
        println!("    Timestamp: {}", report.timestamp);
        println!("    Deepfake confidence: {:.2}", conf.deepfake_confidence);
        println!("    AI-generation confidence: {:.2}", conf.ai_generation_confidence);
        println!("    Forensics confidence: {:.2}", conf.forensics_confidence);
        println!(
            "    Compression: {} (blocks {:.3}, ringing {:.3})",
            auth.compression_artifacts.compression_level,
            auth.compression_artifacts.block_artifacts,
            auth.compression_artifacts.ringing_artifacts
        );
        for factor in &risk.factors {
            println!("    {factor}");
        }
    }
}
