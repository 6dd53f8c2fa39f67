//! Analysis report types

mod result;

pub use result::{
    AuthenticityAnalysis, CompressionArtifacts, ConfidenceScores, MediaReport, RiskAssessment,
    RiskLevel, TechnicalAnalysis,
};
