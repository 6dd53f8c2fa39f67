//! Configuration module for MediaCheckr

mod tuning;

pub use tuning::{AnalysisConfig, DeepfakeWeights, IndicatorThresholds, RiskThresholds};
