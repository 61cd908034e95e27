//! Multi-criteria insurance policy scoring and keyword-driven risk assessment.

pub mod comparison;
pub mod config;
pub mod domain;
pub mod errors;
pub mod metrics;
pub mod risk;
pub mod scoring;

pub use comparison::{
    ComparisonOutcome, ComparisonPipeline, ComparisonReport, ComparisonResult,
};
pub use config::{AppConfig, ConfigError, ConfigOverrides, ConfigProvenance, LoadOptions, LogFormat};
pub use domain::criteria::{BudgetRange, ComparisonCriteria, PriorityWeights, ScoringDimension};
pub use domain::policy::{Policy, PolicyId};
pub use errors::{ApplicationError, DomainError};
pub use metrics::UsageMetrics;
pub use risk::{
    AssessmentRun, ComprehensiveRiskAssessment, KeywordRiskDetector, RiskAssessmentInput,
    RiskAssessor, RiskDetector, RiskDetectorConfig,
};
pub use scoring::{DeterministicScoringEngine, DimensionScores, PolicyScore, PolicyScoringEngine};
