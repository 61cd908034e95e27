//! Keyword-driven risk assessment
//!
//! Free-text analysis content is scanned against a fixed category catalogue.
//! Each matched category becomes a [`RiskFactor`] with a probability adjusted
//! by the surrounding text, an exposure scaled by the organization profile,
//! a position on the 5x5 risk matrix and a prioritized recommendation.

pub mod assessment;
pub mod catalog;
pub mod detector;
pub mod matrix;
pub mod recommendations;
pub mod types;

pub use assessment::{overall_score, AssessmentRun, RiskAssessor};
pub use catalog::{CategoryProfile, RiskCategory};
pub use detector::{KeywordRiskDetector, RiskDetector, RiskDetectorConfig};
pub use matrix::{build_risk_matrix, matrix_entry};
pub use recommendations::{generate_recommendations, prioritize, priority_tier, recommend};
pub use types::{
    ComprehensiveRiskAssessment, GridPosition, ImpactLevel, Industry, OrganizationProfile,
    PriorityTier, ProbabilityLevel, Recommendation, RiskAssessmentInput, RiskColor, RiskFactor,
    RiskLevel, RiskMatrixEntry, RiskSubScores, Timeframe,
};
