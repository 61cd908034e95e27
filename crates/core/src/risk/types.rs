//! Types for risk detection, the risk matrix and recommendations

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::catalog::RiskCategory;
use crate::domain::policy::decimal_to_f64;

/// Industries with a dedicated impact multiplier in the catalogue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    Technology,
    Healthcare,
    FinancialServices,
    Manufacturing,
    Retail,
    Construction,
    ProfessionalServices,
    Hospitality,
}

impl Industry {
    /// Lenient match on a free-text industry label.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_lowercase();
        let keywords: [(&[&str], Industry); 8] = [
            (&["financ", "bank", "insurance", "fintech"], Self::FinancialServices),
            (&["tech", "software", "saas"], Self::Technology),
            (&["health", "medical", "clinic"], Self::Healthcare),
            (&["manufactur", "industrial"], Self::Manufacturing),
            (&["retail", "commerce", "wholesale"], Self::Retail),
            (&["construct", "contractor"], Self::Construction),
            (&["consult", "legal", "accounting", "professional"], Self::ProfessionalServices),
            (&["hospitality", "restaurant", "hotel"], Self::Hospitality),
        ];

        keywords
            .into_iter()
            .find(|(tokens, _)| tokens.iter().any(|token| normalized.contains(token)))
            .map(|(_, industry)| industry)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganizationProfile {
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub employee_count: Option<u32>,
    #[serde(default)]
    pub annual_revenue: Option<Decimal>,
    #[serde(default)]
    pub business_type: Option<String>,
}

impl OrganizationProfile {
    pub fn industry(&self) -> Option<Industry> {
        self.industry.as_deref().and_then(Industry::from_label)
    }

    /// Exposure scale-up for larger organizations: up to +100% for revenue
    /// (capped at 10M) and up to +25% for headcount (capped at 50).
    pub fn exposure_scale(&self) -> f64 {
        let revenue = self
            .annual_revenue
            .and_then(decimal_to_f64)
            .map(|revenue| (revenue.max(0.0) / 1_000_000.0).min(10.0) * 0.1)
            .unwrap_or(0.0);
        let employees = self
            .employee_count
            .map(|count| (count as f64 / 10.0).min(5.0) * 0.05)
            .unwrap_or(0.0);
        1.0 + revenue + employees
    }
}

// Upper bounds of the first four ordinal buckets on the 1-5 scale.
const LEVEL_THRESHOLDS: [f64; 4] = [1.5, 2.5, 3.5, 4.5];

fn level_index(score: f64) -> usize {
    LEVEL_THRESHOLDS.iter().position(|threshold| score <= *threshold).unwrap_or(4)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactLevel {
    Low,
    Medium,
    High,
    Critical,
    Catastrophic,
}

impl ImpactLevel {
    const ORDERED: [ImpactLevel; 5] =
        [Self::Low, Self::Medium, Self::High, Self::Critical, Self::Catastrophic];

    pub fn from_score(score: f64) -> Self {
        Self::ORDERED[level_index(score)]
    }

    /// Position on the 1-5 matrix axis.
    pub fn score(&self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Critical => 4,
            Self::Catastrophic => 5,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbabilityLevel {
    Rare,
    Unlikely,
    Possible,
    Likely,
    AlmostCertain,
}

impl ProbabilityLevel {
    const ORDERED: [ProbabilityLevel; 5] =
        [Self::Rare, Self::Unlikely, Self::Possible, Self::Likely, Self::AlmostCertain];

    pub fn from_score(score: f64) -> Self {
        Self::ORDERED[level_index(score)]
    }

    pub fn score(&self) -> u8 {
        match self {
            Self::Rare => 1,
            Self::Unlikely => 2,
            Self::Possible => 3,
            Self::Likely => 4,
            Self::AlmostCertain => 5,
        }
    }
}

/// One matched risk category from a single detection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub category: RiskCategory,
    pub name: String,
    pub impact: ImpactLevel,
    pub probability: ProbabilityLevel,
    /// Adjusted impact on the continuous 1-5 scale.
    pub impact_score: f64,
    /// Adjusted probability on the continuous 1-5 scale.
    pub probability_score: f64,
    pub financial_exposure: f64,
    pub mitigation_cost: f64,
    pub regulatory: bool,
    pub continuity: bool,
    pub reputational: bool,
    pub matched_keywords: Vec<String>,
    /// Detection confidence in [0, 1].
    pub confidence: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskColor {
    Green,
    Yellow,
    Orange,
    Red,
}

impl RiskColor {
    pub fn from_score(risk_score: u8) -> Self {
        match risk_score {
            0..=4 => Self::Green,
            5..=8 => Self::Yellow,
            9..=12 => Self::Orange,
            _ => Self::Red,
        }
    }
}

/// Zero-based cell on the 5x5 grid: `x` follows impact, `y` probability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: u8,
    pub y: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskMatrixEntry {
    pub category: RiskCategory,
    pub name: String,
    pub impact: u8,
    pub probability: u8,
    pub risk_score: u8,
    pub position: GridPosition,
    pub color: RiskColor,
}

/// Ordered lowest to highest so that `Ord` sorts by urgency.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityTier {
    Low,
    Medium,
    High,
    Immediate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "0-30 days")]
    WithinThirtyDays,
    #[serde(rename = "1-3 months")]
    OneToThreeMonths,
    #[serde(rename = "3-6 months")]
    ThreeToSixMonths,
    #[serde(rename = "6-12 months")]
    SixToTwelveMonths,
}

impl Timeframe {
    pub fn for_tier(tier: PriorityTier) -> Self {
        match tier {
            PriorityTier::Immediate => Self::WithinThirtyDays,
            PriorityTier::High => Self::OneToThreeMonths,
            PriorityTier::Medium => Self::ThreeToSixMonths,
            PriorityTier::Low => Self::SixToTwelveMonths,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::WithinThirtyDays => "0-30 days",
            Self::OneToThreeMonths => "1-3 months",
            Self::ThreeToSixMonths => "3-6 months",
            Self::SixToTwelveMonths => "6-12 months",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: RiskCategory,
    pub risk_name: String,
    pub priority: PriorityTier,
    pub action: String,
    pub estimated_cost: f64,
    pub timeframe: Timeframe,
    /// Expected fraction of exposure removed by the action.
    pub risk_reduction: f64,
    pub roi_score: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn from_overall_score(score: f64) -> Self {
        if score >= 75.0 {
            Self::Critical
        } else if score >= 50.0 {
            Self::High
        } else if score >= 25.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Health sub-scores on a 0-100 scale; 100 means no flagged risk detected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskSubScores {
    pub compliance: f64,
    pub continuity: f64,
    pub reputation: f64,
}

/// Free-text analysis content supplied by the document-analysis step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessmentInput {
    #[serde(default)]
    pub summaries: Vec<String>,
    #[serde(default)]
    pub coverage_gaps: Vec<String>,
    #[serde(default)]
    pub risk_factors: Vec<String>,
    #[serde(default)]
    pub mitigations: Vec<String>,
    #[serde(default)]
    pub profile: Option<OrganizationProfile>,
}

impl RiskAssessmentInput {
    pub fn combined_text(&self) -> String {
        self.summaries
            .iter()
            .chain(&self.coverage_gaps)
            .chain(&self.risk_factors)
            .chain(&self.mitigations)
            .map(|section| section.trim())
            .filter(|section| !section.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComprehensiveRiskAssessment {
    pub id: Uuid,
    pub assessed_at: DateTime<Utc>,
    /// 0-100, higher is riskier.
    pub overall_score: f64,
    pub risk_level: RiskLevel,
    pub total_exposure: f64,
    pub prioritized_risks: Vec<RiskFactor>,
    pub risk_matrix: Vec<RiskMatrixEntry>,
    pub recommendations: Vec<Recommendation>,
    pub sub_scores: RiskSubScores,
}
