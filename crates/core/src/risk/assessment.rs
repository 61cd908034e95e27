use std::cmp::Ordering;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use super::detector::{KeywordRiskDetector, RiskDetector};
use super::matrix::{build_risk_matrix, matrix_entry};
use super::recommendations::generate_recommendations;
use super::types::{
    ComprehensiveRiskAssessment, RiskAssessmentInput, RiskFactor, RiskLevel, RiskMatrixEntry,
    RiskSubScores,
};
use crate::metrics::UsageMetrics;

const MAX_MATRIX_SCORE: f64 = 25.0;
const SUB_SCORE_PENALTY: f64 = 4.0;

#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentRun {
    pub assessment: ComprehensiveRiskAssessment,
    pub metrics: UsageMetrics,
}

/// Runs detection and derives the full assessment bundle from its factors.
#[derive(Debug, Clone)]
pub struct RiskAssessor<D = KeywordRiskDetector> {
    detector: D,
}

impl<D> RiskAssessor<D>
where
    D: RiskDetector,
{
    pub fn new(detector: D) -> Self {
        Self { detector }
    }

    pub fn assess(&self, input: &RiskAssessmentInput) -> AssessmentRun {
        let text = input.combined_text();
        let factors = self.detector.detect(&text, input.profile.as_ref());
        let assessment = assemble(factors);

        info!(
            event_name = "risk.assessment.completed",
            assessment_id = %assessment.id,
            factors = assessment.prioritized_risks.len(),
            overall_score = assessment.overall_score,
            total_exposure = assessment.total_exposure,
            "risk assessment completed"
        );

        let metrics = UsageMetrics::for_assessment(assessment.prioritized_risks.len());
        AssessmentRun { assessment, metrics }
    }
}

impl Default for RiskAssessor<KeywordRiskDetector> {
    fn default() -> Self {
        Self::new(KeywordRiskDetector::default())
    }
}

fn assemble(mut factors: Vec<RiskFactor>) -> ComprehensiveRiskAssessment {
    factors.sort_by(|left, right| {
        let left_score = matrix_entry(left).risk_score;
        let right_score = matrix_entry(right).risk_score;
        right_score.cmp(&left_score).then_with(|| {
            right
                .financial_exposure
                .partial_cmp(&left.financial_exposure)
                .unwrap_or(Ordering::Equal)
        })
    });

    let risk_matrix = build_risk_matrix(&factors);
    let overall_score = overall_score(&risk_matrix);

    ComprehensiveRiskAssessment {
        id: Uuid::new_v4(),
        assessed_at: Utc::now(),
        overall_score,
        risk_level: RiskLevel::from_overall_score(overall_score),
        total_exposure: factors.iter().map(|factor| factor.financial_exposure).sum(),
        recommendations: generate_recommendations(&factors),
        sub_scores: sub_scores(&factors, &risk_matrix),
        risk_matrix,
        prioritized_risks: factors,
    }
}

/// Mean matrix score rescaled to 0-100; zero when nothing was detected.
pub fn overall_score(matrix: &[RiskMatrixEntry]) -> f64 {
    if matrix.is_empty() {
        return 0.0;
    }
    let total: f64 = matrix.iter().map(|entry| f64::from(entry.risk_score)).sum();
    let mean = total / matrix.len() as f64;
    crate::scoring::round2(mean / MAX_MATRIX_SCORE * 100.0)
}

fn sub_scores(factors: &[RiskFactor], matrix: &[RiskMatrixEntry]) -> RiskSubScores {
    RiskSubScores {
        compliance: health_score(factors, matrix, |factor| factor.regulatory),
        continuity: health_score(factors, matrix, |factor| factor.continuity),
        reputation: health_score(factors, matrix, |factor| factor.reputational),
    }
}

fn health_score(
    factors: &[RiskFactor],
    matrix: &[RiskMatrixEntry],
    flagged: impl Fn(&RiskFactor) -> bool,
) -> f64 {
    let penalty: f64 = factors
        .iter()
        .zip(matrix)
        .filter(|(factor, _)| flagged(*factor))
        .map(|(_, entry)| f64::from(entry.risk_score) * SUB_SCORE_PENALTY)
        .sum();
    (100.0 - penalty).max(0.0)
}
