pub mod annotate;
pub mod filter;
pub mod samples;

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::criteria::{ComparisonCriteria, PriorityWeights};
use crate::domain::policy::{Policy, PolicyId};
use crate::metrics::UsageMetrics;
use crate::scoring::{DeterministicScoringEngine, DimensionScores, PolicyScoringEngine};

use self::annotate::{recommendation_sentence, strengths, weaknesses};
use self::filter::check_eligibility;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub policy_id: PolicyId,
    pub policy_name: String,
    pub insurer: String,
    pub total_score: f64,
    pub breakdown: DimensionScores,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendation: String,
    /// 1-based position after sorting by total score.
    pub rank: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ComparisonOutcome {
    Ranked { results: Vec<ComparisonResult> },
    /// Nothing passed the filters; the caller decides whether to fall back to
    /// other data.
    NoEligiblePolicies { candidates: usize },
}

impl ComparisonOutcome {
    pub fn results(&self) -> &[ComparisonResult] {
        match self {
            Self::Ranked { results } => results,
            Self::NoEligiblePolicies { .. } => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results().is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub weights: PriorityWeights,
    pub outcome: ComparisonOutcome,
    pub metrics: UsageMetrics,
}

/// Filter, score, annotate and rank a batch of candidate policies.
pub struct ComparisonPipeline<S = DeterministicScoringEngine> {
    scoring_engine: S,
    default_weights: PriorityWeights,
}

impl<S> ComparisonPipeline<S> {
    pub fn new(scoring_engine: S, default_weights: PriorityWeights) -> Self {
        Self { scoring_engine, default_weights }
    }
}

impl Default for ComparisonPipeline<DeterministicScoringEngine> {
    fn default() -> Self {
        Self::new(DeterministicScoringEngine, PriorityWeights::default())
    }
}

impl<S> ComparisonPipeline<S>
where
    S: PolicyScoringEngine,
{
    pub fn compare(&self, candidates: &[Policy], criteria: &ComparisonCriteria) -> ComparisonReport {
        let run_id = Uuid::new_v4();
        let weights = criteria.priorities.unwrap_or(self.default_weights);

        let eligible: Vec<Policy> = candidates
            .iter()
            .filter(|policy| match check_eligibility(policy, criteria) {
                Ok(()) => true,
                Err(reason) => {
                    debug!(
                        event_name = "comparison.pipeline.filtered",
                        %run_id,
                        policy_id = %policy.id,
                        reason = reason.reason_code(),
                        "policy filtered out"
                    );
                    false
                }
            })
            .cloned()
            .collect();

        let outcome = if eligible.is_empty() {
            info!(
                event_name = "comparison.pipeline.no_eligible_policies",
                %run_id,
                candidates = candidates.len(),
                "no policy passed the comparison filters"
            );
            ComparisonOutcome::NoEligiblePolicies { candidates: candidates.len() }
        } else {
            ComparisonOutcome::Ranked { results: self.rank(&eligible, &weights) }
        };

        let ranked = outcome.results().len();
        info!(
            event_name = "comparison.pipeline.completed",
            %run_id,
            candidates = candidates.len(),
            ranked,
            "comparison completed"
        );

        ComparisonReport {
            run_id,
            generated_at: Utc::now(),
            weights,
            metrics: UsageMetrics::for_comparison(candidates.len(), ranked, &weights),
            outcome,
        }
    }

    fn rank(&self, eligible: &[Policy], weights: &PriorityWeights) -> Vec<ComparisonResult> {
        let scores = self.scoring_engine.score_batch(eligible, weights);

        let mut results: Vec<ComparisonResult> = eligible
            .iter()
            .zip(scores)
            .map(|(policy, score)| ComparisonResult {
                policy_id: policy.id.clone(),
                policy_name: policy.name.clone(),
                insurer: policy.insurer.clone(),
                total_score: score.total,
                strengths: strengths(&score.dimensions),
                weaknesses: weaknesses(&score.dimensions),
                recommendation: recommendation_sentence(&score.dimensions, score.total, weights),
                breakdown: score.dimensions,
                rank: 0,
            })
            .collect();

        // Stable sort keeps input order among equal totals.
        results.sort_by(|left, right| {
            right.total_score.partial_cmp(&left.total_score).unwrap_or(Ordering::Equal)
        });
        for (index, result) in results.iter_mut().enumerate() {
            result.rank = index + 1;
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::samples::{baseline_policy, sample_policies};
    use super::{ComparisonOutcome, ComparisonPipeline};
    use crate::domain::criteria::{BudgetRange, ComparisonCriteria, PriorityWeights, ScoringDimension};
    use crate::domain::policy::{Policy, PolicyId};
    use crate::scoring::{
        DeterministicScoringEngine, DimensionScores, PolicyScore, PolicyScoringEngine,
    };

    fn pipeline() -> ComparisonPipeline {
        ComparisonPipeline::default()
    }

    fn criteria(min: i64, max: i64) -> ComparisonCriteria {
        ComparisonCriteria {
            budget: BudgetRange { min: Decimal::new(min, 0), max: Decimal::new(max, 0) },
            priorities: None,
            insurance_type: "commercial".to_owned(),
            market: "us".to_owned(),
            must_have_features: Vec::new(),
            deal_breakers: Vec::new(),
        }
    }

    #[test]
    fn ranks_form_a_permutation_sorted_by_total() {
        let report = pipeline().compare(&sample_policies(), &criteria(0, 50_000));
        let results = report.outcome.results();

        assert_eq!(results.len(), sample_policies().len());
        let ranks: Vec<usize> = results.iter().map(|result| result.rank).collect();
        assert_eq!(ranks, (1..=results.len()).collect::<Vec<_>>());
        assert!(results.windows(2).all(|pair| pair[0].total_score >= pair[1].total_score));
        assert_eq!(report.metrics.policies_ranked, results.len() as u64);
    }

    #[test]
    fn filtered_policies_do_not_shape_the_batch() {
        let batch = vec![
            baseline_policy("cheap", 1_200),
            baseline_policy("pricey", 1_400),
            baseline_policy("over-budget", 9_000),
        ];
        let report = pipeline().compare(&batch, &criteria(1_000, 2_000));
        let results = report.outcome.results();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].policy_id, PolicyId("cheap".to_owned()));
        assert_eq!(results[0].breakdown.premium, 10.0);
        assert_eq!(results[1].breakdown.premium, 0.0);
        assert_eq!(report.metrics.policies_filtered_out, 1);
    }

    #[test]
    fn empty_eligible_set_is_a_typed_outcome() {
        let report = pipeline().compare(&sample_policies(), &criteria(1, 10));

        assert_eq!(
            report.outcome,
            ComparisonOutcome::NoEligiblePolicies { candidates: sample_policies().len() }
        );
        assert!(report.outcome.is_empty());
        assert_eq!(report.metrics.comparisons_run, 1);
        assert_eq!(report.metrics.policies_ranked, 0);
    }

    #[test]
    fn criteria_priorities_override_default_weights() {
        let defaults = PriorityWeights::uniform(2.0);
        let pipeline = ComparisonPipeline::new(DeterministicScoringEngine, defaults);

        let implicit = pipeline.compare(&sample_policies(), &criteria(0, 50_000));
        assert_eq!(implicit.weights, defaults);

        let mut explicit = criteria(0, 50_000);
        explicit.priorities = Some(PriorityWeights::uniform(0.0).with(ScoringDimension::Premium, 1.0));
        let report = pipeline.compare(&sample_policies(), &explicit);
        let top = &report.outcome.results()[0];

        assert_eq!(top.policy_id, PolicyId("sample-starter".to_owned()));
        assert_eq!(top.total_score, 10.0);
        assert!(top.recommendation.contains("premium"));
        assert_eq!(report.metrics.weight_usage[&ScoringDimension::Coverage], 0.0);
    }

    #[test]
    fn pipeline_accepts_any_scoring_engine() {
        struct ReverseEngine;

        impl PolicyScoringEngine for ReverseEngine {
            fn score_batch(&self, policies: &[Policy], _: &PriorityWeights) -> Vec<PolicyScore> {
                policies
                    .iter()
                    .enumerate()
                    .map(|(index, policy)| PolicyScore {
                        policy_id: policy.id.clone(),
                        dimensions: DimensionScores::default(),
                        total: index as f64,
                    })
                    .collect()
            }
        }

        let pipeline = ComparisonPipeline::new(ReverseEngine, PriorityWeights::default());
        let batch = vec![baseline_policy("first", 1_000), baseline_policy("second", 1_100)];
        let results = pipeline.compare(&batch, &criteria(0, 5_000)).outcome;

        assert_eq!(results.results()[0].policy_id, PolicyId("second".to_owned()));
        assert_eq!(results.results()[0].weaknesses.len(), 7);
    }
}
