//! Multi-criteria policy scoring
//!
//! Builds normalization bounds from the current comparison batch, scores each
//! policy on seven dimensions and folds them into one weighted total.

mod aggregate;
mod context;
mod parameters;

pub use aggregate::aggregate_score;
pub use context::ScoringContext;
pub use parameters::{
    claims_process_score, coverage_score, customer_service_score, deductible_score,
    exclusions_score, insurer_rating_score, premium_score,
};

use serde::{Deserialize, Serialize};

use crate::domain::criteria::{PriorityWeights, ScoringDimension};
use crate::domain::policy::{Policy, PolicyId};

/// Upper bound of every dimension score and of the weighted total.
pub const MAX_SCORE: f64 = 10.0;

/// Score used when there is no data to judge a dimension on.
pub const NEUTRAL_SCORE: f64 = 5.0;

/// Per-dimension scores, each in `[0, 10]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DimensionScores {
    pub premium: f64,
    pub coverage: f64,
    pub deductible: f64,
    pub exclusions: f64,
    pub insurer_rating: f64,
    pub claims_process: f64,
    pub customer_service: f64,
}

impl DimensionScores {
    pub fn get(&self, dimension: ScoringDimension) -> f64 {
        match dimension {
            ScoringDimension::Premium => self.premium,
            ScoringDimension::Coverage => self.coverage,
            ScoringDimension::Deductible => self.deductible,
            ScoringDimension::Exclusions => self.exclusions,
            ScoringDimension::InsurerRating => self.insurer_rating,
            ScoringDimension::ClaimsProcess => self.claims_process,
            ScoringDimension::CustomerService => self.customer_service,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ScoringDimension, f64)> + '_ {
        ScoringDimension::ALL.into_iter().map(|dimension| (dimension, self.get(dimension)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyScore {
    pub policy_id: PolicyId,
    pub dimensions: DimensionScores,
    pub total: f64,
}

pub trait PolicyScoringEngine: Send + Sync {
    /// Scores every policy relative to the batch it arrives in. Output order
    /// matches input order.
    fn score_batch(&self, policies: &[Policy], weights: &PriorityWeights) -> Vec<PolicyScore>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DeterministicScoringEngine;

impl DeterministicScoringEngine {
    pub fn dimension_scores(&self, policy: &Policy, context: &ScoringContext) -> DimensionScores {
        DimensionScores {
            premium: premium_score(policy, context),
            coverage: coverage_score(policy, context),
            deductible: deductible_score(policy, context),
            exclusions: exclusions_score(policy, context),
            insurer_rating: insurer_rating_score(&policy.insurer_rating),
            claims_process: claims_process_score(&policy.claims_process),
            customer_service: customer_service_score(policy.customer_service_rating),
        }
    }

    pub fn score_policy(
        &self,
        policy: &Policy,
        context: &ScoringContext,
        weights: &PriorityWeights,
    ) -> PolicyScore {
        let dimensions = self.dimension_scores(policy, context);
        PolicyScore {
            policy_id: policy.id.clone(),
            total: aggregate_score(&dimensions, weights),
            dimensions,
        }
    }
}

impl PolicyScoringEngine for DeterministicScoringEngine {
    fn score_batch(&self, policies: &[Policy], weights: &PriorityWeights) -> Vec<PolicyScore> {
        if policies.is_empty() {
            return Vec::new();
        }
        let context = ScoringContext::from_batch(policies);
        policies.iter().map(|policy| self.score_policy(policy, &context, weights)).collect()
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
