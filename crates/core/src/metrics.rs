//! Usage counters returned as a per-call delta.
//!
//! Engines never keep running totals; callers that want them fold each
//! delta into their own `UsageMetrics` with [`UsageMetrics::merge`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::criteria::{PriorityWeights, ScoringDimension};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageMetrics {
    pub comparisons_run: u64,
    pub candidates_seen: u64,
    pub policies_filtered_out: u64,
    pub policies_ranked: u64,
    /// Cumulative weight supplied per dimension across comparisons.
    pub weight_usage: BTreeMap<ScoringDimension, f64>,
    pub assessments_run: u64,
    pub risk_factors_detected: u64,
}

impl UsageMetrics {
    pub fn for_comparison(
        candidates: usize,
        ranked: usize,
        weights: &PriorityWeights,
    ) -> Self {
        Self {
            comparisons_run: 1,
            candidates_seen: candidates as u64,
            policies_filtered_out: candidates.saturating_sub(ranked) as u64,
            policies_ranked: ranked as u64,
            weight_usage: weights.iter().collect(),
            ..Self::default()
        }
    }

    pub fn for_assessment(factors: usize) -> Self {
        Self { assessments_run: 1, risk_factors_detected: factors as u64, ..Self::default() }
    }

    pub fn merge(&mut self, other: &UsageMetrics) {
        self.comparisons_run += other.comparisons_run;
        self.candidates_seen += other.candidates_seen;
        self.policies_filtered_out += other.policies_filtered_out;
        self.policies_ranked += other.policies_ranked;
        self.assessments_run += other.assessments_run;
        self.risk_factors_detected += other.risk_factors_detected;
        for (dimension, weight) in &other.weight_usage {
            *self.weight_usage.entry(*dimension).or_insert(0.0) += weight;
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
