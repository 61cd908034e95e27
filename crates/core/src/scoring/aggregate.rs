use super::{round2, DimensionScores, MAX_SCORE};
use crate::domain::criteria::PriorityWeights;

/// Weighted mean of the dimension scores. Weights are normalized by their
/// sum, so the result stays in `[0, 10]` however the caller scales them.
/// A zero weight sum carries no signal and yields 0.
pub fn aggregate_score(scores: &DimensionScores, weights: &PriorityWeights) -> f64 {
    let total_weight = weights.total();
    if total_weight <= 0.0 || !total_weight.is_finite() {
        return 0.0;
    }

    let weighted: f64 = weights.iter().map(|(dimension, weight)| scores.get(dimension) * weight).sum();
    round2((weighted / total_weight).clamp(0.0, MAX_SCORE))
}

#[cfg(test)]
mod tests {
    use super::aggregate_score;
    use crate::domain::criteria::{PriorityWeights, ScoringDimension};
    use crate::scoring::DimensionScores;

    fn scores() -> DimensionScores {
        DimensionScores {
            premium: 10.0,
            coverage: 6.0,
            deductible: 8.0,
            exclusions: 4.0,
            insurer_rating: 9.0,
            claims_process: 7.0,
            customer_service: 5.0,
        }
    }

    #[test]
    fn weights_are_normalized_by_their_sum() {
        let small = PriorityWeights::uniform(1.0).with(ScoringDimension::Premium, 3.0);
        let large = PriorityWeights::uniform(10.0).with(ScoringDimension::Premium, 30.0);

        let total = aggregate_score(&scores(), &small);
        // (30 + 6 + 8 + 4 + 9 + 7 + 5) / 9
        assert_eq!(total, 7.67);
        assert_eq!(aggregate_score(&scores(), &large), total);
    }

    #[test]
    fn zero_weight_sum_yields_zero() {
        assert_eq!(aggregate_score(&scores(), &PriorityWeights::uniform(0.0)), 0.0);
    }

    #[test]
    fn zero_weight_removes_dimension_influence() {
        let weights = PriorityWeights::uniform(1.0).with(ScoringDimension::Exclusions, 0.0);
        let mut changed = scores();
        changed.exclusions = 10.0;

        assert_eq!(aggregate_score(&scores(), &weights), aggregate_score(&changed, &weights));
    }
}
