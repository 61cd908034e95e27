use serde::{Deserialize, Serialize};

use crate::domain::policy::Policy;

/// Normalization bounds derived from one comparison batch.
///
/// Scores computed against a context are relative to the batch that produced
/// it and carry no meaning outside of it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringContext {
    pub min_premium: f64,
    pub max_premium: f64,
    pub min_deductible: f64,
    pub max_deductible: f64,
    pub max_exclusions: usize,
    pub max_coverage: usize,
}

impl ScoringContext {
    pub fn from_batch(policies: &[Policy]) -> Self {
        let (min_premium, max_premium) = bounds(policies.iter().filter_map(Policy::annual_premium));
        let (min_deductible, max_deductible) =
            bounds(policies.iter().flat_map(|policy| policy.positive_deductibles()));

        Self {
            min_premium,
            max_premium,
            min_deductible,
            max_deductible,
            max_exclusions: policies.iter().map(|policy| policy.exclusions.len()).max().unwrap_or(0),
            max_coverage: policies.iter().map(Policy::covered_type_count).max().unwrap_or(0),
        }
    }

    pub fn premium_spread(&self) -> f64 {
        self.max_premium - self.min_premium
    }

    pub fn deductible_spread(&self) -> f64 {
        self.max_deductible - self.min_deductible
    }
}

// An empty input collapses to (0, 0) so the spread is zero.
fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values
        .fold(None, |acc: Option<(f64, f64)>, value| match acc {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
        .unwrap_or((0.0, 0.0))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::ScoringContext;
    use crate::comparison::samples::baseline_policy;

    #[test]
    fn bounds_skip_non_positive_premiums_and_deductibles() {
        let mut cheap = baseline_policy("a", 1200);
        cheap.deductibles.insert("property".to_owned(), Decimal::new(250, 0));
        cheap.exclusions = vec!["war".to_owned(), "flood".to_owned()];
        let mut free = baseline_policy("b", 0);
        free.deductibles.insert("general".to_owned(), Decimal::ZERO);
        let pricey = baseline_policy("c", 1400);

        let context = ScoringContext::from_batch(&[cheap, free, pricey]);

        assert_eq!(context.min_premium, 1200.0);
        assert_eq!(context.max_premium, 1400.0);
        assert_eq!(context.min_deductible, 250.0);
        assert_eq!(context.max_deductible, 1000.0);
        assert_eq!(context.max_exclusions, 2);
    }

    #[test]
    fn all_invalid_premiums_collapse_bounds() {
        let context = ScoringContext::from_batch(&[baseline_policy("a", 0), baseline_policy("b", -5)]);
        assert_eq!(context.premium_spread(), 0.0);
    }
}
