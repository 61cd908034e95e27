//! Per-dimension scorers. Every scorer returns a value in `[0, 10]`, rounded
//! to two decimals, relative to the batch captured in a [`ScoringContext`].

use super::context::ScoringContext;
use super::{round2, MAX_SCORE, NEUTRAL_SCORE};
use crate::domain::policy::{ClaimsProcess, InsurerRating, Policy};

/// Industry letter scale (A.M. Best style).
const AM_BEST_SCALE: &[(&str, f64)] = &[
    ("A++", 10.0),
    ("A+", 9.5),
    ("A", 9.0),
    ("A-", 8.5),
    ("B++", 8.0),
    ("B+", 7.5),
    ("B", 7.0),
    ("B-", 6.5),
    ("C++", 6.0),
    ("C+", 5.5),
    ("C", 5.0),
    ("C-", 4.5),
    ("D", 3.0),
    ("E", 2.0),
    ("F", 1.0),
];

/// Rating agency letter scale (S&P style).
const AGENCY_SCALE: &[(&str, f64)] = &[
    ("AAA", 10.0),
    ("AA+", 9.5),
    ("AA", 9.0),
    ("AA-", 8.5),
    ("A+", 8.0),
    ("A", 7.5),
    ("A-", 7.0),
    ("BBB+", 6.5),
    ("BBB", 6.0),
    ("BBB-", 5.5),
    ("BB+", 5.0),
    ("BB", 4.5),
    ("BB-", 4.0),
    ("B+", 3.5),
    ("B", 3.0),
    ("B-", 2.5),
    ("CCC", 2.0),
    ("CC", 1.5),
    ("C", 1.0),
    ("D", 0.0),
];

/// Numeric financial-strength bands on a 0-100 scale, as (floor, score).
const STRENGTH_BANDS: &[(f64, f64)] = &[
    (90.0, 10.0),
    (80.0, 9.0),
    (70.0, 8.0),
    (60.0, 7.0),
    (50.0, 6.0),
    (40.0, 5.0),
    (30.0, 4.0),
    (20.0, 3.0),
    (10.0, 2.0),
    (0.0, 1.0),
];

const SETTLEMENT_HORIZON_DAYS: f64 = 60.0;

/// Lower annual premium scores higher.
pub fn premium_score(policy: &Policy, context: &ScoringContext) -> f64 {
    let Some(premium) = policy.annual_premium() else {
        return 0.0;
    };
    if context.premium_spread() <= f64::EPSILON {
        return MAX_SCORE;
    }
    inverse_scale(premium, context.min_premium, context.max_premium)
}

/// More coverage types with a positive limit scores higher.
pub fn coverage_score(policy: &Policy, context: &ScoringContext) -> f64 {
    if context.max_coverage == 0 {
        return 0.0;
    }
    let ratio = policy.covered_type_count() as f64 / context.max_coverage as f64;
    round2(MAX_SCORE * ratio.min(1.0))
}

/// Lower average deductible scores higher. A policy without any positive
/// deductible is the best case, not missing data.
pub fn deductible_score(policy: &Policy, context: &ScoringContext) -> f64 {
    let Some(average) = policy.average_deductible() else {
        return MAX_SCORE;
    };
    if context.deductible_spread() <= f64::EPSILON {
        return MAX_SCORE;
    }
    inverse_scale(average, context.min_deductible, context.max_deductible)
}

/// Fewer exclusion clauses scores higher.
pub fn exclusions_score(policy: &Policy, context: &ScoringContext) -> f64 {
    if context.max_exclusions == 0 {
        return MAX_SCORE;
    }
    let max = context.max_exclusions as f64;
    let remaining = (max - policy.exclusions.len() as f64) / max;
    round2(MAX_SCORE * remaining.clamp(0.0, 1.0))
}

/// Best score across every rating system present; neutral when none of the
/// supplied codes is recognized.
pub fn insurer_rating_score(rating: &InsurerRating) -> f64 {
    let candidates = [
        rating.am_best.as_deref().and_then(|code| lookup(AM_BEST_SCALE, code)),
        rating.standard_and_poors.as_deref().and_then(|code| lookup(AGENCY_SCALE, code)),
        rating.financial_strength.and_then(strength_band),
    ];

    candidates.into_iter().flatten().reduce(f64::max).map(round2).unwrap_or(NEUTRAL_SCORE)
}

/// Settlement speed (3) + satisfaction (3) + approval rate (2) + digital
/// claims (2), capped at 10. Missing sub-metrics contribute nothing.
pub fn claims_process_score(claims: &ClaimsProcess) -> f64 {
    let speed = claims
        .average_settlement_days
        .filter(|days| days.is_finite())
        .map(|days| 3.0 * ((SETTLEMENT_HORIZON_DAYS - days) / SETTLEMENT_HORIZON_DAYS).clamp(0.0, 1.0))
        .unwrap_or(0.0);
    let satisfaction = claims
        .customer_satisfaction
        .filter(|value| value.is_finite())
        .map(|value| 3.0 * one_to_five_fraction(value))
        .unwrap_or(0.0);
    let approval = claims
        .approval_rate_pct
        .filter(|value| value.is_finite())
        .map(|rate| 2.0 * (rate / 100.0).clamp(0.0, 1.0))
        .unwrap_or(0.0);
    let digital = if claims.digital_claims { 2.0 } else { 0.0 };

    round2((speed + satisfaction + approval + digital).min(MAX_SCORE))
}

/// Linear rescale of a 1-5 rating; unrated is neutral.
pub fn customer_service_score(rating: Option<f64>) -> f64 {
    match rating.filter(|value| value.is_finite()) {
        Some(value) => round2(MAX_SCORE * one_to_five_fraction(value)),
        None => NEUTRAL_SCORE,
    }
}

fn inverse_scale(value: f64, min: f64, max: f64) -> f64 {
    round2((MAX_SCORE * (max - value) / (max - min)).clamp(0.0, MAX_SCORE))
}

fn one_to_five_fraction(value: f64) -> f64 {
    ((value - 1.0) / 4.0).clamp(0.0, 1.0)
}

fn strength_band(value: f64) -> Option<f64> {
    if !value.is_finite() {
        return None;
    }
    STRENGTH_BANDS.iter().find(|(floor, _)| value >= *floor).map(|(_, score)| *score)
}

fn lookup(scale: &[(&str, f64)], code: &str) -> Option<f64> {
    let normalized: String =
        code.chars().filter(|ch| !ch.is_whitespace()).collect::<String>().to_ascii_uppercase();
    scale.iter().find(|(label, _)| *label == normalized).map(|(_, score)| *score)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::comparison::samples::baseline_policy;

    #[test]
    fn premium_scores_span_batch_bounds() {
        let cheap = baseline_policy("a", 1200);
        let pricey = baseline_policy("b", 1400);
        let middle = baseline_policy("c", 1300);
        let context =
            ScoringContext::from_batch(&[cheap.clone(), pricey.clone(), middle.clone()]);

        assert_eq!(premium_score(&cheap, &context), 10.0);
        assert_eq!(premium_score(&pricey, &context), 0.0);
        assert_eq!(premium_score(&middle, &context), 5.0);
    }

    #[test]
    fn non_positive_premium_scores_zero_even_in_degenerate_batch() {
        let free = baseline_policy("a", 0);
        let context = ScoringContext::from_batch(&[free.clone()]);
        assert_eq!(premium_score(&free, &context), 0.0);
    }

    #[test]
    fn overflowing_premium_scores_zero_and_leaves_bounds_alone() {
        let cheap = baseline_policy("a", 1200);
        let pricey = baseline_policy("b", 1400);
        let mut huge = baseline_policy("c", 1);
        huge.premium.amount = Decimal::MAX;
        huge.premium.frequency = crate::domain::policy::PremiumFrequency::Quarterly;
        let context = ScoringContext::from_batch(&[cheap.clone(), pricey.clone(), huge.clone()]);

        assert_eq!(context.max_premium, 1400.0);
        assert_eq!(premium_score(&huge, &context), 0.0);
        assert_eq!(premium_score(&cheap, &context), 10.0);
    }

    #[test]
    fn coverage_counts_only_positive_limits() {
        let mut broad = baseline_policy("a", 1000);
        broad.coverage.insert("Cyber".to_owned(), Decimal::new(250_000, 0));
        broad.coverage.insert("Property".to_owned(), Decimal::new(500_000, 0));
        let mut narrow = baseline_policy("b", 1000);
        narrow.coverage.insert("Cyber".to_owned(), Decimal::ZERO);
        let context = ScoringContext::from_batch(&[broad.clone(), narrow.clone()]);

        assert_eq!(coverage_score(&broad, &context), 10.0);
        assert_eq!(coverage_score(&narrow, &context), 3.33);
    }

    #[test]
    fn coverage_is_zero_when_nobody_has_coverage() {
        let mut bare = baseline_policy("a", 1000);
        bare.coverage.clear();
        let context = ScoringContext::from_batch(&[bare.clone()]);
        assert_eq!(coverage_score(&bare, &context), 0.0);
    }

    #[test]
    fn policy_without_deductibles_scores_ten() {
        let mut none = baseline_policy("a", 1000);
        none.deductibles.clear();
        let mut high = baseline_policy("b", 1000);
        high.deductibles.insert("general".to_owned(), Decimal::new(5000, 0));
        let low = baseline_policy("c", 1000);
        let context = ScoringContext::from_batch(&[none.clone(), high.clone(), low.clone()]);

        assert_eq!(deductible_score(&none, &context), 10.0);
        assert_eq!(deductible_score(&high, &context), 0.0);
        assert_eq!(deductible_score(&low, &context), 10.0);
    }

    #[test]
    fn exclusions_score_relative_to_batch_maximum() {
        let mut many = baseline_policy("a", 1000);
        many.exclusions = vec!["war".into(), "flood".into(), "mold".into(), "terrorism".into()];
        let mut one = baseline_policy("b", 1000);
        one.exclusions = vec!["war".into()];
        let context = ScoringContext::from_batch(&[many.clone(), one.clone()]);

        assert_eq!(exclusions_score(&many, &context), 0.0);
        assert_eq!(exclusions_score(&one, &context), 7.5);
    }

    #[test]
    fn insurer_rating_takes_best_system() {
        let rating = InsurerRating {
            am_best: Some("B+".to_owned()),
            standard_and_poors: Some("aa-".to_owned()),
            financial_strength: Some(62.0),
        };
        assert_eq!(insurer_rating_score(&rating), 8.5);
    }

    #[test]
    fn financial_strength_maps_through_bands() {
        let strength = |value: f64| InsurerRating {
            financial_strength: Some(value),
            ..InsurerRating::default()
        };
        assert_eq!(insurer_rating_score(&strength(100.0)), 10.0);
        assert_eq!(insurer_rating_score(&strength(90.0)), 10.0);
        assert_eq!(insurer_rating_score(&strength(89.9)), 9.0);
        assert_eq!(insurer_rating_score(&strength(62.0)), 7.0);
        assert_eq!(insurer_rating_score(&strength(5.0)), 1.0);
        // Negative and non-finite values are unrecognized, so neutral.
        assert_eq!(insurer_rating_score(&strength(-3.0)), 5.0);
        assert_eq!(insurer_rating_score(&strength(f64::NAN)), 5.0);
    }

    #[test]
    fn unknown_or_missing_ratings_are_neutral() {
        assert_eq!(insurer_rating_score(&InsurerRating::default()), 5.0);
        let unknown = InsurerRating { am_best: Some("Z?".to_owned()), ..InsurerRating::default() };
        assert_eq!(insurer_rating_score(&unknown), 5.0);
    }

    #[test]
    fn claims_process_combines_weighted_sub_scores() {
        let claims = ClaimsProcess {
            average_settlement_days: Some(30.0),
            customer_satisfaction: Some(5.0),
            approval_rate_pct: Some(90.0),
            digital_claims: true,
        };
        // 1.5 + 3.0 + 1.8 + 2.0
        assert_eq!(claims_process_score(&claims), 8.3);

        let slow = ClaimsProcess { average_settlement_days: Some(120.0), ..ClaimsProcess::default() };
        assert_eq!(claims_process_score(&slow), 0.0);
    }

    #[test]
    fn customer_service_rescales_one_to_five() {
        assert_eq!(customer_service_score(Some(1.0)), 0.0);
        assert_eq!(customer_service_score(Some(4.0)), 7.5);
        assert_eq!(customer_service_score(Some(9.0)), 10.0);
        assert_eq!(customer_service_score(None), 5.0);
    }
}
