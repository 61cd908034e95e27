use std::cmp::Ordering;

use super::matrix::matrix_entry;
use super::types::{PriorityTier, Recommendation, RiskFactor, Timeframe};

const BASE_REDUCTION: f64 = 0.70;
const REGULATORY_BONUS: f64 = 0.20;
const REGULATORY_CAP: f64 = 0.90;
const CONTINUITY_BONUS: f64 = 0.15;
const CONTINUITY_CAP: f64 = 0.85;

pub fn priority_tier(risk_score: u8, regulatory: bool) -> PriorityTier {
    if risk_score >= 16 || regulatory {
        PriorityTier::Immediate
    } else if risk_score >= 12 {
        PriorityTier::High
    } else if risk_score >= 8 {
        PriorityTier::Medium
    } else {
        PriorityTier::Low
    }
}

/// Expected fraction of exposure removed by acting on the factor. Only one
/// bonus applies: a factor flagged both regulatory and continuity gets the
/// regulatory bonus alone.
pub fn risk_reduction(factor: &RiskFactor) -> f64 {
    if factor.regulatory {
        (BASE_REDUCTION + REGULATORY_BONUS).min(REGULATORY_CAP)
    } else if factor.continuity {
        (BASE_REDUCTION + CONTINUITY_BONUS).min(CONTINUITY_CAP)
    } else {
        BASE_REDUCTION
    }
}

pub fn roi_score(exposure: f64, reduction: f64, cost: f64) -> f64 {
    if cost <= 0.0 {
        return 0.0;
    }
    exposure * reduction / cost
}

/// Category action for the tier; the generic sentence only covers a
/// category with no text for that tier.
fn action_text(factor: &RiskFactor, tier: PriorityTier) -> String {
    let profile = factor.category.profile();
    let action = match tier {
        PriorityTier::Immediate | PriorityTier::High => profile.urgent_action,
        PriorityTier::Medium | PriorityTier::Low => profile.routine_action,
    };
    if action.trim().is_empty() {
        return generic_action(&factor.name);
    }
    action.to_owned()
}

fn generic_action(risk_name: &str) -> String {
    format!(
        "Monitor {} exposure and revisit coverage limits at the next renewal",
        risk_name.to_lowercase()
    )
}

pub fn recommend(factor: &RiskFactor) -> Recommendation {
    let entry = matrix_entry(factor);
    let priority = priority_tier(entry.risk_score, factor.regulatory);
    let reduction = risk_reduction(factor);

    Recommendation {
        category: factor.category,
        risk_name: factor.name.clone(),
        priority,
        action: action_text(factor, priority),
        estimated_cost: factor.mitigation_cost,
        timeframe: Timeframe::for_tier(priority),
        risk_reduction: reduction,
        roi_score: roi_score(factor.financial_exposure, reduction, factor.mitigation_cost),
    }
}

/// Most urgent tier first; within a tier, highest ROI first.
pub fn prioritize(recommendations: &mut [Recommendation]) {
    recommendations.sort_by(|left, right| {
        right
            .priority
            .cmp(&left.priority)
            .then_with(|| right.roi_score.partial_cmp(&left.roi_score).unwrap_or(Ordering::Equal))
    });
}

pub fn generate_recommendations(factors: &[RiskFactor]) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = factors.iter().map(recommend).collect();
    prioritize(&mut recommendations);
    recommendations
}
