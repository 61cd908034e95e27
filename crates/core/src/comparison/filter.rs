use rust_decimal::Decimal;

use crate::domain::criteria::ComparisonCriteria;
use crate::domain::policy::Policy;

/// Why a candidate was left out of a comparison.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Ineligibility {
    InsuranceType,
    Market,
    OutsideBudget,
    MissingFeature(String),
    DealBreaker(String),
}

impl Ineligibility {
    pub fn reason_code(&self) -> &'static str {
        match self {
            Self::InsuranceType => "insurance_type",
            Self::Market => "market",
            Self::OutsideBudget => "outside_budget",
            Self::MissingFeature(_) => "missing_feature",
            Self::DealBreaker(_) => "deal_breaker",
        }
    }
}

/// First rule the policy fails, checked in a fixed order: type, market,
/// budget, must-have features, deal-breakers.
pub fn check_eligibility(
    policy: &Policy,
    criteria: &ComparisonCriteria,
) -> Result<(), Ineligibility> {
    if !same_label(&policy.insurance_type, &criteria.insurance_type) {
        return Err(Ineligibility::InsuranceType);
    }
    if !same_label(&policy.market, &criteria.market) {
        return Err(Ineligibility::Market);
    }

    match policy.premium.annual_amount() {
        Some(annual) if annual > Decimal::ZERO && criteria.budget.contains(annual) => {}
        _ => return Err(Ineligibility::OutsideBudget),
    }

    if let Some(missing) =
        criteria.must_have_features.iter().find(|feature| !policy.offers_feature(feature))
    {
        return Err(Ineligibility::MissingFeature(missing.clone()));
    }
    if let Some(clause) = criteria.deal_breakers.iter().find(|clause| policy.excludes(clause)) {
        return Err(Ineligibility::DealBreaker(clause.clone()));
    }
    Ok(())
}

fn same_label(left: &str, right: &str) -> bool {
    left.trim().eq_ignore_ascii_case(right.trim())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{check_eligibility, Ineligibility};
    use crate::domain::policy::Policy;
    use crate::comparison::samples::baseline_policy;
    use crate::domain::criteria::{BudgetRange, ComparisonCriteria};
    use crate::domain::policy::PremiumFrequency;

    fn is_eligible(policy: &Policy, criteria: &ComparisonCriteria) -> bool {
        check_eligibility(policy, criteria).is_ok()
    }

    fn criteria() -> ComparisonCriteria {
        ComparisonCriteria {
            budget: BudgetRange { min: Decimal::new(1_000, 0), max: Decimal::new(2_000, 0) },
            priorities: None,
            insurance_type: "Commercial".to_owned(),
            market: "US".to_owned(),
            must_have_features: Vec::new(),
            deal_breakers: Vec::new(),
        }
    }

    #[test]
    fn type_and_market_match_case_insensitively() {
        assert!(is_eligible(&baseline_policy("a", 1_500), &criteria()));

        let mut other_market = baseline_policy("b", 1_500);
        other_market.market = "uk".to_owned();
        assert_eq!(check_eligibility(&other_market, &criteria()), Err(Ineligibility::Market));

        let mut other_type = baseline_policy("c", 1_500);
        other_type.insurance_type = "auto".to_owned();
        assert_eq!(check_eligibility(&other_type, &criteria()), Err(Ineligibility::InsuranceType));
    }

    #[test]
    fn budget_bounds_are_inclusive_on_annualized_premium() {
        assert!(is_eligible(&baseline_policy("min", 1_000), &criteria()));
        assert!(is_eligible(&baseline_policy("max", 2_000), &criteria()));
        assert!(!is_eligible(&baseline_policy("over", 2_001), &criteria()));
        assert!(!is_eligible(&baseline_policy("zero", 0), &criteria()));

        let mut monthly = baseline_policy("monthly", 200);
        monthly.premium.frequency = PremiumFrequency::Monthly;
        assert_eq!(check_eligibility(&monthly, &criteria()), Err(Ineligibility::OutsideBudget));
    }

    #[test]
    fn overflowing_annual_premium_is_outside_any_budget() {
        let mut huge = baseline_policy("huge", 1);
        huge.premium.amount = Decimal::MAX;
        huge.premium.frequency = PremiumFrequency::Monthly;

        let mut open = criteria();
        open.budget = BudgetRange { min: Decimal::ZERO, max: Decimal::MAX };
        assert_eq!(check_eligibility(&huge, &open), Err(Ineligibility::OutsideBudget));

        huge.premium.frequency = PremiumFrequency::Annual;
        assert!(is_eligible(&huge, &open));
    }

    #[test]
    fn features_and_deal_breakers_use_substrings() {
        let mut policy = baseline_policy("a", 1_500);
        policy.features.push("24/7 Claims Hotline".to_owned());
        policy.exclusions.push("Flood damage".to_owned());

        let mut wanted = criteria();
        wanted.must_have_features = vec!["claims hotline".to_owned(), "liability".to_owned()];
        assert!(is_eligible(&policy, &wanted));

        wanted.must_have_features.push("cyber".to_owned());
        assert_eq!(
            check_eligibility(&policy, &wanted),
            Err(Ineligibility::MissingFeature("cyber".to_owned()))
        );

        let mut strict = criteria();
        strict.deal_breakers = vec!["flood".to_owned()];
        let rejected = check_eligibility(&policy, &strict).unwrap_err();
        assert_eq!(rejected.reason_code(), "deal_breaker");
    }
}
