use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PolicyId(pub String);

impl fmt::Display for PolicyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PremiumFrequency {
    Monthly,
    Quarterly,
    #[default]
    Annual,
}

impl PremiumFrequency {
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Self::Monthly => 12,
            Self::Quarterly => 4,
            Self::Annual => 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Premium {
    pub amount: Decimal,
    #[serde(default)]
    pub frequency: PremiumFrequency,
    pub currency: String,
}

impl Premium {
    /// Amount scaled to a yearly figure, or `None` when the product
    /// overflows `Decimal`.
    pub fn annual_amount(&self) -> Option<Decimal> {
        self.amount.checked_mul(Decimal::from(self.frequency.periods_per_year()))
    }
}

/// Ratings as reported by the issuing agencies. Codes are kept verbatim and
/// interpreted by the insurer-rating scorer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InsurerRating {
    #[serde(default)]
    pub am_best: Option<String>,
    #[serde(default)]
    pub standard_and_poors: Option<String>,
    /// Numeric financial-strength score on a 0-100 scale.
    #[serde(default)]
    pub financial_strength: Option<f64>,
}

impl InsurerRating {
    pub fn is_empty(&self) -> bool {
        self.am_best.is_none() && self.standard_and_poors.is_none() && self.financial_strength.is_none()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimsProcess {
    #[serde(default)]
    pub average_settlement_days: Option<f64>,
    /// Customer satisfaction on a 1-5 scale.
    #[serde(default)]
    pub customer_satisfaction: Option<f64>,
    /// Approval rate as a percentage (0-100).
    #[serde(default)]
    pub approval_rate_pct: Option<f64>,
    #[serde(default)]
    pub digital_claims: bool,
}

/// A single insurance offer as delivered by the ingestion step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    pub id: PolicyId,
    pub name: String,
    pub insurer: String,
    pub insurance_type: String,
    pub market: String,
    pub premium: Premium,
    #[serde(default)]
    pub coverage: BTreeMap<String, Decimal>,
    #[serde(default)]
    pub deductibles: BTreeMap<String, Decimal>,
    #[serde(default)]
    pub exclusions: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub insurer_rating: InsurerRating,
    #[serde(default)]
    pub claims_process: ClaimsProcess,
    /// Customer service rating on a 1-5 scale.
    #[serde(default)]
    pub customer_service_rating: Option<f64>,
}

impl Policy {
    /// Annual premium as a float, or `None` when the premium is missing,
    /// non-positive or not representable.
    pub fn annual_premium(&self) -> Option<f64> {
        self.premium.annual_amount().and_then(decimal_to_f64).filter(|value| *value > 0.0)
    }

    /// Number of distinct coverage types carrying a positive limit.
    pub fn covered_type_count(&self) -> usize {
        self.coverage.values().filter(|limit| **limit > Decimal::ZERO).count()
    }

    pub fn positive_deductibles(&self) -> impl Iterator<Item = f64> + '_ {
        self.deductibles.values().filter_map(|value| decimal_to_f64(*value)).filter(|value| *value > 0.0)
    }

    pub fn average_deductible(&self) -> Option<f64> {
        let (sum, count) =
            self.positive_deductibles().fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
        (count > 0).then(|| sum / count as f64)
    }

    /// Case-insensitive match of a required feature against listed features
    /// and coverage type names.
    pub fn offers_feature(&self, feature: &str) -> bool {
        let needle = feature.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.features.iter().any(|item| item.to_lowercase().contains(&needle))
            || self
                .coverage
                .iter()
                .any(|(name, limit)| *limit > Decimal::ZERO && name.to_lowercase().contains(&needle))
    }

    pub fn excludes(&self, clause: &str) -> bool {
        let needle = clause.trim().to_lowercase();
        !needle.is_empty() && self.exclusions.iter().any(|item| item.to_lowercase().contains(&needle))
    }
}

/// A comparison batch must use unique ids and a single premium currency;
/// premiums in different currencies cannot be normalized against each other.
pub fn validate_batch(policies: &[Policy]) -> Result<(), DomainError> {
    let mut seen = BTreeSet::new();
    for policy in policies {
        if !seen.insert(&policy.id) {
            return Err(DomainError::InvariantViolation(format!(
                "duplicate policy id `{}`",
                policy.id
            )));
        }
    }

    if let Some(first) = policies.first() {
        let currency = first.premium.currency.trim();
        if let Some(other) = policies
            .iter()
            .find(|policy| !policy.premium.currency.trim().eq_ignore_ascii_case(currency))
        {
            return Err(DomainError::InvariantViolation(format!(
                "policy `{}` is priced in {} but the batch uses {}",
                other.id, other.premium.currency, currency
            )));
        }
    }
    Ok(())
}

pub(crate) fn decimal_to_f64(value: Decimal) -> Option<f64> {
    value.to_f64().filter(|value| value.is_finite())
}
