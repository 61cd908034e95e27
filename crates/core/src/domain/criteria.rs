use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// The seven attribute families a policy is scored on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringDimension {
    Premium,
    Coverage,
    Deductible,
    Exclusions,
    InsurerRating,
    ClaimsProcess,
    CustomerService,
}

impl ScoringDimension {
    pub const ALL: [ScoringDimension; 7] = [
        Self::Premium,
        Self::Coverage,
        Self::Deductible,
        Self::Exclusions,
        Self::InsurerRating,
        Self::ClaimsProcess,
        Self::CustomerService,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Premium => "premium",
            Self::Coverage => "coverage",
            Self::Deductible => "deductible",
            Self::Exclusions => "exclusions",
            Self::InsurerRating => "insurer rating",
            Self::ClaimsProcess => "claims process",
            Self::CustomerService => "customer service",
        }
    }
}

/// Relative importance per dimension. Weights need not sum to any fixed
/// total; aggregation divides by their sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriorityWeights {
    #[serde(default)]
    pub premium: f64,
    #[serde(default)]
    pub coverage: f64,
    #[serde(default)]
    pub deductible: f64,
    #[serde(default)]
    pub exclusions: f64,
    #[serde(default)]
    pub insurer_rating: f64,
    #[serde(default)]
    pub claims_process: f64,
    #[serde(default)]
    pub customer_service: f64,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self::uniform(1.0)
    }
}

impl PriorityWeights {
    pub fn uniform(weight: f64) -> Self {
        Self {
            premium: weight,
            coverage: weight,
            deductible: weight,
            exclusions: weight,
            insurer_rating: weight,
            claims_process: weight,
            customer_service: weight,
        }
    }

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

    pub fn with(mut self, dimension: ScoringDimension, weight: f64) -> Self {
        let slot = match dimension {
            ScoringDimension::Premium => &mut self.premium,
            ScoringDimension::Coverage => &mut self.coverage,
            ScoringDimension::Deductible => &mut self.deductible,
            ScoringDimension::Exclusions => &mut self.exclusions,
            ScoringDimension::InsurerRating => &mut self.insurer_rating,
            ScoringDimension::ClaimsProcess => &mut self.claims_process,
            ScoringDimension::CustomerService => &mut self.customer_service,
        };
        *slot = weight;
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (ScoringDimension, f64)> + '_ {
        ScoringDimension::ALL.into_iter().map(|dimension| (dimension, self.get(dimension)))
    }

    pub fn total(&self) -> f64 {
        self.iter().map(|(_, weight)| weight).sum()
    }

    /// Highest-weighted dimension; ties resolve to the earliest dimension in
    /// canonical order. `None` when every weight is zero.
    pub fn top_dimension(&self) -> Option<ScoringDimension> {
        let mut best: Option<(ScoringDimension, f64)> = None;
        for (dimension, weight) in self.iter() {
            if weight <= 0.0 {
                continue;
            }
            if best.map_or(true, |(_, current)| weight > current) {
                best = Some((dimension, weight));
            }
        }
        best.map(|(dimension, _)| dimension)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        for (dimension, value) in self.iter() {
            if !value.is_finite() || value < 0.0 {
                return Err(DomainError::InvalidWeight { dimension, value });
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl BudgetRange {
    pub fn contains(&self, annual_premium: Decimal) -> bool {
        annual_premium >= self.min && annual_premium <= self.max
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.min > self.max {
            return Err(DomainError::InvalidBudget {
                min: self.min.to_string(),
                max: self.max.to_string(),
            });
        }
        Ok(())
    }
}

/// What the caller is shopping for.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComparisonCriteria {
    pub budget: BudgetRange,
    /// Falls back to the configured default weights when absent.
    #[serde(default)]
    pub priorities: Option<PriorityWeights>,
    pub insurance_type: String,
    pub market: String,
    #[serde(default)]
    pub must_have_features: Vec<String>,
    #[serde(default)]
    pub deal_breakers: Vec<String>,
}

impl ComparisonCriteria {
    pub fn validate(&self) -> Result<(), DomainError> {
        self.budget.validate()?;
        if let Some(priorities) = &self.priorities {
            priorities.validate()?;
        }
        Ok(())
    }
}
