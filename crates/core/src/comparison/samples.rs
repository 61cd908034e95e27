//! Synthetic policies for demos and for callers that want a fallback batch
//! when a comparison finds nothing eligible.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::domain::policy::{
    ClaimsProcess, InsurerRating, Policy, PolicyId, Premium, PremiumFrequency,
};

/// A plain commercial policy with one coverage line, one deductible and no
/// exclusions. Tests vary single fields from here.
pub fn baseline_policy(id: &str, annual_premium: i64) -> Policy {
    Policy {
        id: PolicyId(id.to_owned()),
        name: format!("Policy {id}"),
        insurer: "Baseline Mutual".to_owned(),
        insurance_type: "commercial".to_owned(),
        market: "us".to_owned(),
        premium: Premium {
            amount: Decimal::new(annual_premium, 0),
            frequency: PremiumFrequency::Annual,
            currency: "USD".to_owned(),
        },
        coverage: limits(&[("General Liability", 1_000_000)]),
        deductibles: limits(&[("general", 1_000)]),
        exclusions: Vec::new(),
        features: Vec::new(),
        insurer_rating: InsurerRating::default(),
        claims_process: ClaimsProcess::default(),
        customer_service_rating: None,
    }
}

/// Deterministic five-policy commercial batch for the US market.
pub fn sample_policies() -> Vec<Policy> {
    vec![
        Policy {
            name: "Business Shield Plus".to_owned(),
            insurer: "Harbor Casualty".to_owned(),
            coverage: limits(&[
                ("General Liability", 2_000_000),
                ("Property", 750_000),
                ("Cyber Liability", 500_000),
                ("Business Interruption", 250_000),
            ]),
            deductibles: limits(&[("general", 2_500), ("property", 5_000)]),
            exclusions: strings(&["War", "Nuclear"]),
            features: strings(&["24/7 claims hotline", "Breach response team"]),
            insurer_rating: rating(Some("A+"), Some("AA-"), None),
            claims_process: claims(Some(14.0), Some(4.5), Some(92.0), true),
            customer_service_rating: Some(4.6),
            ..baseline_policy("sample-shield-plus", 4_800)
        },
        Policy {
            name: "Main Street Essentials".to_owned(),
            insurer: "Cornerstone Insurance".to_owned(),
            premium: Premium {
                amount: Decimal::new(250, 0),
                frequency: PremiumFrequency::Monthly,
                currency: "USD".to_owned(),
            },
            coverage: limits(&[("General Liability", 1_000_000), ("Property", 300_000)]),
            deductibles: limits(&[("general", 1_000), ("property", 2_500)]),
            exclusions: strings(&["War", "Flood", "Cyber events", "Mold"]),
            features: strings(&["Online policy management"]),
            insurer_rating: rating(Some("B+"), None, None),
            claims_process: claims(Some(35.0), Some(3.4), Some(81.0), true),
            customer_service_rating: Some(3.8),
            ..baseline_policy("sample-main-street", 0)
        },
        Policy {
            name: "Enterprise Complete".to_owned(),
            insurer: "Summit Re Commercial".to_owned(),
            coverage: limits(&[
                ("General Liability", 5_000_000),
                ("Property", 2_000_000),
                ("Cyber Liability", 2_000_000),
                ("Business Interruption", 1_000_000),
                ("Professional Liability", 1_000_000),
                ("Directors and Officers", 3_000_000),
            ]),
            deductibles: limits(&[("general", 10_000), ("property", 25_000), ("cyber", 15_000)]),
            exclusions: strings(&["War"]),
            features: strings(&["Dedicated account manager", "Risk engineering visits"]),
            insurer_rating: rating(Some("A++"), Some("AAA"), Some(96.0)),
            claims_process: claims(Some(21.0), Some(4.2), Some(95.0), true),
            customer_service_rating: Some(4.4),
            ..baseline_policy("sample-enterprise", 12_500)
        },
        Policy {
            name: "Starter Liability".to_owned(),
            insurer: "Pennywise Direct".to_owned(),
            premium: Premium {
                amount: Decimal::new(450, 0),
                frequency: PremiumFrequency::Quarterly,
                currency: "USD".to_owned(),
            },
            deductibles: BTreeMap::new(),
            exclusions: strings(&[
                "War",
                "Flood",
                "Earthquake",
                "Cyber events",
                "Professional services",
                "Pollution",
            ]),
            insurer_rating: rating(None, Some("BBB"), None),
            claims_process: claims(Some(55.0), Some(2.9), Some(70.0), false),
            customer_service_rating: Some(3.1),
            ..baseline_policy("sample-starter", 0)
        },
        Policy {
            name: "Tech Professional Package".to_owned(),
            insurer: "Circuit Mutual".to_owned(),
            coverage: limits(&[
                ("General Liability", 1_000_000),
                ("Professional Liability", 2_000_000),
                ("Cyber Liability", 1_000_000),
            ]),
            deductibles: limits(&[("general", 1_000), ("cyber", 5_000)]),
            exclusions: strings(&["War", "Bodily injury from products"]),
            features: strings(&["Breach response team", "Contract review"]),
            insurer_rating: rating(Some("A"), None, Some(88.0)),
            claims_process: claims(Some(18.0), None, Some(90.0), true),
            customer_service_rating: None,
            ..baseline_policy("sample-tech-pro", 6_200)
        },
    ]
}

fn limits(entries: &[(&str, i64)]) -> BTreeMap<String, Decimal> {
    entries.iter().map(|(name, amount)| ((*name).to_owned(), Decimal::new(*amount, 0))).collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_owned()).collect()
}

fn rating(am_best: Option<&str>, agency: Option<&str>, strength: Option<f64>) -> InsurerRating {
    InsurerRating {
        am_best: am_best.map(str::to_owned),
        standard_and_poors: agency.map(str::to_owned),
        financial_strength: strength,
    }
}

fn claims(
    days: Option<f64>,
    satisfaction: Option<f64>,
    approval: Option<f64>,
    digital: bool,
) -> ClaimsProcess {
    ClaimsProcess {
        average_settlement_days: days,
        customer_satisfaction: satisfaction,
        approval_rate_pct: approval,
        digital_claims: digital,
    }
}
