use serde::{Deserialize, Serialize};
use tracing::debug;

use super::catalog::{CategoryProfile, RiskCategory};
use super::types::{ImpactLevel, OrganizationProfile, ProbabilityLevel, RiskFactor};

/// Words suggesting the surrounding risk is already handled.
const COVERAGE_TERMS: &[&str] =
    &["covered", "insured", "adequate", "protected", "mitigated", "comprehensive", "sufficient"];

/// Words suggesting the surrounding risk is open.
const GAP_TERMS: &[&str] = &[
    "gap",
    "gaps",
    "missing",
    "insufficient",
    "inadequate",
    "excluded",
    "exclusion",
    "lack",
    "lacks",
    "uninsured",
    "underinsured",
    "exposed",
];

const COVERAGE_FACTOR: f64 = 0.7;
const GAP_FACTOR: f64 = 1.3;
const MIN_CONTEXT_MULTIPLIER: f64 = 0.3;
const MAX_CONTEXT_MULTIPLIER: f64 = 2.0;
const SCALE_MAX: f64 = 5.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskDetectorConfig {
    /// Characters inspected on each side of a matched keyword.
    pub context_window_chars: usize,
    /// Mitigation cost as a fraction of exposure.
    pub mitigation_cost_ratio: f64,
    /// Factors below this confidence are dropped.
    pub min_confidence: f64,
}

impl Default for RiskDetectorConfig {
    fn default() -> Self {
        Self { context_window_chars: 50, mitigation_cost_ratio: 0.15, min_confidence: 0.0 }
    }
}

pub trait RiskDetector: Send + Sync {
    /// Emits one factor per catalogue category with at least one keyword hit,
    /// in catalogue order. Categories without hits are not assessed.
    fn detect(&self, text: &str, profile: Option<&OrganizationProfile>) -> Vec<RiskFactor>;
}

#[derive(Clone, Debug, Default)]
pub struct KeywordRiskDetector {
    config: RiskDetectorConfig,
}

impl KeywordRiskDetector {
    pub fn new(config: RiskDetectorConfig) -> Self {
        Self { config }
    }

    fn assess_category(
        &self,
        category: RiskCategory,
        normalized: &str,
        profile: Option<&OrganizationProfile>,
    ) -> Option<RiskFactor> {
        let catalogue = category.profile();
        let matches = match_keywords(catalogue, normalized);
        if matches.is_empty() {
            return None;
        }

        let keyword_density = matches.len() as f64 / catalogue.keywords.len() as f64;
        let context = context_multiplier(normalized, &matches, self.config.context_window_chars);

        let probability_score =
            (catalogue.base_probability * (1.0 + keyword_density) * context).min(SCALE_MAX);
        let industry_multiplier = profile
            .and_then(OrganizationProfile::industry)
            .map(|industry| category.industry_multiplier(industry))
            .unwrap_or(1.0);
        let impact_score = (catalogue.base_impact * industry_multiplier).min(SCALE_MAX);

        let scale = profile.map(OrganizationProfile::exposure_scale).unwrap_or(1.0);
        let financial_exposure = (catalogue.exposure_multiplier
            * (impact_score / SCALE_MAX)
            * (probability_score / SCALE_MAX)
            * scale)
            .round();

        let confidence = (0.7 * keyword_density + 0.3 * context).clamp(0.0, 1.0);
        if confidence < self.config.min_confidence {
            debug!(
                event_name = "risk.detector.below_confidence",
                category = catalogue.name,
                confidence,
                "dropping low-confidence risk factor"
            );
            return None;
        }

        Some(RiskFactor {
            category,
            name: catalogue.name.to_owned(),
            impact: ImpactLevel::from_score(impact_score),
            probability: ProbabilityLevel::from_score(probability_score),
            impact_score,
            probability_score,
            financial_exposure,
            mitigation_cost: (financial_exposure * self.config.mitigation_cost_ratio).round(),
            regulatory: catalogue.regulatory,
            continuity: catalogue.continuity,
            reputational: catalogue.reputational,
            matched_keywords: matches.iter().map(|hit| hit.keyword.to_owned()).collect(),
            confidence,
        })
    }
}

impl RiskDetector for KeywordRiskDetector {
    fn detect(&self, text: &str, profile: Option<&OrganizationProfile>) -> Vec<RiskFactor> {
        let normalized = text.to_lowercase();
        if normalized.trim().is_empty() {
            return Vec::new();
        }

        let factors: Vec<RiskFactor> = RiskCategory::ALL
            .into_iter()
            .filter_map(|category| self.assess_category(category, &normalized, profile))
            .collect();

        for factor in &factors {
            debug!(
                event_name = "risk.detector.factor",
                category = factor.name.as_str(),
                impact = factor.impact_score,
                probability = factor.probability_score,
                exposure = factor.financial_exposure,
                confidence = factor.confidence,
                "risk factor detected"
            );
        }
        factors
    }
}

#[derive(Debug, Clone, Copy)]
struct KeywordHit {
    keyword: &'static str,
    start: usize,
    end: usize,
}

fn match_keywords(catalogue: &CategoryProfile, normalized: &str) -> Vec<KeywordHit> {
    catalogue
        .keywords
        .iter()
        .filter_map(|&keyword| {
            normalized.find(keyword).map(|start| KeywordHit { keyword, start, end: start + keyword.len() })
        })
        .collect()
}

/// Product of 0.7 per coverage-affirming term and 1.3 per gap term found in
/// the window around each hit's first occurrence, clamped to [0.3, 2.0].
fn context_multiplier(normalized: &str, hits: &[KeywordHit], radius: usize) -> f64 {
    let mut multiplier = 1.0;
    for hit in hits {
        let window = context_window(normalized, hit.start, hit.end, radius);
        for term in COVERAGE_TERMS {
            multiplier *= COVERAGE_FACTOR.powi(count_term(window, term));
        }
        for term in GAP_TERMS {
            multiplier *= GAP_FACTOR.powi(count_term(window, term));
        }
    }
    multiplier.clamp(MIN_CONTEXT_MULTIPLIER, MAX_CONTEXT_MULTIPLIER)
}

fn context_window(text: &str, start: usize, end: usize, radius: usize) -> &str {
    let lower = text[..start].char_indices().rev().take(radius).last().map_or(start, |(index, _)| index);
    let upper = text[end..].char_indices().nth(radius).map_or(text.len(), |(index, _)| end + index);
    &text[lower..upper]
}

// Whole-word occurrences only, so "adequate" does not fire inside "inadequate".
fn count_term(window: &str, term: &str) -> i32 {
    window
        .match_indices(term)
        .filter(|(index, matched)| {
            let before = window[..*index].chars().next_back();
            let after = window[index + matched.len()..].chars().next();
            !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
        })
        .count() as i32
}
