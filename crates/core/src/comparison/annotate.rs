use crate::domain::criteria::{PriorityWeights, ScoringDimension};
use crate::scoring::DimensionScores;

pub const STRENGTH_THRESHOLD: f64 = 8.0;
pub const WEAKNESS_THRESHOLD: f64 = 5.0;

fn strength_text(dimension: ScoringDimension) -> &'static str {
    match dimension {
        ScoringDimension::Premium => "Competitive premium for this comparison",
        ScoringDimension::Coverage => "Broad coverage across insured risks",
        ScoringDimension::Deductible => "Low deductibles keep out-of-pocket costs down",
        ScoringDimension::Exclusions => "Few exclusions limit unexpected claim denials",
        ScoringDimension::InsurerRating => "Financially strong, highly rated insurer",
        ScoringDimension::ClaimsProcess => "Fast, well-regarded claims handling",
        ScoringDimension::CustomerService => "Strong customer service reputation",
    }
}

fn weakness_text(dimension: ScoringDimension) -> &'static str {
    match dimension {
        ScoringDimension::Premium => "Premium is high relative to alternatives",
        ScoringDimension::Coverage => "Narrower coverage than other options",
        ScoringDimension::Deductible => "Deductibles are higher than alternatives",
        ScoringDimension::Exclusions => "More exclusions than comparable policies",
        ScoringDimension::InsurerRating => "Insurer rating is weak or unverified",
        ScoringDimension::ClaimsProcess => "Claims process is slow or poorly rated",
        ScoringDimension::CustomerService => "Customer service ratings are below average",
    }
}

pub fn strengths(scores: &DimensionScores) -> Vec<String> {
    scores
        .iter()
        .filter(|(_, score)| *score >= STRENGTH_THRESHOLD)
        .map(|(dimension, _)| strength_text(dimension).to_owned())
        .collect()
}

pub fn weaknesses(scores: &DimensionScores) -> Vec<String> {
    scores
        .iter()
        .filter(|(_, score)| *score < WEAKNESS_THRESHOLD)
        .map(|(dimension, _)| weakness_text(dimension).to_owned())
        .collect()
}

/// One sentence keyed on the caller's top priority when the policy does well
/// there, otherwise on the overall score.
pub fn recommendation_sentence(
    scores: &DimensionScores,
    total: f64,
    weights: &PriorityWeights,
) -> String {
    if let Some(top) = weights.top_dimension() {
        if scores.get(top) >= STRENGTH_THRESHOLD {
            return format!(
                "Strong match for your top priority: {} scores {:.1}/10",
                top.label(),
                scores.get(top)
            );
        }
    }

    if total >= 8.0 {
        "Excellent overall fit for your requirements".to_owned()
    } else if total >= 6.5 {
        "Good overall fit with a few trade-offs".to_owned()
    } else if total >= 5.0 {
        "Adequate option; review the weaknesses before committing".to_owned()
    } else {
        "Weak fit; consider other options first".to_owned()
    }
}
