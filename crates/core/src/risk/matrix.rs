use super::types::{GridPosition, RiskColor, RiskFactor, RiskMatrixEntry};

/// Projects a factor onto the 5x5 impact/probability grid.
pub fn matrix_entry(factor: &RiskFactor) -> RiskMatrixEntry {
    let impact = factor.impact.score();
    let probability = factor.probability.score();
    let risk_score = impact * probability;

    RiskMatrixEntry {
        category: factor.category,
        name: factor.name.clone(),
        impact,
        probability,
        risk_score,
        position: GridPosition { x: impact - 1, y: probability - 1 },
        color: RiskColor::from_score(risk_score),
    }
}

pub fn build_risk_matrix(factors: &[RiskFactor]) -> Vec<RiskMatrixEntry> {
    factors.iter().map(matrix_entry).collect()
}

#[cfg(test)]
mod tests {
    use super::{build_risk_matrix, matrix_entry};
    use crate::risk::catalog::RiskCategory;
    use crate::risk::types::{GridPosition, ImpactLevel, ProbabilityLevel, RiskColor, RiskFactor};

    fn factor(impact: ImpactLevel, probability: ProbabilityLevel) -> RiskFactor {
        RiskFactor {
            category: RiskCategory::SupplyChain,
            name: "Supply Chain".to_owned(),
            impact,
            probability,
            impact_score: f64::from(impact.score()),
            probability_score: f64::from(probability.score()),
            financial_exposure: 80_000.0,
            mitigation_cost: 12_000.0,
            regulatory: false,
            continuity: true,
            reputational: false,
            matched_keywords: vec!["supplier".to_owned()],
            confidence: 0.4,
        }
    }

    #[test]
    fn entry_multiplies_axis_scores() {
        let entry = matrix_entry(&factor(ImpactLevel::Critical, ProbabilityLevel::Possible));
        assert_eq!(entry.risk_score, 12);
        assert_eq!(entry.position, GridPosition { x: 3, y: 2 });
        assert_eq!(entry.color, RiskColor::Orange);
    }

    #[test]
    fn corners_of_the_grid() {
        let matrix = build_risk_matrix(&[
            factor(ImpactLevel::Low, ProbabilityLevel::Rare),
            factor(ImpactLevel::Catastrophic, ProbabilityLevel::AlmostCertain),
        ]);
        assert_eq!((matrix[0].risk_score, matrix[0].color), (1, RiskColor::Green));
        assert_eq!((matrix[1].risk_score, matrix[1].color), (25, RiskColor::Red));
        assert_eq!(matrix[1].position, GridPosition { x: 4, y: 4 });
    }
}
