use std::path::Path;

use policyscope_core::config::LoadOptions;
use policyscope_core::errors::ApplicationError;
use policyscope_core::risk::{KeywordRiskDetector, RiskAssessmentInput, RiskAssessor};

use crate::commands::{load_config, read_json, to_payload, CommandResult};

const COMMAND: &str = "assess";

pub fn run(options: &LoadOptions, input: &Path) -> CommandResult {
    match execute(options, input) {
        Ok((message, payload)) => CommandResult::success_with(COMMAND, message, Some(payload)),
        Err(error) => CommandResult::from_error(COMMAND, &error),
    }
}

fn execute(
    options: &LoadOptions,
    input: &Path,
) -> Result<(String, serde_json::Value), ApplicationError> {
    let config = load_config(options)?;
    let input: RiskAssessmentInput = read_json(input, "assessment input")?;

    let assessor = RiskAssessor::new(KeywordRiskDetector::new(config.risk));
    let run = assessor.assess(&input);

    let message = format!(
        "detected {} risk factors; overall score {:.2} ({:?})",
        run.assessment.prioritized_risks.len(),
        run.assessment.overall_score,
        run.assessment.risk_level
    );
    let payload = serde_json::json!({
        "assessment": to_payload(&run.assessment)?,
        "metrics": to_payload(&run.metrics)?,
    });
    Ok((message, payload))
}
