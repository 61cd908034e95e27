use std::path::PathBuf;

use policyscope_core::comparison::samples::sample_policies;
use policyscope_core::comparison::{ComparisonOutcome, ComparisonPipeline, ComparisonReport};
use policyscope_core::config::LoadOptions;
use policyscope_core::domain::criteria::ComparisonCriteria;
use policyscope_core::domain::policy::{validate_batch, Policy};
use policyscope_core::errors::ApplicationError;
use policyscope_core::metrics::UsageMetrics;
use policyscope_core::scoring::DeterministicScoringEngine;
use serde::Serialize;
use tracing::warn;

use crate::commands::{load_config, read_json, to_payload, CommandResult};

const COMMAND: &str = "compare";

#[derive(Debug, Clone)]
pub struct CompareArgs {
    pub policies: PathBuf,
    pub criteria: PathBuf,
    pub sample_on_empty: bool,
}

#[derive(Debug, Serialize)]
struct ComparePayload {
    report: ComparisonReport,
    /// True when the ranked results come from the built-in sample batch.
    sample_fallback: bool,
    metrics: UsageMetrics,
}

pub fn run(options: &LoadOptions, args: &CompareArgs) -> CommandResult {
    match execute(options, args) {
        Ok((message, payload)) => CommandResult::success_with(COMMAND, message, Some(payload)),
        Err(error) => CommandResult::from_error(COMMAND, &error),
    }
}

fn execute(
    options: &LoadOptions,
    args: &CompareArgs,
) -> Result<(String, serde_json::Value), ApplicationError> {
    let config = load_config(options)?;
    let policies: Vec<Policy> = read_json(&args.policies, "policies")?;
    let criteria: ComparisonCriteria = read_json(&args.criteria, "criteria")?;

    validate_batch(&policies)?;
    criteria.validate()?;

    let pipeline =
        ComparisonPipeline::new(DeterministicScoringEngine, config.scoring.default_weights);
    let mut report = pipeline.compare(&policies, &criteria);
    let mut metrics = report.metrics.clone();
    let mut sample_fallback = false;

    if args.sample_on_empty && matches!(report.outcome, ComparisonOutcome::NoEligiblePolicies { .. }) {
        warn!(
            event_name = "cli.compare.sample_fallback",
            run_id = %report.run_id,
            "no eligible policies; ranking the sample batch instead"
        );
        let samples = sample_policies();
        // Samples are all one type and market; budget and feature filters still apply.
        let mut relaxed = criteria.clone();
        if let Some(first) = samples.first() {
            relaxed.insurance_type = first.insurance_type.clone();
            relaxed.market = first.market.clone();
        }
        let fallback = pipeline.compare(&samples, &relaxed);
        metrics.merge(&fallback.metrics);
        if !fallback.outcome.is_empty() {
            report = fallback;
            sample_fallback = true;
        }
    }

    let message = match &report.outcome {
        ComparisonOutcome::Ranked { results } => format!("ranked {} policies", results.len()),
        ComparisonOutcome::NoEligiblePolicies { candidates } => {
            format!("no eligible policies among {candidates} candidates")
        }
    };
    let payload = to_payload(&ComparePayload { report, sample_fallback, metrics })?;
    Ok((message, payload))
}
