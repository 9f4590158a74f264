//! Sequential driver: ingest → concat → clean → fit.
//!
//! Each cleaning strategy forms an independent branch over the same
//! concatenated table. Branches share nothing mutable and run on scoped
//! threads; results come back in strategy order.

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::io::{self, RunArtifacts};
use crate::linear_model::{FitQuality, FittedModel, fit_linear_model};
use crate::preprocessing::{CleaningStrategy, clean};
use crate::table::{Table, TableSummary, concat};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::thread;

#[derive(Debug, Clone)]
pub struct BranchOutput {
    pub strategy: CleaningStrategy,
    pub cleaned: Table,
    pub model: FittedModel,
    pub quality: FitQuality,
}

/// Cleans `table` with one strategy and fits a model on the result.
pub fn run_branch(table: &Table, strategy: CleaningStrategy, threshold: f64) -> Result<BranchOutput> {
    let span = tracing::info_span!("branch", %strategy);
    let _guard = span.enter();

    let cleaned = clean(table, strategy, threshold)?;
    let (model, quality) = fit_linear_model(&cleaned)?;
    tracing::info!("Adjusted R2: {:.3}", quality.adjusted_r2);

    Ok(BranchOutput {
        strategy,
        cleaned,
        model,
        quality,
    })
}

/// Runs one branch per strategy in parallel, one result per strategy.
pub fn run_branches(
    table: &Table,
    strategies: &[CleaningStrategy],
    threshold: f64,
) -> Vec<Result<BranchOutput>> {
    thread::scope(|scope| {
        let handles: Vec<_> = strategies
            .iter()
            .map(|&strategy| scope.spawn(move || run_branch(table, strategy, threshold)))
            .collect();

        handles
            .into_iter()
            .zip(strategies)
            .map(|(handle, &strategy)| branch_result(handle.join(), strategy))
            .collect()
    })
}

fn branch_result(
    joined: thread::Result<Result<BranchOutput>>,
    strategy: CleaningStrategy,
) -> Result<BranchOutput> {
    joined.unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic payload".to_string());
        Err(PipelineError::BranchPanicked {
            strategy: strategy.to_string(),
            message,
        })
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchReport {
    pub strategy: CleaningStrategy,
    pub cleaned: TableSummary,
    pub quality: FitQuality,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    pub model_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub inputs: Vec<PathBuf>,
    pub threshold: f64,
    pub concat: TableSummary,
    pub branches: Vec<BranchReport>,
}

/// Runs the whole pipeline described by `config` and writes its artifacts.
///
/// The configuration is validated before any file is read or written.
/// Artifacts of successful branches are written even when another branch
/// fails; the first branch error is then returned.
pub fn run(config: &PipelineConfig) -> Result<RunReport> {
    let strategies = config.validate()?;
    let inputs = io::discover_inputs(
        &config.input_dir,
        &config.extension,
        config.date_stamped_only,
    )?;
    run_with_inputs(&inputs, &strategies, config.threshold, &RunArtifacts::new(&config.output_dir))
}

/// Same as `run` over an already-resolved list of input files.
pub fn run_with_inputs(
    inputs: &[PathBuf],
    strategies: &[CleaningStrategy],
    threshold: f64,
    artifacts: &RunArtifacts,
) -> Result<RunReport> {
    let tables = io::read_spreadsheets(inputs)?;
    let concatenated = concat(&tables)?;
    for (input, table) in inputs.iter().zip(&tables) {
        io::write_table(&artifacts.source_path(input), table)?;
    }
    tracing::info!(
        files = inputs.len(),
        rows = concatenated.n_rows(),
        columns = concatenated.n_columns(),
        "concatenated inputs"
    );
    io::write_table(&artifacts.concat_path(), &concatenated)?;

    let mut branches = Vec::new();
    let mut first_error = None;
    for result in run_branches(&concatenated, strategies, threshold) {
        match result {
            Ok(output) => branches.push(persist_branch(&output, artifacts)?),
            Err(err) => {
                tracing::error!(error = %err, "branch failed");
                first_error.get_or_insert(err);
            }
        }
    }

    let report = RunReport {
        inputs: inputs.to_vec(),
        threshold,
        concat: concatenated.summary(),
        branches,
    };
    io::write_json(&artifacts.report_path(), &report)?;

    match first_error {
        Some(err) => Err(err),
        None => Ok(report),
    }
}

fn persist_branch(output: &BranchOutput, artifacts: &RunArtifacts) -> Result<BranchReport> {
    io::write_table(&artifacts.clean_path(output.strategy), &output.cleaned)?;
    let model_path = artifacts.model_path(output.strategy);
    io::write_model(&model_path, &output.model)?;

    Ok(BranchReport {
        strategy: output.strategy,
        cleaned: output.cleaned.summary(),
        quality: output.quality,
        coefficients: output.model.coefficients.to_vec(),
        intercept: output.model.intercept,
        model_path,
    })
}
