//! Shared "build pipeline" logic.
//!
//! Keeping this in one place keeps the workflow in a single readable sequence:
//! scan -> split -> extract -> select -> render
//!
//! Nothing is written to disk here; the caller writes the rendered document only
//! after every stage has succeeded.

use crate::domain::{BinDescriptor, BuildConfig, ObservableMatrix, RunDir};
use crate::error::AppError;
use crate::fit::selection::{SelectedModel, select_models};
use crate::fit::split::{Split, split_runs};
use crate::io::export::{IpolHeader, format_ipol_document};
use crate::models::{Interpolator, PolyFitter, PolyIpol};

/// All computed outputs of a single `ipol build` run.
#[derive(Debug, Clone)]
pub struct BuildOutput<M> {
    pub runs: Vec<RunDir>,
    pub split: Split,
    pub bins: Vec<BinDescriptor>,
    pub matrix: ObservableMatrix,
    pub selected: Vec<SelectedModel<M>>,
    pub header: IpolHeader,
    pub document: String,
}

/// Execute the full pipeline with the default polynomial fitter.
pub fn run_build(config: &BuildConfig) -> Result<BuildOutput<PolyIpol>, AppError> {
    run_build_with(config, &PolyFitter)
}

/// Execute the full pipeline with a caller-supplied interpolator.
pub fn run_build_with<I: Interpolator>(
    config: &BuildConfig,
    interp: &I,
) -> Result<BuildOutput<I::Model>, AppError> {
    config.validate()?;

    // 1) Scan run directories (sorted by name).
    let runs = crate::io::runs::scan_runs(&config.scan_dir, &config.param_file)?;
    tracing::info!(
        "Found {} run directories in {}",
        runs.len(),
        config.scan_dir.display()
    );

    // 2) Split into held-out and training runs.
    let split = split_runs(&runs, config.n_test)?;
    tracing::info!(
        train = split.space.len(),
        test = split.n_test(),
        dim = split.space.dim(),
        "assembled parameter space"
    );

    // 3) Extract observables, one store open at a time.
    let bins = crate::io::bins::read_bin_list(&config.bin_list)?;
    tracing::info!(bins = bins.len(), "read bin list {}", config.bin_list.display());
    let matrix = crate::io::ingest::load_observables(&runs, &bins, &config.prediction_file)?;

    // 4) Select a model per bin.
    let selected = select_models(interp, &split, &bins, &matrix, config.order)?;

    // 5) Render. Names come from the first run in sorted order.
    let names = crate::io::runs::read_names(&runs[0].path.join(&config.param_file))?;
    if names.len() != split.space.dim() {
        tracing::warn!(
            names = names.len(),
            dim = split.space.dim(),
            "parameter names do not match the parameter dimension"
        );
    }
    let header = IpolHeader::new(names, &split.space);
    let document = format_ipol_document(&header, config.include_header, &selected);

    Ok(BuildOutput {
        runs,
        split,
        bins,
        matrix,
        selected,
        header,
        document,
    })
}
