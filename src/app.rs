//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - initializes logging
//! - runs the build pipeline or the bin lister
//! - writes the output file and prints a summary

use clap::Parser;

use crate::cli::{BinsArgs, BuildArgs, Command};
use crate::domain::{BinsConfig, BuildConfig};
use crate::error::AppError;
use crate::io::store::JsonStore;

pub mod pipeline;

/// Entry point for the `ipol` binary.
pub fn run() -> Result<(), AppError> {
    // `ipol -s DIR ...` is shorthand for `ipol build -s DIR ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Build(args) => handle_build(args),
        Command::Bins(args) => handle_bins(args),
    }
}

fn handle_build(args: BuildArgs) -> Result<(), AppError> {
    crate::logging::init_logging(&args.log_level);
    let config = build_config_from_args(&args);

    let run = build_and_write(&config)?;
    println!("{}", crate::report::format_run_summary(&run, &config));
    Ok(())
}

/// Run the build pipeline and write the interpolation file.
///
/// The output file is only created after every stage has succeeded.
pub fn build_and_write(
    config: &BuildConfig,
) -> Result<pipeline::BuildOutput<crate::models::PolyIpol>, AppError> {
    let run = pipeline::run_build(config)?;
    crate::io::export::write_ipol_file(&config.output, &run.document)?;
    tracing::info!("Ipols written to {}", config.output.display());
    Ok(run)
}

fn handle_bins(args: BinsArgs) -> Result<(), AppError> {
    crate::logging::init_logging(&args.log_level);
    let config = bins_config_from_args(&args);

    let store = JsonStore::open(&config.input)?;
    let count = crate::io::bins::write_bin_list(&config.output, &store)?;
    tracing::info!(
        "Wrote {count} bins from {} to {}",
        config.input.display(),
        config.output.display()
    );
    Ok(())
}

pub fn build_config_from_args(args: &BuildArgs) -> BuildConfig {
    BuildConfig {
        scan_dir: args.scan_dir.clone(),
        prediction_file: args.prediction_file.clone(),
        param_file: args.param_file.clone(),
        bin_list: args.bin_list.clone(),
        order: args.order,
        n_test: args.n_test,
        output: args.output.clone(),
        include_header: args.include_header && !args.no_header,
    }
}

pub fn bins_config_from_args(args: &BinsArgs) -> BinsConfig {
    BinsConfig {
        input: args.input.clone(),
        output: args.output.clone(),
    }
}

/// Rewrite argv so `ipol` defaults to `ipol build`.
///
/// Rules:
/// - `ipol --help/--version/-h` -> unchanged (show top-level help/version)
/// - `ipol build|bins ...`      -> unchanged
/// - `ipol -s DIR ...`          -> `ipol build -s DIR ...`
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "build" | "bins");
    if is_subcommand {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "build".to_string());
    }
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn flags_default_to_build() {
        assert_eq!(
            rewrite_args(args(&["ipol", "-s", "runs"])),
            args(&["ipol", "build", "-s", "runs"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        for v in [
            &["ipol", "bins", "-i", "x"][..],
            &["ipol", "build", "-s", "d"][..],
            &["ipol", "--help"][..],
            &["ipol"][..],
        ] {
            assert_eq!(rewrite_args(args(v)), args(v));
        }
    }

    #[test]
    fn no_header_wins() {
        let cli =
            crate::cli::Cli::try_parse_from(["ipol", "build", "-s", "d", "--no-header"]).unwrap();
        let Command::Build(a) = cli.command else {
            panic!("expected build");
        };
        assert!(!build_config_from_args(&a).include_header);
    }
}
