//! Command-line parsing for the interpolation builder.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the scanning/fitting code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "ipol",
    version,
    about = "Build polynomial surrogate models from an ensemble of simulation runs"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan run directories, select per-bin polynomial orders, and write the interpolation file.
    Build(BuildArgs),
    /// List every `<series>#<bin>` identifier in one observable store.
    Bins(BinsArgs),
}

/// Options for building interpolations.
#[derive(Debug, Parser, Clone)]
pub struct BuildArgs {
    /// Directory whose subdirectories are the simulation runs.
    #[arg(short = 's', long, value_name = "DIR")]
    pub scan_dir: PathBuf,

    /// Observable store file inside each run directory.
    #[arg(short = 'p', long, default_value = "prediction.json")]
    pub prediction_file: String,

    /// Parameter file inside each run directory.
    #[arg(short = 'f', long, default_value = "params.dat")]
    pub param_file: String,

    /// Bin list (`<series>#<bin>` per line).
    #[arg(short = 'b', long, default_value = "bin.list")]
    pub bin_list: PathBuf,

    /// Maximum polynomial order.
    #[arg(long, default_value_t = 4)]
    pub order: usize,

    /// Number of runs held out to select the order (0 = fit at `--order` directly).
    #[arg(long, default_value_t = 0)]
    pub n_test: usize,

    /// Output interpolation file.
    #[arg(short = 'o', long, default_value = "output.ipol")]
    pub output: PathBuf,

    /// Write the parameter-space header (enabled by default).
    #[arg(long, default_value_t = true)]
    pub include_header: bool,

    /// Omit the parameter-space header.
    #[arg(long)]
    pub no_header: bool,

    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Options for listing the bins of one store.
#[derive(Debug, Parser, Clone)]
pub struct BinsArgs {
    /// Observable store to inspect.
    #[arg(short = 'i', long, value_name = "FILE")]
    pub input: PathBuf,

    /// Bin-list file to write.
    #[arg(short = 'o', long, default_value = "out.txt")]
    pub output: PathBuf,

    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_defaults() {
        let cli = Cli::try_parse_from(["ipol", "build", "-s", "runs"]).unwrap();
        let Command::Build(args) = cli.command else {
            panic!("expected build");
        };
        assert_eq!(args.scan_dir, PathBuf::from("runs"));
        assert_eq!(args.prediction_file, "prediction.json");
        assert_eq!(args.param_file, "params.dat");
        assert_eq!(args.bin_list, PathBuf::from("bin.list"));
        assert_eq!(args.order, 4);
        assert_eq!(args.n_test, 0);
        assert_eq!(args.output, PathBuf::from("output.ipol"));
        assert!(args.include_header);
        assert!(!args.no_header);
    }

    #[test]
    fn scan_dir_is_required() {
        let err = Cli::try_parse_from(["ipol", "build"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn negative_order_is_rejected() {
        assert!(Cli::try_parse_from(["ipol", "build", "-s", "runs", "--order", "-1"]).is_err());
    }

    #[test]
    fn bins_requires_input() {
        assert!(Cli::try_parse_from(["ipol", "bins"]).is_err());
        let cli = Cli::try_parse_from(["ipol", "bins", "-i", "p.json"]).unwrap();
        let Command::Bins(args) = cli.command else {
            panic!("expected bins");
        };
        assert_eq!(args.output, PathBuf::from("out.txt"));
    }
}
