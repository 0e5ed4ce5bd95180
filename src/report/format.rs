//! Run summary formatting.
//!
//! We keep formatting code in one place so:
//! - the fitting code stays clean and testable
//! - output changes are localized

use std::collections::BTreeMap;

use crate::app::pipeline::BuildOutput;
use crate::domain::BuildConfig;
use crate::fit::selection::SelectedModel;
use crate::models::IpolModel;

/// Format the full run summary (runs, split, chosen orders).
pub fn format_run_summary<M: IpolModel>(run: &BuildOutput<M>, config: &BuildConfig) -> String {
    let mut out = String::new();

    out.push_str("=== ipol - polynomial interpolation build ===\n");
    out.push_str(&format!("Scan dir: {}\n", config.scan_dir.display()));
    out.push_str(&format!(
        "Runs: n={} | train={} | test={} | dim={}\n",
        run.runs.len(),
        run.split.space.len(),
        run.split.n_test(),
        run.split.space.dim()
    ));
    out.push_str(&format!(
        "Bins: n={} | max order={}\n",
        run.bins.len(),
        config.order
    ));

    out.push_str("\nSelected orders:\n");
    out.push_str(&format_order_counts(&run.selected));

    out.push_str(&format!("\nOutput: {}\n", config.output.display()));
    out
}

/// One line per polynomial order: how many bins selected it.
pub fn format_order_counts<M: IpolModel>(selected: &[SelectedModel<M>]) -> String {
    let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
    for s in selected {
        *counts.entry(s.order()).or_default() += 1;
    }

    let mut out = String::new();
    for (order, n) in counts {
        out.push_str(&format!("  order {order:>2}: {n} bin(s)\n"));
    }
    if out.is_empty() {
        out.push_str("  (no bins)\n");
    }
    out
}
