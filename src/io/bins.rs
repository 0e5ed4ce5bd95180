//! Bin-list files: one `<series-name>#<bin-index>` entry per line.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::BinDescriptor;
use crate::error::AppError;
use crate::io::store::ObservableStore;

/// Read a bin-list file.
pub fn read_bin_list(path: &Path) -> Result<Vec<BinDescriptor>, AppError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        AppError::config(format!("Failed to read bin list '{}': {e}", path.display()))
    })?;
    parse_bin_list(&text)
}

/// Parse bin-list text.
///
/// The name is everything before the last `#`, the index is the integer after
/// it. Lines without `#` are skipped.
pub fn parse_bin_list(text: &str) -> Result<Vec<BinDescriptor>, AppError> {
    let mut bins = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let Some(pos) = line.rfind('#') else {
            if !line.trim().is_empty() {
                tracing::warn!(line_no = idx + 1, "skipping bin-list entry without '#': {line}");
            }
            continue;
        };
        let raw = line[pos + 1..].trim();
        let index: usize = raw.parse().map_err(|_| {
            AppError::config(format!(
                "Invalid bin index '{raw}' in bin list (line {}).",
                idx + 1
            ))
        })?;
        bins.push(BinDescriptor::new(&line[..pos], index));
    }
    Ok(bins)
}

/// Write every bin of every series in `store` as a bin-list entry.
///
/// Series appear in the store's name order; bins ascend from 0.
pub fn write_bin_list(path: &Path, store: &dyn ObservableStore) -> Result<usize, AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::config(format!("Failed to create bin list '{}': {e}", path.display()))
    })?;
    let mut out = BufWriter::new(file);

    let mut count = 0usize;
    for name in store.series_names() {
        let n_bins = store.series(&name).map_or(0, <[f64]>::len);
        for bin in 0..n_bins {
            writeln!(out, "{name}#{bin}")
                .map_err(|e| AppError::config(format!("Failed to write bin list: {e}")))?;
            count += 1;
        }
    }
    out.flush()
        .map_err(|e| AppError::config(format!("Failed to write bin list: {e}")))?;

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::store::JsonStore;

    #[test]
    fn entries_split_on_last_hash() {
        let bins = parse_bin_list("/A/h#1#7\n/B/g#0\n").unwrap();
        assert_eq!(bins, vec![BinDescriptor::new("/A/h#1", 7), BinDescriptor::new("/B/g", 0)]);
    }

    #[test]
    fn lines_without_hash_are_skipped() {
        let text = "/A/h#0\nheader line\n\n/A/h#1\n";
        let bins = parse_bin_list(text).unwrap();
        assert_eq!(bins.len(), 2);
        assert!(bins.len() < text.lines().count());
    }

    #[test]
    fn bad_index_names_the_line() {
        let err = parse_bin_list("/A/h#0\n/A/h#x\n").unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_CONFIG);
        assert!(err.message().contains("line 2"));
    }

    #[test]
    fn trailing_carriage_return_is_tolerated() {
        let bins = parse_bin_list("/A/h#3\r\n").unwrap();
        assert_eq!(bins, vec![BinDescriptor::new("/A/h", 3)]);
    }

    #[test]
    fn written_list_reads_back() {
        let tmp = tempfile::tempdir().unwrap();
        let store = JsonStore::from_json_str(
            "mem",
            r#"{"histograms": {"/b": [1.0], "/a": [1.0, 2.0]}}"#,
        )
        .unwrap();
        let path = tmp.path().join("bin.list");

        let n = write_bin_list(&path, &store).unwrap();
        assert_eq!(n, 3);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "/a#0\n/a#1\n/b#0\n");
    }
}
