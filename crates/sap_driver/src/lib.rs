//! Orchestration: load a file, pick the target lines, run the engine, and
//! reassemble the output.

mod ranges;
mod result;

use camino::Utf8PathBuf;
use log::{debug, info};
use sap_engine::AccessChange;
use sap_files::Files;

pub use crate::ranges::LineRanges;
pub use crate::result::{DriverError, DriverResult};

pub struct Request {
    pub path: Utf8PathBuf,
    pub ranges: Option<LineRanges>,
    pub change: AccessChange,
    pub write: bool,
}

pub struct Outcome {
    /// The whole file after rewriting, byte-identical where lines did not
    /// change.
    pub text: String,
    pub changed: usize,
}

pub fn run(files: &mut Files, req: &Request) -> DriverResult<Outcome> {
    let (_, contents) = files.open(&req.path)?;

    let outcome = rewrite_source(&contents, req.ranges.as_ref(), req.change);
    info!("{}: {} line(s) changed", req.path, outcome.changed);

    if req.write {
        std::fs::write(&req.path, &outcome.text)
            .map_err(|e| DriverError::Write(req.path.clone(), e.to_string()))?;
    }

    Ok(outcome)
}

/// Pure rewriting step, separated from file IO.
pub fn rewrite_source(
    source: &str,
    ranges: Option<&LineRanges>,
    change: AccessChange,
) -> Outcome {
    let lines: Vec<&str> = source.split('\n').collect();

    let targets: Vec<usize> = match ranges {
        Some(ranges) => ranges.indices(lines.len()),
        None => (0..lines.len()).collect(),
    };
    debug!("{} of {} line(s) targeted", targets.len(), lines.len());

    let rewritten = sap_engine::rewrite(&lines, &targets, change);
    let changed = rewritten.len();

    let text = lines
        .iter()
        .enumerate()
        .map(|(idx, &line)| rewritten.get(&idx).map_or(line, String::as_str))
        .collect::<Vec<&str>>()
        .join("\n");

    Outcome { text, changed }
}

#[cfg(test)]
mod tests {
    use sap_engine::AccessChange;

    use crate::rewrite_source;

    #[test]
    fn reassembles_untouched_sources_byte_identically() {
        let source = "struct A {\n\tlet x = 1 // tab kept\n}\n";
        let outcome = rewrite_source(source, None, AccessChange::RemoveApi);

        assert_eq!(outcome.changed, 0);
        assert_eq!(outcome.text, source);
    }

    #[test]
    fn rewrites_only_selected_ranges() {
        let source = "let a = 1\nlet b = 2\nlet c = 3";
        let ranges = "2".parse().unwrap();
        let outcome = rewrite_source(source, Some(&ranges), AccessChange::MakeApi);

        assert_eq!(outcome.changed, 1);
        assert_eq!(outcome.text, "let a = 1\npublic let b = 2\nlet c = 3");
    }

    #[test]
    fn preserves_trailing_newline() {
        let source = "let a = 1\n";
        let outcome = rewrite_source(source, None, AccessChange::MakeApi);
        assert_eq!(outcome.text, "public let a = 1\n");
    }
}
