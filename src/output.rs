//! Console report printed on stdout while a run progresses.

use std::path::Path;

use md5mirror_core::{EntryOutcome, ManifestEntry, Reporter, RunError, RunSummary};

/// Prefix for lines the user should look at.
const ATTENTION: &str = "[!]";

/// Prints one line per manifest entry and malformed line.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn malformed_line(&mut self, line_number: usize, text: &str) {
        println!("{}", malformed_line_message(line_number, text));
    }

    fn entry_finished(&mut self, entry: &ManifestEntry, outcome: &EntryOutcome) {
        println!("{}", outcome_line(entry, outcome));
    }
}

/// Line announcing which mirror is synchronised into which directory.
pub fn banner_line(base_url: &str, output_dir: &Path) -> String {
    format!("Mirroring {base_url} into {}", output_dir.display())
}

pub fn malformed_line_message(line_number: usize, text: &str) -> String {
    format!("{ATTENTION} line {line_number}: expected '<md5> <file>', skipping: {text}")
}

/// Human-readable verdict for one entry.
pub fn outcome_line(entry: &ManifestEntry, outcome: &EntryOutcome) -> String {
    let name = &entry.file_name;
    let expected = &entry.expected_hash;
    match outcome {
        EntryOutcome::Valid { downloaded: true } => format!("[new] {name}: downloaded, MD5 ok"),
        EntryOutcome::Valid { downloaded: false } => format!("[ok] {name}: MD5 ok"),
        EntryOutcome::Recovered => format!("[fixed] {name}: MD5 ok after re-download"),
        EntryOutcome::Deleted { actual } => format!(
            "{ATTENTION} {name}: MD5 mismatch after re-download \
             (expected {expected}, got {actual}), deleted"
        ),
        EntryOutcome::DeleteFailed { actual, error } => format!(
            "{ATTENTION} {name}: MD5 mismatch after re-download \
             (expected {expected}, got {actual}), could not delete: {error}"
        ),
        EntryOutcome::KeptMismatched { actual } => format!(
            "{ATTENTION} {name}: MD5 mismatch after re-download \
             (expected {expected}, got {actual}), kept"
        ),
        EntryOutcome::Skipped(reason) => format!("{ATTENTION} {name}: skipped, {reason}"),
    }
}

/// Closing lines for a finished run.
pub fn summary_lines(summary: &RunSummary, keep_mismatched: bool) -> Vec<String> {
    let mut lines = vec![format!(
        "Done: {} entries, {} valid ({} downloaded), {} recovered, {} deleted, {} kept, {} skipped",
        summary.entries(),
        summary.valid,
        summary.downloaded,
        summary.recovered,
        summary.deleted + summary.delete_failed,
        summary.kept_mismatched,
        summary.skipped,
    )];

    if summary.malformed_lines > 0 {
        lines.push(format!(
            "{ATTENTION} {} malformed manifest line(s) skipped",
            summary.malformed_lines
        ));
    }
    if summary.mismatch_found() {
        if keep_mismatched {
            lines.push(format!(
                "{ATTENTION} MD5 mismatches remain; mismatched files were kept (--keep)"
            ));
        } else {
            lines.push(format!(
                "{ATTENTION} MD5 mismatches remain; mismatched files were deleted"
            ));
        }
    }
    lines
}

pub fn fatal_line(error: &RunError) -> String {
    format!("{ATTENTION} error: {error}")
}

pub fn print_summary(summary: &RunSummary, keep_mismatched: bool) {
    for line in summary_lines(summary, keep_mismatched) {
        println!("{line}");
    }
}
