use crate::importer::SkipReason;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Per-row rejection surfaced to the caller. `line` is the 1-based physical
/// line number in the uploaded file, header included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SkippedRow {
    pub line: u64,
    pub reason: SkipReason,
}

/// Outcome of one bulk import call. Replaces the bare success count of the
/// original design so callers can tell "all rows landed" apart from "half
/// were dropped".
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: Vec<SkippedRow>,
}

impl ImportReport {
    pub fn skip(&mut self, line: u64, reason: SkipReason) {
        self.skipped.push(SkippedRow { line, reason });
    }
}
