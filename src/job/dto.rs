/// Error details for one record that could not be imported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordError {
    /// 1-based position of the record in the file
    pub record: usize,
    pub errors: Vec<String>,
}

/// Outcome of a bulk import
#[derive(Debug, Default)]
pub struct ImportSummary {
    pub created: usize,
    pub skipped: usize,
    pub errors: Vec<RecordError>,
}

impl ImportSummary {
    pub fn failed(&self) -> usize {
        self.errors.len()
    }

    pub fn message(&self) -> String {
        format!(
            "{} jobs added, {} skipped as duplicates, {} failed",
            self.created,
            self.skipped,
            self.failed()
        )
    }
}
