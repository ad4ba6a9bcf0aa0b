use intake_cli::session::LoadOutcome;
use intake_model::SubmissionOutcome;

#[derive(Debug)]
pub struct CheckReport {
    pub file_name: String,
    pub file_size: Option<u64>,
    pub row_count: Option<usize>,
    pub outcome: LoadOutcome,
}

impl CheckReport {
    pub fn is_ready(&self) -> bool {
        self.outcome.is_ready()
    }
}

#[derive(Debug)]
pub struct SendReport {
    pub check: CheckReport,
    pub webhook_source: String,
    /// `None` when the file never became sendable.
    pub submission: Option<SubmissionOutcome>,
}

impl SendReport {
    pub fn succeeded(&self) -> bool {
        self.submission.as_ref().is_some_and(|outcome| outcome.success)
    }
}
