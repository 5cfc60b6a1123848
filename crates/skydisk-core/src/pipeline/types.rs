use std::time::Duration;

/// Pipeline processing stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    PreparingMaps,
    Processing,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PreparingMaps => write!(f, "Preparing maps"),
            Self::Processing => write!(f, "Processing frames"),
        }
    }
}

/// Thread-safe progress reporting for the batch.
///
/// Implementors can use this to drive progress bars, logging, or any other
/// UI feedback. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new stage has started. `total_items` is the number of work items
    /// in this stage, if known.
    fn begin_stage(&self, _stage: PipelineStage, _total_items: Option<usize>) {}

    /// One more work item of the current stage has completed.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// No-op progress reporter, used when `run_pipeline` delegates.
pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}

/// Outcome of a completed batch.
#[derive(Clone, Debug)]
pub struct BatchSummary {
    pub frames_processed: usize,
    pub diameter: usize,
    pub map_builds: usize,
    pub elapsed: Duration,
}
