mod batch;
pub mod config;
mod types;

pub use batch::{process_frame, run_batch, run_pipeline, run_pipeline_reported};
pub use config::{FrameRange, PipelineConfig};
pub use types::{BatchSummary, NoOpReporter, PipelineStage, ProgressReporter};
