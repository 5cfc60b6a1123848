use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::color::color_balance;
use crate::error::Result;
use crate::frame::Frame;
use crate::io::{FramePattern, FrameSink, FrameSource, PatternSink, PatternSource};
use crate::projection::DiskRemapper;

use super::config::PipelineConfig;
use super::types::{BatchSummary, NoOpReporter, PipelineStage, ProgressReporter};

/// Color-balance `frame` in place (when enabled), then project it onto a new
/// disk frame.
pub fn process_frame(
    frame: &mut Frame,
    config: &PipelineConfig,
    remapper: &DiskRemapper,
) -> Result<Frame> {
    if config.color_balance.enabled {
        color_balance(frame, &config.color_balance)?;
    }
    remapper.remap_to_new(frame, config.projection.diameter)
}

/// Process every frame of `config.frames` in order.
///
/// The first failure (unreadable input, invalid frame, write error) aborts
/// the whole batch; frames already written are left in place.
pub fn run_batch(
    config: &PipelineConfig,
    source: &dyn FrameSource,
    sink: &dyn FrameSink,
    remapper: &DiskRemapper,
    reporter: &dyn ProgressReporter,
) -> Result<BatchSummary> {
    config.frames.validate()?;
    let start = Instant::now();
    let total = config.frames.len();
    let builds_before = remapper.cache().rebuild_count();

    let first_index = config.frames.first;
    let first = source.load(first_index)?;
    info!(
        frames = total,
        width = first.width(),
        height = first.height(),
        first = %source.describe(first_index),
        "Processing images"
    );

    reporter.begin_stage(PipelineStage::PreparingMaps, None);
    let maps = remapper.prepare(first.width(), first.height(), config.projection.diameter)?;
    let diameter = maps.geometry.diameter;
    reporter.finish_stage();

    reporter.begin_stage(PipelineStage::Processing, Some(total));
    let mut pending = Some(first);
    for (done, index) in config.frames.indices().enumerate() {
        let mut frame = match pending.take() {
            Some(frame) => frame,
            None => source.load(index)?,
        };
        debug!(index, input = %source.describe(index), "Loaded frame");

        let projected = process_frame(&mut frame, config, remapper)?;
        sink.store(index, &projected)?;
        debug!(index, output = %sink.describe(index), "Wrote frame");

        reporter.advance(done + 1);
    }
    reporter.finish_stage();

    let summary = BatchSummary {
        frames_processed: total,
        diameter,
        map_builds: remapper.cache().rebuild_count() - builds_before,
        elapsed: start.elapsed(),
    };
    info!(
        frames = summary.frames_processed,
        elapsed_ms = summary.elapsed.as_millis() as u64,
        "Done processing"
    );
    Ok(summary)
}

/// Run the batch described by `config` with a thread-safe progress reporter.
pub fn run_pipeline_reported(
    config: &PipelineConfig,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<BatchSummary> {
    let source = PatternSource::new(FramePattern::parse(&config.input)?);
    let sink = PatternSink::new(FramePattern::parse(&config.output)?);
    let remapper = DiskRemapper::new(&config.projection);
    run_batch(config, &source, &sink, &remapper, reporter.as_ref())
}

/// Run the batch described by `config` without progress reporting.
pub fn run_pipeline(config: &PipelineConfig) -> Result<BatchSummary> {
    run_pipeline_reported(config, Arc::new(NoOpReporter))
}
