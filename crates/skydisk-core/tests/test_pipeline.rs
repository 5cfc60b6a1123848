mod common;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use skydisk_core::color::{AdaptationMethod, ColorBalanceConfig};
use skydisk_core::error::{Result, SkydiskError};
use skydisk_core::frame::Frame;
use skydisk_core::io::{load_rgb, FramePattern, FrameSink, FrameSource};
use skydisk_core::pipeline::{
    process_frame, run_batch, run_pipeline, run_pipeline_reported, FrameRange, NoOpReporter,
    PipelineConfig, PipelineStage, ProgressReporter,
};
use skydisk_core::projection::DiskRemapper;

use common::{make_noise_frame, write_numbered_frames};

fn pattern_in(dir: &Path, name: &str) -> String {
    dir.join(name).to_string_lossy().into_owned()
}

fn batch_config(dir: &Path, first: u32, last: u32) -> PipelineConfig {
    PipelineConfig {
        input: pattern_in(dir, "in{:04d}.png"),
        output: pattern_in(dir, "disk/out{:04d}.png"),
        frames: FrameRange::new(first, last).unwrap(),
        ..PipelineConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Filename patterns
// ---------------------------------------------------------------------------

#[test]
fn test_pattern_formats_zero_padded() {
    let p = FramePattern::parse("frames/in{:04d}.png").unwrap();
    assert_eq!(p.format(7), PathBuf::from("frames/in0007.png"));
    assert_eq!(p.format(12345), PathBuf::from("frames/in12345.png"));
}

#[test]
fn test_pattern_variants() {
    assert_eq!(
        FramePattern::parse("f{}.jpg").unwrap().format(42),
        PathBuf::from("f42.jpg")
    );
    assert_eq!(
        FramePattern::parse("f{:04}.jpg").unwrap().format(42),
        PathBuf::from("f0042.jpg")
    );
    assert_eq!(
        FramePattern::parse("f{:4}.jpg").unwrap().format(42),
        PathBuf::from("f  42.jpg")
    );
}

#[test]
fn test_pattern_display_and_from_str() {
    let p: FramePattern = "out{:04d}.png".parse().unwrap();
    assert_eq!(p.to_string(), "out{:04}.png");
    assert_eq!(FramePattern::parse(&p.to_string()).unwrap(), p);
}

#[test]
fn test_pattern_errors() {
    for bad in ["in.png", "in{.png", "in{}{}.png", "in{x}.png", "in{:ab}.png", "in}{}.png"] {
        let err = FramePattern::parse(bad).unwrap_err();
        assert!(matches!(err, SkydiskError::InvalidPattern(_)), "{bad}");
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn test_frame_range_validation() {
    assert!(matches!(
        FrameRange::new(0, 3),
        Err(SkydiskError::InvalidFrameRange { first: 0, last: 3 })
    ));
    assert!(FrameRange::new(5, 4).is_err());

    let range = FrameRange::new(2, 5).unwrap();
    assert_eq!(range.len(), 4);
    assert!(!range.is_empty());
    assert_eq!(range.indices().collect::<Vec<_>>(), vec![2, 3, 4, 5]);
    assert_eq!(range.to_string(), "2 to 5");
}

#[test]
fn test_config_defaults() {
    let config = PipelineConfig::default();
    assert_eq!(config.frames, FrameRange { first: 1, last: 1 });
    assert_eq!(config.projection.diameter, 0);
    assert!(config.color_balance.enabled);
    assert_eq!(config.color_balance.percent_cutoff, 10.0);
}

#[test]
fn test_config_missing_sections_deserialize() {
    let json = r#"{ "input": "a{}.png", "output": "b{}.png" }"#;
    let config: PipelineConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.color_balance, ColorBalanceConfig::default());
    assert!(config.color_balance.enabled);
    assert_eq!(config.frames, FrameRange::default());
    assert_eq!(config.projection, Default::default());
}

#[test]
fn test_config_balance_opt_out_keeps_other_defaults() {
    let json = r#"{
        "input": "a{}.png",
        "output": "b{}.png",
        "color_balance": { "enabled": false }
    }"#;
    let config: PipelineConfig = serde_json::from_str(json).unwrap();
    assert!(!config.color_balance.enabled);
    assert_eq!(config.color_balance.percent_cutoff, 10.0);
    assert_eq!(config.color_balance.adaptation, AdaptationMethod::Bradford);
}

#[test]
fn test_config_partial_balance_section() {
    let json = r#"{
        "input": "a{}.png",
        "output": "b{}.png",
        "color_balance": { "percent_cutoff": 4.0 }
    }"#;
    let config: PipelineConfig = serde_json::from_str(json).unwrap();
    assert!(config.color_balance.enabled);
    assert_eq!(config.color_balance.percent_cutoff, 4.0);
}

#[test]
fn test_config_json_round_trip() {
    let mut config = PipelineConfig::default();
    config.frames = FrameRange::new(3, 9).unwrap();
    config.projection.diameter = 512;
    let json = serde_json::to_string(&config).unwrap();
    let back: PipelineConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

// ---------------------------------------------------------------------------
// Single frame
// ---------------------------------------------------------------------------

#[test]
fn test_process_frame_without_balance_is_plain_remap() {
    let config = PipelineConfig {
        color_balance: ColorBalanceConfig {
            enabled: false,
            ..ColorBalanceConfig::default()
        },
        ..PipelineConfig::default()
    };
    let remapper = DiskRemapper::default();
    let original = make_noise_frame(64, 32, 4);
    let mut frame = original.clone();
    let out = process_frame(&mut frame, &config, &remapper).unwrap();
    assert_eq!(frame, original);
    assert_eq!(out, remapper.remap_to_new(&original, 0).unwrap());
}

#[test]
fn test_process_frame_balances_in_place() {
    let config = PipelineConfig::default();
    let remapper = DiskRemapper::default();
    let original = make_noise_frame(64, 32, 4);
    let mut frame = original.clone();
    let out = process_frame(&mut frame, &config, &remapper).unwrap();
    assert_ne!(frame, original);
    assert_eq!((out.width(), out.height()), (32, 32));
}

// ---------------------------------------------------------------------------
// Batch over files
// ---------------------------------------------------------------------------

#[test]
fn test_batch_writes_every_frame() {
    let dir = tempfile::tempdir().unwrap();
    write_numbered_frames(dir.path(), &[1, 2, 3], 64, 32);

    let summary = run_pipeline(&batch_config(dir.path(), 1, 3)).unwrap();
    assert_eq!(summary.frames_processed, 3);
    assert_eq!(summary.diameter, 32);
    assert_eq!(summary.map_builds, 1);

    for i in 1..=3u32 {
        let path = dir.path().join(format!("disk/out{i:04}.png"));
        let out = load_rgb(&path).unwrap();
        assert_eq!((out.width(), out.height()), (32, 32));
        assert_eq!(out.pixel(0, 0), [0; 3]);
        assert_eq!(out.pixel(31, 31), [0; 3]);
    }
}

#[test]
fn test_batch_honors_range_start() {
    let dir = tempfile::tempdir().unwrap();
    write_numbered_frames(dir.path(), &[5, 6], 64, 32);

    let summary = run_pipeline(&batch_config(dir.path(), 5, 6)).unwrap();
    assert_eq!(summary.frames_processed, 2);
    assert!(dir.path().join("disk/out0005.png").exists());
    assert!(dir.path().join("disk/out0006.png").exists());
    assert!(!dir.path().join("disk/out0001.png").exists());
}

#[test]
fn test_batch_aborts_on_missing_frame() {
    let dir = tempfile::tempdir().unwrap();
    write_numbered_frames(dir.path(), &[1, 3], 64, 32);

    let err = run_pipeline(&batch_config(dir.path(), 1, 3)).unwrap_err();
    match err {
        SkydiskError::MissingInput { path, .. } => {
            assert_eq!(path, dir.path().join("in0002.png"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(dir.path().join("disk/out0001.png").exists());
    assert!(!dir.path().join("disk/out0003.png").exists());
}

#[test]
fn test_batch_rejects_bad_pattern() {
    let mut config = PipelineConfig::default();
    config.input = "no-placeholder.png".to_string();
    assert!(matches!(
        run_pipeline(&config),
        Err(SkydiskError::InvalidPattern(_))
    ));
}

// ---------------------------------------------------------------------------
// Progress and in-memory sources
// ---------------------------------------------------------------------------

#[derive(Default)]
struct RecordingReporter {
    events: Mutex<Vec<String>>,
}

impl ProgressReporter for RecordingReporter {
    fn begin_stage(&self, stage: PipelineStage, total_items: Option<usize>) {
        self.events
            .lock()
            .unwrap()
            .push(format!("begin {stage} {total_items:?}"));
    }

    fn advance(&self, items_done: usize) {
        self.events.lock().unwrap().push(format!("advance {items_done}"));
    }

    fn finish_stage(&self) {
        self.events.lock().unwrap().push("finish".to_string());
    }
}

#[test]
fn test_reporter_sees_stages_in_order() {
    let dir = tempfile::tempdir().unwrap();
    write_numbered_frames(dir.path(), &[1, 2], 64, 32);

    let reporter = Arc::new(RecordingReporter::default());
    run_pipeline_reported(&batch_config(dir.path(), 1, 2), reporter.clone()).unwrap();

    let events = reporter.events.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![
            "begin Preparing maps None",
            "finish",
            "begin Processing frames Some(2)",
            "advance 1",
            "advance 2",
            "finish",
        ]
    );
}

struct MemorySource {
    width: usize,
    height: usize,
}

impl FrameSource for MemorySource {
    fn load(&self, index: u32) -> Result<Frame> {
        Ok(make_noise_frame(self.width, self.height, index))
    }

    fn describe(&self, index: u32) -> String {
        format!("memory:{index}")
    }
}

#[derive(Default)]
struct MemorySink {
    stored: Mutex<Vec<(u32, Frame)>>,
}

impl FrameSink for MemorySink {
    fn store(&self, index: u32, frame: &Frame) -> Result<()> {
        self.stored.lock().unwrap().push((index, frame.clone()));
        Ok(())
    }

    fn describe(&self, index: u32) -> String {
        format!("memory:{index}")
    }
}

#[test]
fn test_run_batch_with_custom_source_and_sink() {
    let mut config = PipelineConfig {
        frames: FrameRange::new(4, 7).unwrap(),
        ..PipelineConfig::default()
    };
    config.projection.diameter = 24;

    let source = MemorySource {
        width: 64,
        height: 32,
    };
    let sink = MemorySink::default();
    let remapper = DiskRemapper::new(&config.projection);
    let summary = run_batch(
        &config,
        &source,
        &sink,
        &remapper,
        &NoOpReporter,
    )
    .unwrap();

    assert_eq!(summary.frames_processed, 4);
    assert_eq!(summary.diameter, 24);
    let stored = sink.stored.lock().unwrap();
    let indices: Vec<u32> = stored.iter().map(|(i, _)| *i).collect();
    assert_eq!(indices, vec![4, 5, 6, 7]);
    for (_, frame) in stored.iter() {
        assert_eq!((frame.width(), frame.height()), (24, 24));
    }
}

#[test]
fn test_run_batch_validates_range_first() {
    let config = PipelineConfig {
        frames: FrameRange { first: 3, last: 1 },
        ..PipelineConfig::default()
    };
    let source = MemorySource {
        width: 8,
        height: 4,
    };
    let sink = MemorySink::default();
    let err = run_batch(
        &config,
        &source,
        &sink,
        &DiskRemapper::default(),
        &NoOpReporter,
    )
    .unwrap_err();
    assert!(matches!(err, SkydiskError::InvalidFrameRange { .. }));
    assert!(sink.stored.lock().unwrap().is_empty());
}
