use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::frame::Frame;

use super::image_io::{load_rgb, save_rgb};
use super::pattern::FramePattern;

/// Supplies decoded frames by index.
pub trait FrameSource: Send + Sync {
    fn load(&self, index: u32) -> Result<Frame>;

    /// Human-readable location of frame `index`, for logs and errors.
    fn describe(&self, index: u32) -> String;
}

/// Persists processed frames by index.
pub trait FrameSink: Send + Sync {
    fn store(&self, index: u32, frame: &Frame) -> Result<()>;

    fn describe(&self, index: u32) -> String;
}

/// Reads frames from numbered image files.
#[derive(Clone, Debug)]
pub struct PatternSource {
    pattern: FramePattern,
}

impl PatternSource {
    pub fn new(pattern: FramePattern) -> Self {
        Self { pattern }
    }

    pub fn path(&self, index: u32) -> PathBuf {
        self.pattern.format(index)
    }
}

impl FrameSource for PatternSource {
    fn load(&self, index: u32) -> Result<Frame> {
        load_rgb(&self.path(index))
    }

    fn describe(&self, index: u32) -> String {
        self.path(index).display().to_string()
    }
}

/// Writes frames to numbered image files, creating parent directories.
#[derive(Clone, Debug)]
pub struct PatternSink {
    pattern: FramePattern,
}

impl PatternSink {
    pub fn new(pattern: FramePattern) -> Self {
        Self { pattern }
    }

    pub fn path(&self, index: u32) -> PathBuf {
        self.pattern.format(index)
    }
}

impl FrameSink for PatternSink {
    fn store(&self, index: u32, frame: &Frame) -> Result<()> {
        let path = self.path(index);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            ensure_dir(parent)?;
        }
        save_rgb(frame, &path)
    }

    fn describe(&self, index: u32) -> String {
        self.path(index).display().to_string()
    }
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}
