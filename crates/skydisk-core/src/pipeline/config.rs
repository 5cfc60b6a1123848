use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::color::ColorBalanceConfig;
use crate::error::{Result, SkydiskError};
use crate::projection::ProjectionConfig;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Input filename pattern, e.g. `frames/in{:04d}.png`.
    pub input: String,
    /// Output filename pattern, e.g. `disk/out{:04d}.png`.
    pub output: String,
    #[serde(default)]
    pub frames: FrameRange,
    /// Color balance applied before projection. A missing section keeps the
    /// default; set `enabled = false` to skip it.
    #[serde(default)]
    pub color_balance: ColorBalanceConfig,
    #[serde(default)]
    pub projection: ProjectionConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: "in{:04d}.png".to_string(),
            output: "out{:04d}.png".to_string(),
            frames: FrameRange::default(),
            color_balance: ColorBalanceConfig::default(),
            projection: ProjectionConfig::default(),
        }
    }
}

/// Inclusive, 1-indexed range of frame numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRange {
    pub first: u32,
    pub last: u32,
}

impl Default for FrameRange {
    fn default() -> Self {
        Self { first: 1, last: 1 }
    }
}

impl FrameRange {
    pub fn new(first: u32, last: u32) -> Result<Self> {
        let range = Self { first, last };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<()> {
        if self.first == 0 || self.first > self.last {
            return Err(SkydiskError::InvalidFrameRange {
                first: self.first,
                last: self.last,
            });
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        if self.first > self.last {
            0
        } else {
            (self.last - self.first) as usize + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn indices(&self) -> RangeInclusive<u32> {
        self.first..=self.last
    }
}

impl std::fmt::Display for FrameRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.first, self.last)
    }
}
