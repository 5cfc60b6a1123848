use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SkydiskError};
use crate::frame::Frame;
use crate::resample::{BorderMode, Interpolation, Resampler};

use super::cache::ProjectionCache;
use super::maps::{ProjectionGeometry, ProjectionMaps};

/// Output geometry and sampling options for the disk projection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Output disk diameter in pixels; 0 uses the source height.
    #[serde(default)]
    pub diameter: usize,
    #[serde(default)]
    pub interpolation: Interpolation,
    /// Border policy across the poles. Longitude always wraps.
    #[serde(default)]
    pub vertical_border: BorderMode,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            diameter: 0,
            interpolation: Interpolation::Lanczos4,
            vertical_border: BorderMode::Clamp,
        }
    }
}

/// Projects equirectangular frames onto a black square canvas holding the
/// orthographic disk of the upper hemisphere.
///
/// This is not a true orthographic projection: latitude is warped so that the
/// band right above the equator gets more pixels than the pole.
#[derive(Debug, Clone)]
pub struct DiskRemapper {
    cache: Arc<ProjectionCache>,
    resampler: Resampler,
}

impl Default for DiskRemapper {
    fn default() -> Self {
        Self::new(&ProjectionConfig::default())
    }
}

impl DiskRemapper {
    pub fn new(config: &ProjectionConfig) -> Self {
        Self::with_cache(config, Arc::new(ProjectionCache::new()))
    }

    /// Share an existing map cache, e.g. between worker threads.
    pub fn with_cache(config: &ProjectionConfig, cache: Arc<ProjectionCache>) -> Self {
        Self {
            cache,
            resampler: Resampler::new(
                config.interpolation,
                BorderMode::Wrap,
                config.vertical_border,
            ),
        }
    }

    pub fn cache(&self) -> &Arc<ProjectionCache> {
        &self.cache
    }

    pub fn resampler(&self) -> &Resampler {
        &self.resampler
    }

    /// Build (or fetch) the maps for a source size ahead of the first frame.
    pub fn prepare(
        &self,
        source_width: usize,
        source_height: usize,
        diameter: usize,
    ) -> Result<Arc<ProjectionMaps>> {
        let geometry = ProjectionGeometry::new(source_width, source_height, diameter)?;
        Ok(self.cache.maps_for(geometry))
    }

    /// Project `input` into the preallocated `output`.
    ///
    /// `diameter` of 0 uses the input height. `output` must already be
    /// `diameter × diameter`; it is never resized.
    pub fn remap(&self, input: &Frame, output: &mut Frame, diameter: usize) -> Result<()> {
        input.ensure_rgb()?;
        output.ensure_rgb()?;
        let geometry = ProjectionGeometry::new(input.width(), input.height(), diameter)?;
        if output.width() != geometry.diameter || output.height() != geometry.diameter {
            return Err(SkydiskError::OutputSizeMismatch {
                expected: geometry.diameter,
                actual_width: output.width(),
                actual_height: output.height(),
            });
        }

        let maps = self.cache.maps_for(geometry);
        self.resampler.remap(
            input,
            &maps.longitude,
            &maps.latitude,
            Some(&maps.mask),
            output,
        );

        debug!(
            diameter = geometry.diameter,
            interpolation = %self.resampler.interpolation,
            "Frame projected"
        );
        Ok(())
    }

    /// Project `input` into a newly allocated frame.
    pub fn remap_to_new(&self, input: &Frame, diameter: usize) -> Result<Frame> {
        let d = if diameter > 0 {
            diameter
        } else {
            input.height()
        };
        if d == 0 {
            return Err(SkydiskError::InvalidDiameter);
        }
        let mut output = Frame::black(d, d);
        self.remap(input, &mut output, d)?;
        Ok(output)
    }
}
