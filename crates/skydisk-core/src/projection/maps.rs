use ndarray::{Array2, Zip};

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::error::{Result, SkydiskError};

use super::warp::{latitude_sample, longitude_sample};

/// Source size and output disk diameter; the key of the map cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProjectionGeometry {
    pub source_width: usize,
    pub source_height: usize,
    pub diameter: usize,
}

impl ProjectionGeometry {
    /// Validate a geometry. A `diameter` of 0 means "use the source height".
    pub fn new(source_width: usize, source_height: usize, diameter: usize) -> Result<Self> {
        if source_width == 0 || source_height == 0 {
            return Err(SkydiskError::InvalidDimensions {
                width: source_width,
                height: source_height,
            });
        }
        let diameter = if diameter > 0 {
            diameter
        } else {
            source_height
        };
        Ok(Self {
            source_width,
            source_height,
            diameter,
        })
    }
}

/// Per-pixel source coordinates and visibility for one geometry.
///
/// All three grids are `diameter × diameter`, indexed `[row, col]`.
#[derive(Clone, Debug)]
pub struct ProjectionMaps {
    pub geometry: ProjectionGeometry,
    /// Source column to sample for each output pixel.
    pub longitude: Array2<f32>,
    /// Source row to sample for each output pixel.
    pub latitude: Array2<f32>,
    /// True inside the inscribed circle.
    pub mask: Array2<bool>,
}

impl ProjectionMaps {
    /// Compute the maps for `geometry`.
    ///
    /// Disk coordinates are `x = 2·row/D − 1`, `y = 2·col/D − 1`.
    pub fn build(geometry: ProjectionGeometry) -> Self {
        let d = geometry.diameter;
        let width = geometry.source_width as f32;
        let height = geometry.source_height as f32;
        let diameter = d as f32;
        let center = d as f64 / 2.0;
        let radius_sq = center * center;

        let mut longitude = Array2::<f32>::zeros((d, d));
        let mut latitude = Array2::<f32>::zeros((d, d));
        let mut mask = Array2::<bool>::from_elem((d, d), false);

        let zip = Zip::indexed(&mut longitude)
            .and(&mut latitude)
            .and(&mut mask);
        let fill = |(row, col): (usize, usize), lon: &mut f32, lat: &mut f32, vis: &mut bool| {
            let x = row as f32 / diameter * 2.0 - 1.0;
            let y = col as f32 / diameter * 2.0 - 1.0;
            *lon = longitude_sample(x, y, width);
            *lat = latitude_sample(x, y, height);

            let dr = row as f64 - center;
            let dc = col as f64 - center;
            *vis = dr * dr + dc * dc <= radius_sq;
        };

        if d * d >= PARALLEL_PIXEL_THRESHOLD {
            zip.par_for_each(fill);
        } else {
            zip.for_each(fill);
        }

        Self {
            geometry,
            longitude,
            latitude,
            mask,
        }
    }

    /// True when these maps were built for `geometry`.
    pub fn matches(&self, geometry: &ProjectionGeometry) -> bool {
        self.geometry == *geometry
    }

    pub fn visible_pixels(&self) -> usize {
        self.mask.iter().filter(|&&v| v).count()
    }
}
