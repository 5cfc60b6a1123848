use ndarray::{Array3, ArrayViewMut1, Axis, Zip};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{DEFAULT_PERCENT_CUTOFF, PARALLEL_PIXEL_THRESHOLD};
use crate::error::Result;
use crate::frame::Frame;

use super::convert::{srgb8_to_xyz, xyz_to_srgb8};
use super::matrices::{apply, AdaptationMethod, Mat3};
use super::stretch::{percentile_stretch, validate_cutoff};

/// Parameters of the chromatic color balance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorBalanceConfig {
    /// Whether the batch pipeline balances frames before projecting them.
    pub enabled: bool,
    /// Total percentage of each channel clipped, split between both tails.
    pub percent_cutoff: f32,
    pub adaptation: AdaptationMethod,
}

impl Default for ColorBalanceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            percent_cutoff: DEFAULT_PERCENT_CUTOFF,
            adaptation: AdaptationMethod::Bradford,
        }
    }
}

/// Bradford color balance with the given cutoff.
pub fn chromatic_color_balance(frame: &mut Frame, percent_cutoff: f32) -> Result<()> {
    color_balance(
        frame,
        &ColorBalanceConfig {
            percent_cutoff,
            ..Default::default()
        },
    )
}

/// Balance a frame in place.
///
/// The frame is taken to XYZ, percentile-stretched there, passed through the
/// configured adaptation matrix and brought back to sRGB.
pub fn color_balance(frame: &mut Frame, config: &ColorBalanceConfig) -> Result<()> {
    frame.ensure_rgb()?;
    validate_cutoff(config.percent_cutoff)?;

    let mut xyz = srgb8_to_xyz(frame);
    percentile_stretch(&mut xyz, config.percent_cutoff)?;
    adapt(&mut xyz, &config.adaptation.matrix());
    xyz_to_srgb8(&xyz, frame);

    debug!(
        width = frame.width(),
        height = frame.height(),
        cutoff = config.percent_cutoff,
        adaptation = %config.adaptation,
        "Color balance applied"
    );
    Ok(())
}

/// Multiply every pixel vector of an `(h, w, 3)` buffer by `m`.
pub fn adapt(data: &mut Array3<f32>, m: &Mat3) {
    let (h, w, _) = data.dim();
    let zip = Zip::from(data.lanes_mut(Axis(2)));
    let transform = |mut px: ArrayViewMut1<f32>| {
        let v = apply(m, [px[0], px[1], px[2]]);
        px[0] = v[0];
        px[1] = v[1];
        px[2] = v[2];
    };

    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        zip.par_for_each(transform);
    } else {
        zip.for_each(transform);
    }
}
