//! Percentile channel stretch ("simplest color balance").
//!
//! Each channel is clipped at the `cutoff/2` and `100 - cutoff/2` percentiles
//! and then min-max normalized to the full 0–255 range.
//!
//! Reference: N. Limare, J.-L. Lisani, J.-M. Morel, A. B. Petro, C. Sbert,
//! "Simplest Color Balance", Image Processing On Line 1 (2011), pp. 297–315.

use ndarray::{Array3, ArrayViewMut2, Axis};
use rayon::prelude::*;
use tracing::debug;

use crate::consts::{COLOR_CHANNEL_COUNT, MAX_SAMPLE};
use crate::error::{Result, SkydiskError};
use crate::frame::Frame;

use super::convert::saturate_u8;

/// Low and high clip values of one channel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChannelCutoffs {
    pub low: f32,
    pub high: f32,
}

impl ChannelCutoffs {
    /// True when clipping collapses the channel to a single value.
    pub fn is_degenerate(&self) -> bool {
        self.high <= self.low
    }
}

/// Check `percent_cutoff` lies strictly inside (0, 100).
pub fn validate_cutoff(percent_cutoff: f32) -> Result<()> {
    if percent_cutoff > 0.0 && percent_cutoff < 100.0 {
        Ok(())
    } else {
        Err(SkydiskError::InvalidCutoff(percent_cutoff))
    }
}

/// Pick the clip values from an ascending-sorted channel.
///
/// `half_percent` is the fraction discarded from each tail (`cutoff / 200`).
/// The high index is `ceil(n * (1 - half_percent))`, clamped to the last sample.
pub fn channel_cutoffs(sorted: &[f32], half_percent: f32) -> ChannelCutoffs {
    let n = sorted.len();
    let last = n.saturating_sub(1);
    let lo_idx = ((n as f32 * half_percent).floor() as usize).min(last);
    let hi_idx = ((n as f32 * (1.0 - half_percent)).ceil() as usize).min(last);
    ChannelCutoffs {
        low: sorted[lo_idx],
        high: sorted[hi_idx],
    }
}

/// Stretch every channel of a float buffer of shape `(h, w, 3)` in place.
///
/// Samples end up in [0, 255]. A channel whose cutoffs coincide becomes 0.
pub fn percentile_stretch(data: &mut Array3<f32>, percent_cutoff: f32) -> Result<()> {
    validate_cutoff(percent_cutoff)?;
    let (h, w, c) = data.dim();
    if c != COLOR_CHANNEL_COUNT {
        return Err(SkydiskError::InvalidChannelCount(c));
    }
    if h == 0 || w == 0 {
        return Err(SkydiskError::InvalidDimensions {
            width: w,
            height: h,
        });
    }

    let half_percent = percent_cutoff / 200.0;
    let cutoffs: Vec<ChannelCutoffs> = data
        .axis_iter_mut(Axis(2))
        .into_par_iter()
        .map(|channel| stretch_channel(channel, half_percent))
        .collect();

    for (ch, cut) in cutoffs.iter().enumerate() {
        debug!(
            channel = ch,
            low = cut.low,
            high = cut.high,
            degenerate = cut.is_degenerate(),
            "Percentile stretch"
        );
    }
    Ok(())
}

/// Stretch an 8-bit frame in place.
pub fn percentile_stretch_frame(frame: &mut Frame, percent_cutoff: f32) -> Result<()> {
    frame.ensure_rgb()?;
    let mut data = frame.data.mapv(|v| v as f32);
    percentile_stretch(&mut data, percent_cutoff)?;
    frame
        .data
        .zip_mut_with(&data, |out, &v| *out = saturate_u8(v));
    Ok(())
}

fn stretch_channel(mut channel: ArrayViewMut2<f32>, half_percent: f32) -> ChannelCutoffs {
    let mut sorted: Vec<f32> = channel.iter().copied().collect();
    sorted.par_sort_unstable_by(f32::total_cmp);
    let cut = channel_cutoffs(&sorted, half_percent);

    if cut.is_degenerate() {
        channel.fill(0.0);
        return cut;
    }

    // After clipping the channel spans exactly [low, high], both of which are
    // real samples, so min-max normalization reduces to this affine map.
    let scale = MAX_SAMPLE / (cut.high - cut.low);
    channel.mapv_inplace(|v| (v.clamp(cut.low, cut.high) - cut.low) * scale);
    cut
}
