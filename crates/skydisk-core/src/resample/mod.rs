//! Sub-pixel resampling of 8-bit RGB frames.
//!
//! Coordinates follow the pixel-index convention: `(x, y) = (3.0, 5.0)` is
//! the center of the pixel in column 3, row 5. Each axis has its own border
//! policy so that periodic axes (longitude) can wrap while the others clamp.

pub mod kernels;

use ndarray::{Array2, ArrayView3, ArrayViewMut2, Axis};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::color::convert::saturate_u8;
use crate::consts::{COLOR_CHANNEL_COUNT, EPSILON, PARALLEL_PIXEL_THRESHOLD};
use crate::frame::Frame;

use kernels::lanczos_lut;

/// Widest kernel support (Lanczos4).
const MAX_TAPS: usize = 8;

/// Interpolation kernel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interpolation {
    Nearest,
    Bilinear,
    Lanczos3,
    #[default]
    Lanczos4,
}

impl std::fmt::Display for Interpolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nearest => write!(f, "Nearest"),
            Self::Bilinear => write!(f, "Bilinear"),
            Self::Lanczos3 => write!(f, "Lanczos3"),
            Self::Lanczos4 => write!(f, "Lanczos4"),
        }
    }
}

/// How samples outside the source are resolved along one axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BorderMode {
    /// Index modulo the axis length.
    Wrap,
    /// Nearest edge sample.
    #[default]
    Clamp,
    /// Outside samples contribute black.
    Zero,
}

impl BorderMode {
    /// Map a possibly out-of-range index onto the axis, or `None` for zero fill.
    #[inline]
    pub fn resolve(self, idx: i64, len: usize) -> Option<usize> {
        let n = len as i64;
        match self {
            Self::Wrap => Some(idx.rem_euclid(n) as usize),
            Self::Clamp => Some(idx.clamp(0, n - 1) as usize),
            Self::Zero => (0..n).contains(&idx).then_some(idx as usize),
        }
    }
}

/// Source indices and weights along one axis for a single sample position.
struct Taps {
    idx: [Option<usize>; MAX_TAPS],
    weight: [f32; MAX_TAPS],
    len: usize,
}

impl Taps {
    fn single(idx: Option<usize>) -> Self {
        let mut taps = Self::empty(1);
        taps.idx[0] = idx;
        taps.weight[0] = 1.0;
        taps
    }

    fn empty(len: usize) -> Self {
        Self {
            idx: [None; MAX_TAPS],
            weight: [0.0; MAX_TAPS],
            len,
        }
    }
}

/// Interpolation kernel paired with a border policy per axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resampler {
    pub interpolation: Interpolation,
    pub horizontal: BorderMode,
    pub vertical: BorderMode,
}

impl Default for Resampler {
    fn default() -> Self {
        Self {
            interpolation: Interpolation::Lanczos4,
            horizontal: BorderMode::Clamp,
            vertical: BorderMode::Clamp,
        }
    }
}

impl Resampler {
    pub fn new(interpolation: Interpolation, horizontal: BorderMode, vertical: BorderMode) -> Self {
        Self {
            interpolation,
            horizontal,
            vertical,
        }
    }

    /// Interpolate all three channels of `src` (shape `(h, w, 3)`) at `(x, y)`.
    pub fn sample(&self, src: &ArrayView3<u8>, x: f32, y: f32) -> [f32; 3] {
        let (h, w, _) = src.dim();
        let tx = self.taps(x, w, self.horizontal);
        let ty = self.taps(y, h, self.vertical);

        let mut acc = [0.0f32; COLOR_CHANNEL_COUNT];
        for j in 0..ty.len {
            let Some(row) = ty.idx[j] else { continue };
            let wy = ty.weight[j];
            for i in 0..tx.len {
                let Some(col) = tx.idx[i] else { continue };
                let wgt = wy * tx.weight[i];
                for (ch, a) in acc.iter_mut().enumerate() {
                    *a += src[[row, col, ch]] as f32 * wgt;
                }
            }
        }
        acc
    }

    fn taps(&self, pos: f32, len: usize, border: BorderMode) -> Taps {
        match self.interpolation {
            Interpolation::Nearest => Taps::single(border.resolve(pos.round() as i64, len)),
            Interpolation::Bilinear => {
                let p0 = pos.floor();
                let f = pos - p0;
                let p0 = p0 as i64;
                let mut taps = Taps::empty(2);
                taps.idx[0] = border.resolve(p0, len);
                taps.idx[1] = border.resolve(p0 + 1, len);
                taps.weight[0] = 1.0 - f;
                taps.weight[1] = f;
                taps
            }
            Interpolation::Lanczos3 => lanczos_taps::<3>(pos, len, border),
            Interpolation::Lanczos4 => lanczos_taps::<4>(pos, len, border),
        }
    }

    /// Resample `src` at the coordinates in `map_x`/`map_y` into `dst`.
    ///
    /// `dst` must have the same height and width as the maps. Pixels where
    /// `mask` is false are written black without being sampled. Rows are
    /// processed in parallel for large outputs.
    pub fn remap(
        &self,
        src: &Frame,
        map_x: &Array2<f32>,
        map_y: &Array2<f32>,
        mask: Option<&Array2<bool>>,
        dst: &mut Frame,
    ) {
        let (h, w) = map_x.dim();
        debug_assert_eq!(map_x.dim(), map_y.dim());
        debug_assert_eq!((h, w), (dst.height(), dst.width()));

        let rows = RowMaps {
            src: src.view(),
            map_x,
            map_y,
            mask,
        };
        if h * w >= PARALLEL_PIXEL_THRESHOLD {
            dst.data
                .axis_iter_mut(Axis(0))
                .into_par_iter()
                .enumerate()
                .for_each(|(row, out)| self.remap_row(&rows, row, out));
        } else {
            for (row, out) in dst.data.axis_iter_mut(Axis(0)).enumerate() {
                self.remap_row(&rows, row, out);
            }
        }
    }

    fn remap_row(&self, maps: &RowMaps<'_>, row: usize, mut out: ArrayViewMut2<u8>) {
        for col in 0..out.nrows() {
            let visible = maps.mask.map_or(true, |m| m[[row, col]]);
            if !visible {
                out.row_mut(col).fill(0);
                continue;
            }
            let px = self.sample(&maps.src, maps.map_x[[row, col]], maps.map_y[[row, col]]);
            for (ch, v) in px.into_iter().enumerate() {
                out[[col, ch]] = saturate_u8(v);
            }
        }
    }
}

/// Borrowed inputs shared by every output row of one remap.
struct RowMaps<'a> {
    src: ArrayView3<'a, u8>,
    map_x: &'a Array2<f32>,
    map_y: &'a Array2<f32>,
    mask: Option<&'a Array2<bool>>,
}

/// Normalized Lanczos taps `floor(pos) - A + 1 ..= floor(pos) + A`.
fn lanczos_taps<const A: usize>(pos: f32, len: usize, border: BorderMode) -> Taps {
    let lut = lanczos_lut(A);
    let p0 = pos.floor();
    let f = pos - p0;
    let p0 = p0 as i64;
    let a = A as i64;

    let mut taps = Taps::empty(2 * A);
    let mut sum = 0.0f32;
    for k in 0..2 * A {
        let offset = k as i64 - a + 1;
        taps.idx[k] = border.resolve(p0 + offset, len);
        taps.weight[k] = lut.lookup(f - offset as f32);
        sum += taps.weight[k];
    }
    if sum.abs() > EPSILON {
        for wgt in &mut taps.weight[..2 * A] {
            *wgt /= sum;
        }
    }
    taps
}
