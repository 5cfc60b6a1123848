use ndarray::{Array3, ArrayView3};

use crate::consts::COLOR_CHANNEL_COUNT;
use crate::error::{Result, SkydiskError};

/// A single 8-bit RGB frame.
///
/// Pixel data is stored row-major with shape `(height, width, 3)`, channels
/// in R, G, B order.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub data: Array3<u8>,
}

impl Frame {
    /// Wrap an existing array, checking it has exactly three channels.
    pub fn new(data: Array3<u8>) -> Result<Self> {
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
        Ok(Self { data })
    }

    /// Allocate a black frame.
    pub fn black(width: usize, height: usize) -> Self {
        Self {
            data: Array3::zeros((height, width, COLOR_CHANNEL_COUNT)),
        }
    }

    /// Build a frame by evaluating `f(row, col)` for every pixel.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> [u8; 3],
    {
        let mut data = Array3::zeros((height, width, COLOR_CHANNEL_COUNT));
        for row in 0..height {
            for col in 0..width {
                let px = f(row, col);
                for (ch, v) in px.into_iter().enumerate() {
                    data[[row, col, ch]] = v;
                }
            }
        }
        Self { data }
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn channels(&self) -> usize {
        self.data.dim().2
    }

    pub fn pixel(&self, row: usize, col: usize) -> [u8; 3] {
        [
            self.data[[row, col, 0]],
            self.data[[row, col, 1]],
            self.data[[row, col, 2]],
        ]
    }

    pub fn view(&self) -> ArrayView3<'_, u8> {
        self.data.view()
    }

    /// Fail with a precondition error unless the frame is non-empty RGB.
    pub(crate) fn ensure_rgb(&self) -> Result<()> {
        if self.channels() != COLOR_CHANNEL_COUNT {
            return Err(SkydiskError::InvalidChannelCount(self.channels()));
        }
        if self.width() == 0 || self.height() == 0 {
            return Err(SkydiskError::InvalidDimensions {
                width: self.width(),
                height: self.height(),
            });
        }
        Ok(())
    }
}
