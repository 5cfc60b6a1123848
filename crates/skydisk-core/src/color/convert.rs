use std::sync::OnceLock;

use ndarray::{Array3, ArrayView1, ArrayViewMut1, Axis, Zip};

use crate::consts::{COLOR_CHANNEL_COUNT, MAX_SAMPLE, PARALLEL_PIXEL_THRESHOLD};
use crate::frame::Frame;

use super::matrices::{apply, SRGB_TO_XYZ, XYZ_TO_SRGB};

/// sRGB electro-optical transfer: encoded [0,1] → linear [0,1].
#[inline]
pub fn srgb_to_linear(v: f32) -> f32 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// Inverse sRGB transfer: linear [0,1] → encoded [0,1].
#[inline]
pub fn linear_to_srgb(v: f32) -> f32 {
    if v <= 0.003_130_8 {
        v * 12.92
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    }
}

static SRGB_DECODE_LUT: OnceLock<[f32; 256]> = OnceLock::new();

fn srgb_decode_lut() -> &'static [f32; 256] {
    SRGB_DECODE_LUT.get_or_init(|| {
        let mut lut = [0.0f32; 256];
        for (i, v) in lut.iter_mut().enumerate() {
            *v = srgb_to_linear(i as f32 / MAX_SAMPLE);
        }
        lut
    })
}

/// Round and saturate a float sample to 8 bits.
#[inline]
pub fn saturate_u8(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, MAX_SAMPLE) as u8
}

/// Convert an 8-bit sRGB frame to CIE XYZ, scaled so reference white has Y = 255.
pub fn srgb8_to_xyz(frame: &Frame) -> Array3<f32> {
    let lut = srgb_decode_lut();
    let (h, w, _) = frame.data.dim();
    let mut xyz = Array3::<f32>::zeros((h, w, COLOR_CHANNEL_COUNT));

    let zip = Zip::from(xyz.lanes_mut(Axis(2))).and(frame.data.lanes(Axis(2)));
    let convert = |mut out: ArrayViewMut1<f32>, px: ArrayView1<u8>| {
        let rgb = [
            lut[px[0] as usize],
            lut[px[1] as usize],
            lut[px[2] as usize],
        ];
        let v = apply(&SRGB_TO_XYZ, rgb);
        for (o, c) in out.iter_mut().zip(v) {
            *o = c * MAX_SAMPLE;
        }
    };

    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        zip.par_for_each(convert);
    } else {
        zip.for_each(convert);
    }
    xyz
}

/// Convert a 0–255 scaled XYZ buffer back to 8-bit sRGB, writing into `frame`.
///
/// `frame` must already have the same height and width as `xyz`.
pub fn xyz_to_srgb8(xyz: &Array3<f32>, frame: &mut Frame) {
    let (h, w, _) = xyz.dim();
    debug_assert_eq!((h, w), (frame.height(), frame.width()));

    let zip = Zip::from(frame.data.lanes_mut(Axis(2))).and(xyz.lanes(Axis(2)));
    let convert = |mut out: ArrayViewMut1<u8>, v: ArrayView1<f32>| {
        let lin = apply(
            &XYZ_TO_SRGB,
            [v[0] / MAX_SAMPLE, v[1] / MAX_SAMPLE, v[2] / MAX_SAMPLE],
        );
        for (o, c) in out.iter_mut().zip(lin) {
            *o = saturate_u8(linear_to_srgb(c.clamp(0.0, 1.0)) * MAX_SAMPLE);
        }
    };

    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        zip.par_for_each(convert);
    } else {
        zip.for_each(convert);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lut_matches_direct_transfer() {
        let lut = srgb_decode_lut();
        for i in [0usize, 10, 128, 200, 255] {
            let direct = srgb_to_linear(i as f32 / 255.0);
            assert!((lut[i] - direct).abs() < 1e-7);
        }
    }

    #[test]
    fn saturate_handles_out_of_range() {
        assert_eq!(saturate_u8(-3.0), 0);
        assert_eq!(saturate_u8(300.0), 255);
        assert_eq!(saturate_u8(127.5), 128);
        assert_eq!(saturate_u8(f32::NAN), 0);
    }
}
