#![allow(dead_code)]

use std::path::Path;

use skydisk_core::frame::Frame;
use skydisk_core::io::save_rgb;

/// Solid-color frame.
pub fn make_solid_frame(w: usize, h: usize, px: [u8; 3]) -> Frame {
    Frame::from_fn(w, h, |_, _| px)
}

/// Horizontal ramp 0..=255 in the blue channel, constant red and green.
pub fn make_blue_gradient(w: usize, h: usize, r: u8, g: u8) -> Frame {
    Frame::from_fn(w, h, |_, col| {
        let b = (col * 255 / (w - 1).max(1)) as u8;
        [r, g, b]
    })
}

/// Deterministic pseudo-random frame (LCG), different per channel.
pub fn make_noise_frame(w: usize, h: usize, seed: u32) -> Frame {
    let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
    Frame::from_fn(w, h, |_, _| {
        let mut px = [0u8; 3];
        for v in &mut px {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            *v = (state >> 24) as u8;
        }
        px
    })
}

/// Frame that is periodic in x: one full sine period across the width.
pub fn make_periodic_frame(w: usize, h: usize) -> Frame {
    Frame::from_fn(w, h, |row, col| {
        let phase = col as f32 / w as f32 * std::f32::consts::TAU;
        let v = (128.0 + 100.0 * phase.sin()).round() as u8;
        [v, (row * 255 / h.max(1)) as u8, 255 - v]
    })
}

/// Write numbered frames `in0001.png`, `in0002.png`, ... for the given indices.
pub fn write_numbered_frames(dir: &Path, indices: &[u32], w: usize, h: usize) {
    for &i in indices {
        let frame = make_noise_frame(w, h, i);
        save_rgb(&frame, &dir.join(format!("in{i:04}.png"))).expect("write test frame");
    }
}

/// Channel-wise (min, max) of a frame.
pub fn channel_extrema(frame: &Frame) -> [(u8, u8); 3] {
    let mut out = [(u8::MAX, u8::MIN); 3];
    for row in 0..frame.height() {
        for col in 0..frame.width() {
            for (ch, v) in frame.pixel(row, col).into_iter().enumerate() {
                out[ch].0 = out[ch].0.min(v);
                out[ch].1 = out[ch].1.max(v);
            }
        }
    }
    out
}
