use std::f32::consts::PI;
use std::sync::OnceLock;

/// Lanczos kernel value (direct computation).
///
/// L(x) = sinc(x) * sinc(x/a) for |x| < a, 0 otherwise,
/// where sinc(x) = sin(pi*x) / (pi*x) and sinc(0) = 1.
#[inline]
pub fn lanczos_kernel(x: f32, a: f32) -> f32 {
    if x.abs() < 1e-6 {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }

    let pi_x = PI * x;
    let pi_x_a = pi_x / a;

    (pi_x.sin() / pi_x) * (pi_x_a.sin() / pi_x_a)
}

/// Sub-pixel samples per unit interval in the lookup table.
const LANCZOS_LUT_RESOLUTION: usize = 4096;

/// Pre-computed Lanczos kernel over [0, a]. The kernel is symmetric, so only
/// non-negative arguments are stored.
#[derive(Debug)]
pub(crate) struct LanczosLut {
    values: Vec<f32>,
    a: usize,
}

impl LanczosLut {
    fn new(a: usize) -> Self {
        let num_entries = a * LANCZOS_LUT_RESOLUTION + 1;
        let a_f32 = a as f32;
        let values = (0..num_entries)
            .map(|i| lanczos_kernel(i as f32 / LANCZOS_LUT_RESOLUTION as f32, a_f32))
            .collect();
        Self { values, a }
    }

    #[inline]
    pub(crate) fn lookup(&self, x: f32) -> f32 {
        let abs_x = x.abs();
        if abs_x >= self.a as f32 {
            return 0.0;
        }
        let idx = (abs_x * LANCZOS_LUT_RESOLUTION as f32 + 0.5) as usize;
        self.values[idx.min(self.values.len() - 1)]
    }
}

static LANCZOS3_LUT: OnceLock<LanczosLut> = OnceLock::new();
static LANCZOS4_LUT: OnceLock<LanczosLut> = OnceLock::new();

/// Lookup table for `a` = 3; every other size maps to the Lanczos4 table.
pub(crate) fn lanczos_lut(a: usize) -> &'static LanczosLut {
    match a {
        3 => LANCZOS3_LUT.get_or_init(|| LanczosLut::new(3)),
        _ => LANCZOS4_LUT.get_or_init(|| LanczosLut::new(4)),
    }
}
