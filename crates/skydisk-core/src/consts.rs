/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Number of channels in a frame (R, G, B).
pub const COLOR_CHANNEL_COUNT: usize = 3;

/// Largest 8-bit sample value, as a float.
pub const MAX_SAMPLE: f32 = 255.0;

/// Default total percentage of each channel clipped by the color balance.
pub const DEFAULT_PERCENT_CUTOFF: f32 = 10.0;

/// Steepness of the latitude speedup warp. Larger values push the warp
/// further toward the rim of the disk.
pub const SPEEDUP_STEEPNESS: f32 = 2.0;

/// Radius scale applied to disk coordinates before the latitude lookup.
/// Shrinks the sampled cap so that detail above the horizon is pulled inward.
pub const LATITUDE_RADIUS_SCALE: f32 = 0.8;

/// Kernel weight sums at or below this are left unnormalized.
pub const EPSILON: f32 = 1e-10;
