pub mod balance;
pub mod convert;
pub mod matrices;
pub mod stretch;

pub use balance::{chromatic_color_balance, color_balance, ColorBalanceConfig};
pub use matrices::AdaptationMethod;
pub use stretch::{percentile_stretch, percentile_stretch_frame};
