pub mod cache;
pub mod maps;
pub mod remap;
pub mod warp;

pub use cache::ProjectionCache;
pub use maps::{ProjectionGeometry, ProjectionMaps};
pub use remap::{DiskRemapper, ProjectionConfig};
