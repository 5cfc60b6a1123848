use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::info;

use super::maps::{ProjectionGeometry, ProjectionMaps};

/// Shared holder of the most recently built projection maps.
///
/// Readers clone an `Arc` under a short read lock, so a frame always sees one
/// complete map set. Rebuilds are serialized by `build_lock`; the new maps are
/// computed outside the read/write lock and swapped in whole.
#[derive(Debug, Default)]
pub struct ProjectionCache {
    current: RwLock<Option<Arc<ProjectionMaps>>>,
    build_lock: Mutex<()>,
    rebuilds: AtomicUsize,
}

impl ProjectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps for `geometry`, building and publishing them if the cached set
    /// belongs to a different geometry.
    pub fn maps_for(&self, geometry: ProjectionGeometry) -> Arc<ProjectionMaps> {
        if let Some(maps) = self.lookup(&geometry) {
            return maps;
        }

        let _guard = self.build_lock.lock();
        // Another caller may have finished the same build while we waited.
        if let Some(maps) = self.lookup(&geometry) {
            return maps;
        }

        info!(
            source_width = geometry.source_width,
            source_height = geometry.source_height,
            diameter = geometry.diameter,
            "Building projection maps"
        );
        let maps = Arc::new(ProjectionMaps::build(geometry));
        *self.current.write() = Some(Arc::clone(&maps));
        self.rebuilds.fetch_add(1, Ordering::Relaxed);
        maps
    }

    /// True when the cached maps were built for `geometry`.
    pub fn is_valid_for(&self, geometry: &ProjectionGeometry) -> bool {
        self.lookup(geometry).is_some()
    }

    /// The currently published maps, if any.
    pub fn current(&self) -> Option<Arc<ProjectionMaps>> {
        self.current.read().clone()
    }

    /// Number of map builds performed so far.
    pub fn rebuild_count(&self) -> usize {
        self.rebuilds.load(Ordering::Relaxed)
    }

    fn lookup(&self, geometry: &ProjectionGeometry) -> Option<Arc<ProjectionMaps>> {
        self.current
            .read()
            .as_ref()
            .filter(|maps| maps.matches(geometry))
            .cloned()
    }
}
