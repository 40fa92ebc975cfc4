//! The seam between the editing core and whatever draws the map.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::locations::LocationInfo;
use crate::region::Region;

/// Opaque handle to one drawn region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawableId(Uuid);

impl DrawableId {
    /// Mint a fresh handle.
    pub fn mint() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for DrawableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// What the core needs from a map renderer.
///
/// Drawables are owned by the renderer; the core only keeps the handles.
/// A region's focus flag is part of its drawn appearance, so focus changes
/// go through [`RenderAdapter::update_drawable`] like any geometry change.
pub trait RenderAdapter {
    /// A map view for `location` is now open.
    fn on_attach(&mut self, location: &LocationInfo);

    /// The map view closed; every drawable it held is gone.
    fn on_detach(&mut self);

    /// Draw `region` and return its handle.
    fn create_drawable(&mut self, region: &Region) -> DrawableId;

    /// Erase the drawable behind `id`.
    fn remove_drawable(&mut self, id: DrawableId);

    /// Redraw a region from scratch, returning the replacement handle.
    fn update_drawable(&mut self, id: DrawableId, region: &Region) -> DrawableId {
        self.remove_drawable(id);
        self.create_drawable(region)
    }
}

/// One recorded adapter call.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOp {
    Attached(String),
    Detached,
    Created(DrawableId, Region),
    Removed(DrawableId),
}

#[derive(Debug, Default)]
struct RecordingState {
    ops: Vec<RenderOp>,
    live: HashSet<DrawableId>,
}

/// Adapter that records every call, for tests and headless runs.
///
/// Clones share the same log, so a test can hand one clone to a session
/// and keep another to inspect afterwards.
#[derive(Debug, Clone, Default)]
pub struct RecordingAdapter {
    inner: Arc<Mutex<RecordingState>>,
}

impl RecordingAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call recorded so far, in order.
    pub fn ops(&self) -> Vec<RenderOp> {
        if let Ok(state) = self.inner.lock() {
            state.ops.clone()
        } else {
            Vec::new()
        }
    }

    /// Handles created and not yet removed.
    pub fn live_drawables(&self) -> Vec<DrawableId> {
        if let Ok(state) = self.inner.lock() {
            let mut live = Vec::new();
            for op in &state.ops {
                if let RenderOp::Created(id, _) = op {
                    if state.live.contains(id) {
                        live.push(*id);
                    }
                }
            }
            live
        } else {
            Vec::new()
        }
    }

    /// The regions currently drawn, in creation order.
    pub fn live_regions(&self) -> Vec<Region> {
        if let Ok(state) = self.inner.lock() {
            let mut regions = Vec::new();
            for op in &state.ops {
                if let RenderOp::Created(id, region) = op {
                    if state.live.contains(id) {
                        regions.push(region.clone());
                    }
                }
            }
            regions
        } else {
            Vec::new()
        }
    }
}

impl RenderAdapter for RecordingAdapter {
    fn on_attach(&mut self, location: &LocationInfo) {
        if let Ok(mut state) = self.inner.lock() {
            state.ops.push(RenderOp::Attached(location.name.clone()));
        }
    }

    fn on_detach(&mut self) {
        if let Ok(mut state) = self.inner.lock() {
            state.ops.push(RenderOp::Detached);
            state.live.clear();
        }
    }

    fn create_drawable(&mut self, region: &Region) -> DrawableId {
        let id = DrawableId::mint();
        if let Ok(mut state) = self.inner.lock() {
            state.ops.push(RenderOp::Created(id, region.clone()));
            state.live.insert(id);
        }
        id
    }

    fn remove_drawable(&mut self, id: DrawableId) {
        if let Ok(mut state) = self.inner.lock() {
            state.ops.push(RenderOp::Removed(id));
            state.live.remove(&id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{self, GeoPoint};

    fn test_region(color: &str) -> Region {
        Region::new(
            geo::square_at_point(GeoPoint::new(49.0, -123.0), 30.0),
            color.to_string(),
        )
    }

    #[test]
    fn test_update_is_remove_then_create() {
        let mut adapter = RecordingAdapter::new();
        let probe = adapter.clone();

        let region = test_region("#360185");
        let first = adapter.create_drawable(&region);
        let second = adapter.update_drawable(first, &region);
        assert_ne!(first, second);

        let ops = probe.ops();
        assert_eq!(ops.len(), 3);
        assert_eq!(ops[1], RenderOp::Removed(first));
        assert!(matches!(ops[2], RenderOp::Created(id, _) if id == second));
    }

    #[test]
    fn test_live_tracking() {
        let mut adapter = RecordingAdapter::new();
        let a = adapter.create_drawable(&test_region("#360185"));
        let b = adapter.create_drawable(&test_region("#8F0177"));
        adapter.remove_drawable(a);

        assert_eq!(adapter.live_drawables(), vec![b]);
        let regions = adapter.live_regions();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].color, "#8F0177");
    }

    #[test]
    fn test_detach_clears_live() {
        let mut adapter = RecordingAdapter::new();
        adapter.create_drawable(&test_region("#360185"));
        adapter.on_detach();
        assert!(adapter.live_drawables().is_empty());
    }
}
