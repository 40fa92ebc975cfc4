//! Ordered bookkeeping for drawn regions, with color as identity.

use thiserror::Error;

use crate::geo::GeoPoint;
use crate::region::Region;
use crate::render::{DrawableId, RenderAdapter};

/// Registry errors.
#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("Color already in use: {0}")]
    DuplicateColor(String),
    #[error("Index out of range: {index} (have {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

#[derive(Debug)]
struct RegionEntry {
    region: Region,
    drawable: DrawableId,
}

/// The regions currently on the map, in insertion order.
///
/// Each entry pairs a region with the render handle backing it, and every
/// mutation validates before touching either, so the adapter and the list
/// never disagree. Colors are unique across entries.
#[derive(Debug, Default)]
pub struct RegionRegistry {
    entries: Vec<RegionEntry>,
}

impl RegionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The region at `index`, if there is one.
    pub fn region(&self, index: usize) -> Option<&Region> {
        self.entries.get(index).map(|entry| &entry.region)
    }

    /// The render handle behind the region at `index`.
    pub fn drawable(&self, index: usize) -> Option<DrawableId> {
        self.entries.get(index).map(|entry| entry.drawable)
    }

    /// Iterate the regions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.entries.iter().map(|entry| &entry.region)
    }

    /// Whether any entry already uses `color`.
    pub fn contains_color(&self, color: &str) -> bool {
        self.entries.iter().any(|entry| entry.region.color == color)
    }

    /// Draw `region` and append it, returning its index.
    pub fn add(
        &mut self,
        region: Region,
        adapter: &mut dyn RenderAdapter,
    ) -> RegistryResult<usize> {
        if self.contains_color(&region.color) {
            return Err(RegistryError::DuplicateColor(region.color));
        }
        let drawable = adapter.create_drawable(&region);
        self.entries.push(RegionEntry { region, drawable });
        Ok(self.entries.len() - 1)
    }

    /// Replace the region at `index`, redrawing it from scratch.
    pub fn update(
        &mut self,
        index: usize,
        region: Region,
        adapter: &mut dyn RenderAdapter,
    ) -> RegistryResult<()> {
        let len = self.entries.len();
        if index >= len {
            return Err(RegistryError::IndexOutOfRange { index, len });
        }
        let taken = self
            .entries
            .iter()
            .enumerate()
            .any(|(i, entry)| i != index && entry.region.color == region.color);
        if taken {
            return Err(RegistryError::DuplicateColor(region.color));
        }
        let entry = &mut self.entries[index];
        entry.drawable = adapter.update_drawable(entry.drawable, &region);
        entry.region = region;
        Ok(())
    }

    /// Erase and drop the region at `index`, returning it.
    pub fn remove(
        &mut self,
        index: usize,
        adapter: &mut dyn RenderAdapter,
    ) -> RegistryResult<Region> {
        let len = self.entries.len();
        if index >= len {
            return Err(RegistryError::IndexOutOfRange { index, len });
        }
        let entry = self.entries.remove(index);
        adapter.remove_drawable(entry.drawable);
        Ok(entry.region)
    }

    /// Index of the first region containing `point`, walking insertion order.
    pub fn find_containing(&self, point: GeoPoint) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.region.contains(point))
    }

    /// Clone out the regions with every focus flag cleared.
    pub fn snapshot(&self) -> Vec<Region> {
        self.entries
            .iter()
            .map(|entry| {
                let mut region = entry.region.clone();
                region.focused = false;
                region
            })
            .collect()
    }

    /// Forget every entry without touching the adapter; the drawables
    /// die with the render target.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
