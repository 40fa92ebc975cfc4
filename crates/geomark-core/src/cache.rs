//! Last-known layouts for venues visited this run.

use std::collections::HashMap;

use crate::region::Region;

/// In-memory store of the layout each venue had when its view closed.
///
/// Purely passive: the cache never draws anything and is only consulted
/// when a venue is opened again.
#[derive(Debug, Default)]
pub struct LayoutCache {
    layouts: HashMap<String, Vec<Region>>,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember `regions` as the layout for `location_id`, replacing any
    /// earlier snapshot.
    pub fn store(&mut self, location_id: String, regions: Vec<Region>) {
        self.layouts.insert(location_id, regions);
    }

    /// The last stored layout for `location_id`.
    pub fn get(&self, location_id: &str) -> Option<&[Region]> {
        self.layouts.get(location_id).map(Vec::as_slice)
    }

    pub fn contains(&self, location_id: &str) -> bool {
        self.layouts.contains_key(location_id)
    }

    pub fn clear(&mut self) {
        self.layouts.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{self, GeoPoint};

    fn layout(color: &str) -> Vec<Region> {
        vec![Region::new(
            geo::square_at_point(GeoPoint::new(49.0, -123.0), 30.0),
            color.to_string(),
        )]
    }

    #[test]
    fn test_store_and_get() {
        let mut cache = LayoutCache::new();
        assert!(cache.get("SRC 1").is_none());

        cache.store("SRC 1".to_string(), layout("#360185"));
        assert!(cache.contains("SRC 1"));
        let regions = cache.get("SRC 1").unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].color, "#360185");
    }

    #[test]
    fn test_store_replaces_earlier_snapshot() {
        let mut cache = LayoutCache::new();
        cache.store("SRC 1".to_string(), layout("#360185"));
        cache.store("SRC 1".to_string(), layout("#8F0177"));
        assert_eq!(cache.get("SRC 1").unwrap()[0].color, "#8F0177");
    }

    #[test]
    fn test_clear() {
        let mut cache = LayoutCache::new();
        cache.store("SRC 1".to_string(), layout("#360185"));
        cache.clear();
        assert!(!cache.contains("SRC 1"));
    }
}
