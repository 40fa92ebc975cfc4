//! The directory of known venues and their seed layouts.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;
use crate::region::Region;

/// Map zoom used when a venue does not specify one.
pub const DEFAULT_ZOOM: u32 = 17;

/// Shared map framing for the campus venues.
const CAMPUS_CENTER: GeoPoint = GeoPoint::new(49.26685408475546, -123.24885947703935);

fn default_zoom() -> u32 {
    DEFAULT_ZOOM
}

/// A named venue: where to frame the map and which regions start on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    pub name: String,
    pub center: GeoPoint,
    #[serde(default = "default_zoom")]
    pub zoom: u32,
    #[serde(default)]
    pub regions: Vec<Region>,
}

impl LocationInfo {
    /// A venue with no seed regions at the default zoom.
    pub fn new(name: String, center: GeoPoint) -> Self {
        Self {
            name,
            center,
            zoom: DEFAULT_ZOOM,
            regions: Vec::new(),
        }
    }

    /// Set the seed regions.
    pub fn with_regions(mut self, regions: Vec<Region>) -> Self {
        self.regions = regions;
        self
    }
}

/// Lookup table from venue id to [`LocationInfo`], with a fallback venue
/// for ids nobody registered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationDirectory {
    default: LocationInfo,
    locations: HashMap<String, LocationInfo>,
}

impl LocationDirectory {
    /// An empty directory that resolves everything to `default`.
    pub fn new(default: LocationInfo) -> Self {
        Self {
            default,
            locations: HashMap::new(),
        }
    }

    /// The built-in campus venues.
    ///
    /// Venues sharing a building share one layout; each id still gets its
    /// own entry so the venue name follows the id.
    pub fn builtin() -> Self {
        let mut directory = Self::new(LocationInfo::new("Default".to_string(), CAMPUS_CENTER));
        for id in ["SRC 1", "SRC 2", "SRC 3", "SRC 4"] {
            directory.insert(
                id.to_string(),
                LocationInfo::new(id.to_string(), CAMPUS_CENTER).with_regions(src_courts()),
            );
        }
        for id in ["Rec North Gym A", "Rec North Gym B", "Rec North Nestor's Gym"] {
            directory.insert(
                id.to_string(),
                LocationInfo::new(id.to_string(), CAMPUS_CENTER).with_regions(rec_north_gyms()),
            );
        }
        for id in ["MacInnes 1", "MacInnes 2"] {
            directory.insert(
                id.to_string(),
                LocationInfo::new(id.to_string(), CAMPUS_CENTER).with_regions(macinnes_fields()),
            );
        }
        directory
    }

    /// Register or replace a venue.
    pub fn insert(&mut self, id: String, info: LocationInfo) {
        self.locations.insert(id, info);
    }

    /// Look up a venue, falling back to the default for unknown ids.
    pub fn resolve(&self, id: &str) -> &LocationInfo {
        match self.locations.get(id) {
            Some(info) => info,
            None => {
                log::info!(
                    "unknown location {:?}, falling back to {}",
                    id,
                    self.default.name
                );
                &self.default
            }
        }
    }

    /// The fallback venue.
    pub fn default_location(&self) -> &LocationInfo {
        &self.default
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.locations.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Serialize the directory to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a directory from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

fn seed(color: &str, label: &str, points: [GeoPoint; 4]) -> Region {
    Region::new(points, color.to_string()).with_annotation(label.to_string())
}

// Cross Volleyball
fn src_courts() -> Vec<Region> {
    vec![
        seed(
            "#360185",
            "SRC 1 upstairs",
            [
                GeoPoint::new(49.268095681245974, -123.24906555573901),
                GeoPoint::new(49.268140596832595, -123.24894633136537),
                GeoPoint::new(49.26835842571491, -123.24913906709305),
                GeoPoint::new(49.2683135101283, -123.24925829146672),
            ],
        ),
        seed(
            "#8F0177",
            "SRC 2 upstairs",
            [
                GeoPoint::new(49.26814596883459, -123.24891625532884),
                GeoPoint::new(49.268190884439896, -123.24879703084306),
                GeoPoint::new(49.268408713319786, -123.24898976665106),
                GeoPoint::new(49.26836379771448, -123.24910899113684),
            ],
        ),
        seed(
            "#DE1A58",
            "SRC 3 upstairs",
            [
                GeoPoint::new(49.26819952814257, -123.2487658594308),
                GeoPoint::new(49.268244443701334, -123.24864663483847),
                GeoPoint::new(49.26846227258476, -123.2488393710198),
                GeoPoint::new(49.268417357025996, -123.24895859561214),
            ],
        ),
        seed(
            "#F4B342",
            "SRC 4 upstairs",
            [
                GeoPoint::new(49.26825748070847, -123.24861428870325),
                GeoPoint::new(49.268302396231185, -123.24849506472864),
                GeoPoint::new(49.26852022508935, -123.2486878002792),
                GeoPoint::new(49.26847530956663, -123.24880702425381),
            ],
        ),
    ]
}

// Dodgeball
fn rec_north_gyms() -> Vec<Region> {
    vec![
        seed(
            "#360185",
            "Rec North Gym A Level 1",
            [
                GeoPoint::new(49.2679702634445, -123.25049282051219),
                GeoPoint::new(49.268087043897275, -123.25018283782053),
                GeoPoint::new(49.268258195162815, -123.25033427278177),
                GeoPoint::new(49.26814141471004, -123.25064425547342),
            ],
        ),
        seed(
            "#8F0177",
            "Rec North Gym B Level 1",
            [
                GeoPoint::new(49.267772597923376, -123.25032723468274),
                GeoPoint::new(49.26788937827039, -123.2500172537397),
                GeoPoint::new(49.26806052954018, -123.25016868802308),
                GeoPoint::new(49.26794374919317, -123.25047866896612),
            ],
        ),
        seed(
            "#DE1A58",
            "Rec North Nestor's Gym Level 1",
            [
                GeoPoint::new(49.26809733084768, -123.25013715404187),
                GeoPoint::new(49.26821411133877, -123.24982717032704),
                GeoPoint::new(49.26838526258507, -123.24997860585025),
                GeoPoint::new(49.26826848209398, -123.25028858956507),
            ],
        ),
    ]
}

// Flag Football
fn macinnes_fields() -> Vec<Region> {
    vec![
        seed(
            "#8F0177",
            "MacInnes 1",
            [
                GeoPoint::new(49.26647002634948, -123.24874045917733),
                GeoPoint::new(49.26655985747189, -123.24850201760778),
                GeoPoint::new(49.2670888704746, -123.24897007621688),
                GeoPoint::new(49.266999039352164, -123.24920851778641),
            ],
        ),
        seed(
            "#DE1A58",
            "MacInnes 2",
            [
                GeoPoint::new(49.266356155540265, -123.24902962253957),
                GeoPoint::new(49.26644598678985, -123.24879118098646),
                GeoPoint::new(49.26697499984449, -123.24925923842095),
                GeoPoint::new(49.26688516859492, -123.24949767997406),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_venues() {
        let directory = LocationDirectory::builtin();
        assert_eq!(directory.ids().len(), 9);

        let src = directory.resolve("SRC 2");
        assert_eq!(src.name, "SRC 2");
        assert_eq!(src.zoom, DEFAULT_ZOOM);
        assert_eq!(src.regions.len(), 4);

        let fields = directory.resolve("MacInnes 2");
        assert_eq!(fields.regions.len(), 2);
    }

    #[test]
    fn test_builtin_layouts_have_unique_colors() {
        let directory = LocationDirectory::builtin();
        for id in directory.ids() {
            let info = directory.resolve(id);
            let colors: HashSet<&str> = info.regions.iter().map(|r| r.color.as_str()).collect();
            assert_eq!(colors.len(), info.regions.len(), "{}", id);
        }
    }

    #[test]
    fn test_unknown_id_falls_back_to_default() {
        let directory = LocationDirectory::builtin();
        let info = directory.resolve("Aquatic Centre");
        assert_eq!(info.name, "Default");
        assert!(info.regions.is_empty());
    }

    #[test]
    fn test_directory_json_round_trip() {
        let directory = LocationDirectory::builtin();
        let json = directory.to_json().unwrap();
        let parsed = LocationDirectory::from_json(&json).unwrap();
        assert_eq!(directory, parsed);
    }

    #[test]
    fn test_sparse_json_gets_defaults() {
        let json = r#"{
            "default": {
                "name": "Anywhere",
                "center": {"lat": 49.0, "lng": -123.0}
            },
            "locations": {}
        }"#;
        let directory = LocationDirectory::from_json(json).unwrap();
        let info = directory.resolve("missing");
        assert_eq!(info.zoom, DEFAULT_ZOOM);
        assert!(info.regions.is_empty());
    }
}
