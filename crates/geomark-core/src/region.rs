//! The rectangle record overlaid on the map.

use crate::geo::{self, GeoPoint};
use serde::{Deserialize, Serialize};

/// A rectangular region pinned to the map.
///
/// The four corners are stored in drawing order; the edge from the last
/// corner back to the first closes the polygon. The color doubles as the
/// region's identity, so no two regions in a session share one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// The corners, in drawing order.
    pub points: [GeoPoint; 4],
    /// CSS hex color, unique within a session.
    pub color: String,
    /// Whether the region is focused for editing.
    #[serde(default)]
    pub focused: bool,
    /// Free-form label shown with the region.
    #[serde(default)]
    pub annotation: Option<String>,
}

impl Region {
    /// Create an unfocused region with no annotation.
    pub fn new(points: [GeoPoint; 4], color: String) -> Self {
        Self {
            points,
            color,
            focused: false,
            annotation: None,
        }
    }

    /// Attach a label.
    pub fn with_annotation(mut self, annotation: String) -> Self {
        self.annotation = Some(annotation);
        self
    }

    /// Centroid of the corners.
    pub fn center(&self) -> GeoPoint {
        geo::centroid(&self.points).unwrap_or(self.points[0])
    }

    /// Whether the point lies inside the region.
    pub fn contains(&self, point: GeoPoint) -> bool {
        geo::point_in_polygon(point, &self.points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_defaults() {
        let points = geo::square_at_point(GeoPoint::new(49.0, -123.0), 30.0);
        let region = Region::new(points, "#360185".to_string());
        assert!(!region.focused);
        assert!(region.annotation.is_none());
        assert_eq!(region.color, "#360185");
    }

    #[test]
    fn test_region_contains_center() {
        let center = GeoPoint::new(49.0, -123.0);
        let region = Region::new(geo::square_at_point(center, 30.0), "#8F0177".to_string());
        assert!(region.contains(center));
        assert!(!region.contains(GeoPoint::new(49.1, -123.0)));
        assert!((region.center().lat - center.lat).abs() < 1e-9);
    }

    #[test]
    fn test_region_json_round_trip() {
        let region = Region::new(
            geo::square_at_point(GeoPoint::new(49.0, -123.0), 30.0),
            "#DE1A58".to_string(),
        )
        .with_annotation("Court 3".to_string());

        let json = serde_json::to_string(&region).unwrap();
        let parsed: Region = serde_json::from_str(&json).unwrap();
        assert_eq!(region, parsed);
    }

    #[test]
    fn test_region_json_defaults_omitted_fields() {
        // Seed data may leave focus and annotation out entirely.
        let json = r##"{
            "points": [
                {"lat": 49.0, "lng": -123.0},
                {"lat": 49.0, "lng": -122.9},
                {"lat": 49.1, "lng": -122.9},
                {"lat": 49.1, "lng": -123.0}
            ],
            "color": "#F4B342"
        }"##;
        let region: Region = serde_json::from_str(json).unwrap();
        assert!(!region.focused);
        assert!(region.annotation.is_none());
    }
}
