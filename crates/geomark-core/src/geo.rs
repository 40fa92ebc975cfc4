//! Geographic transforms for building-scale map regions.
//!
//! All functions work on coordinates in degrees and approximate the map
//! locally as a plane, scaling longitude displacement by the cosine of the
//! latitude. The approximation is good at the scale of courts and buildings
//! and degrades with shape size and toward the poles.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Meters per degree of latitude, treated as constant.
pub const METERS_PER_DEGREE_LAT: f64 = 111_320.0;

/// Side length of a freshly spawned square, in meters.
pub const DEFAULT_SIDE_METERS: f64 = 30.0;

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees, positive north.
    pub lat: f64,
    /// Longitude in degrees, positive east.
    pub lng: f64,
}

impl GeoPoint {
    /// Create a point from latitude and longitude in degrees.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lng)
    }
}

/// Planar frame in meters anchored at a reference coordinate.
///
/// East is +x, north is +y. Longitude displacement is scaled by the cosine of
/// the anchor latitude so both axes are in meters.
#[derive(Debug, Clone, Copy)]
struct LocalFrame {
    origin: GeoPoint,
    cos_lat: f64,
}

impl LocalFrame {
    fn new(origin: GeoPoint) -> Self {
        Self {
            origin,
            cos_lat: origin.lat.to_radians().cos(),
        }
    }

    fn to_local(&self, p: GeoPoint) -> Point {
        Point::new(
            (p.lng - self.origin.lng) * self.cos_lat * METERS_PER_DEGREE_LAT,
            (p.lat - self.origin.lat) * METERS_PER_DEGREE_LAT,
        )
    }

    fn to_geo(&self, p: Point) -> GeoPoint {
        GeoPoint::new(
            self.origin.lat + p.y / METERS_PER_DEGREE_LAT,
            self.origin.lng + p.x / (METERS_PER_DEGREE_LAT * self.cos_lat),
        )
    }
}

/// Arithmetic mean of the latitudes and longitudes. `None` for empty input.
pub fn centroid(points: &[GeoPoint]) -> Option<GeoPoint> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let lat = points.iter().map(|p| p.lat).sum::<f64>() / n;
    let lng = points.iter().map(|p| p.lng).sum::<f64>() / n;
    Some(GeoPoint::new(lat, lng))
}

/// Rotate points about their centroid.
///
/// Positive degrees turn the shape clockwise when north is up. Empty input
/// comes back unchanged, as does a shape whose points all coincide (every
/// point sits at the centroid, so the rotation fixes it).
pub fn rotate(points: &[GeoPoint], degrees: f64) -> Vec<GeoPoint> {
    let Some(center) = centroid(points) else {
        return points.to_vec();
    };
    let frame = LocalFrame::new(center);
    let rotation = Affine::rotate(-degrees.to_radians());
    points
        .iter()
        .map(|&p| frame.to_geo(rotation * frame.to_local(p)))
        .collect()
}

/// Ray-casting point-in-polygon test (even-odd rule).
///
/// Walks the polygon edge by edge, pairing each vertex with its cyclic
/// predecessor, and counts crossings of a horizontal ray through the point.
/// Points exactly on an edge may land on either side.
pub fn point_in_polygon(point: GeoPoint, polygon: &[GeoPoint]) -> bool {
    if polygon.is_empty() {
        return false;
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (xi, yi) = (polygon[i].lng, polygon[i].lat);
        let (xj, yj) = (polygon[j].lng, polygon[j].lat);
        let crosses = ((yi > point.lat) != (yj > point.lat))
            && point.lng < (xj - xi) * (point.lat - yi) / (yj - yi) + xi;
        if crosses {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Axis-aligned square centered at `center`.
///
/// Vertex order is south-west, south-east, north-east, north-west. The
/// winding matters to [`grow`], which derives its axes from the first edge.
pub fn square_at_point(center: GeoPoint, side_meters: f64) -> [GeoPoint; 4] {
    let half = side_meters / 2.0;
    let d_lat = half / METERS_PER_DEGREE_LAT;
    let d_lng = half / (METERS_PER_DEGREE_LAT * center.lat.to_radians().cos());
    [
        GeoPoint::new(center.lat - d_lat, center.lng - d_lng),
        GeoPoint::new(center.lat - d_lat, center.lng + d_lng),
        GeoPoint::new(center.lat + d_lat, center.lng + d_lng),
        GeoPoint::new(center.lat + d_lat, center.lng - d_lng),
    ]
}

/// Shift every point by whole steps north and east.
///
/// The longitude scale factor is taken from the first point's latitude, and
/// every point shifts rigidly by the same degree offsets.
pub fn translate(
    points: &[GeoPoint],
    north_steps: f64,
    east_steps: f64,
    meters_per_step: f64,
) -> Vec<GeoPoint> {
    let Some(first) = points.first() else {
        return Vec::new();
    };
    let d_lat = north_steps * meters_per_step / METERS_PER_DEGREE_LAT;
    let d_lng =
        east_steps * meters_per_step / (METERS_PER_DEGREE_LAT * first.lat.to_radians().cos());
    points
        .iter()
        .map(|p| GeoPoint::new(p.lat + d_lat, p.lng + d_lng))
        .collect()
}

/// Grow a rectangle by fixed meter amounts along its two local axes.
///
/// Axis A is the direction of the first edge (point 0 to point 1), axis B its
/// perpendicular. Each vertex is pushed away from the centroid by `delta` per
/// axis; a negative delta shrinks. A delta larger than the half-extent flips
/// the vertex through the centroid and yields a self-intersecting
/// quadrilateral, which is left as is. A collapsed first edge leaves the
/// input unchanged because the axes are undefined.
pub fn grow(points: &[GeoPoint; 4], delta_a_meters: f64, delta_b_meters: f64) -> [GeoPoint; 4] {
    let Some(center) = centroid(points) else {
        return *points;
    };
    let frame = LocalFrame::new(center);
    let local = points.map(|p| frame.to_local(p));

    let first_edge = local[1] - local[0];
    let edge_len = first_edge.hypot();
    if edge_len < f64::EPSILON {
        return *points;
    }
    let axis_a = first_edge / edge_len;
    let axis_b = Vec2::new(-axis_a.y, axis_a.x);

    local.map(|p| {
        let v = p.to_vec2();
        let a = v.dot(axis_a);
        let b = v.dot(axis_b);
        let pushed =
            axis_a * (a + sign(a) * delta_a_meters) + axis_b * (b + sign(b) * delta_b_meters);
        frame.to_geo(pushed.to_point())
    })
}

/// Sign with `sign(0) = 0`, so a vertex sitting exactly on an axis stays put.
fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}
