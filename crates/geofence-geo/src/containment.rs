//! Point-in-polygon membership by even-odd ray casting.
//!
//! The ray runs from the point toward increasing longitude. An edge is counted
//! when it straddles the point's latitude under the half-open rule
//! `(a.lat > p.lat) != (b.lat > p.lat)`, so horizontal edges never count and a
//! vertex shared by two edges is counted once. Points lying exactly on an edge
//! or vertex are reported as outside.

use crate::{Coordinate, Polygon, MIN_VERTICES};

/// Whether `point` lies strictly inside `polygon`.
pub fn contains(point: Coordinate, polygon: &Polygon) -> bool {
    if !polygon.bounds().contains(point) {
        return false;
    }
    contains_vertices(point, polygon.vertices())
}

/// Ray-casting test over a raw, implicitly closed vertex ring.
/// Rings with fewer than three vertices contain nothing.
pub fn contains_vertices(point: Coordinate, vertices: &[Coordinate]) -> bool {
    if vertices.len() < MIN_VERTICES {
        return false;
    }

    let mut inside = false;
    let mut prev = vertices[vertices.len() - 1];
    for &current in vertices {
        if on_edge(point, prev, current) {
            return false;
        }
        if (current.latitude > point.latitude) != (prev.latitude > point.latitude) {
            let crossing = current.longitude
                + (point.latitude - current.latitude) * (prev.longitude - current.longitude)
                    / (prev.latitude - current.latitude);
            if point.longitude < crossing {
                inside = !inside;
            }
        }
        prev = current;
    }
    inside
}

fn on_edge(point: Coordinate, a: Coordinate, b: Coordinate) -> bool {
    let cross = (b.longitude - a.longitude) * (point.latitude - a.latitude)
        - (b.latitude - a.latitude) * (point.longitude - a.longitude);
    cross == 0.0
        && point.longitude >= a.longitude.min(b.longitude)
        && point.longitude <= a.longitude.max(b.longitude)
        && point.latitude >= a.latitude.min(b.latitude)
        && point.latitude <= a.latitude.max(b.latitude)
}
