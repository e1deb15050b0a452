mod containment;
mod polygon;

pub use containment::{contains, contains_vertices};
pub use polygon::{Polygon, MIN_VERTICES};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BoundingBox {
    /// Smallest box enclosing every coordinate. `None` for an empty slice.
    pub fn enclosing(coords: &[Coordinate]) -> Option<Self> {
        let (first, rest) = coords.split_first()?;
        let mut bounds = Self {
            north: first.latitude,
            south: first.latitude,
            east: first.longitude,
            west: first.longitude,
        };
        for coord in rest {
            bounds.north = bounds.north.max(coord.latitude);
            bounds.south = bounds.south.min(coord.latitude);
            bounds.east = bounds.east.max(coord.longitude);
            bounds.west = bounds.west.min(coord.longitude);
        }
        Some(bounds)
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        coord.latitude <= self.north
            && coord.latitude >= self.south
            && coord.longitude <= self.east
            && coord.longitude >= self.west
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enclosing_box_spans_all_vertices() {
        let coords = [
            Coordinate::new(1.0, -3.0),
            Coordinate::new(-2.0, 4.0),
            Coordinate::new(0.5, 0.0),
        ];
        let bounds = BoundingBox::enclosing(&coords).expect("non-empty");
        assert_eq!(bounds.north, 1.0);
        assert_eq!(bounds.south, -2.0);
        assert_eq!(bounds.east, 4.0);
        assert_eq!(bounds.west, -3.0);
        assert!(bounds.contains(Coordinate::new(0.0, 0.0)));
        assert!(bounds.contains(Coordinate::new(1.0, 4.0)));
        assert!(!bounds.contains(Coordinate::new(1.5, 0.0)));
    }

    #[test]
    fn enclosing_box_of_nothing() {
        assert!(BoundingBox::enclosing(&[]).is_none());
    }

    #[test]
    fn coordinate_serializes_with_full_field_names() {
        let json = serde_json::to_string(&Coordinate::new(45.5, -73.25)).expect("serialize");
        assert_eq!(json, r#"{"latitude":45.5,"longitude":-73.25}"#);
    }
}
