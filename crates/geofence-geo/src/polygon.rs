use crate::{BoundingBox, Coordinate};
use geofence_core::{GeofenceError, GeofenceResult, RegionId};
use serde::Serialize;

/// Fewest vertices a finalized region may have.
pub const MIN_VERTICES: usize = 3;

/// A finalized region. Vertices keep their drawn order and are treated as an
/// implicitly closed ring; the first vertex is not repeated at the end.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polygon {
    id: RegionId,
    vertices: Vec<Coordinate>,
    centroid: Coordinate,
    bounds: BoundingBox,
}

impl Polygon {
    pub fn new(id: RegionId, vertices: Vec<Coordinate>) -> GeofenceResult<Self> {
        if vertices.len() < MIN_VERTICES {
            return Err(GeofenceError::TooFewPoints {
                count: vertices.len(),
            });
        }
        let centroid = vertex_average(&vertices);
        let bounds = BoundingBox::enclosing(&vertices).ok_or(GeofenceError::TooFewPoints {
            count: vertices.len(),
        })?;
        Ok(Self {
            id,
            vertices,
            centroid,
            bounds,
        })
    }

    pub fn id(&self) -> RegionId {
        self.id
    }

    pub fn vertices(&self) -> &[Coordinate] {
        &self.vertices
    }

    /// Mean of the vertex latitudes and longitudes, used to place the region's marker.
    pub fn centroid(&self) -> Coordinate {
        self.centroid
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    /// Marker title shown next to the region.
    pub fn label(&self) -> String {
        format!("Geofence {}", self.id)
    }
}

fn vertex_average(vertices: &[Coordinate]) -> Coordinate {
    let count = vertices.len() as f64;
    let (lat_sum, lng_sum) = vertices.iter().fold((0.0, 0.0), |(lat, lng), vertex| {
        (lat + vertex.latitude, lng + vertex.longitude)
    });
    Coordinate::new(lat_sum / count, lng_sum / count)
}
