use crate::occupancy::{Evaluation, OccupancyTracker};
use crate::telemetry;
use geofence_core::{GeofenceError, GeofenceResult, RegionId, RegionIdAllocator, SourceId};
use geofence_geo::{Coordinate, Polygon};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Stored form of a region, enough to rebuild it by replaying `finalize`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRecord {
    pub id: RegionId,
    pub vertices: Vec<Coordinate>,
}

/// Authoritative set of finalized regions, the current selection, and the
/// occupancy state keyed on them.
///
/// Ids come from a monotonic counter, so ordering the map by id is the same
/// as insertion order.
#[derive(Debug, Default)]
pub struct RegionStore {
    ids: RegionIdAllocator,
    regions: BTreeMap<RegionId, Arc<Polygon>>,
    selected: Option<RegionId>,
    occupancy: OccupancyTracker,
}

impl RegionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Numbers and stores a drawn ring. Fails only when the ring has fewer than three vertices.
    pub fn finalize(&mut self, vertices: Vec<Coordinate>) -> GeofenceResult<RegionId> {
        let polygon = Polygon::new(self.ids.peek(), vertices)?;
        let id = self.ids.next_id();
        tracing::debug!(
            region_id = %id,
            vertices = polygon.vertices().len(),
            centroid_lat = polygon.centroid().latitude,
            centroid_lng = polygon.centroid().longitude,
            "region finalized"
        );
        self.regions.insert(id, Arc::new(polygon));
        metrics::counter!(telemetry::REGIONS_CREATED).increment(1);
        self.record_size();
        Ok(id)
    }

    pub fn get(&self, id: RegionId) -> Option<Arc<Polygon>> {
        self.regions.get(&id).cloned()
    }

    pub fn select(&mut self, id: RegionId) -> GeofenceResult<()> {
        if !self.regions.contains_key(&id) {
            return Err(GeofenceError::NotFound(id));
        }
        self.selected = Some(id);
        tracing::debug!(region_id = %id, "region selected");
        Ok(())
    }

    pub fn selected_id(&self) -> Option<RegionId> {
        self.selected
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Removes a region together with its selection and occupancy records.
    pub fn delete(&mut self, id: RegionId) -> GeofenceResult<()> {
        if self.regions.remove(&id).is_none() {
            return Err(GeofenceError::NotFound(id));
        }
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.occupancy.forget_region(id);
        tracing::debug!(region_id = %id, "region deleted");
        metrics::counter!(telemetry::REGIONS_DELETED).increment(1);
        self.record_size();
        Ok(())
    }

    pub fn delete_selected(&mut self) -> GeofenceResult<RegionId> {
        let id = self.selected.ok_or(GeofenceError::NothingSelected)?;
        self.delete(id)?;
        Ok(id)
    }

    /// Snapshot of every region in insertion order. Later mutation of the
    /// store does not change a snapshot already taken.
    pub fn all(&self) -> Vec<(RegionId, Arc<Polygon>)> {
        self.regions
            .iter()
            .map(|(id, polygon)| (*id, Arc::clone(polygon)))
            .collect()
    }

    /// Removes every region and all occupancy state. The id counter keeps counting.
    pub fn clear(&mut self) -> usize {
        let removed = self.regions.len();
        self.regions.clear();
        self.selected = None;
        self.occupancy.clear();
        if removed > 0 {
            tracing::debug!(removed, "regions cleared");
            metrics::counter!(telemetry::REGIONS_DELETED).increment(removed as u64);
        }
        self.record_size();
        removed
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn records(&self) -> Vec<RegionRecord> {
        self.regions
            .values()
            .map(|polygon| RegionRecord {
                id: polygon.id(),
                vertices: polygon.vertices().to_vec(),
            })
            .collect()
    }

    /// Runs one location sample from `source` through every region in store order.
    pub fn evaluate_all(&mut self, source: SourceId, point: Coordinate) -> Evaluation {
        self.occupancy
            .evaluate_all(source, point, self.regions.values().map(Arc::as_ref))
    }

    pub fn occupancy(&self) -> &OccupancyTracker {
        &self.occupancy
    }

    fn record_size(&self) {
        metrics::gauge!(telemetry::REGIONS).set(self.regions.len() as f64);
    }
}
