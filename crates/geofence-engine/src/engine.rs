use crate::drawing::DrawingSession;
use crate::occupancy::Evaluation;
use crate::store::{RegionRecord, RegionStore};
use geofence_core::{GeofenceError, GeofenceResult, RegionId, SessionPolicy, SourceId};
use geofence_geo::{contains, Coordinate, Polygon, MIN_VERTICES};
use std::sync::{Arc, Mutex, PoisonError};

/// Single owner of the drawing session and region store. Every mutation of
/// regions, selection, or occupancy goes through here.
#[derive(Debug, Default)]
pub struct GeofenceEngine {
    session: DrawingSession,
    store: RegionStore,
}

impl GeofenceEngine {
    pub fn new(policy: SessionPolicy) -> Self {
        Self {
            session: DrawingSession::new(policy),
            store: RegionStore::new(),
        }
    }

    pub fn session(&self) -> &DrawingSession {
        &self.session
    }

    pub fn store(&self) -> &RegionStore {
        &self.store
    }

    pub fn start_drawing(&mut self) {
        self.session.start();
    }

    pub fn add_point(&mut self, point: Coordinate) -> GeofenceResult<usize> {
        self.session.add_point(point)
    }

    /// Finishes the drawing and stores it. The returned polygon carries what a
    /// renderer needs: id, vertices, centroid.
    pub fn finish_drawing(&mut self) -> GeofenceResult<Arc<Polygon>> {
        let vertices = self.session.finish()?;
        let id = self.store.finalize(vertices)?;
        self.store.get(id).ok_or(GeofenceError::NotFound(id))
    }

    pub fn abandon_drawing(&mut self) -> usize {
        self.session.abandon()
    }

    pub fn select(&mut self, id: RegionId) -> GeofenceResult<()> {
        self.store.select(id)
    }

    pub fn selected_id(&self) -> Option<RegionId> {
        self.store.selected_id()
    }

    pub fn deselect(&mut self) {
        self.store.deselect();
    }

    /// Deletes a region and hands its id back so the caller can drop what it rendered.
    pub fn delete(&mut self, id: RegionId) -> GeofenceResult<RegionId> {
        self.store.delete(id)?;
        Ok(id)
    }

    pub fn delete_selected(&mut self) -> GeofenceResult<RegionId> {
        self.store.delete_selected()
    }

    pub fn clear(&mut self) -> usize {
        self.store.clear()
    }

    pub fn region(&self, id: RegionId) -> Option<Arc<Polygon>> {
        self.store.get(id)
    }

    pub fn regions(&self) -> Vec<(RegionId, Arc<Polygon>)> {
        self.store.all()
    }

    /// Feeds one location sample through every region and returns the
    /// transitions it caused.
    pub fn observe(&mut self, source: SourceId, point: Coordinate) -> Evaluation {
        self.store.evaluate_all(source, point)
    }

    /// Stateless check; does not touch occupancy.
    pub fn is_inside_any(&self, point: Coordinate) -> bool {
        self.store
            .all()
            .iter()
            .any(|(_, polygon)| contains(point, polygon))
    }

    /// Replays `finalize` for each record in order. Returns `(stored id, new id)` pairs.
    ///
    /// Every record is checked first; if any is too short nothing is stored.
    pub fn restore(
        &mut self,
        records: impl IntoIterator<Item = RegionRecord>,
    ) -> GeofenceResult<Vec<(RegionId, RegionId)>> {
        let records: Vec<RegionRecord> = records.into_iter().collect();
        if let Some(short) = records
            .iter()
            .find(|record| record.vertices.len() < MIN_VERTICES)
        {
            return Err(GeofenceError::TooFewPoints {
                count: short.vertices.len(),
            });
        }

        let mut mapping = Vec::with_capacity(records.len());
        for record in records {
            let id = self.store.finalize(record.vertices)?;
            mapping.push((record.id, id));
        }
        tracing::debug!(restored = mapping.len(), "regions restored");
        Ok(mapping)
    }
}

/// Engine behind one lock, for hosts that deliver gestures and location
/// samples on different threads.
#[derive(Debug, Clone, Default)]
pub struct SharedEngine {
    inner: Arc<Mutex<GeofenceEngine>>,
}

impl SharedEngine {
    pub fn new(engine: GeofenceEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// Runs `f` with exclusive access. A panic in an earlier holder does not
    /// poison the engine for later callers.
    pub fn with<R>(&self, f: impl FnOnce(&mut GeofenceEngine) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *guard)
    }

    pub fn observe(&self, source: SourceId, point: Coordinate) -> Evaluation {
        self.with(|engine| engine.observe(source, point))
    }
}
