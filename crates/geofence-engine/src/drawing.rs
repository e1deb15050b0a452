use geofence_core::{GeofenceError, GeofenceResult, SessionPolicy};
use geofence_geo::{Coordinate, MIN_VERTICES};

/// Accumulates the vertices of one in-progress region.
#[derive(Debug, Clone, Default)]
pub struct DrawingSession {
    policy: SessionPolicy,
    points: Option<Vec<Coordinate>>,
}

impl DrawingSession {
    pub fn new(policy: SessionPolicy) -> Self {
        Self {
            policy,
            points: None,
        }
    }

    pub fn policy(&self) -> SessionPolicy {
        self.policy
    }

    pub fn is_active(&self) -> bool {
        self.points.is_some()
    }

    /// Points gathered so far; empty when no session is active.
    pub fn points(&self) -> &[Coordinate] {
        self.points.as_deref().unwrap_or_default()
    }

    /// Begins a new session, silently dropping any unfinished one.
    pub fn start(&mut self) {
        if let Some(previous) = self.points.replace(Vec::new()) {
            if !previous.is_empty() {
                tracing::debug!(discarded = previous.len(), "unfinished drawing discarded");
            }
        }
        tracing::debug!("drawing session started");
    }

    /// Appends a point and returns how many the session now holds.
    pub fn add_point(&mut self, point: Coordinate) -> GeofenceResult<usize> {
        let points = self
            .points
            .as_mut()
            .ok_or(GeofenceError::NoActiveSession)?;
        points.push(point);
        Ok(points.len())
    }

    /// Hands back the accumulated ring once it has at least three points.
    ///
    /// On `TooFewPoints` the session is left as it was so drawing can continue.
    pub fn finish(&mut self) -> GeofenceResult<Vec<Coordinate>> {
        let count = match &self.points {
            None => return Err(GeofenceError::NoActiveSession),
            Some(points) => points.len(),
        };
        if count < MIN_VERTICES {
            return Err(GeofenceError::TooFewPoints { count });
        }
        let next = match self.policy {
            SessionPolicy::AutoRestart => Some(Vec::new()),
            SessionPolicy::RequireStart => None,
        };
        let points = std::mem::replace(&mut self.points, next).unwrap_or_default();
        Ok(points)
    }

    /// Drops the session. Returns how many points were thrown away.
    pub fn abandon(&mut self) -> usize {
        self.points.take().map(|points| points.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(latitude: f64, longitude: f64) -> Coordinate {
        Coordinate::new(latitude, longitude)
    }

    #[test]
    fn add_point_requires_start() {
        let mut session = DrawingSession::default();
        assert_eq!(
            session.add_point(c(0.0, 0.0)),
            Err(GeofenceError::NoActiveSession)
        );
        assert_eq!(session.finish(), Err(GeofenceError::NoActiveSession));
    }

    #[test]
    fn two_points_are_too_few_and_session_survives() {
        let mut session = DrawingSession::default();
        session.start();
        session.add_point(c(0.0, 0.0)).expect("active");
        session.add_point(c(0.0, 1.0)).expect("active");
        assert_eq!(
            session.finish(),
            Err(GeofenceError::TooFewPoints { count: 2 })
        );

        assert_eq!(session.add_point(c(1.0, 1.0)), Ok(3));
        let ring = session.finish().expect("three points");
        assert_eq!(ring, vec![c(0.0, 0.0), c(0.0, 1.0), c(1.0, 1.0)]);
    }

    #[test]
    fn duplicates_are_kept() {
        let mut session = DrawingSession::default();
        session.start();
        for _ in 0..3 {
            session.add_point(c(1.0, 1.0)).expect("active");
        }
        assert_eq!(session.points().len(), 3);
    }

    #[test]
    fn restart_discards_unfinished_points() {
        let mut session = DrawingSession::default();
        session.start();
        session.add_point(c(0.0, 0.0)).expect("active");
        session.start();
        assert!(session.is_active());
        assert!(session.points().is_empty());
    }

    #[test]
    fn auto_restart_leaves_an_empty_session() {
        let mut session = DrawingSession::new(SessionPolicy::AutoRestart);
        session.start();
        for point in [c(0.0, 0.0), c(0.0, 1.0), c(1.0, 1.0)] {
            session.add_point(point).expect("active");
        }
        session.finish().expect("three points");
        assert!(session.is_active());
        assert_eq!(session.add_point(c(5.0, 5.0)), Ok(1));
    }

    #[test]
    fn require_start_closes_the_session() {
        let mut session = DrawingSession::new(SessionPolicy::RequireStart);
        session.start();
        for point in [c(0.0, 0.0), c(0.0, 1.0), c(1.0, 1.0)] {
            session.add_point(point).expect("active");
        }
        session.finish().expect("three points");
        assert!(!session.is_active());
        assert_eq!(
            session.add_point(c(5.0, 5.0)),
            Err(GeofenceError::NoActiveSession)
        );
    }

    #[test]
    fn abandon_reports_dropped_points() {
        let mut session = DrawingSession::default();
        assert_eq!(session.abandon(), 0);
        session.start();
        session.add_point(c(0.0, 0.0)).expect("active");
        assert_eq!(session.abandon(), 1);
        assert!(!session.is_active());
    }
}
