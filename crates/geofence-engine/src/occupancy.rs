use crate::telemetry;
use geofence_core::{RegionId, SourceId};
use geofence_geo::{contains, Coordinate, Polygon};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupancy {
    #[default]
    Outside,
    Inside,
}

impl Occupancy {
    fn from_contains(inside: bool) -> Self {
        if inside { Self::Inside } else { Self::Outside }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    Entered,
    Exited,
}

impl Transition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entered => "entered",
            Self::Exited => "exited",
        }
    }
}

/// Outcome of evaluating one location sample against every stored region.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Evaluation {
    /// Regions whose occupancy changed with this sample, in store order.
    pub transitions: Vec<(RegionId, Transition)>,
    /// Regions containing the sample, from this pass's containment results.
    pub inside: Vec<RegionId>,
}

impl Evaluation {
    pub fn inside_any(&self) -> bool {
        !self.inside.is_empty()
    }
}

/// Last known inside/outside state per (source, region).
///
/// Records are created on first evaluation; a missing record reads as `Outside`.
#[derive(Debug, Clone, Default)]
pub struct OccupancyTracker {
    states: HashMap<(SourceId, RegionId), Occupancy>,
}

impl OccupancyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, source: SourceId, region: RegionId) -> Occupancy {
        self.states
            .get(&(source, region))
            .copied()
            .unwrap_or_default()
    }

    /// Re-tests `point` against `polygon` and reports a transition only when
    /// the stored state flips. Repeating a sample never fires twice.
    pub fn evaluate(
        &mut self,
        source: SourceId,
        point: Coordinate,
        polygon: &Polygon,
    ) -> Option<Transition> {
        self.apply(source, polygon.id(), contains(point, polygon))
    }

    pub fn evaluate_all<'a>(
        &mut self,
        source: SourceId,
        point: Coordinate,
        regions: impl IntoIterator<Item = &'a Polygon>,
    ) -> Evaluation {
        let mut evaluation = Evaluation::default();
        for polygon in regions {
            let inside = contains(point, polygon);
            if inside {
                evaluation.inside.push(polygon.id());
            }
            if let Some(transition) = self.apply(source, polygon.id(), inside) {
                evaluation.transitions.push((polygon.id(), transition));
            }
        }
        metrics::counter!(telemetry::SAMPLES).increment(1);
        evaluation
    }

    /// Drops every record keyed on `region`, for all sources.
    pub fn forget_region(&mut self, region: RegionId) {
        self.states.retain(|(_, id), _| *id != region);
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    fn apply(&mut self, source: SourceId, region: RegionId, inside: bool) -> Option<Transition> {
        let next = Occupancy::from_contains(inside);
        let state = self.states.entry((source, region)).or_default();
        if *state == next {
            return None;
        }
        *state = next;
        let transition = match next {
            Occupancy::Inside => Transition::Entered,
            Occupancy::Outside => Transition::Exited,
        };
        metrics::counter!(telemetry::TRANSITIONS, "transition" => transition.as_str()).increment(1);
        tracing::debug!(
            source = %source,
            region_id = %region,
            transition = transition.as_str(),
            "occupancy changed"
        );
        Some(transition)
    }
}
