//! Region engine: turns freehand drawing into numbered polygon regions and
//! reports when a tracked point enters or leaves them.

mod drawing;
mod engine;
mod occupancy;
mod store;
pub mod telemetry;

pub use drawing::DrawingSession;
pub use engine::{GeofenceEngine, SharedEngine};
pub use occupancy::{Evaluation, Occupancy, OccupancyTracker, Transition};
pub use store::{RegionRecord, RegionStore};

pub use geofence_core::{GeofenceError, GeofenceResult, RegionId, SessionPolicy, SourceId};
pub use geofence_geo::{contains, Coordinate, Polygon};
