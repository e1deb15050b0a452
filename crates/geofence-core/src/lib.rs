pub mod error;
pub mod ids;
pub mod policy;
pub mod time;

pub use error::{ErrorCode, GeofenceError, GeofenceResult};
pub use ids::{RegionId, RegionIdAllocator, SourceId};
pub use policy::SessionPolicy;
pub use time::{now_epoch_millis, EpochMillis};
