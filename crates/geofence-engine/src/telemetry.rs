//! Metric names recorded by the engine.

use metrics::{describe_counter, describe_gauge, Unit};

pub const REGIONS: &str = "geofence_regions";
pub const REGIONS_CREATED: &str = "geofence_regions_created_total";
pub const REGIONS_DELETED: &str = "geofence_regions_deleted_total";
pub const TRANSITIONS: &str = "geofence_transitions_total";
pub const SAMPLES: &str = "geofence_samples_total";

/// Registers descriptions with whichever recorder is installed.
pub fn describe_metrics() {
    describe_gauge!(REGIONS, Unit::Count, "Regions currently stored");
    describe_counter!(REGIONS_CREATED, Unit::Count, "Regions finalized");
    describe_counter!(REGIONS_DELETED, Unit::Count, "Regions removed");
    describe_counter!(
        TRANSITIONS,
        Unit::Count,
        "Occupancy transitions, labelled entered or exited"
    );
    describe_counter!(SAMPLES, Unit::Count, "Location samples evaluated");
}
