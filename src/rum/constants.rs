/// Log target used for every diagnostic emitted by the bridge.
pub const LOG_TARGET: &str = "rum_bridge";

/// Attribute the native SDK reads as the event's internal timestamp.
pub const TIMESTAMP_KEY: &str = "_dd.timestamp";

/// Context entry carrying the nested resource timing breakdown.
pub const RESOURCE_TIMINGS_KEY: &str = "_dd.resource_timings";

pub const TIMING_UNIT_ENV: &str = "RUM_BRIDGE_TIMING_UNIT";
pub const KEEP_RESOURCE_TIMINGS_ENV: &str = "RUM_BRIDGE_KEEP_RESOURCE_TIMINGS";
