use std::env;

use serde::{Deserialize, Serialize};

use crate::rum::constants::{KEEP_RESOURCE_TIMINGS_ENV, LOG_TARGET, TIMING_UNIT_ENV};
use crate::rum::timing::TimingUnit;

/// Tunables of a [`RumBridge`](crate::rum::RumBridge).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RumBridgeSettings {
    /// Unit of the `startTime`/`duration` fields of the resource timing block.
    pub timing_unit: TimingUnit,
    /// Drops `_dd.resource_timings` from the attributes forwarded with `stopResource`.
    pub strip_resource_timings: bool,
}

impl Default for RumBridgeSettings {
    fn default() -> Self {
        Self {
            timing_unit: TimingUnit::default(),
            strip_resource_timings: true,
        }
    }
}

impl RumBridgeSettings {
    /// Defaults overridden by `RUM_BRIDGE_TIMING_UNIT` and `RUM_BRIDGE_KEEP_RESOURCE_TIMINGS`.
    pub fn from_env() -> Self {
        Self::default().with_overrides(
            env::var(TIMING_UNIT_ENV).ok().as_deref(),
            env::var_os(KEEP_RESOURCE_TIMINGS_ENV).is_some(),
        )
    }

    fn with_overrides(mut self, timing_unit: Option<&str>, keep_resource_timings: bool) -> Self {
        if let Some(raw) = timing_unit {
            match raw.parse::<TimingUnit>() {
                Ok(unit) => self.timing_unit = unit,
                Err(err) => log::warn!(
                    target: LOG_TARGET,
                    "ignoring {TIMING_UNIT_ENV}: {err}"
                ),
            }
        }
        if keep_resource_timings {
            self.strip_resource_timings = false;
        }
        self
    }

    pub fn with_timing_unit(mut self, unit: TimingUnit) -> Self {
        self.timing_unit = unit;
        self
    }
}
