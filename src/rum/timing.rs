//! Decomposition of a resource timing block into absolute phase intervals.
//!
//! The host hands over phases as offsets relative to the resource start. The native
//! metrics call wants absolute instants, so every phase is anchored on the resource's
//! own start timestamp and converted through integer nanoseconds.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rum::error::{invalid_argument, invalid_timings, RumError, RumResult};
use crate::rum::json::optional_i64_or_none;

const NANOS_PER_SECOND: i128 = 1_000_000_000;
const NANOS_PER_MILLI: i128 = 1_000_000;

/// Unit of the `startTime` and `duration` fields of a timing block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimingUnit {
    #[default]
    Nanoseconds,
    Milliseconds,
    Seconds,
}

impl TimingUnit {
    fn nanos_per_unit(self) -> f64 {
        match self {
            TimingUnit::Nanoseconds => 1.0,
            TimingUnit::Milliseconds => 1e6,
            TimingUnit::Seconds => 1e9,
        }
    }

    /// Converts a (possibly fractional) amount of this unit into whole nanoseconds.
    pub fn to_nanos(self, amount: f64) -> RumResult<i128> {
        if !amount.is_finite() {
            return Err(invalid_timings(format!(
                "timing value {amount} is not a finite number"
            )));
        }
        let nanos = (amount * self.nanos_per_unit()).round();
        // i64 bounds keep the later i128 sums far from overflow.
        if nanos < i64::MIN as f64 || nanos > i64::MAX as f64 {
            return Err(invalid_timings(format!(
                "timing value {amount} is out of range"
            )));
        }
        Ok(nanos as i128)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimingUnit::Nanoseconds => "ns",
            TimingUnit::Milliseconds => "ms",
            TimingUnit::Seconds => "s",
        }
    }
}

impl fmt::Display for TimingUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimingUnit {
    type Err = RumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ns" | "nanoseconds" => Ok(TimingUnit::Nanoseconds),
            "ms" | "milliseconds" => Ok(TimingUnit::Milliseconds),
            "s" | "seconds" => Ok(TimingUnit::Seconds),
            other => Err(invalid_argument(format!("unknown timing unit `{other}`"))),
        }
    }
}

/// One phase of the timing block, relative to the resource start.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseTiming {
    pub start_time: f64,
    pub duration: f64,
}

/// The `_dd.resource_timings` block as sent by the host.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceTimings {
    pub fetch: PhaseTiming,
    #[serde(default)]
    pub redirect: Option<PhaseTiming>,
    #[serde(default)]
    pub dns: Option<PhaseTiming>,
    #[serde(default)]
    pub connect: Option<PhaseTiming>,
    #[serde(default)]
    pub ssl: Option<PhaseTiming>,
    #[serde(default)]
    pub first_byte: Option<PhaseTiming>,
    #[serde(default)]
    pub download: Option<PhaseTiming>,
    /// Response size in bytes. Anything but a whole number is dropped rather than
    /// invalidating the phases.
    #[serde(default, deserialize_with = "optional_i64_or_none")]
    pub size: Option<i64>,
}

impl ResourceTimings {
    pub fn from_value(value: &Value) -> RumResult<Self> {
        if !value.is_object() {
            return Err(invalid_timings("resource timings must be an object"));
        }
        ResourceTimings::deserialize(value)
            .map_err(|err| invalid_timings(format!("malformed resource timings: {err}")))
    }

    /// Anchors every phase on `resource_start_ms`.
    ///
    /// Phases are all relative to the resource start, never chained to one another,
    /// and are passed through without checking their relative order.
    pub fn resolve(&self, resource_start_ms: i64, unit: TimingUnit) -> RumResult<ResourceMetrics> {
        let anchor = Anchor::from_millis(resource_start_ms);
        let optional = |phase: &Option<PhaseTiming>| -> RumResult<Option<Interval>> {
            phase
                .as_ref()
                .map(|phase| anchor.interval(phase, unit))
                .transpose()
        };

        Ok(ResourceMetrics {
            fetch: anchor.interval(&self.fetch, unit)?,
            redirection: optional(&self.redirect)?,
            dns: optional(&self.dns)?,
            connect: optional(&self.connect)?,
            ssl: optional(&self.ssl)?,
            first_byte: optional(&self.first_byte)?,
            download: optional(&self.download)?,
            response_size: self.size,
        })
    }
}

/// Closed time range `[start, end]` of a single phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Everything the native `addResourceMetrics` call needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceMetrics {
    pub fetch: Interval,
    pub redirection: Option<Interval>,
    pub dns: Option<Interval>,
    pub connect: Option<Interval>,
    pub ssl: Option<Interval>,
    pub first_byte: Option<Interval>,
    pub download: Option<Interval>,
    pub response_size: Option<i64>,
}

#[derive(Clone, Copy, Debug)]
struct Anchor {
    nanos: i128,
}

impl Anchor {
    fn from_millis(millis: i64) -> Self {
        Self {
            nanos: millis as i128 * NANOS_PER_MILLI,
        }
    }

    fn interval(&self, phase: &PhaseTiming, unit: TimingUnit) -> RumResult<Interval> {
        let offset = unit.to_nanos(phase.start_time)?;
        let duration = unit.to_nanos(phase.duration)?;
        let start = self.nanos + offset;
        Ok(Interval {
            start: instant_from_nanos(start)?,
            end: instant_from_nanos(start + duration)?,
        })
    }
}

/// Converts nanoseconds since the Unix epoch into an instant without going through floats.
pub fn instant_from_nanos(nanos: i128) -> RumResult<DateTime<Utc>> {
    let seconds = i64::try_from(nanos.div_euclid(NANOS_PER_SECOND))
        .map_err(|_| invalid_timings(format!("instant {nanos}ns is out of range")))?;
    let subsec = nanos.rem_euclid(NANOS_PER_SECOND) as u32;
    Utc.timestamp_opt(seconds, subsec)
        .single()
        .ok_or_else(|| invalid_timings(format!("instant {nanos}ns is out of range")))
}

/// Decomposes an optional timing block anchored on `resource_start_ms`.
///
/// Returns `Ok(None)` when there is no block (or it is `null`), in which case no
/// metrics call should be issued at all.
pub fn decompose(
    resource_start_ms: i64,
    timing_block: Option<&Value>,
    unit: TimingUnit,
) -> RumResult<Option<ResourceMetrics>> {
    match timing_block {
        None | Some(Value::Null) => Ok(None),
        Some(block) => ResourceTimings::from_value(block)?
            .resolve(resource_start_ms, unit)
            .map(Some),
    }
}
