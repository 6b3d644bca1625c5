#![doc = include_str!("README.md")]
mod api;
mod attributes;
mod command;
mod constants;
mod error;
mod json;
mod native;
mod settings;
mod timing;
mod types;

#[doc(inline)]
pub use api::RumBridge;

#[doc(inline)]
pub use attributes::{encode, AnyEncodable, AttributeValue, Attributes, Context};

#[doc(inline)]
pub use command::RumCommand;

#[doc(inline)]
pub use constants::{
    KEEP_RESOURCE_TIMINGS_ENV, LOG_TARGET, RESOURCE_TIMINGS_KEY, TIMESTAMP_KEY, TIMING_UNIT_ENV,
};

#[doc(inline)]
pub use error::{
    invalid_argument, invalid_timings, unknown_command, RumError, RumErrorCode, RumResult,
};

#[doc(inline)]
pub use native::{
    ErrorOrigin, LazyNativeRum, LoggingNativeRum, NativeRum, NativeRumFactory, NativeRumHandle,
};

#[doc(inline)]
pub use settings::RumBridgeSettings;

#[doc(inline)]
pub use timing::{
    decompose, instant_from_nanos, Interval, PhaseTiming, ResourceMetrics, ResourceTimings,
    TimingUnit,
};

#[doc(inline)]
pub use types::{resolve, ErrorSource, HttpMethod, NativeEnum, ResourceKind, UserActionType};
