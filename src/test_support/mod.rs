//! Test utilities shared across crate-level unit tests.

pub mod native;

pub use native::{CalledMethod, RecordingNativeRum};
