use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::rum::attributes::Attributes;
use crate::rum::constants::LOG_TARGET;
use crate::rum::timing::ResourceMetrics;
use crate::rum::types::{ErrorSource, HttpMethod, ResourceKind, UserActionType};

/// Call surface of the native RUM SDK the bridge forwards to.
///
/// Every method is fire-and-forget; implementations swallow their own failures.
pub trait NativeRum: Send + Sync {
    fn start_view(&self, key: &str, name: Option<&str>, attributes: Attributes);

    fn stop_view(&self, key: &str, attributes: Attributes);

    fn start_resource_loading(
        &self,
        resource_key: &str,
        http_method: HttpMethod,
        url: &str,
        attributes: Attributes,
    );

    fn stop_resource_loading(
        &self,
        resource_key: &str,
        status_code: Option<i64>,
        kind: ResourceKind,
        size: Option<i64>,
        attributes: Attributes,
    );

    /// Reports the per-phase breakdown of a resource. Issued before the matching
    /// [`stop_resource_loading`](NativeRum::stop_resource_loading).
    fn add_resource_metrics(
        &self,
        resource_key: &str,
        metrics: &ResourceMetrics,
        attributes: Attributes,
    );

    fn start_user_action(&self, action_type: UserActionType, name: &str, attributes: Attributes);

    fn stop_user_action(
        &self,
        action_type: UserActionType,
        name: Option<&str>,
        attributes: Attributes,
    );

    fn add_user_action(&self, action_type: UserActionType, name: &str, attributes: Attributes);

    fn add_error(
        &self,
        message: &str,
        source: ErrorSource,
        stack: Option<&str>,
        attributes: Attributes,
        origin: Option<ErrorOrigin>,
    );

    fn add_timing(&self, name: &str);
}

/// Source location an error was reported from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ErrorOrigin {
    pub file: &'static str,
    pub line: u32,
}

impl From<&'static Location<'static>> for ErrorOrigin {
    fn from(location: &'static Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
        }
    }
}

pub type NativeRumHandle = Arc<dyn NativeRum>;

/// Builds the native handle on first use.
pub type NativeRumFactory = Box<dyn Fn() -> NativeRumHandle + Send + Sync>;

/// Native handle created at most once, on first access, and shared afterwards.
pub struct LazyNativeRum {
    factory: NativeRumFactory,
    handle: OnceCell<NativeRumHandle>,
}

impl LazyNativeRum {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> NativeRumHandle + Send + Sync + 'static,
    {
        Self {
            factory: Box::new(factory),
            handle: OnceCell::new(),
        }
    }

    /// Returns the shared handle, running the factory if this is the first access.
    /// Concurrent first accesses block on each other so the factory runs once.
    pub fn get(&self) -> &NativeRumHandle {
        self.handle.get_or_init(|| {
            log::debug!(target: LOG_TARGET, "initializing native RUM handle");
            (self.factory)()
        })
    }

    pub fn is_initialized(&self) -> bool {
        self.handle.get().is_some()
    }
}

impl fmt::Debug for LazyNativeRum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyNativeRum")
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

/// [`NativeRum`] that only logs what it receives, for hosts running without a native SDK.
#[derive(Clone, Debug, Default)]
pub struct LoggingNativeRum;

impl NativeRum for LoggingNativeRum {
    fn start_view(&self, key: &str, name: Option<&str>, attributes: Attributes) {
        log::debug!(
            target: LOG_TARGET,
            "startView key={key} name={name:?} attributes={}",
            attributes.len()
        );
    }

    fn stop_view(&self, key: &str, attributes: Attributes) {
        log::debug!(target: LOG_TARGET, "stopView key={key} attributes={}", attributes.len());
    }

    fn start_resource_loading(
        &self,
        resource_key: &str,
        http_method: HttpMethod,
        url: &str,
        attributes: Attributes,
    ) {
        log::debug!(
            target: LOG_TARGET,
            "startResourceLoading key={resource_key} method={http_method} url={url} attributes={}",
            attributes.len()
        );
    }

    fn stop_resource_loading(
        &self,
        resource_key: &str,
        status_code: Option<i64>,
        kind: ResourceKind,
        size: Option<i64>,
        attributes: Attributes,
    ) {
        log::debug!(
            target: LOG_TARGET,
            "stopResourceLoading key={resource_key} status={status_code:?} kind={kind} size={size:?} attributes={}",
            attributes.len()
        );
    }

    fn add_resource_metrics(
        &self,
        resource_key: &str,
        metrics: &ResourceMetrics,
        attributes: Attributes,
    ) {
        log::debug!(
            target: LOG_TARGET,
            "addResourceMetrics key={resource_key} fetch=[{}, {}] size={:?} attributes={}",
            metrics.fetch.start.to_rfc3339(),
            metrics.fetch.end.to_rfc3339(),
            metrics.response_size,
            attributes.len()
        );
    }

    fn start_user_action(&self, action_type: UserActionType, name: &str, attributes: Attributes) {
        log::debug!(
            target: LOG_TARGET,
            "startUserAction type={action_type} name={name} attributes={}",
            attributes.len()
        );
    }

    fn stop_user_action(
        &self,
        action_type: UserActionType,
        name: Option<&str>,
        attributes: Attributes,
    ) {
        log::debug!(
            target: LOG_TARGET,
            "stopUserAction type={action_type} name={name:?} attributes={}",
            attributes.len()
        );
    }

    fn add_user_action(&self, action_type: UserActionType, name: &str, attributes: Attributes) {
        log::debug!(
            target: LOG_TARGET,
            "addUserAction type={action_type} name={name} attributes={}",
            attributes.len()
        );
    }

    fn add_error(
        &self,
        message: &str,
        source: ErrorSource,
        stack: Option<&str>,
        attributes: Attributes,
        origin: Option<ErrorOrigin>,
    ) {
        log::debug!(
            target: LOG_TARGET,
            "addError message={message} source={source} has_stack={} origin={origin:?} attributes={}",
            stack.is_some(),
            attributes.len()
        );
    }

    fn add_timing(&self, name: &str) {
        log::debug!(target: LOG_TARGET, "addTiming name={name}");
    }
}
