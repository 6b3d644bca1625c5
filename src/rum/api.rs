use std::panic::Location;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::rum::attributes::{encode, Context};
use crate::rum::constants::{LOG_TARGET, RESOURCE_TIMINGS_KEY};
use crate::rum::native::{ErrorOrigin, LazyNativeRum, LoggingNativeRum, NativeRumHandle};
use crate::rum::settings::RumBridgeSettings;
use crate::rum::timing::decompose;
use crate::rum::types::{resolve, ErrorSource, HttpMethod, ResourceKind, UserActionType};

/// Public operation surface exposed to the host runtime.
///
/// Categorical arguments arrive as plain strings and are resolved to the native enums,
/// every context is encoded together with the caller's millisecond timestamp, and the
/// result is forwarded to the native SDK. No operation reports failure to the caller.
#[derive(Clone, Debug)]
pub struct RumBridge {
    inner: Arc<RumBridgeInner>,
}

#[derive(Debug)]
struct RumBridgeInner {
    native: LazyNativeRum,
    settings: RumBridgeSettings,
    pending_action: Mutex<Option<PendingAction>>,
}

/// Action opened by `start_action` and waiting for `stop_action`.
#[derive(Clone, Debug, PartialEq, Eq)]
struct PendingAction {
    action_type: UserActionType,
    name: String,
}

impl RumBridge {
    /// Creates a bridge whose native handle is built by `factory` on first use.
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> NativeRumHandle + Send + Sync + 'static,
    {
        Self::with_settings(factory, RumBridgeSettings::default())
    }

    pub fn with_settings<F>(factory: F, settings: RumBridgeSettings) -> Self
    where
        F: Fn() -> NativeRumHandle + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(RumBridgeInner {
                native: LazyNativeRum::new(factory),
                settings,
                pending_action: Mutex::new(None),
            }),
        }
    }

    /// Bridge backed by [`LoggingNativeRum`], configured from the environment.
    pub fn with_logging_native() -> Self {
        Self::with_settings(
            || Arc::new(LoggingNativeRum) as NativeRumHandle,
            RumBridgeSettings::from_env(),
        )
    }

    pub fn settings(&self) -> &RumBridgeSettings {
        &self.inner.settings
    }

    /// Returns `true` once any operation has reached the native SDK.
    pub fn is_native_initialized(&self) -> bool {
        self.inner.native.is_initialized()
    }

    fn native(&self) -> &NativeRumHandle {
        self.inner.native.get()
    }

    fn pending_action(&self) -> MutexGuard<'_, Option<PendingAction>> {
        self.inner
            .pending_action
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn start_view(&self, key: &str, name: &str, timestamp_ms: i64, context: Context) {
        self.native()
            .start_view(key, Some(name), encode(context, timestamp_ms));
    }

    pub fn stop_view(&self, key: &str, timestamp_ms: i64, context: Context) {
        self.native().stop_view(key, encode(context, timestamp_ms));
    }

    /// Opens a user action. A later [`stop_action`](Self::stop_action) closes it.
    pub fn start_action(&self, action_type: &str, name: &str, timestamp_ms: i64, context: Context) {
        let action_type = resolve::<UserActionType>(action_type);
        *self.pending_action() = Some(PendingAction {
            action_type,
            name: name.to_string(),
        });
        self.native()
            .start_user_action(action_type, name, encode(context, timestamp_ms));
    }

    /// Closes the action opened by the last [`start_action`](Self::start_action).
    ///
    /// Without an open action this does nothing at all.
    pub fn stop_action(&self, timestamp_ms: i64, context: Context) {
        let Some(action) = self.pending_action().take() else {
            log::debug!(target: LOG_TARGET, "stopAction ignored: no action in progress");
            return;
        };
        self.native().stop_user_action(
            action.action_type,
            Some(&action.name),
            encode(context, timestamp_ms),
        );
    }

    /// Reports an instantaneous action. Leaves any open action untouched.
    pub fn add_action(&self, action_type: &str, name: &str, timestamp_ms: i64, context: Context) {
        self.native().add_user_action(
            resolve::<UserActionType>(action_type),
            name,
            encode(context, timestamp_ms),
        );
    }

    pub fn start_resource(
        &self,
        key: &str,
        method: &str,
        url: &str,
        timestamp_ms: i64,
        context: Context,
    ) {
        self.native().start_resource_loading(
            key,
            resolve::<HttpMethod>(method),
            url,
            encode(context, timestamp_ms),
        );
    }

    /// Stops a resource, first reporting its timing breakdown when the context carries one
    /// under `_dd.resource_timings`.
    ///
    /// A malformed timing block only skips the metrics call; the resource is still stopped.
    pub fn stop_resource(
        &self,
        key: &str,
        status_code: Option<i64>,
        kind: &str,
        timestamp_ms: i64,
        mut context: Context,
    ) {
        let kind = resolve::<ResourceKind>(kind);
        let timings = if self.inner.settings.strip_resource_timings {
            context.remove(RESOURCE_TIMINGS_KEY)
        } else {
            context.get(RESOURCE_TIMINGS_KEY).cloned()
        };

        let size = match decompose(timestamp_ms, timings.as_ref(), self.inner.settings.timing_unit) {
            Ok(Some(metrics)) => {
                self.native().add_resource_metrics(
                    key,
                    &metrics,
                    encode(context.clone(), timestamp_ms),
                );
                metrics.response_size
            }
            Ok(None) => None,
            Err(err) => {
                log::warn!(
                    target: LOG_TARGET,
                    "skipping resource metrics for `{key}`: {err}"
                );
                None
            }
        };

        self.native().stop_resource_loading(
            key,
            status_code,
            kind,
            size,
            encode(context, timestamp_ms),
        );
    }

    #[track_caller]
    pub fn add_error(
        &self,
        message: &str,
        source: &str,
        stacktrace: Option<&str>,
        timestamp_ms: i64,
        context: Context,
    ) {
        let origin = ErrorOrigin::from(Location::caller());
        self.native().add_error(
            message,
            resolve::<ErrorSource>(source),
            stacktrace,
            encode(context, timestamp_ms),
            Some(origin),
        );
    }

    /// Adds a named timing to the current view. Carries no attributes.
    pub fn add_timing(&self, name: &str) {
        self.native().add_timing(name);
    }
}
