//! Recording `NativeRum` for the integration suite, which cannot see the crate's
//! `cfg(test)` helpers. Records only what the suite asserts on.

use std::sync::{Arc, Mutex};

use rum_bridge::rum::{
    Attributes, ErrorOrigin, ErrorSource, HttpMethod, NativeRum, NativeRumHandle, ResourceKind,
    ResourceMetrics, RumBridge, UserActionType,
};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    StartView(String, Option<String>),
    StopView(String),
    AddError(String, ErrorSource, Option<String>),
    StartResourceLoading(String, HttpMethod, String),
    StopResourceLoading(String, Option<i64>, ResourceKind, Option<i64>),
    AddResourceMetrics(String, ResourceMetrics),
    StartUserAction(UserActionType, String),
    StopUserAction(UserActionType, Option<String>),
    AddUserAction(UserActionType, String),
    AddTiming(String),
}

#[derive(Default)]
pub struct MockNativeRum {
    recorded: Mutex<Vec<(Call, Option<Attributes>)>>,
}

impl MockNativeRum {
    pub fn calls(&self) -> Vec<Call> {
        let recorded = self.recorded.lock().unwrap();
        recorded.iter().map(|(call, _)| call.clone()).collect()
    }

    pub fn attributes(&self) -> Vec<Attributes> {
        let recorded = self.recorded.lock().unwrap();
        recorded.iter().filter_map(|(_, attrs)| attrs.clone()).collect()
    }

    fn push(&self, call: Call, attributes: Option<Attributes>) {
        self.recorded.lock().unwrap().push((call, attributes));
    }
}

impl NativeRum for MockNativeRum {
    fn start_view(&self, key: &str, name: Option<&str>, attrs: Attributes) {
        self.push(Call::StartView(key.into(), name.map(Into::into)), Some(attrs));
    }

    fn stop_view(&self, key: &str, attrs: Attributes) {
        self.push(Call::StopView(key.into()), Some(attrs));
    }

    fn start_resource_loading(&self, key: &str, method: HttpMethod, url: &str, attrs: Attributes) {
        let call = Call::StartResourceLoading(key.into(), method, url.into());
        self.push(call, Some(attrs));
    }

    fn stop_resource_loading(
        &self,
        key: &str,
        status_code: Option<i64>,
        kind: ResourceKind,
        size: Option<i64>,
        attrs: Attributes,
    ) {
        let call = Call::StopResourceLoading(key.into(), status_code, kind, size);
        self.push(call, Some(attrs));
    }

    fn add_resource_metrics(&self, key: &str, metrics: &ResourceMetrics, attrs: Attributes) {
        let call = Call::AddResourceMetrics(key.into(), metrics.clone());
        self.push(call, Some(attrs));
    }

    fn start_user_action(&self, action_type: UserActionType, name: &str, attrs: Attributes) {
        self.push(Call::StartUserAction(action_type, name.into()), Some(attrs));
    }

    fn stop_user_action(&self, action_type: UserActionType, name: Option<&str>, attrs: Attributes) {
        let call = Call::StopUserAction(action_type, name.map(Into::into));
        self.push(call, Some(attrs));
    }

    fn add_user_action(&self, action_type: UserActionType, name: &str, attrs: Attributes) {
        self.push(Call::AddUserAction(action_type, name.into()), Some(attrs));
    }

    fn add_error(
        &self,
        message: &str,
        source: ErrorSource,
        stack: Option<&str>,
        attrs: Attributes,
        _origin: Option<ErrorOrigin>,
    ) {
        let call = Call::AddError(message.into(), source, stack.map(Into::into));
        self.push(call, Some(attrs));
    }

    fn add_timing(&self, name: &str) {
        self.push(Call::AddTiming(name.into()), None);
    }
}

pub fn bridge() -> (RumBridge, Arc<MockNativeRum>) {
    let native = Arc::new(MockNativeRum::default());
    let handle = Arc::clone(&native);
    (RumBridge::new(move || handle.clone() as NativeRumHandle), native)
}
