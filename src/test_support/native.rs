use std::sync::Mutex;

use crate::rum::{
    Attributes, ErrorOrigin, ErrorSource, HttpMethod, NativeRum, ResourceKind, ResourceMetrics,
    UserActionType,
};

#[derive(Clone, Debug, PartialEq)]
pub enum CalledMethod {
    StartView {
        key: String,
        name: Option<String>,
    },
    StopView {
        key: String,
    },
    AddError {
        message: String,
        source: ErrorSource,
        stack: Option<String>,
    },
    StartResourceLoading {
        resource_key: String,
        http_method: HttpMethod,
        url: String,
    },
    StopResourceLoading {
        resource_key: String,
        status_code: Option<i64>,
        kind: ResourceKind,
        size: Option<i64>,
    },
    AddResourceMetrics {
        resource_key: String,
        metrics: ResourceMetrics,
    },
    StartUserAction {
        action_type: UserActionType,
        name: String,
    },
    StopUserAction {
        action_type: UserActionType,
        name: Option<String>,
    },
    AddUserAction {
        action_type: UserActionType,
        name: String,
    },
    AddTiming {
        name: String,
    },
}

/// [`NativeRum`] that records every call for later assertions.
#[derive(Default)]
pub struct RecordingNativeRum {
    called_methods: Mutex<Vec<CalledMethod>>,
    received_attributes: Mutex<Vec<Attributes>>,
    error_origins: Mutex<Vec<ErrorOrigin>>,
}

impl RecordingNativeRum {
    pub fn called_methods(&self) -> Vec<CalledMethod> {
        self.called_methods.lock().unwrap().clone()
    }

    pub fn received_attributes(&self) -> Vec<Attributes> {
        self.received_attributes.lock().unwrap().clone()
    }

    pub fn error_origins(&self) -> Vec<ErrorOrigin> {
        self.error_origins.lock().unwrap().clone()
    }

    fn record(&self, method: CalledMethod, attributes: Option<Attributes>) {
        self.called_methods.lock().unwrap().push(method);
        if let Some(attributes) = attributes {
            self.received_attributes.lock().unwrap().push(attributes);
        }
    }
}

impl NativeRum for RecordingNativeRum {
    fn start_view(&self, key: &str, name: Option<&str>, attributes: Attributes) {
        self.record(
            CalledMethod::StartView {
                key: key.into(),
                name: name.map(str::to_string),
            },
            Some(attributes),
        );
    }

    fn stop_view(&self, key: &str, attributes: Attributes) {
        self.record(CalledMethod::StopView { key: key.into() }, Some(attributes));
    }

    fn start_resource_loading(
        &self,
        resource_key: &str,
        http_method: HttpMethod,
        url: &str,
        attributes: Attributes,
    ) {
        self.record(
            CalledMethod::StartResourceLoading {
                resource_key: resource_key.into(),
                http_method,
                url: url.into(),
            },
            Some(attributes),
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
        self.record(
            CalledMethod::StopResourceLoading {
                resource_key: resource_key.into(),
                status_code,
                kind,
                size,
            },
            Some(attributes),
        );
    }

    fn add_resource_metrics(
        &self,
        resource_key: &str,
        metrics: &ResourceMetrics,
        attributes: Attributes,
    ) {
        self.record(
            CalledMethod::AddResourceMetrics {
                resource_key: resource_key.into(),
                metrics: metrics.clone(),
            },
            Some(attributes),
        );
    }

    fn start_user_action(&self, action_type: UserActionType, name: &str, attributes: Attributes) {
        self.record(
            CalledMethod::StartUserAction {
                action_type,
                name: name.into(),
            },
            Some(attributes),
        );
    }

    fn stop_user_action(
        &self,
        action_type: UserActionType,
        name: Option<&str>,
        attributes: Attributes,
    ) {
        self.record(
            CalledMethod::StopUserAction {
                action_type,
                name: name.map(str::to_string),
            },
            Some(attributes),
        );
    }

    fn add_user_action(&self, action_type: UserActionType, name: &str, attributes: Attributes) {
        self.record(
            CalledMethod::AddUserAction {
                action_type,
                name: name.into(),
            },
            Some(attributes),
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
        if let Some(origin) = origin {
            self.error_origins.lock().unwrap().push(origin);
        }
        self.record(
            CalledMethod::AddError {
                message: message.into(),
                source,
                stack: stack.map(str::to_string),
            },
            Some(attributes),
        );
    }

    fn add_timing(&self, name: &str) {
        self.record(CalledMethod::AddTiming { name: name.into() }, None);
    }
}
