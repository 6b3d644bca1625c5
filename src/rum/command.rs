//! String-keyed entry point used by host runtimes that call in with a method name
//! and a JSON argument object.

use serde::Deserialize;
use serde_json::Value;

use crate::rum::api::RumBridge;
use crate::rum::attributes::Context;
use crate::rum::error::{invalid_argument, unknown_command, RumResult};
use crate::rum::json::{lenient_i64, lenient_optional_i64};

/// One call into the bridge, parsed from the host's method name and arguments.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "command", content = "args", rename_all = "camelCase")]
pub enum RumCommand {
    #[serde(rename_all = "camelCase")]
    StartView {
        key: String,
        name: String,
        #[serde(deserialize_with = "lenient_i64")]
        timestamp_ms: i64,
        #[serde(default)]
        context: Context,
    },
    #[serde(rename_all = "camelCase")]
    StopView {
        key: String,
        #[serde(deserialize_with = "lenient_i64")]
        timestamp_ms: i64,
        #[serde(default)]
        context: Context,
    },
    #[serde(rename_all = "camelCase")]
    StartAction {
        #[serde(rename = "type")]
        action_type: String,
        name: String,
        #[serde(deserialize_with = "lenient_i64")]
        timestamp_ms: i64,
        #[serde(default)]
        context: Context,
    },
    #[serde(rename_all = "camelCase")]
    StopAction {
        #[serde(deserialize_with = "lenient_i64")]
        timestamp_ms: i64,
        #[serde(default)]
        context: Context,
    },
    #[serde(rename_all = "camelCase")]
    AddAction {
        #[serde(rename = "type")]
        action_type: String,
        name: String,
        #[serde(deserialize_with = "lenient_i64")]
        timestamp_ms: i64,
        #[serde(default)]
        context: Context,
    },
    #[serde(rename_all = "camelCase")]
    StartResource {
        key: String,
        method: String,
        url: String,
        #[serde(deserialize_with = "lenient_i64")]
        timestamp_ms: i64,
        #[serde(default)]
        context: Context,
    },
    #[serde(rename_all = "camelCase")]
    StopResource {
        key: String,
        #[serde(default, deserialize_with = "lenient_optional_i64")]
        status_code: Option<i64>,
        kind: String,
        #[serde(deserialize_with = "lenient_i64")]
        timestamp_ms: i64,
        #[serde(default)]
        context: Context,
    },
    #[serde(rename_all = "camelCase")]
    AddError {
        message: String,
        source: String,
        #[serde(default)]
        stacktrace: Option<String>,
        #[serde(deserialize_with = "lenient_i64")]
        timestamp_ms: i64,
        #[serde(default)]
        context: Context,
    },
    AddTiming {
        name: String,
    },
}

impl RumCommand {
    pub const METHODS: &'static [&'static str] = &[
        "startView",
        "stopView",
        "startAction",
        "stopAction",
        "addAction",
        "startResource",
        "stopResource",
        "addError",
        "addTiming",
    ];

    /// Parses a host call. `args` must be an object (or `null` for no arguments).
    pub fn from_call(method: &str, args: Value) -> RumResult<Self> {
        if !Self::METHODS.contains(&method) {
            return Err(unknown_command(format!("unknown RUM method `{method}`")));
        }
        let args = match args {
            Value::Null => Value::Object(Default::default()),
            object @ Value::Object(_) => object,
            other => {
                return Err(invalid_argument(format!(
                    "arguments of `{method}` must be an object, got {other}"
                )))
            }
        };
        let envelope = serde_json::json!({ "command": method, "args": args });
        serde_json::from_value(envelope)
            .map_err(|err| invalid_argument(format!("invalid arguments for `{method}`: {err}")))
    }

    pub fn method(&self) -> &'static str {
        match self {
            RumCommand::StartView { .. } => "startView",
            RumCommand::StopView { .. } => "stopView",
            RumCommand::StartAction { .. } => "startAction",
            RumCommand::StopAction { .. } => "stopAction",
            RumCommand::AddAction { .. } => "addAction",
            RumCommand::StartResource { .. } => "startResource",
            RumCommand::StopResource { .. } => "stopResource",
            RumCommand::AddError { .. } => "addError",
            RumCommand::AddTiming { .. } => "addTiming",
        }
    }
}

impl RumBridge {
    /// Runs a parsed command.
    ///
    /// Errors reported through here carry the caller's location as their origin.
    #[track_caller]
    pub fn execute(&self, command: RumCommand) {
        match command {
            RumCommand::StartView {
                key,
                name,
                timestamp_ms,
                context,
            } => self.start_view(&key, &name, timestamp_ms, context),
            RumCommand::StopView {
                key,
                timestamp_ms,
                context,
            } => self.stop_view(&key, timestamp_ms, context),
            RumCommand::StartAction {
                action_type,
                name,
                timestamp_ms,
                context,
            } => self.start_action(&action_type, &name, timestamp_ms, context),
            RumCommand::StopAction {
                timestamp_ms,
                context,
            } => self.stop_action(timestamp_ms, context),
            RumCommand::AddAction {
                action_type,
                name,
                timestamp_ms,
                context,
            } => self.add_action(&action_type, &name, timestamp_ms, context),
            RumCommand::StartResource {
                key,
                method,
                url,
                timestamp_ms,
                context,
            } => self.start_resource(&key, &method, &url, timestamp_ms, context),
            RumCommand::StopResource {
                key,
                status_code,
                kind,
                timestamp_ms,
                context,
            } => self.stop_resource(&key, status_code, &kind, timestamp_ms, context),
            RumCommand::AddError {
                message,
                source,
                stacktrace,
                timestamp_ms,
                context,
            } => self.add_error(
                &message,
                &source,
                stacktrace.as_deref(),
                timestamp_ms,
                context,
            ),
            RumCommand::AddTiming { name } => self.add_timing(&name),
        }
    }

    /// Parses and runs a host call by method name.
    ///
    /// Only parsing can fail; once parsed, the call is forwarded like any other operation.
    #[track_caller]
    pub fn dispatch(&self, method: &str, args: Value) -> RumResult<()> {
        let command = RumCommand::from_call(method, args)?;
        self.execute(command);
        Ok(())
    }
}
