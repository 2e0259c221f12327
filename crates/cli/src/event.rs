//! Hook event adapter.
//!
//! Turns the JSON document a host sends on stdin into a [`BashInvocation`].
//! Every field is optional and extracted on its own: a missing or wrongly
//! typed field falls back to its default without affecting the others.

use bashlog_common::BashInvocation;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("empty hook input")]
    Empty,
    #[error("hook input is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("hook input is a JSON {0}, expected an object")]
    NotAnObject(&'static str),
}

/// Raw event as delivered by the host.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HookEvent {
    #[serde(deserialize_with = "lenient")]
    pub session_id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub cwd: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub tool_input: Option<ToolInput>,
    #[serde(deserialize_with = "lenient")]
    pub tool_response: Option<ToolResponse>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct ToolInput {
    pub command: Option<String>,
    pub description: Option<String>,
}

impl From<Map<String, Value>> for ToolInput {
    fn from(map: Map<String, Value>) -> Self {
        Self {
            command: string_field(&map, "command"),
            description: string_field(&map, "description"),
        }
    }
}

/// `tool_response` is either plain output text or an object carrying it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum ToolResponse {
    Text(String),
    Fields {
        stdout: Option<String>,
        output: Option<String>,
    },
    /// Numbers, booleans, arrays: kept as their JSON text unless falsy.
    Other(Value),
}

impl From<Value> for ToolResponse {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => ToolResponse::Text(text),
            Value::Object(map) => ToolResponse::Fields {
                stdout: string_field(&map, "stdout"),
                output: string_field(&map, "output"),
            },
            other => ToolResponse::Other(other),
        }
    }
}

impl ToolResponse {
    /// Raw result text. A non-empty `stdout` takes precedence over `output`.
    pub fn into_result(self) -> String {
        match self {
            ToolResponse::Text(text) => text,
            ToolResponse::Fields { stdout, output } => stdout
                .filter(|s| !s.is_empty())
                .or(output)
                .unwrap_or_default(),
            ToolResponse::Other(value) if is_falsy(&value) => String::new(),
            ToolResponse::Other(value) => value.to_string(),
        }
    }
}

/// `false`, zero and empty arrays carry no output.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

impl HookEvent {
    pub fn parse(raw: &[u8]) -> Result<Self, EventError> {
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Err(EventError::Empty);
        }
        match serde_json::from_slice::<Value>(raw)? {
            value @ Value::Object(_) => Ok(serde_json::from_value(value)?),
            other => Err(EventError::NotAnObject(json_kind(&other))),
        }
    }

    pub fn into_invocation(self) -> BashInvocation {
        let tool_input = self.tool_input.unwrap_or_default();
        BashInvocation {
            command: tool_input.command.unwrap_or_default(),
            description: tool_input.description.unwrap_or_default(),
            session_id: self.session_id.unwrap_or_default(),
            cwd: self.cwd.unwrap_or_default(),
            result: self.tool_response.map(ToolResponse::into_result),
            exit_code: None,
        }
    }
}

/// Extracts loggable attributes from raw hook input. Never fails: unusable
/// input yields an all-default invocation.
pub fn adapt(raw: &[u8]) -> BashInvocation {
    match HookEvent::parse(raw) {
        Ok(event) => event.into_invocation(),
        Err(err) => {
            tracing::debug!(error = %err, "unusable hook event");
            BashInvocation::default()
        }
    }
}

/// Keeps a field only when it converts to `T`; `null` counts as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_owned)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_event_is_extracted() {
        let raw = br#"{
            "session_id": "sess-001",
            "cwd": "/home/user/project",
            "tool_name": "Bash",
            "tool_input": {"command": "git status", "description": "Show working tree status"},
            "tool_response": "On branch main\nnothing to commit"
        }"#;
        let inv = adapt(raw);
        assert_eq!(inv.command, "git status");
        assert_eq!(inv.description, "Show working tree status");
        assert_eq!(inv.session_id, "sess-001");
        assert_eq!(inv.cwd, "/home/user/project");
        assert_eq!(inv.result.as_deref(), Some("On branch main\nnothing to commit"));
        assert_eq!(inv.exit_code, None);
    }

    #[test]
    fn only_session_id() {
        let inv = adapt(br#"{"session_id":"s1"}"#);
        assert_eq!(inv, BashInvocation::default().with_session_id("s1"));
    }

    #[test]
    fn unusable_input_yields_defaults() {
        let inputs: [&[u8]; 7] = [b"", b"   \n", b"this is not json", b"[1,2]", b"\"ls\"", b"null", b"{"];
        for raw in inputs {
            assert_eq!(adapt(raw), BashInvocation::default(), "{:?}", String::from_utf8_lossy(raw));
        }
    }

    #[test]
    fn parse_reports_why_input_was_rejected() {
        assert!(matches!(HookEvent::parse(b""), Err(EventError::Empty)));
        assert!(matches!(HookEvent::parse(b"nope"), Err(EventError::Malformed(_))));
        assert!(matches!(HookEvent::parse(b"[]"), Err(EventError::NotAnObject("array"))));
    }

    #[test]
    fn wrong_typed_fields_do_not_affect_others() {
        let raw = br#"{
            "session_id": 42,
            "cwd": "/tmp",
            "tool_input": {"command": ["ls"], "description": "list"},
            "tool_response": {"stdout": 7, "output": "fallback"}
        }"#;
        let inv = adapt(raw);
        assert_eq!(inv.session_id, "");
        assert_eq!(inv.cwd, "/tmp");
        assert_eq!(inv.command, "");
        assert_eq!(inv.description, "list");
        assert_eq!(inv.result.as_deref(), Some("fallback"));
    }

    #[test]
    fn tool_input_that_is_not_an_object_is_ignored() {
        let inv = adapt(br#"{"tool_input": ["ls", "list"], "cwd": "/srv"}"#);
        assert_eq!(inv.command, "");
        assert_eq!(inv.description, "");
        assert_eq!(inv.cwd, "/srv");
    }

    #[test]
    fn stdout_takes_precedence_over_output() {
        let inv = adapt(br#"{"tool_response": {"stdout": "file1.txt\nfile2.txt", "output": "other", "exitCode": 0}}"#);
        assert_eq!(inv.result.as_deref(), Some("file1.txt\nfile2.txt"));
    }

    #[test]
    fn empty_stdout_falls_back_to_output() {
        let inv = adapt(br#"{"tool_response": {"stdout": "", "output": "combined"}}"#);
        assert_eq!(inv.result.as_deref(), Some("combined"));
    }

    #[test]
    fn response_object_without_text_is_empty() {
        let inv = adapt(br#"{"tool_response": {"exitCode": 1}}"#);
        assert_eq!(inv.result.as_deref(), Some(""));
    }

    // Absent and empty responses stay distinguishable here even though the
    // writer renders both as a zero-length preview.
    #[test]
    fn absent_null_and_empty_responses() {
        assert_eq!(adapt(br#"{}"#).result, None);
        assert_eq!(adapt(br#"{"tool_response": null}"#).result, None);
        assert_eq!(adapt(br#"{"tool_response": ""}"#).result.as_deref(), Some(""));
    }

    #[test]
    fn scalar_responses_keep_json_text() {
        assert_eq!(adapt(br#"{"tool_response": 3}"#).result.as_deref(), Some("3"));
        assert_eq!(adapt(br#"{"tool_response": ["a"]}"#).result.as_deref(), Some(r#"["a"]"#));
        assert_eq!(adapt(br#"{"tool_response": true}"#).result.as_deref(), Some("true"));
    }

    #[test]
    fn falsy_scalar_responses_are_empty() {
        let inputs: [&[u8]; 4] = [
            br#"{"tool_response": false}"#,
            br#"{"tool_response": 0}"#,
            br#"{"tool_response": 0.0}"#,
            br#"{"tool_response": []}"#,
        ];
        for raw in inputs {
            assert_eq!(adapt(raw).result.as_deref(), Some(""), "{}", String::from_utf8_lossy(raw));
        }
    }

    #[test]
    fn unicode_and_quotes_are_preserved() {
        let raw = r#"{"tool_input": {"command": "echo \"héllo\" | grep 'wörld' && printf 'уникод'"}}"#;
        let inv = adapt(raw.as_bytes());
        assert_eq!(inv.command, r#"echo "héllo" | grep 'wörld' && printf 'уникод'"#);
    }
}
