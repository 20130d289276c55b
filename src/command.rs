//! Command batch value objects and their wire serialization.
//!
//! The serialized shape is the one bit-exact contract with the remote
//! service: `{"label": str, "actions": [{"deviceURL": str, "commands":
//! [{"name": str, "parameters": [..]}]}]}`. A command without parameters
//! serializes with no `parameters` key at all. These are plain values with
//! structural equality, built fresh per operation and discarded after
//! submission.

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Command {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<Value>>,
}

impl Command {
    /// Command with a parameter. A bare scalar (or object) is normalized to a
    /// single-element list; an array is taken as the parameter list itself.
    pub fn new(name: impl Into<String>, parameter: Value) -> Command {
        let parameters = match parameter {
            Value::Array(list) => list,
            other => vec![other],
        };
        Command {
            name: name.into(),
            parameters: Some(parameters),
        }
    }

    /// Command without parameters (e.g. the trailing refresh commands).
    pub fn parameterless(name: impl Into<String>) -> Command {
        Command {
            name: name.into(),
            parameters: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Action {
    #[serde(rename = "deviceURL")]
    pub device_url: String,
    pub commands: Vec<Command>,
}

impl Action {
    pub fn new(device_url: impl Into<String>, commands: Vec<Command>) -> Action {
        Action {
            device_url: device_url.into(),
            commands,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandBatch {
    pub label: String,
    pub actions: Vec<Action>,
}

impl CommandBatch {
    pub fn new(label: impl Into<String>, actions: Vec<Action>) -> CommandBatch {
        CommandBatch {
            label: label.into(),
            actions,
        }
    }

    /// The common case: one action against one device.
    pub fn single(label: impl Into<String>, device_url: impl Into<String>, commands: Vec<Command>) -> CommandBatch {
        CommandBatch::new(label, vec![Action::new(device_url, commands)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalar_parameter_becomes_single_element_list() {
        let cmd = Command::new("setTargetTemperature", json!(21));
        assert_eq!(
            serde_json::to_value(&cmd).unwrap(),
            json!({"name": "setTargetTemperature", "parameters": [21]})
        );
    }

    #[test]
    fn missing_parameters_omit_the_key() {
        let cmd = Command::parameterless("refreshOperatingMode");
        assert_eq!(
            serde_json::to_string(&cmd).unwrap(),
            r#"{"name":"refreshOperatingMode"}"#
        );
    }

    #[test]
    fn array_parameter_is_kept_as_is() {
        let cmd = Command::new("setTimeProgram", json!([1, 2, 3]));
        assert_eq!(cmd.parameters, Some(vec![json!(1), json!(2), json!(3)]));
    }

    #[test]
    fn object_parameter_is_wrapped() {
        let cmd = Command::new("setCurrentOperatingMode", json!({"relaunch": "off", "absence": "on"}));
        assert_eq!(
            serde_json::to_value(&cmd).unwrap(),
            json!({"name": "setCurrentOperatingMode", "parameters": [{"relaunch": "off", "absence": "on"}]})
        );
    }

    #[test]
    fn batch_serializes_to_exact_wire_shape() {
        let batch = CommandBatch::single(
            "Set comfort temperature",
            "io://0812-9894-4518/10071767#1",
            vec![
                Command::new("setComfortTemperature", json!(22.0)),
                Command::parameterless("refreshComfortTemperature"),
            ],
        );
        assert_eq!(
            serde_json::to_string(&batch).unwrap(),
            concat!(
                r#"{"label":"Set comfort temperature","actions":"#,
                r#"[{"deviceURL":"io://0812-9894-4518/10071767#1","commands":"#,
                r#"[{"name":"setComfortTemperature","parameters":[22.0]},"#,
                r#"{"name":"refreshComfortTemperature"}]}]}"#
            )
        );
    }

    #[test]
    fn batches_compare_structurally() {
        let a = CommandBatch::single("x", "io://g/d", vec![Command::new("c", json!(1))]);
        let b = CommandBatch::single("x", "io://g/d", vec![Command::new("c", json!(1))]);
        assert_eq!(a, b);
    }
}
