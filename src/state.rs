//! Per-device state store and state-definition metadata.
//!
//! The store is an ordered list of named, typed entries, preserving the order
//! received from the gateway. Operations here never touch the network; the
//! command protocol writes into the store only after a successful submission.

use serde_json::Value;

use crate::models::setup::{RawDefinition, RawState};

/// One named state entry. `value_type` is the gateway's numeric type
/// discriminator, kept as received (1 = int, 2 = float, 3 = string, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct StateEntry {
    pub name: String,
    pub value_type: i64,
    pub value: Value,
}

#[derive(Debug, Clone, Default)]
pub struct StateStore {
    entries: Vec<StateEntry>,
}

impl StateStore {
    pub fn from_raw(states: Vec<RawState>) -> StateStore {
        StateStore {
            entries: states
                .into_iter()
                .map(|s| StateEntry {
                    name: s.name,
                    value_type: s.value_type,
                    value: s.value,
                })
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.iter().find(|e| e.name == name).map(|e| &e.value)
    }

    pub fn get_or<'a>(&'a self, name: &str, default: &'a Value) -> &'a Value {
        self.get(name).unwrap_or(default)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    pub fn has(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    /// Replace the first matching entry's value in place. A name absent from
    /// the store is logged and ignored: optimistic applies may target
    /// companion states a given device simply does not declare, and the
    /// remote has already acknowledged the command at that point.
    pub fn set(&mut self, name: &str, value: Value) {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.value = value,
            None => log::warn!("set of undeclared state {} ignored", name),
        }
    }

    /// State names in source order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn entries(&self) -> &[StateEntry] {
        &self.entries
    }
}

/// Allowed values declared for a state in the device's definition block.
#[derive(Debug, Clone, PartialEq)]
pub enum AllowedValues {
    Enum(Vec<String>),
    Range { min: f64, max: f64 },
}

impl AllowedValues {
    /// Check a proposed value against the declaration. Returns a human
    /// readable rejection reason, or None when the value is acceptable.
    fn reject_reason(&self, value: &Value) -> Option<String> {
        match self {
            AllowedValues::Enum(values) => match value.as_str() {
                Some(s) if values.iter().any(|v| v == s) => None,
                Some(s) => Some(format!("{} not in {:?}", s, values)),
                None => Some(format!("expected one of {:?}, got {}", values, value)),
            },
            AllowedValues::Range { min, max } => match value.as_f64() {
                Some(n) if n >= *min && n <= *max => None,
                Some(n) => Some(format!("{} outside [{}, {}]", n, min, max)),
                None => Some(format!("expected a number in [{}, {}], got {}", min, max, value)),
            },
        }
    }
}

/// Static per-device capability declarations, separate from the live state
/// list. Looked up by qualified state name.
#[derive(Debug, Clone, Default)]
pub struct StateDefinitions {
    definitions: Vec<(String, AllowedValues)>,
}

impl StateDefinitions {
    pub fn from_raw(definition: Option<RawDefinition>) -> StateDefinitions {
        let mut definitions = Vec::new();
        for def in definition.map(|d| d.states).unwrap_or_default() {
            let allowed = if !def.values.is_empty() {
                AllowedValues::Enum(def.values)
            } else if let (Some(min), Some(max)) = (def.min, def.max) {
                AllowedValues::Range { min, max }
            } else {
                continue;
            };
            definitions.push((def.qualified_name, allowed));
        }
        StateDefinitions { definitions }
    }

    pub fn get(&self, name: &str) -> Option<&AllowedValues> {
        self.definitions
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, allowed)| allowed)
    }

    /// Enum value list for a state, when one is declared.
    pub fn values(&self, name: &str) -> Option<&[String]> {
        match self.get(name) {
            Some(AllowedValues::Enum(values)) => Some(values),
            _ => None,
        }
    }

    /// Validate a proposed value against the declaration for `name`.
    /// States without a declaration accept anything.
    pub fn check(&self, name: &str, value: &Value) -> Result<(), String> {
        match self.get(name).and_then(|a| a.reject_reason(value)) {
            Some(reason) => Err(format!("{}: {}", name, reason)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::setup::RawStateDefinition;
    use serde_json::json;

    fn store() -> StateStore {
        StateStore::from_raw(vec![
            RawState {
                name: "core:ComfortRoomTemperatureState".into(),
                value_type: 2,
                value: json!(20.0),
            },
            RawState {
                name: "core:OnOffState".into(),
                value_type: 3,
                value: json!("off"),
            },
        ])
    }

    #[test]
    fn get_set_has_are_idempotent() {
        let mut s = store();
        assert!(s.has("core:OnOffState"));
        assert!(s.has("core:OnOffState"));
        s.set("core:OnOffState", json!("on"));
        assert_eq!(s.get("core:OnOffState"), Some(&json!("on")));
        s.set("core:OnOffState", json!("on"));
        assert_eq!(s.get("core:OnOffState"), Some(&json!("on")));
    }

    #[test]
    fn preserves_source_order() {
        let s = store();
        let names: Vec<&str> = s.names().collect();
        assert_eq!(names, vec!["core:ComfortRoomTemperatureState", "core:OnOffState"]);
    }

    #[test]
    fn set_of_missing_name_is_ignored() {
        let mut s = store();
        s.set("core:NoSuchState", json!(1));
        assert!(!s.has("core:NoSuchState"));
        assert_eq!(s.entries().len(), 2);
    }

    #[test]
    fn get_or_falls_back_to_default() {
        let s = store();
        let default = json!(0);
        assert_eq!(s.get_or("core:NoSuchState", &default), &default);
        assert_eq!(s.get_or("core:OnOffState", &default), &json!("off"));
    }

    #[test]
    fn definitions_validate_enum_membership_and_range() {
        let defs = StateDefinitions::from_raw(Some(RawDefinition {
            states: vec![
                RawStateDefinition {
                    qualified_name: "core:OperatingModeState".into(),
                    values: vec!["standby".into(), "internal".into()],
                    min: None,
                    max: None,
                },
                RawStateDefinition {
                    qualified_name: "core:TargetTemperatureState".into(),
                    values: vec![],
                    min: Some(7.0),
                    max: Some(28.0),
                },
            ],
        }));

        assert!(defs.check("core:OperatingModeState", &json!("internal")).is_ok());
        assert!(defs.check("core:OperatingModeState", &json!("warp")).is_err());
        assert!(defs.check("core:TargetTemperatureState", &json!(21.0)).is_ok());
        assert!(defs.check("core:TargetTemperatureState", &json!(35.0)).is_err());
        // undeclared states accept anything
        assert!(defs.check("core:HolidaysModeState", &json!("on")).is_ok());
        assert_eq!(
            defs.values("core:OperatingModeState"),
            Some(&["standby".to_string(), "internal".to_string()][..])
        );
    }
}
