//! Shared device core: identity, address, state store, weak back-references
//! and the validate → submit → apply template every mutating operation uses.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::rc::Rc;

use crate::address::DeviceUrl;
use crate::client::CozytouchApi;
use crate::command::{Command, CommandBatch};
use crate::constants::state;
use crate::error::CozytouchError;
use crate::models::setup::RawDevice;
use crate::registry::Widget;
use crate::state::{StateDefinitions, StateStore};

use super::sensor::Sensor;

/// Data common to every device variant. Gateway and place references are
/// lookup keys into the owning `Setup`, not pointers; the place label is
/// snapshotted at construction for display-name derivation. The client
/// handle is optional — without one, every mutating operation fails with
/// `UnboundClient`.
pub struct DeviceCore {
    oid: String,
    label: String,
    name: String,
    widget: Widget,
    url: DeviceUrl,
    available: bool,
    enabled: bool,
    creation_time: Option<DateTime<Utc>>,
    last_update_time: Option<DateTime<Utc>>,
    states: StateStore,
    definitions: StateDefinitions,
    place_id: String,
    place_label: String,
    client: Option<Rc<dyn CozytouchApi>>,
}

impl DeviceCore {
    pub(crate) fn new(
        raw: RawDevice,
        widget: Widget,
        url: DeviceUrl,
        name: String,
        place_id: String,
        place_label: String,
        client: Option<Rc<dyn CozytouchApi>>,
    ) -> DeviceCore {
        DeviceCore {
            oid: raw.oid,
            label: raw.label,
            name,
            widget,
            url,
            available: raw.available,
            enabled: raw.enabled,
            creation_time: raw.creation_time,
            last_update_time: raw.last_update_time,
            states: StateStore::from_raw(raw.states),
            definitions: StateDefinitions::from_raw(raw.definition),
            place_id,
            place_label,
            client,
        }
    }

    pub fn id(&self) -> &str {
        &self.oid
    }

    /// Raw label from the descriptor.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Display name (raw label or place + widget, depending on the variant).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn widget(&self) -> Widget {
        self.widget
    }

    pub fn url(&self) -> &DeviceUrl {
        &self.url
    }

    pub fn device_url(&self) -> String {
        self.url.to_string()
    }

    pub fn gateway_id(&self) -> &str {
        &self.url.gateway_id
    }

    pub fn place_id(&self) -> &str {
        &self.place_id
    }

    pub fn place_label(&self) -> &str {
        &self.place_label
    }

    pub fn available(&self) -> bool {
        self.available
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn creation_time(&self) -> Option<DateTime<Utc>> {
        self.creation_time
    }

    pub fn last_update_time(&self) -> Option<DateTime<Utc>> {
        self.last_update_time
    }

    pub fn manufacturer(&self) -> Option<&str> {
        self.states.get_str(state::MANUFACTURER_NAME)
    }

    pub fn model(&self) -> Option<&str> {
        self.states.get_str(state::MODEL)
    }

    pub fn version(&self) -> Option<&str> {
        self.states.get_str(state::VERSION)
    }

    pub fn states(&self) -> &StateStore {
        &self.states
    }

    pub(crate) fn states_mut(&mut self) -> &mut StateStore {
        &mut self.states
    }

    pub fn get_state(&self, name: &str) -> Option<&Value> {
        self.states.get(name)
    }

    pub fn has_state(&self, name: &str) -> bool {
        self.states.has(name)
    }

    /// Enum value list declared for a state, when the definition block
    /// carries one.
    pub fn definition_values(&self, name: &str) -> Option<&[String]> {
        self.definitions.values(name)
    }

    /// Phase 1 type check: a proposed value must satisfy the state's
    /// declared definition before anything goes on the wire.
    pub(crate) fn check_value(&self, state: &str, value: &Value) -> Result<(), CozytouchError> {
        self.definitions.check(state, value).map_err(CozytouchError::Validation)
    }

    /// Phases 1 and 2 of the protocol: validate that the target state exists
    /// and a client is attached, then build, serialize and submit the batch.
    /// The caller applies local state only after this returns Ok (phase 3);
    /// on error nothing has been applied.
    pub(crate) fn execute(&self, label: &str, target_state: &str, commands: Vec<Command>) -> Result<(), CozytouchError> {
        if !self.states.has(target_state) {
            return Err(CozytouchError::UnsupportedCommand {
                device: self.label.clone(),
                state: target_state.to_string(),
            });
        }
        let client = self.client.as_ref().ok_or(CozytouchError::UnboundClient)?;
        let batch = CommandBatch::single(label, self.device_url(), commands);
        let exec_id = client.apply_commands(&batch)?;
        log::debug!("{}: {} accepted as execution {}", self.label, label, exec_id);
        Ok(())
    }

    /// Re-fetch this device's own state list from the client, replacing the
    /// local store wholesale.
    pub(crate) fn refresh(&mut self) -> Result<(), CozytouchError> {
        let client = self.client.as_ref().ok_or(CozytouchError::UnboundClient)?.clone();
        log::debug!("{}: refreshing states", self.label);
        let states = client.get_device_states(&self.device_url())?;
        self.states = StateStore::from_raw(states);
        Ok(())
    }
}

/// Union of the actuator's own state names and those of its owned sensors,
/// own states first, without duplicates.
pub(crate) fn supported_states(core: &DeviceCore, sensors: &[Sensor]) -> Vec<String> {
    let mut names: Vec<String> = core.states().names().map(str::to_string).collect();
    for sensor in sensors {
        for name in sensor.states().names() {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
    }
    names
}

/// Sequential refresh: owned sensors first, in order, then the device
/// itself. Not atomic — a failure partway leaves earlier sensors refreshed
/// and propagates.
pub(crate) fn refresh_with_sensors(core: &mut DeviceCore, sensors: &mut [Sensor]) -> Result<(), CozytouchError> {
    for sensor in sensors.iter_mut() {
        sensor.refresh()?;
    }
    core.refresh()
}
