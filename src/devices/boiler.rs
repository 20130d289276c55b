//! APC boilers. Mostly read-only besides the system operating mode.

use serde_json::{json, Value};

use crate::command::Command;
use crate::constants::{command, mode, state};
use crate::error::CozytouchError;
use crate::state::StateStore;

use super::device::{refresh_with_sensors, supported_states, DeviceCore};
use super::sensor::Sensor;

pub struct Boiler {
    core: DeviceCore,
    sensors: Vec<Sensor>,
}

impl Boiler {
    pub(crate) fn new(core: DeviceCore, sensors: Vec<Sensor>) -> Boiler {
        Boiler { core, sensors }
    }

    pub fn id(&self) -> &str {
        self.core.id()
    }

    pub fn name(&self) -> &str {
        self.core.name()
    }

    pub fn device_url(&self) -> String {
        self.core.device_url()
    }

    pub fn available(&self) -> bool {
        self.core.available()
    }

    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    pub fn states(&self) -> &StateStore {
        self.core.states()
    }

    pub fn supported_states(&self) -> Vec<String> {
        supported_states(&self.core, &self.sensors)
    }

    pub fn model(&self) -> Option<&str> {
        self.core.states().get_str(state::PRODUCT_MODEL_NAME)
    }

    pub fn away_target_temperature(&self) -> Option<f64> {
        self.core.states().get_f64(state::ABSENCE_HEATING_TARGET_TEMPERATURE)
    }

    pub fn is_on(&self) -> bool {
        self.operating_mode().is_some_and(|m| m != mode::STOP)
    }

    pub fn operating_mode(&self) -> Option<&str> {
        self.core.states().get_str(state::PASS_APC_OPERATING_MODE)
    }

    pub fn operating_mode_list(&self) -> Option<&[String]> {
        self.core.definition_values(state::PASS_APC_OPERATING_MODE)
    }

    /// The four on-device time program slots, in order. Slots the boiler does
    /// not declare come back as None.
    pub fn time_programs(&self) -> Vec<Option<&Value>> {
        (1..=4)
            .map(|i| self.core.states().get(&format!("core:TimeProgram{}State", i)))
            .collect()
    }

    pub fn set_operating_mode(&mut self, mode: &str) -> Result<(), CozytouchError> {
        let target = state::PASS_APC_OPERATING_MODE;
        self.core.check_value(target, &json!(mode))?;
        let commands = vec![
            Command::new(command::SET_PASS_APC_OPERATING_MODE, json!(mode)),
            Command::parameterless(command::REFRESH_OPERATION_MODE),
        ];
        self.core.execute("set operating mode", target, commands)?;
        self.core.states_mut().set(target, json!(mode));
        Ok(())
    }

    pub fn refresh(&mut self) -> Result<(), CozytouchError> {
        refresh_with_sensors(&mut self.core, &mut self.sensors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{boiler_fixture, RecordingApi};
    use std::rc::Rc;

    #[test]
    fn mode_set_submits_and_applies() {
        let api = Rc::new(RecordingApi::new());
        let mut boiler = boiler_fixture(Some(api.clone()));
        assert!(boiler.is_on());

        boiler.set_operating_mode("stop").unwrap();

        let commands = &api.batches()[0].actions[0].commands;
        assert_eq!(commands[0].name, "setPassAPCOperatingMode");
        assert_eq!(commands[0].parameters, Some(vec![serde_json::json!("stop")]));
        assert_eq!(commands[1].name, "refreshOperationMode");
        assert_eq!(boiler.operating_mode(), Some("stop"));
        assert!(!boiler.is_on());
    }

    #[test]
    fn mode_set_rejects_undeclared_values() {
        let api = Rc::new(RecordingApi::new());
        let mut boiler = boiler_fixture(Some(api.clone()));

        assert!(matches!(
            boiler.set_operating_mode("warp"),
            Err(CozytouchError::Validation(_))
        ));
        assert!(api.batches().is_empty());
        assert_eq!(boiler.operating_mode(), Some("heating"));
    }

    #[test]
    fn undeclared_time_program_slots_are_none() {
        let boiler = boiler_fixture(None);
        assert_eq!(boiler.model(), Some("Naema"));
        assert_eq!(boiler.time_programs(), vec![None, None, None, None]);
    }
}
