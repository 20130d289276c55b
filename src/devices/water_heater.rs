//! Domestic hot water production. Two widget flavors: standalone DHW tanks
//! and APC-driven DHW (boiler/heat-pump systems), which use a different mode
//! state and a simple on/off boost instead of a timed one.
//!
//! On standalone tanks `core:OperatingModeState` is an object value with
//! `absence` and `relaunch` on/off fields; away and boost read those fields.

use serde_json::json;

use crate::command::Command;
use crate::constants::{command, mode, state};
use crate::error::CozytouchError;
use crate::registry::Widget;
use crate::state::StateStore;

use super::device::{refresh_with_sensors, supported_states, DeviceCore};
use super::sensor::Sensor;

pub struct WaterHeater {
    core: DeviceCore,
    sensors: Vec<Sensor>,
}

impl WaterHeater {
    pub(crate) fn new(core: DeviceCore, sensors: Vec<Sensor>) -> WaterHeater {
        WaterHeater { core, sensors }
    }

    pub fn id(&self) -> &str {
        self.core.id()
    }

    pub fn name(&self) -> &str {
        self.core.name()
    }

    pub fn widget(&self) -> Widget {
        self.core.widget()
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

    fn is_apc(&self) -> bool {
        self.core.widget() == Widget::ApcWaterHeater
    }

    fn mode_state(&self) -> &'static str {
        if self.is_apc() {
            state::PASS_APC_DHW_MODE
        } else {
            state::DHW_MODE
        }
    }

    pub fn is_on(&self) -> bool {
        self.operating_mode().is_some_and(|m| m != mode::STANDBY)
    }

    pub fn operating_mode(&self) -> Option<&str> {
        self.core.states().get_str(self.mode_state())
    }

    pub fn operating_mode_list(&self) -> Option<&[String]> {
        self.core.definition_values(self.mode_state())
    }

    /// Mid-tank water temperature.
    pub fn current_temperature(&self) -> Option<f64> {
        self.core.states().get_f64(state::MIDDLE_WATER_TEMPERATURE)
    }

    pub fn target_temperature(&self) -> Option<f64> {
        let name = if self.is_apc() {
            state::TARGET_DHW_TEMPERATURE
        } else {
            state::TARGET_TEMPERATURE
        };
        self.core.states().get_f64(name)
    }

    fn operating_flag(&self, field: &str) -> bool {
        self.core
            .states()
            .get(state::OPERATING_MODE)
            .and_then(|v| v.get(field))
            .and_then(|v| v.as_str())
            == Some(mode::ON)
    }

    pub fn is_away_mode_on(&self) -> bool {
        self.operating_flag("absence")
    }

    pub fn is_boost_mode_on(&self) -> bool {
        if self.is_apc() {
            self.core.states().get_str(state::BOOST_ON_OFF) == Some(mode::ON)
        } else {
            self.operating_flag("relaunch")
        }
    }

    pub fn set_operating_mode(&mut self, mode: &str) -> Result<(), CozytouchError> {
        let target = self.mode_state();
        self.core.check_value(target, &json!(mode))?;
        let commands = if self.is_apc() {
            vec![
                Command::new(command::SET_PASS_APC_DHW_MODE, json!(mode)),
                Command::parameterless(command::REFRESH_PASS_APC_DHW_MODE),
            ]
        } else {
            vec![
                Command::new(command::SET_DHW_MODE, json!(mode)),
                Command::parameterless(command::REFRESH_DHW_MODE),
            ]
        };
        self.core.execute("set dhw mode", target, commands)?;
        self.core.states_mut().set(target, json!(mode));
        Ok(())
    }

    /// Away mode for `duration` days. Zero cancels: the operating-mode object
    /// is reset with both flags off and no duration command is sent.
    pub fn set_away_mode(&mut self, duration: u32) -> Result<(), CozytouchError> {
        let target = state::AWAY_MODE_DURATION;
        let commands = if duration == 0 {
            vec![Command::new(
                command::SET_CURRENT_OPERATING_MODE,
                json!({"relaunch": mode::OFF, "absence": mode::OFF}),
            )]
        } else {
            vec![
                Command::new(command::SET_AWAY_MODE_DURATION, json!(duration)),
                Command::new(
                    command::SET_CURRENT_OPERATING_MODE,
                    json!({"relaunch": mode::OFF, "absence": mode::ON}),
                ),
                Command::parameterless(command::REFRESH_AWAY_MODE_DURATION),
            ]
        };
        self.core.execute("set away mode", target, commands)?;
        self.core.states_mut().set(target, json!(duration));
        Ok(())
    }

    /// Boost for `duration` days; zero cancels. APC boost is a plain on/off
    /// switch and ignores the duration beyond its zero test.
    pub fn set_boost_mode(&mut self, duration: u32) -> Result<(), CozytouchError> {
        if self.is_apc() {
            let target = state::BOOST_ON_OFF;
            let value = if duration == 0 { mode::OFF } else { mode::ON };
            let commands = vec![Command::new(command::SET_BOOST_MODE_DURATION, json!(value))];
            self.core.execute("set boost mode", target, commands)?;
            self.core.states_mut().set(target, json!(value));
            return Ok(());
        }

        let target = state::BOOST_MODE_DURATION;
        let commands = if duration == 0 {
            vec![Command::new(
                command::SET_CURRENT_OPERATING_MODE,
                json!({"relaunch": mode::OFF, "absence": mode::OFF}),
            )]
        } else {
            vec![
                Command::new(command::SET_BOOST_MODE_DURATION, json!(duration)),
                Command::new(
                    command::SET_CURRENT_OPERATING_MODE,
                    json!({"relaunch": mode::ON, "absence": mode::OFF}),
                ),
                Command::parameterless(command::REFRESH_BOOST_MODE_DURATION),
            ]
        };
        self.core.execute("set boost mode", target, commands)?;
        self.core.states_mut().set(target, json!(duration));
        Ok(())
    }

    pub fn set_target_temperature(&mut self, temperature: f64) -> Result<(), CozytouchError> {
        let target = state::TARGET_TEMPERATURE;
        self.core.check_value(target, &json!(temperature))?;
        let commands = vec![
            Command::new(command::SET_TARGET_TEMP, json!(temperature)),
            Command::parameterless(command::REFRESH_TARGET_TEMPERATURE),
        ];
        self.core.execute("set target temperature", target, commands)?;
        self.core.states_mut().set(target, json!(temperature));
        Ok(())
    }

    pub fn set_eco_temperature(&mut self, temperature: f64) -> Result<(), CozytouchError> {
        let target = state::ECO_TARGET_DHW_TEMPERATURE;
        self.core.check_value(target, &json!(temperature))?;
        let commands = vec![
            Command::new(command::SET_ECO_TARGET_DHW_TEMPERATURE, json!(temperature)),
            Command::parameterless(command::REFRESH_ECO_TARGET_DHW_TEMPERATURE),
        ];
        self.core.execute("set eco temperature", target, commands)?;
        self.core.states_mut().set(target, json!(temperature));
        Ok(())
    }

    pub fn set_comfort_temperature(&mut self, temperature: f64) -> Result<(), CozytouchError> {
        let target = state::COMFORT_TARGET_DHW_TEMPERATURE;
        self.core.check_value(target, &json!(temperature))?;
        let commands = vec![
            Command::new(command::SET_COMFORT_TARGET_DHW_TEMPERATURE, json!(temperature)),
            Command::parameterless(command::REFRESH_COMFORT_TARGET_DHW_TEMPERATURE),
        ];
        self.core.execute("set comfort temperature", target, commands)?;
        self.core.states_mut().set(target, json!(temperature));
        Ok(())
    }

    pub fn refresh(&mut self) -> Result<(), CozytouchError> {
        refresh_with_sensors(&mut self.core, &mut self.sensors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{water_heater_fixture, RecordingApi};
    use std::rc::Rc;

    #[test]
    fn away_cancellation_sends_only_the_mode_reset() {
        let api = Rc::new(RecordingApi::new());
        let mut heater = water_heater_fixture(Some(api.clone()));

        heater.set_away_mode(0).unwrap();
        let batches = api.batches();
        let commands = &batches[0].actions[0].commands;
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].name, "setCurrentOperatingMode");
        assert_eq!(
            commands[0].parameters,
            Some(vec![serde_json::json!({"relaunch": "off", "absence": "off"})])
        );
    }

    #[test]
    fn away_for_days_sets_duration_and_absence() {
        let api = Rc::new(RecordingApi::new());
        let mut heater = water_heater_fixture(Some(api.clone()));

        heater.set_away_mode(7).unwrap();
        let batches = api.batches();
        let commands = &batches[0].actions[0].commands;
        assert_eq!(commands[0].name, "setAwayModeDuration");
        assert_eq!(commands[0].parameters, Some(vec![serde_json::json!(7)]));
        assert_eq!(commands[1].name, "setCurrentOperatingMode");
        assert_eq!(commands[2].name, "refreshAwayModeDuration");
    }

    #[test]
    fn object_valued_operating_mode_drives_flags() {
        let heater = water_heater_fixture(None);
        // fixture ships {"relaunch": "off", "absence": "on"}
        assert!(heater.is_away_mode_on());
        assert!(!heater.is_boost_mode_on());
    }
}
