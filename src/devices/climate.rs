//! APC heating-and-cooling zones. Every setpoint and mode exists once per
//! thermal circuit, so mutating operations take a [`ThermalMode`] selecting
//! the heating or the cooling side.

use serde_json::json;

use crate::command::Command;
use crate::constants::{command, mode, state};
use crate::error::CozytouchError;
use crate::registry::SensorKind;
use crate::state::StateStore;

use super::device::{refresh_with_sensors, supported_states, DeviceCore};
use super::sensor::Sensor;

/// Which thermal circuit of a heating/cooling zone an operation targets.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ThermalMode {
    Heat,
    Cool,
}

pub struct Climate {
    core: DeviceCore,
    sensors: Vec<Sensor>,
}

impl Climate {
    pub(crate) fn new(core: DeviceCore, sensors: Vec<Sensor>) -> Climate {
        Climate { core, sensors }
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

    fn mode_state(thermal: ThermalMode) -> &'static str {
        match thermal {
            ThermalMode::Heat => state::PASS_APC_HEATING_MODE,
            ThermalMode::Cool => state::PASS_APC_COOLING_MODE,
        }
    }

    pub fn is_on(&self) -> bool {
        self.operating_mode(ThermalMode::Heat).is_some_and(|m| m != mode::STOP)
            || self.operating_mode(ThermalMode::Cool).is_some_and(|m| m != mode::STOP)
    }

    /// Away is modeled as an active derogation on these zones.
    pub fn is_away(&self) -> bool {
        self.core.states().get_str(state::DEROGATION_ON_OFF) == Some(mode::ON)
    }

    pub fn temperature(&self) -> Option<f64> {
        self.sensors
            .iter()
            .find(|s| s.kind() == SensorKind::Temperature)
            .and_then(Sensor::temperature)
    }

    pub fn thermal_state(&self) -> Option<&str> {
        self.core.states().get_str(state::THERMAL_CONFIGURATION)
    }

    pub fn target_temperature(&self) -> Option<f64> {
        self.core.states().get_f64(state::TARGET_TEMPERATURE)
    }

    pub fn comfort_temperature(&self, thermal: ThermalMode) -> Option<f64> {
        let name = match thermal {
            ThermalMode::Heat => state::COMFORT_HEATING_TARGET_TEMPERATURE,
            ThermalMode::Cool => state::COMFORT_COOLING_TARGET_TEMPERATURE,
        };
        self.core.states().get_f64(name)
    }

    pub fn eco_temperature(&self, thermal: ThermalMode) -> Option<f64> {
        let name = match thermal {
            ThermalMode::Heat => state::ECO_HEATING_TARGET_TEMPERATURE,
            ThermalMode::Cool => state::ECO_COOLING_TARGET_TEMPERATURE,
        };
        self.core.states().get_f64(name)
    }

    pub fn operating_mode(&self, thermal: ThermalMode) -> Option<&str> {
        self.core.states().get_str(Self::mode_state(thermal))
    }

    pub fn operating_mode_list(&self, thermal: ThermalMode) -> Option<&[String]> {
        self.core.definition_values(Self::mode_state(thermal))
    }

    pub fn set_operating_mode(&mut self, value: &str, thermal: ThermalMode) -> Result<(), CozytouchError> {
        let target = Self::mode_state(thermal);
        self.core.check_value(target, &json!(value))?;
        let commands = match thermal {
            ThermalMode::Heat => vec![
                Command::new(command::SET_PASS_APC_HEATING_MODE, json!(value)),
                Command::parameterless(command::REFRESH_PASS_APC_HEATING_MODE),
            ],
            ThermalMode::Cool => vec![
                Command::new(command::SET_PASS_APC_COOLING_MODE, json!(value)),
                Command::parameterless(command::REFRESH_PASS_APC_COOLING_MODE),
            ],
        };
        self.core.execute("set operating mode", target, commands)?;
        self.core.states_mut().set(target, json!(value));
        Ok(())
    }

    pub fn set_eco_temperature(&mut self, temperature: f64, thermal: ThermalMode) -> Result<(), CozytouchError> {
        let (target, commands) = match thermal {
            ThermalMode::Heat => (
                state::ECO_HEATING_TARGET_TEMPERATURE,
                vec![
                    Command::new(command::SET_ECO_HEATING_TARGET_TEMPERATURE, json!(temperature)),
                    Command::parameterless(command::REFRESH_ECO_HEATING_TARGET_TEMPERATURE),
                ],
            ),
            ThermalMode::Cool => (
                state::ECO_COOLING_TARGET_TEMPERATURE,
                vec![
                    Command::new(command::SET_ECO_COOLING_TARGET_TEMPERATURE, json!(temperature)),
                    Command::parameterless(command::REFRESH_ECO_COOLING_TARGET_TEMPERATURE),
                ],
            ),
        };
        self.core.check_value(target, &json!(temperature))?;
        self.core.execute("set eco temperature", target, commands)?;
        self.core.states_mut().set(target, json!(temperature));
        Ok(())
    }

    pub fn set_comfort_temperature(&mut self, temperature: f64, thermal: ThermalMode) -> Result<(), CozytouchError> {
        let (target, commands) = match thermal {
            ThermalMode::Heat => (
                state::COMFORT_HEATING_TARGET_TEMPERATURE,
                vec![
                    Command::new(command::SET_COMFORT_HEATING_TARGET_TEMPERATURE, json!(temperature)),
                    Command::parameterless(command::REFRESH_COMFORT_HEATING_TARGET_TEMPERATURE),
                ],
            ),
            ThermalMode::Cool => (
                state::COMFORT_COOLING_TARGET_TEMPERATURE,
                vec![
                    Command::new(command::SET_COMFORT_COOLING_TARGET_TEMPERATURE, json!(temperature)),
                    Command::parameterless(command::REFRESH_COMFORT_COOLING_TARGET_TEMPERATURE),
                ],
            ),
        };
        self.core.check_value(target, &json!(temperature))?;
        self.core.execute("set comfort temperature", target, commands)?;
        self.core.states_mut().set(target, json!(temperature));
        Ok(())
    }

    /// Temporary override of the zone target while a derogation is active.
    /// The value is checked against the zone target's declaration, which is
    /// the state the override lands in.
    pub fn set_derogated_temperature(&mut self, temperature: f64) -> Result<(), CozytouchError> {
        let target = state::DEROGATION_ON_OFF;
        self.core.check_value(state::TARGET_TEMPERATURE, &json!(temperature))?;
        let commands = vec![Command::new(command::SET_DEROGATED_TARGET_TEMP, json!(temperature))];
        self.core.execute("set derogated temperature", target, commands)?;
        self.core.states_mut().set(state::TARGET_TEMPERATURE, json!(temperature));
        Ok(())
    }

    pub fn set_away_mode(&mut self, on: bool) -> Result<(), CozytouchError> {
        let target = state::DEROGATION_ON_OFF;
        let value = if on { mode::ON } else { mode::OFF };
        let commands = vec![Command::new(command::SET_DEROGATION_ON_OFF, json!(value))];
        self.core.execute("set away mode", target, commands)?;
        self.core.states_mut().set(target, json!(value));
        Ok(())
    }

    pub fn turn_away_mode_on(&mut self) -> Result<(), CozytouchError> {
        self.set_away_mode(true)
    }

    pub fn turn_away_mode_off(&mut self) -> Result<(), CozytouchError> {
        self.set_away_mode(false)
    }

    pub fn turn_on(&mut self, thermal: ThermalMode) -> Result<(), CozytouchError> {
        self.set_on_off(thermal, mode::ON)
    }

    pub fn turn_off(&mut self, thermal: ThermalMode) -> Result<(), CozytouchError> {
        self.set_on_off(thermal, mode::OFF)
    }

    fn set_on_off(&mut self, thermal: ThermalMode, value: &str) -> Result<(), CozytouchError> {
        let (target, name) = match thermal {
            ThermalMode::Heat => (state::HEATING_ON_OFF, command::SET_HEATING_ON_OFF),
            ThermalMode::Cool => (state::COOLING_ON_OFF, command::SET_COOLING_ON_OFF),
        };
        let commands = vec![Command::new(name, json!(value))];
        self.core.execute("set on/off", target, commands)?;
        self.core.states_mut().set(target, json!(value));
        Ok(())
    }

    pub fn refresh(&mut self) -> Result<(), CozytouchError> {
        refresh_with_sensors(&mut self.core, &mut self.sensors)
    }
}
