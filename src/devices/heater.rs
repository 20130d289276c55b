//! Room heater behaviors. Three widget flavors share this type:
//! setpoint heaters (adjustable temperature), pilot-wire heaters (discrete
//! heating levels) and APC heating zones (boiler/heat-pump zone control with
//! its own mode vocabulary).

use serde_json::json;

use crate::command::Command;
use crate::constants::{command, mode, state};
use crate::error::CozytouchError;
use crate::registry::{SensorKind, Widget};
use crate::state::StateStore;

use super::device::{refresh_with_sensors, supported_states, DeviceCore};
use super::sensor::Sensor;

pub struct Heater {
    core: DeviceCore,
    sensors: Vec<Sensor>,
}

impl Heater {
    pub(crate) fn new(core: DeviceCore, sensors: Vec<Sensor>) -> Heater {
        Heater { core, sensors }
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

    pub fn place_id(&self) -> &str {
        self.core.place_id()
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

    /// Own state names plus those of the owned sensors.
    pub fn supported_states(&self) -> Vec<String> {
        supported_states(&self.core, &self.sensors)
    }

    fn is_apc(&self) -> bool {
        self.core.widget() == Widget::ApcHeatingZone
    }

    pub fn is_on(&self) -> bool {
        match self.core.widget() {
            Widget::PilotWireHeater => self.heating_level().is_some_and(|l| l != mode::OFF),
            Widget::ApcHeatingZone => self.operating_mode().is_some_and(|m| m != mode::STOP),
            _ => self.operating_mode().is_some_and(|m| m != mode::STANDBY),
        }
    }

    pub fn is_away(&self) -> bool {
        self.core.states().get_str(state::AWAY) == Some(mode::ON)
    }

    /// Ambient reading from the owned temperature sensor.
    pub fn temperature(&self) -> Option<f64> {
        self.sensors
            .iter()
            .find(|s| s.kind() == SensorKind::Temperature)
            .and_then(Sensor::temperature)
    }

    pub fn target_temperature(&self) -> Option<f64> {
        let name = if self.is_apc() {
            state::COMFORT_TARGET_TEMPERATURE
        } else {
            state::TARGET_TEMPERATURE
        };
        self.core.states().get_f64(name)
    }

    pub fn comfort_temperature(&self) -> Option<f64> {
        self.core.states().get_f64(self.comfort_state())
    }

    /// Eco setpoint, absolute degrees Celsius.
    pub fn eco_temperature(&self) -> Option<f64> {
        self.core.states().get_f64(self.eco_state())
    }

    pub fn operating_mode(&self) -> Option<&str> {
        self.core.states().get_str(self.mode_state())
    }

    pub fn operating_mode_list(&self) -> Option<&[String]> {
        self.core.definition_values(self.mode_state())
    }

    pub fn heating_level(&self) -> Option<&str> {
        self.core.states().get_str(state::TARGETING_HEATING_LEVEL)
    }

    pub fn heating_level_list(&self) -> Option<&[String]> {
        self.core.definition_values(state::TARGETING_HEATING_LEVEL)
    }

    fn mode_state(&self) -> &'static str {
        if self.is_apc() {
            state::PASS_APC_HEATING_MODE
        } else {
            state::OPERATING_MODE
        }
    }

    fn comfort_state(&self) -> &'static str {
        if self.is_apc() {
            state::COMFORT_HEATING_TARGET_TEMPERATURE
        } else {
            state::COMFORT_TEMPERATURE
        }
    }

    fn eco_state(&self) -> &'static str {
        if self.is_apc() {
            state::ECO_HEATING_TARGET_TEMPERATURE
        } else {
            state::ECO_TEMPERATURE
        }
    }

    pub fn set_operating_mode(&mut self, mode: &str) -> Result<(), CozytouchError> {
        let target = self.mode_state();
        self.core.check_value(target, &json!(mode))?;
        let commands = if self.is_apc() {
            vec![
                Command::new(command::SET_PASS_APC_HEATING_MODE, json!(mode)),
                Command::parameterless(command::REFRESH_PASS_APC_HEATING_MODE),
            ]
        } else {
            vec![
                Command::new(command::SET_OPERATING_MODE, json!(mode)),
                Command::parameterless(command::REFRESH_OPERATION_MODE),
            ]
        };
        self.core.execute("set operating mode", target, commands)?;
        self.core.states_mut().set(target, json!(mode));
        Ok(())
    }

    pub fn set_targeting_heating_level(&mut self, level: &str) -> Result<(), CozytouchError> {
        let target = state::TARGETING_HEATING_LEVEL;
        self.core.check_value(target, &json!(level))?;
        let commands = vec![Command::new(command::SET_HEATING_LEVEL, json!(level))];
        self.core.execute("set heating level", target, commands)?;
        self.core.states_mut().set(target, json!(level));
        Ok(())
    }

    pub fn set_eco_temperature(&mut self, temperature: f64) -> Result<(), CozytouchError> {
        let target = self.eco_state();
        self.core.check_value(target, &json!(temperature))?;
        let commands = if self.is_apc() {
            vec![
                Command::new(command::SET_ECO_HEATING_TARGET_TEMPERATURE, json!(temperature)),
                Command::parameterless(command::REFRESH_ECO_HEATING_TARGET_TEMPERATURE),
            ]
        } else {
            vec![
                Command::new(command::SET_ECO_TEMP, json!(temperature)),
                Command::parameterless(command::REFRESH_LOWERING_TEMP_PROG),
            ]
        };
        self.core.execute("set eco temperature", target, commands)?;
        self.core.states_mut().set(target, json!(temperature));
        Ok(())
    }

    /// Set the comfort setpoint. On non-APC heaters the comfort/eco spread is
    /// preserved: the eco setpoint moves by the same amount in the same
    /// batch, and both local states are applied after acknowledgement.
    pub fn set_comfort_temperature(&mut self, temperature: f64) -> Result<(), CozytouchError> {
        let target = self.comfort_state();
        self.core.check_value(target, &json!(temperature))?;

        if self.is_apc() {
            let commands = vec![
                Command::new(command::SET_COMFORT_HEATING_TARGET_TEMPERATURE, json!(temperature)),
                Command::parameterless(command::REFRESH_COMFORT_HEATING_TARGET_TEMPERATURE),
            ];
            self.core.execute("set comfort temperature", target, commands)?;
            self.core.states_mut().set(target, json!(temperature));
            return Ok(());
        }

        let spread = match (self.comfort_temperature(), self.eco_temperature()) {
            (Some(comfort), Some(eco)) => comfort - eco,
            _ => 0.0,
        };
        let eco = temperature - spread;
        let commands = vec![
            Command::new(command::SET_COMFORT_TEMP, json!(temperature)),
            Command::new(command::SET_ECO_TEMP, json!(eco)),
            Command::parameterless(command::REFRESH_TARGET_TEMPERATURE),
            Command::parameterless(command::REFRESH_COMFORT_TEMPERATURE),
            Command::parameterless(command::REFRESH_LOWERING_TEMP_PROG),
        ];
        self.core.execute("set comfort temperature", target, commands)?;
        self.core.states_mut().set(target, json!(temperature));
        self.core.states_mut().set(state::ECO_TEMPERATURE, json!(eco));
        Ok(())
    }

    pub fn set_target_temperature(&mut self, temperature: f64) -> Result<(), CozytouchError> {
        let target = state::TARGET_TEMPERATURE;
        self.core.check_value(target, &json!(temperature))?;
        let commands = vec![
            Command::new(command::SET_TARGET_TEMP, json!(temperature)),
            Command::parameterless(command::REFRESH_ECO_TEMPERATURE),
            Command::parameterless(command::REFRESH_COMFORT_TEMPERATURE),
            Command::parameterless(command::REFRESH_LOWERING_TEMP_PROG),
        ];
        self.core.execute("set target temperature", target, commands)?;
        self.core.states_mut().set(target, json!(temperature));
        Ok(())
    }

    pub fn set_away_mode(&mut self, on: bool) -> Result<(), CozytouchError> {
        let target = state::AWAY;
        let value = if on { mode::ON } else { mode::OFF };
        let commands = vec![Command::new(command::SET_AWAY_MODE, json!(value))];
        self.core.execute("set away mode", target, commands)?;
        self.core.states_mut().set(target, json!(value));
        Ok(())
    }

    pub fn turn_away_mode_on(&mut self) -> Result<(), CozytouchError> {
        if self.is_apc() {
            self.set_targeting_heating_level(mode::ABSENCE)
        } else {
            self.set_away_mode(true)
        }
    }

    pub fn turn_away_mode_off(&mut self) -> Result<(), CozytouchError> {
        if self.is_apc() {
            self.set_targeting_heating_level(mode::STOP)
        } else {
            self.set_away_mode(false)
        }
    }

    pub fn turn_on(&mut self) -> Result<(), CozytouchError> {
        match self.core.widget() {
            Widget::PilotWireHeater => self.set_targeting_heating_level(mode::COMFORT),
            Widget::ApcHeatingZone => self.set_heating_on_off(mode::ON),
            _ => self.set_operating_mode(mode::INTERNAL),
        }
    }

    pub fn turn_off(&mut self) -> Result<(), CozytouchError> {
        match self.core.widget() {
            Widget::PilotWireHeater => self.set_targeting_heating_level(mode::OFF),
            Widget::ApcHeatingZone => self.set_heating_on_off(mode::OFF),
            _ => self.set_operating_mode(mode::STANDBY),
        }
    }

    fn set_heating_on_off(&mut self, value: &str) -> Result<(), CozytouchError> {
        let target = state::HEATING_ON_OFF;
        let commands = vec![Command::new(command::SET_HEATING_ON_OFF, json!(value))];
        self.core.execute("set heating on/off", target, commands)?;
        self.core.states_mut().set(target, json!(value));
        Ok(())
    }

    /// Refresh owned sensors then the heater itself.
    pub fn refresh(&mut self) -> Result<(), CozytouchError> {
        refresh_with_sensors(&mut self.core, &mut self.sensors)
    }
}
