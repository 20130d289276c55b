//! APC heat pumps: system-level operating mode, absence scheduling and
//! per-circuit absence setpoints.

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde_json::{json, Value};

use crate::command::Command;
use crate::constants::{command, state};
use crate::error::CozytouchError;
use crate::state::StateStore;

use super::climate::ThermalMode;
use super::device::{refresh_with_sensors, supported_states, DeviceCore};
use super::sensor::Sensor;

/// Which edge of the absence window a scheduling command sets.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AwayBound {
    Start,
    End,
}

pub struct HeatPump {
    core: DeviceCore,
    sensors: Vec<Sensor>,
}

impl HeatPump {
    pub(crate) fn new(core: DeviceCore, sensors: Vec<Sensor>) -> HeatPump {
        HeatPump { core, sensors }
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

    pub fn operating_mode(&self) -> Option<&str> {
        self.core.states().get_str(state::PASS_APC_OPERATING_MODE)
    }

    pub fn operating_mode_list(&self) -> Option<&[String]> {
        self.core.definition_values(state::PASS_APC_OPERATING_MODE)
    }

    /// Scheduled absence window bounds, as reported by the pump.
    pub fn away_window(&self) -> (Option<&str>, Option<&str>) {
        (
            self.core.states().get_str(state::ABSENCE_START_DATE),
            self.core.states().get_str(state::ABSENCE_END_DATE),
        )
    }

    pub fn away_heating_temperature(&self) -> Option<f64> {
        self.core.states().get_f64(state::ABSENCE_HEATING_TARGET_TEMPERATURE)
    }

    pub fn away_cooling_temperature(&self) -> Option<f64> {
        self.core.states().get_f64(state::ABSENCE_COOLING_TARGET_TEMPERATURE)
    }

    pub fn set_operating_mode(&mut self, mode: &str) -> Result<(), CozytouchError> {
        let target = state::PASS_APC_OPERATING_MODE;
        self.core.check_value(target, &json!(mode))?;
        let commands = vec![
            Command::new(command::SET_PASS_APC_OPERATING_MODE, json!(mode)),
            Command::parameterless(command::REFRESH_OPERATING_MODE),
        ];
        self.core.execute("set operating mode", target, commands)?;
        self.core.states_mut().set(target, json!(mode));
        Ok(())
    }

    /// Set one bound of the absence window. The wire parameter is a broken
    /// down date object; the local state keeps the formatted timestamp.
    pub fn set_away_window(&mut self, bound: AwayBound, at: NaiveDateTime) -> Result<(), CozytouchError> {
        let (target, name) = match bound {
            AwayBound::Start => (state::ABSENCE_START_DATE, command::SET_ABSENCE_START_DATE_TIME),
            AwayBound::End => (state::ABSENCE_END_DATE, command::SET_ABSENCE_END_DATE_TIME),
        };
        let commands = vec![
            Command::new(name, datetime_parameter(at)),
            Command::parameterless(command::REFRESH_ABSENCE_SCHEDULING_AVAILABILITY),
        ];
        self.core.execute("set absence window", target, commands)?;
        self.core
            .states_mut()
            .set(target, json!(at.format("%Y-%m-%d %H:%M:%S").to_string()));
        Ok(())
    }

    /// Absence setpoint for one thermal circuit.
    pub fn set_derogated_temperature(&mut self, temperature: f64, thermal: ThermalMode) -> Result<(), CozytouchError> {
        let (target, name) = match thermal {
            ThermalMode::Heat => (
                state::ABSENCE_HEATING_TARGET_TEMPERATURE,
                command::SET_ABSENCE_HEATING_TARGET_TEMP,
            ),
            ThermalMode::Cool => (
                state::ABSENCE_COOLING_TARGET_TEMPERATURE,
                command::SET_ABSENCE_COOLING_TARGET_TEMP,
            ),
        };
        self.core.check_value(target, &json!(temperature))?;
        let commands = vec![Command::new(name, json!(temperature))];
        self.core.execute("set absence temperature", target, commands)?;
        self.core.states_mut().set(target, json!(temperature));
        Ok(())
    }

    pub fn refresh(&mut self) -> Result<(), CozytouchError> {
        refresh_with_sensors(&mut self.core, &mut self.sensors)
    }
}

fn datetime_parameter(at: NaiveDateTime) -> Value {
    json!({
        "year": at.year(),
        "month": at.month(),
        "day": at.day(),
        "hour": at.hour(),
        "minute": at.minute(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{heat_pump_fixture, RecordingApi};
    use chrono::NaiveDate;
    use std::rc::Rc;

    fn christmas_eve() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 12, 24).unwrap().and_hms_opt(18, 30, 0).unwrap()
    }

    #[test]
    fn datetime_parameter_breaks_down_fields() {
        assert_eq!(
            datetime_parameter(christmas_eve()),
            serde_json::json!({"year": 2021, "month": 12, "day": 24, "hour": 18, "minute": 30})
        );
    }

    #[test]
    fn mode_set_submits_and_applies() {
        let api = Rc::new(RecordingApi::new());
        let mut pump = heat_pump_fixture(Some(api.clone()));

        pump.set_operating_mode("stop").unwrap();

        let commands = &api.batches()[0].actions[0].commands;
        assert_eq!(commands[0].name, "setPassAPCOperatingMode");
        assert_eq!(commands[1].name, "refreshOperatingMode");
        assert_eq!(pump.operating_mode(), Some("stop"));

        assert!(matches!(
            pump.set_operating_mode("warp"),
            Err(CozytouchError::Validation(_))
        ));
        assert_eq!(api.batches().len(), 1);
    }

    #[test]
    fn away_window_submits_object_parameter_and_applies_timestamp() {
        let api = Rc::new(RecordingApi::new());
        let mut pump = heat_pump_fixture(Some(api.clone()));

        pump.set_away_window(AwayBound::Start, christmas_eve()).unwrap();

        let commands = &api.batches()[0].actions[0].commands;
        assert_eq!(commands[0].name, "setAbsenceStartDateTime");
        assert_eq!(
            commands[0].parameters,
            Some(vec![serde_json::json!(
                {"year": 2021, "month": 12, "day": 24, "hour": 18, "minute": 30}
            )])
        );
        assert_eq!(commands[1].name, "refreshAbsenceSchedulingAvailability");
        assert_eq!(commands[1].parameters, None);

        let (start, end) = pump.away_window();
        assert_eq!(start, Some("2021-12-24 18:30:00"));
        assert_eq!(end, Some(""));
    }

    #[test]
    fn absence_setpoint_is_range_checked_per_circuit() {
        let api = Rc::new(RecordingApi::new());
        let mut pump = heat_pump_fixture(Some(api.clone()));

        // fixture declares [5, 20] for the heating absence setpoint
        assert!(matches!(
            pump.set_derogated_temperature(25.0, ThermalMode::Heat),
            Err(CozytouchError::Validation(_))
        ));
        assert!(api.batches().is_empty());

        pump.set_derogated_temperature(12.0, ThermalMode::Heat).unwrap();
        assert_eq!(
            api.batches()[0].actions[0].commands[0].name,
            "setAbsenceHeatingTargetTemperature"
        );
        assert_eq!(pump.away_heating_temperature(), Some(12.0));
    }
}
