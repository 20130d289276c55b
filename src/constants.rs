//! Wire-level string constants: endpoints, state names, command names and
//! the mode vocabulary shared by the device behaviors.

pub const DEFAULT_BASE_URL: &str = "https://ha110-1.overkiz.com/enduser-mobile-web/enduserAPI";
pub const USER_AGENT: &str = "Home assistant/Cozytouch";

/// Minimum spacing between device-list fetches (seconds).
pub const DEFAULT_THROTTLE_SECS: u64 = 60;

/// Qualified state names as they appear in device state lists and
/// definition blocks.
pub mod state {
    pub const ABSENCE_COOLING_TARGET_TEMPERATURE: &str = "core:AbsenceCoolingTargetTemperatureState";
    pub const ABSENCE_END_DATE: &str = "core:AbsenceEndDateState";
    pub const ABSENCE_HEATING_TARGET_TEMPERATURE: &str = "core:AbsenceHeatingTargetTemperatureState";
    pub const ABSENCE_START_DATE: &str = "core:AbsenceStartDateState";
    pub const AWAY: &str = "core:HolidaysModeState";
    pub const AWAY_MODE_DURATION: &str = "io:AwayModeDurationState";
    pub const BOOST_MODE_DURATION: &str = "core:BoostModeDurationState";
    pub const BOOST_ON_OFF: &str = "core:BoostOnOffState";
    pub const COMFORT_COOLING_TARGET_TEMPERATURE: &str = "core:ComfortCoolingTargetTemperatureState";
    pub const COMFORT_HEATING_TARGET_TEMPERATURE: &str = "core:ComfortHeatingTargetTemperatureState";
    pub const COMFORT_TARGET_DHW_TEMPERATURE: &str = "core:ComfortTargetDHWTemperatureState";
    pub const COMFORT_TARGET_TEMPERATURE: &str = "core:ComfortTargetTemperatureState";
    pub const COMFORT_TEMPERATURE: &str = "core:ComfortRoomTemperatureState";
    pub const CONTACT: &str = "core:ContactState";
    pub const COOLING_ON_OFF: &str = "core:CoolingOnOffState";
    pub const DEROGATION_ON_OFF: &str = "core:DerogationOnOffState";
    pub const DHW_MODE: &str = "io:DHWModeState";
    pub const ECO_COOLING_TARGET_TEMPERATURE: &str = "core:EcoCoolingTargetTemperatureState";
    pub const ECO_HEATING_TARGET_TEMPERATURE: &str = "core:EcoHeatingTargetTemperatureState";
    pub const ECO_TARGET_DHW_TEMPERATURE: &str = "core:EcoTargetDHWTemperatureState";
    pub const ECO_TEMPERATURE: &str = "core:EcoRoomTemperatureState";
    pub const ELECTRIC_ENERGY_CONSUMPTION: &str = "core:ElectricEnergyConsumptionState";
    pub const FOSSIL_ENERGY_CONSUMPTION: &str = "core:FossilEnergyConsumptionState";
    pub const HEATING_ON_OFF: &str = "core:HeatingOnOffState";
    pub const MANUFACTURER_NAME: &str = "core:ManufacturerNameState";
    pub const MIDDLE_WATER_TEMPERATURE: &str = "io:MiddleWaterTemperatureState";
    pub const MODEL: &str = "io:ModelState";
    pub const OCCUPANCY: &str = "core:OccupancyState";
    pub const OPERATING_MODE: &str = "core:OperatingModeState";
    pub const PASS_APC_COOLING_MODE: &str = "io:PassAPCCoolingModeState";
    pub const PASS_APC_DHW_MODE: &str = "io:PassAPCDHWModeState";
    pub const PASS_APC_HEATING_MODE: &str = "io:PassAPCHeatingModeState";
    pub const PASS_APC_OPERATING_MODE: &str = "io:PassAPCOperatingModeState";
    pub const PRODUCT_MODEL_NAME: &str = "core:ProductModelNameState";
    pub const TARGET_DHW_TEMPERATURE: &str = "core:TargetDHWTemperatureState";
    pub const TARGET_TEMPERATURE: &str = "core:TargetTemperatureState";
    pub const TARGETING_HEATING_LEVEL: &str = "io:TargetHeatingLevelState";
    pub const TEMPERATURE: &str = "core:TemperatureState";
    pub const THERMAL_CONFIGURATION: &str = "core:ThermalConfigurationState";
    pub const VERSION: &str = "core:VersionState";
}

/// Remote command names accepted by the exec endpoint.
pub mod command {
    pub const SET_ABSENCE_COOLING_TARGET_TEMP: &str = "setAbsenceCoolingTargetTemperature";
    pub const SET_ABSENCE_END_DATE_TIME: &str = "setAbsenceEndDateTime";
    pub const SET_ABSENCE_HEATING_TARGET_TEMP: &str = "setAbsenceHeatingTargetTemperature";
    pub const SET_ABSENCE_START_DATE_TIME: &str = "setAbsenceStartDateTime";
    pub const SET_AWAY_MODE: &str = "setHolidays";
    pub const SET_AWAY_MODE_DURATION: &str = "setAwayModeDuration";
    pub const SET_BOOST_MODE_DURATION: &str = "setBoostModeDuration";
    pub const SET_COMFORT_COOLING_TARGET_TEMPERATURE: &str = "setComfortCoolingTargetTemperature";
    pub const SET_COMFORT_HEATING_TARGET_TEMPERATURE: &str = "setComfortHeatingTargetTemperature";
    pub const SET_COMFORT_TARGET_DHW_TEMPERATURE: &str = "setComfortTargetDHWTemperature";
    pub const SET_COMFORT_TEMP: &str = "setComfortTemperature";
    pub const SET_COOLING_ON_OFF: &str = "setCoolingOnOffState";
    pub const SET_CURRENT_OPERATING_MODE: &str = "setCurrentOperatingMode";
    pub const SET_DEROGATED_TARGET_TEMP: &str = "setDerogatedTargetTemperature";
    pub const SET_DEROGATION_ON_OFF: &str = "setDerogationOnOffState";
    pub const SET_DHW_MODE: &str = "setDHWMode";
    pub const SET_ECO_COOLING_TARGET_TEMPERATURE: &str = "setEcoCoolingTargetTemperature";
    pub const SET_ECO_HEATING_TARGET_TEMPERATURE: &str = "setEcoHeatingTargetTemperature";
    pub const SET_ECO_TARGET_DHW_TEMPERATURE: &str = "setEcoTargetDHWTemperature";
    pub const SET_ECO_TEMP: &str = "setEcoTemperature";
    pub const SET_HEATING_LEVEL: &str = "setHeatingLevel";
    pub const SET_HEATING_ON_OFF: &str = "setHeatingOnOffState";
    pub const SET_OPERATING_MODE: &str = "setOperatingMode";
    pub const SET_PASS_APC_COOLING_MODE: &str = "setPassAPCCoolingMode";
    pub const SET_PASS_APC_DHW_MODE: &str = "setPassAPCDHWMode";
    pub const SET_PASS_APC_HEATING_MODE: &str = "setPassAPCHeatingMode";
    pub const SET_PASS_APC_OPERATING_MODE: &str = "setPassAPCOperatingMode";
    pub const SET_TARGET_TEMP: &str = "setTargetTemperature";

    pub const REFRESH_ABSENCE_SCHEDULING_AVAILABILITY: &str = "refreshAbsenceSchedulingAvailability";
    pub const REFRESH_AWAY_MODE_DURATION: &str = "refreshAwayModeDuration";
    pub const REFRESH_BOOST_MODE_DURATION: &str = "refreshBoostModeDuration";
    pub const REFRESH_COMFORT_COOLING_TARGET_TEMPERATURE: &str = "refreshComfortCoolingTargetTemperature";
    pub const REFRESH_COMFORT_HEATING_TARGET_TEMPERATURE: &str = "refreshComfortHeatingTargetTemperature";
    pub const REFRESH_COMFORT_TARGET_DHW_TEMPERATURE: &str = "refreshComfortTargetDHWTemperature";
    pub const REFRESH_COMFORT_TEMPERATURE: &str = "refreshComfortTemperature";
    pub const REFRESH_DHW_MODE: &str = "refreshDHWMode";
    pub const REFRESH_ECO_COOLING_TARGET_TEMPERATURE: &str = "refreshEcoCoolingTargetTemperature";
    pub const REFRESH_ECO_HEATING_TARGET_TEMPERATURE: &str = "refreshEcoHeatingTargetTemperature";
    pub const REFRESH_ECO_TARGET_DHW_TEMPERATURE: &str = "refreshEcoTargetDHWTemperature";
    pub const REFRESH_ECO_TEMPERATURE: &str = "refreshEcoTemperature";
    pub const REFRESH_LOWERING_TEMP_PROG: &str = "refreshSetpointLoweringTemperatureInProgMode";
    pub const REFRESH_OPERATING_MODE: &str = "refreshOperatingMode";
    pub const REFRESH_OPERATION_MODE: &str = "refreshOperationMode";
    pub const REFRESH_PASS_APC_COOLING_MODE: &str = "refreshPassAPCCoolingMode";
    pub const REFRESH_PASS_APC_DHW_MODE: &str = "refreshPassAPCDHWMode";
    pub const REFRESH_PASS_APC_HEATING_MODE: &str = "refreshPassAPCHeatingMode";
    pub const REFRESH_TARGET_TEMPERATURE: &str = "refreshTargetTemperature";
}

/// Mode vocabulary used as state values and command parameters.
pub mod mode {
    pub const ABSENCE: &str = "absence";
    pub const COMFORT: &str = "comfort";
    pub const INTERNAL: &str = "internal";
    pub const OFF: &str = "off";
    pub const ON: &str = "on";
    pub const STANDBY: &str = "standby";
    pub const STOP: &str = "stop";
}
