//! In-memory stand-in for the HTTP client, plus device fixtures shared by
//! the behavior tests.

use serde_json::json;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::address::DeviceUrl;
use crate::client::CozytouchApi;
use crate::command::CommandBatch;
use crate::devices::boiler::Boiler;
use crate::devices::climate::Climate;
use crate::devices::device::DeviceCore;
use crate::devices::heat_pump::HeatPump;
use crate::devices::heater::Heater;
use crate::devices::water_heater::WaterHeater;
use crate::error::CozytouchError;
use crate::models::setup::{RawDevice, RawSetup, RawState};
use crate::registry::Widget;

/// Logger init for tests that exercise warn/debug paths; safe to call from
/// every test, only the first call wins.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .is_test(true)
        .try_init();
}

/// Records submitted batches and serves canned state lists. `fail_next`
/// makes the next submission fail with an HTTP error, so tests can check
/// that nothing is applied locally.
pub struct RecordingApi {
    batches: RefCell<Vec<CommandBatch>>,
    fail_next: Cell<bool>,
    states: RefCell<HashMap<String, Vec<RawState>>>,
    state_requests: RefCell<Vec<String>>,
}

impl RecordingApi {
    pub fn new() -> RecordingApi {
        RecordingApi {
            batches: RefCell::new(Vec::new()),
            fail_next: Cell::new(false),
            states: RefCell::new(HashMap::new()),
            state_requests: RefCell::new(Vec::new()),
        }
    }

    pub fn batches(&self) -> Vec<CommandBatch> {
        self.batches.borrow().clone()
    }

    pub fn fail_next(&self) {
        self.fail_next.set(true);
    }

    pub fn put_states(&self, device_url: &str, states: Vec<RawState>) {
        self.states.borrow_mut().insert(device_url.to_string(), states);
    }

    pub fn state_requests(&self) -> Vec<String> {
        self.state_requests.borrow().clone()
    }
}

impl CozytouchApi for RecordingApi {
    fn get_setup_document(&self) -> Result<RawSetup, CozytouchError> {
        Err(CozytouchError::Transport("no setup fixture".to_string()))
    }

    fn get_device_states(&self, device_url: &str) -> Result<Vec<RawState>, CozytouchError> {
        self.state_requests.borrow_mut().push(device_url.to_string());
        self.states
            .borrow()
            .get(device_url)
            .cloned()
            .ok_or_else(|| CozytouchError::DeviceNotFound(device_url.to_string()))
    }

    fn apply_commands(&self, batch: &CommandBatch) -> Result<String, CozytouchError> {
        if self.fail_next.take() {
            return Err(CozytouchError::Http {
                status: 400,
                message: "injected failure".to_string(),
            });
        }
        let mut batches = self.batches.borrow_mut();
        batches.push(batch.clone());
        Ok(format!("exec-{}", batches.len()))
    }
}

fn core_from(raw: serde_json::Value, widget: Widget, api: Option<Rc<RecordingApi>>) -> DeviceCore {
    let raw: RawDevice = serde_json::from_value(raw).unwrap();
    let url = DeviceUrl::parse(&raw.device_url).unwrap();
    let name = raw.label.clone();
    DeviceCore::new(
        raw,
        widget,
        url,
        name,
        "place-bedroom".to_string(),
        "Bedroom".to_string(),
        api.map(|a| a as Rc<dyn CozytouchApi>),
    )
}

/// Adjustable heater with the given comfort/eco setpoints, a declared
/// [7, 28] comfort range and a standby/internal/auto mode list.
pub fn heater_fixture(api: Option<Rc<RecordingApi>>, comfort: f64, eco: f64) -> Heater {
    let core = core_from(
        json!({
            "oid": "dev-heater", "label": "Bedroom heater",
            "deviceURL": "io://0812-9894-4518/10071767#1",
            "widget": "AtlanticElectricalHeaterWithAdjustableTemperatureSetpoint",
            "type": 1, "placeOID": "place-bedroom", "available": true, "enabled": true,
            "states": [
                {"name": "core:OperatingModeState", "type": 3, "value": "internal"},
                {"name": "core:TargetTemperatureState", "type": 2, "value": comfort},
                {"name": "core:ComfortRoomTemperatureState", "type": 2, "value": comfort},
                {"name": "core:EcoRoomTemperatureState", "type": 2, "value": eco},
                {"name": "core:HolidaysModeState", "type": 3, "value": "off"}
            ],
            "definition": {"states": [
                {"qualifiedName": "core:OperatingModeState", "values": ["standby", "internal", "auto"]},
                {"qualifiedName": "core:ComfortRoomTemperatureState", "min": 7.0, "max": 28.0},
                {"qualifiedName": "core:TargetTemperatureState", "min": 7.0, "max": 28.0}
            ]}
        }),
        Widget::AdjustableHeater,
        api,
    );
    Heater::new(core, Vec::new())
}

/// Pilot-wire heater: heating levels only, no away or setpoint states.
pub fn pilot_wire_fixture(api: Option<Rc<RecordingApi>>) -> Heater {
    let core = core_from(
        json!({
            "oid": "dev-pilot", "label": "Hall heater",
            "deviceURL": "io://0812-9894-4518/10071768#1",
            "widget": "AtlanticElectricalHeater",
            "type": 1, "placeOID": "place-bedroom", "available": true, "enabled": true,
            "states": [
                {"name": "io:TargetHeatingLevelState", "type": 3, "value": "eco"}
            ],
            "definition": {"states": [
                {"qualifiedName": "io:TargetHeatingLevelState",
                 "values": ["off", "frostprotection", "eco", "comfort"]}
            ]}
        }),
        Widget::PilotWireHeater,
        api,
    );
    Heater::new(core, Vec::new())
}

/// Standalone DHW tank with an object-valued operating mode (absence on).
pub fn water_heater_fixture(api: Option<Rc<RecordingApi>>) -> WaterHeater {
    let core = core_from(
        json!({
            "oid": "dev-dhw", "label": "Water heater",
            "deviceURL": "io://0812-9894-4518/10071769#1",
            "widget": "DomesticHotWaterProduction",
            "type": 1, "placeOID": "place-bedroom", "available": true, "enabled": true,
            "states": [
                {"name": "io:DHWModeState", "type": 3, "value": "autoMode"},
                {"name": "core:OperatingModeState", "type": 11,
                 "value": {"relaunch": "off", "absence": "on"}},
                {"name": "core:TargetTemperatureState", "type": 2, "value": 55.0},
                {"name": "io:MiddleWaterTemperatureState", "type": 2, "value": 52.5},
                {"name": "io:AwayModeDurationState", "type": 1, "value": 0},
                {"name": "core:BoostModeDurationState", "type": 1, "value": 0}
            ],
            "definition": {"states": [
                {"qualifiedName": "io:DHWModeState",
                 "values": ["autoMode", "manualEcoActive", "manualEcoInactive"]},
                {"qualifiedName": "core:TargetTemperatureState", "min": 50.0, "max": 62.0}
            ]}
        }),
        Widget::WaterHeater,
        api,
    );
    WaterHeater::new(core, Vec::new())
}

/// Heating-and-cooling zone with both mode circuits declared, heating in
/// comfort and cooling stopped.
pub fn climate_fixture(api: Option<Rc<RecordingApi>>) -> Climate {
    let core = core_from(
        json!({
            "oid": "dev-zone", "label": "Living zone",
            "deviceURL": "io://0812-9894-4518/10071770#1",
            "widget": "AtlanticPassAPCHeatingAndCoolingZone",
            "type": 1, "placeOID": "place-bedroom", "available": true, "enabled": true,
            "states": [
                {"name": "io:PassAPCHeatingModeState", "type": 3, "value": "comfort"},
                {"name": "io:PassAPCCoolingModeState", "type": 3, "value": "stop"},
                {"name": "core:HeatingOnOffState", "type": 3, "value": "on"},
                {"name": "core:CoolingOnOffState", "type": 3, "value": "off"},
                {"name": "core:DerogationOnOffState", "type": 3, "value": "off"},
                {"name": "core:TargetTemperatureState", "type": 2, "value": 20.0},
                {"name": "core:ComfortHeatingTargetTemperatureState", "type": 2, "value": 20.0},
                {"name": "core:EcoHeatingTargetTemperatureState", "type": 2, "value": 17.5}
            ],
            "definition": {"states": [
                {"qualifiedName": "io:PassAPCHeatingModeState",
                 "values": ["comfort", "eco", "absence", "stop"]},
                {"qualifiedName": "io:PassAPCCoolingModeState",
                 "values": ["comfort", "eco", "absence", "stop"]},
                {"qualifiedName": "core:TargetTemperatureState", "min": 16.0, "max": 30.0},
                {"qualifiedName": "core:ComfortHeatingTargetTemperatureState", "min": 16.0, "max": 30.0}
            ]}
        }),
        Widget::ApcHeatingCoolingZone,
        api,
    );
    Climate::new(core, Vec::new())
}

/// APC boiler in heating mode with a declared mode list.
pub fn boiler_fixture(api: Option<Rc<RecordingApi>>) -> Boiler {
    let core = core_from(
        json!({
            "oid": "dev-boiler", "label": "Boiler",
            "deviceURL": "io://0812-9894-4518/10071771#1",
            "widget": "AtlanticPassAPCBoiler",
            "type": 1, "placeOID": "place-bedroom", "available": true, "enabled": true,
            "states": [
                {"name": "io:PassAPCOperatingModeState", "type": 3, "value": "heating"},
                {"name": "core:ProductModelNameState", "type": 3, "value": "Naema"}
            ],
            "definition": {"states": [
                {"qualifiedName": "io:PassAPCOperatingModeState",
                 "values": ["heating", "cooling", "drying", "stop"]}
            ]}
        }),
        Widget::ApcBoiler,
        api,
    );
    Boiler::new(core, Vec::new())
}

/// APC heat pump with an empty absence window scheduled.
pub fn heat_pump_fixture(api: Option<Rc<RecordingApi>>) -> HeatPump {
    let core = core_from(
        json!({
            "oid": "dev-pump", "label": "Heat pump",
            "deviceURL": "io://0812-9894-4518/10071772#1",
            "widget": "AtlanticPassAPCHeatPump",
            "type": 1, "placeOID": "place-bedroom", "available": true, "enabled": true,
            "states": [
                {"name": "io:PassAPCOperatingModeState", "type": 3, "value": "heating"},
                {"name": "core:AbsenceStartDateState", "type": 3, "value": ""},
                {"name": "core:AbsenceEndDateState", "type": 3, "value": ""},
                {"name": "core:AbsenceHeatingTargetTemperatureState", "type": 2, "value": 16.0}
            ],
            "definition": {"states": [
                {"qualifiedName": "io:PassAPCOperatingModeState",
                 "values": ["heating", "cooling", "stop"]},
                {"qualifiedName": "core:AbsenceHeatingTargetTemperatureState", "min": 5.0, "max": 20.0}
            ]}
        }),
        Widget::ApcHeatPump,
        api,
    );
    HeatPump::new(core, Vec::new())
}
