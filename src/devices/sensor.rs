//! Sensors owned by an actuator. A sensor never routes commands; it only
//! exposes typed readings and refreshes its own state list.

use crate::constants::state;
use crate::error::CozytouchError;
use crate::registry::SensorKind;
use crate::state::StateStore;

use super::device::DeviceCore;

pub struct Sensor {
    core: DeviceCore,
    kind: SensorKind,
    parent_oid: String,
}

impl Sensor {
    pub(crate) fn new(core: DeviceCore, kind: SensorKind, parent_oid: String) -> Sensor {
        Sensor { core, kind, parent_oid }
    }

    /// Stable id derived from the owning actuator: `<parent-oid>_<kind>`.
    pub fn id(&self) -> String {
        format!("{}_{}", self.parent_oid, self.kind.as_str())
    }

    pub fn name(&self) -> &str {
        self.core.name()
    }

    pub fn kind(&self) -> SensorKind {
        self.kind
    }

    pub fn device_url(&self) -> String {
        self.core.device_url()
    }

    pub fn parent_id(&self) -> &str {
        &self.parent_oid
    }

    pub fn available(&self) -> bool {
        self.core.available()
    }

    pub fn states(&self) -> &StateStore {
        self.core.states()
    }

    /// Current reading of a temperature sensor, degrees Celsius.
    pub fn temperature(&self) -> Option<f64> {
        self.core.states().get_f64(state::TEMPERATURE)
    }

    /// Contact sensor: anything other than "closed" counts as open.
    pub fn is_opened(&self) -> Option<bool> {
        self.core.states().get_str(state::CONTACT).map(|s| s != "closed")
    }

    /// Occupancy sensor.
    pub fn is_occupied(&self) -> Option<bool> {
        self.core.states().get_str(state::OCCUPANCY).map(|s| s == "personInside")
    }

    /// Cumulative electric consumption, watt-hours.
    pub fn consumption(&self) -> Option<i64> {
        self.core.states().get_i64(state::ELECTRIC_ENERGY_CONSUMPTION)
    }

    /// Cumulative fossil energy consumption.
    pub fn fossil_energy_consumption(&self) -> Option<f64> {
        self.core.states().get_f64(state::FOSSIL_ENERGY_CONSUMPTION)
    }

    pub fn refresh(&mut self) -> Result<(), CozytouchError> {
        self.core.refresh()
    }
}
