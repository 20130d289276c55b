//! Gateway pods. Read-only presence devices; they accept no commands.

use crate::error::CozytouchError;
use crate::state::StateStore;

use super::device::{refresh_with_sensors, supported_states, DeviceCore};
use super::sensor::Sensor;

pub struct Pod {
    core: DeviceCore,
    sensors: Vec<Sensor>,
}

impl Pod {
    pub(crate) fn new(core: DeviceCore, sensors: Vec<Sensor>) -> Pod {
        Pod { core, sensors }
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

    pub fn is_on(&self) -> bool {
        self.core.enabled()
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

    pub fn refresh(&mut self) -> Result<(), CozytouchError> {
        refresh_with_sensors(&mut self.core, &mut self.sensors)
    }
}
