//! Device graph assembly from the raw setup document.
//!
//! Build order follows the document's dependency order: the place tree is
//! flattened first, then gateways (whose place must resolve, or the whole
//! build fails), then actuators. A single malformed actuator never aborts
//! the build; it is logged and omitted, and the rest of the graph stands.
//! Sensor descriptors are not devices of their own: each one is attached to
//! the actuator whose address names the same physical unit.

use chrono::{DateTime, Utc};
use std::rc::Rc;

use crate::address::DeviceUrl;
use crate::client::CozytouchApi;
use crate::devices::boiler::Boiler;
use crate::devices::climate::Climate;
use crate::devices::device::DeviceCore;
use crate::devices::heat_pump::HeatPump;
use crate::devices::heater::Heater;
use crate::devices::pod::Pod;
use crate::devices::sensor::Sensor;
use crate::devices::water_heater::WaterHeater;
use crate::error::CozytouchError;
use crate::models::setup::{RawDevice, RawPlace, RawSetup};
use crate::registry::{DeviceClass, Widget};

#[derive(Debug, Clone)]
pub struct Place {
    pub oid: String,
    pub label: String,
    pub creation_time: Option<DateTime<Utc>>,
    pub last_update_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct Gateway {
    pub gateway_id: String,
    pub alive: bool,
    pub protocol_version: String,
    pub connectivity_status: String,
    /// Key into [`Setup::places`].
    pub place_id: String,
}

impl Gateway {
    pub fn status_ok(&self) -> bool {
        self.connectivity_status == "OK"
    }
}

pub struct Setup {
    pub places: Vec<Place>,
    pub gateways: Vec<Gateway>,
    pub heaters: Vec<Heater>,
    pub water_heaters: Vec<WaterHeater>,
    pub climates: Vec<Climate>,
    pub boilers: Vec<Boiler>,
    pub heat_pumps: Vec<HeatPump>,
    pub pods: Vec<Pod>,
}

impl Setup {
    /// Assemble the graph. Devices receive a handle on `client` for command
    /// submission and refresh; without one the graph is read-only.
    pub fn build(raw: RawSetup, client: Option<Rc<dyn CozytouchApi>>) -> Result<Setup, CozytouchError> {
        let mut places = Vec::new();
        flatten_places(raw.root_place, &mut places);

        let mut gateways = Vec::new();
        for gw in raw.gateways {
            let place = places
                .iter()
                .find(|p| p.oid == gw.place_oid)
                .ok_or_else(|| CozytouchError::PlaceNotFound(gw.place_oid.clone()))?;
            let connectivity = gw.connectivity.unwrap_or_default();
            gateways.push(Gateway {
                gateway_id: gw.gateway_id,
                alive: gw.alive,
                protocol_version: connectivity.protocol_version,
                connectivity_status: connectivity.status,
                place_id: place.oid.clone(),
            });
        }

        let (sensor_bucket, actuators): (Vec<RawDevice>, Vec<RawDevice>) = raw
            .devices
            .into_iter()
            .partition(|d| d.device_type == RawDevice::TYPE_SENSOR);

        let mut setup = Setup {
            places,
            gateways,
            heaters: Vec::new(),
            water_heaters: Vec::new(),
            climates: Vec::new(),
            boilers: Vec::new(),
            heat_pumps: Vec::new(),
            pods: Vec::new(),
        };

        for raw_device in actuators {
            let label = raw_device.label.clone();
            let url = raw_device.device_url.clone();
            if let Err(e) = setup.add_actuator(raw_device, &sensor_bucket, &client) {
                log::warn!("skipping device {} ({}): {}", label, url, e);
            }
        }

        Ok(setup)
    }

    fn add_actuator(
        &mut self,
        raw: RawDevice,
        sensor_bucket: &[RawDevice],
        client: &Option<Rc<dyn CozytouchApi>>,
    ) -> Result<(), CozytouchError> {
        let tag = raw.widget_tag().unwrap_or_default();
        let widget = Widget::parse(tag)?;
        let class = widget.class();
        if matches!(class, DeviceClass::Sensor(_)) {
            return Err(CozytouchError::UnknownDeviceType(format!(
                "{} listed as an actuator",
                tag
            )));
        }

        let url = DeviceUrl::parse(&raw.device_url)?;
        if !self.gateways.iter().any(|g| g.gateway_id == url.gateway_id) {
            return Err(CozytouchError::GatewayNotFound(url.gateway_id.clone()));
        }
        let place = self
            .places
            .iter()
            .find(|p| p.oid == raw.place_oid)
            .ok_or_else(|| CozytouchError::PlaceNotFound(raw.place_oid.clone()))?
            .clone();

        let name = match class {
            DeviceClass::Heater | DeviceClass::Climate | DeviceClass::HeatPump => raw.label.clone(),
            _ => format!("{} {}", place.label, widget),
        };

        let sensors = attach_sensors(sensor_bucket, &url, &raw.oid, &name, &place, client);
        let core = DeviceCore::new(raw, widget, url, name, place.oid.clone(), place.label.clone(), client.clone());

        match class {
            DeviceClass::Heater => self.heaters.push(Heater::new(core, sensors)),
            DeviceClass::WaterHeater => self.water_heaters.push(WaterHeater::new(core, sensors)),
            DeviceClass::Climate => self.climates.push(Climate::new(core, sensors)),
            DeviceClass::Boiler => self.boilers.push(Boiler::new(core, sensors)),
            DeviceClass::HeatPump => self.heat_pumps.push(HeatPump::new(core, sensors)),
            DeviceClass::Pod => self.pods.push(Pod::new(core, sensors)),
            DeviceClass::Sensor(_) => unreachable!("rejected above"),
        }
        Ok(())
    }

    pub fn find_place(&self, oid: &str) -> Option<&Place> {
        self.places.iter().find(|p| p.oid == oid)
    }

    pub fn find_gateway(&self, gateway_id: &str) -> Option<&Gateway> {
        self.gateways.iter().find(|g| g.gateway_id == gateway_id)
    }

    /// All sensors across the graph, in actuator order.
    pub fn sensors(&self) -> impl Iterator<Item = &Sensor> {
        self.heaters
            .iter()
            .flat_map(|d| d.sensors())
            .chain(self.water_heaters.iter().flat_map(|d| d.sensors()))
            .chain(self.climates.iter().flat_map(|d| d.sensors()))
            .chain(self.boilers.iter().flat_map(|d| d.sensors()))
            .chain(self.heat_pumps.iter().flat_map(|d| d.sensors()))
            .chain(self.pods.iter().flat_map(|d| d.sensors()))
    }
}

/// Depth-first flattening, parents before their sub-places.
fn flatten_places(place: RawPlace, out: &mut Vec<Place>) {
    out.push(Place {
        oid: place.oid,
        label: place.label,
        creation_time: place.creation_time,
        last_update_time: place.last_update_time,
    });
    for sub in place.sub_places {
        flatten_places(sub, out);
    }
}

/// Construct the sensors owned by one actuator: every descriptor in the
/// sensor bucket whose address names the same physical unit. A sensor that
/// fails to parse degrades the actuator, not the build; a sensor with an
/// actuator widget tag is dropped with a warning.
fn attach_sensors(
    bucket: &[RawDevice],
    actuator_url: &DeviceUrl,
    actuator_oid: &str,
    actuator_name: &str,
    place: &Place,
    client: &Option<Rc<dyn CozytouchApi>>,
) -> Vec<Sensor> {
    let mut sensors = Vec::new();
    for raw in bucket {
        let Ok(url) = DeviceUrl::parse(&raw.device_url) else {
            continue;
        };
        if !url.same_unit(actuator_url) {
            continue;
        }
        let tag = raw.widget_tag().unwrap_or_default();
        let Ok(widget) = Widget::parse(tag) else {
            log::warn!("dropping sensor {} with unknown widget {}", raw.device_url, tag);
            continue;
        };
        let DeviceClass::Sensor(kind) = widget.class() else {
            log::warn!("dropping sensor {} with non-sensor widget {}", raw.device_url, tag);
            continue;
        };
        let name = format!("{} {}", actuator_name, kind.as_str());
        let core = DeviceCore::new(
            raw.clone(),
            widget,
            url,
            name,
            place.oid.clone(),
            place.label.clone(),
            client.clone(),
        );
        sensors.push(Sensor::new(core, kind, actuator_oid.to_string()));
    }
    sensors
}
