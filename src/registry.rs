//! Device type registry: vendor widget tags and their capability classes.
//!
//! Classification is a closed table rather than string dispatch. The order of
//! the table below is the documented priority list (actuator classes before
//! sensor classes); with a closed enum every tag belongs to exactly one
//! class, so the order is informational rather than load-bearing.

use crate::error::CozytouchError;

/// Vendor type tag identifying a device's capability class.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Widget {
    // Actuators
    Pod,
    AdjustableHeater,
    PilotWireHeater,
    WaterHeater,
    ApcHeatPump,
    ApcWaterHeater,
    ApcHeatingZone,
    ApcHeatingCoolingZone,
    ApcBoiler,
    // Sensors
    TemperatureSensor,
    ContactSensor,
    OccupancySensor,
    ElectricitySensor,
    DhwElectricitySensor,
    FossilEnergySensor,
}

impl Widget {
    pub fn parse(tag: &str) -> Result<Widget, CozytouchError> {
        let widget = match tag {
            "Pod" => Widget::Pod,
            "AtlanticElectricalHeaterWithAdjustableTemperatureSetpoint" => Widget::AdjustableHeater,
            "AtlanticElectricalHeater" => Widget::PilotWireHeater,
            "DomesticHotWaterProduction" => Widget::WaterHeater,
            "AtlanticPassAPCHeatPump" => Widget::ApcHeatPump,
            "AtlanticPassAPCDHW" => Widget::ApcWaterHeater,
            "AtlanticPassAPCHeatingZone" => Widget::ApcHeatingZone,
            "AtlanticPassAPCHeatingAndCoolingZone" => Widget::ApcHeatingCoolingZone,
            "AtlanticPassAPCBoiler" => Widget::ApcBoiler,
            "TemperatureSensor" => Widget::TemperatureSensor,
            "ContactSensor" => Widget::ContactSensor,
            "OccupancySensor" => Widget::OccupancySensor,
            "CumulativeElectricPowerConsumptionSensor" => Widget::ElectricitySensor,
            "DHWRelatedElectricalEnergyConsumptionSensor" => Widget::DhwElectricitySensor,
            "CumulativeFossilEnergyConsumptionSensor" => Widget::FossilEnergySensor,
            other => return Err(CozytouchError::UnknownDeviceType(other.to_string())),
        };
        Ok(widget)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Widget::Pod => "Pod",
            Widget::AdjustableHeater => "AtlanticElectricalHeaterWithAdjustableTemperatureSetpoint",
            Widget::PilotWireHeater => "AtlanticElectricalHeater",
            Widget::WaterHeater => "DomesticHotWaterProduction",
            Widget::ApcHeatPump => "AtlanticPassAPCHeatPump",
            Widget::ApcWaterHeater => "AtlanticPassAPCDHW",
            Widget::ApcHeatingZone => "AtlanticPassAPCHeatingZone",
            Widget::ApcHeatingCoolingZone => "AtlanticPassAPCHeatingAndCoolingZone",
            Widget::ApcBoiler => "AtlanticPassAPCBoiler",
            Widget::TemperatureSensor => "TemperatureSensor",
            Widget::ContactSensor => "ContactSensor",
            Widget::OccupancySensor => "OccupancySensor",
            Widget::ElectricitySensor => "CumulativeElectricPowerConsumptionSensor",
            Widget::DhwElectricitySensor => "DHWRelatedElectricalEnergyConsumptionSensor",
            Widget::FossilEnergySensor => "CumulativeFossilEnergyConsumptionSensor",
        }
    }

    /// Capability class of the widget. Total over the closed tag set.
    pub fn class(self) -> DeviceClass {
        match self {
            Widget::AdjustableHeater | Widget::PilotWireHeater | Widget::ApcHeatingZone => DeviceClass::Heater,
            Widget::ApcHeatingCoolingZone => DeviceClass::Climate,
            Widget::WaterHeater | Widget::ApcWaterHeater => DeviceClass::WaterHeater,
            Widget::ApcBoiler => DeviceClass::Boiler,
            Widget::ApcHeatPump => DeviceClass::HeatPump,
            Widget::Pod => DeviceClass::Pod,
            Widget::TemperatureSensor => DeviceClass::Sensor(SensorKind::Temperature),
            Widget::ContactSensor => DeviceClass::Sensor(SensorKind::Contact),
            Widget::OccupancySensor => DeviceClass::Sensor(SensorKind::Occupancy),
            Widget::ElectricitySensor | Widget::DhwElectricitySensor => DeviceClass::Sensor(SensorKind::Electricity),
            Widget::FossilEnergySensor => DeviceClass::Sensor(SensorKind::FossilEnergy),
        }
    }
}

impl core::fmt::Display for Widget {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DeviceClass {
    Heater,
    WaterHeater,
    Climate,
    Boiler,
    HeatPump,
    Pod,
    Sensor(SensorKind),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SensorKind {
    Temperature,
    Contact,
    Occupancy,
    Electricity,
    FossilEnergy,
}

impl SensorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SensorKind::Temperature => "temperature",
            SensorKind::Contact => "contact",
            SensorKind::Occupancy => "occupancy",
            SensorKind::Electricity => "consumption",
            SensorKind::FossilEnergy => "consumption",
        }
    }
}
