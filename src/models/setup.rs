//! Serde models for the raw setup document fetched from the gateway.
//!
//! Scope: wire types only, no behavior. Field coverage follows what the
//! graph builder consumes; unknown fields are ignored. Timestamps are epoch
//! milliseconds on the wire and surface as `chrono::DateTime<Utc>`.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSetup {
    pub root_place: RawPlace,
    #[serde(default)]
    pub gateways: Vec<RawGateway>,
    #[serde(default)]
    pub devices: Vec<RawDevice>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlace {
    pub oid: String,
    pub label: String,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub last_update_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sub_places: Vec<RawPlace>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGateway {
    pub gateway_id: String,
    #[serde(default)]
    pub alive: bool,
    #[serde(rename = "placeOID")]
    pub place_oid: String,
    #[serde(default)]
    pub connectivity: Option<RawConnectivity>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConnectivity {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub protocol_version: String,
}

/// Raw device descriptor. `device_type` is the sensor/actuator discriminator
/// (2 = sensor); partitioning uses it, not the widget string.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDevice {
    pub oid: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "deviceURL")]
    pub device_url: String,
    #[serde(default)]
    pub widget: Option<String>,
    #[serde(default)]
    pub ui_class: Option<String>,
    #[serde(rename = "type", default)]
    pub device_type: i64,
    #[serde(rename = "placeOID", default)]
    pub place_oid: String,
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub states: Vec<RawState>,
    #[serde(default)]
    pub definition: Option<RawDefinition>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub last_update_time: Option<DateTime<Utc>>,
}

impl RawDevice {
    pub const TYPE_SENSOR: i64 = 2;

    /// The widget tag used for classification, falling back to the ui class
    /// when the widget field is absent.
    pub fn widget_tag(&self) -> Option<&str> {
        self.widget.as_deref().or(self.ui_class.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawState {
    pub name: String,
    #[serde(rename = "type", default)]
    pub value_type: i64,
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDefinition {
    #[serde(default)]
    pub states: Vec<RawStateDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStateDefinition {
    pub qualified_name: String,
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}
