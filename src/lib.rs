//! Client-side model of a Cozytouch (Overkiz) smart-home installation.
//!
//! The [`client::CozytouchClient`] logs in and fetches the raw setup
//! document; [`setup::Setup`] assembles it into a typed device graph of
//! places, gateways, actuators and their owned sensors. Actuator operations
//! follow a validate/submit/apply protocol: values are checked against the
//! device's declared definitions, the command batch is submitted to the
//! exec endpoint, and only an acknowledged submission is mirrored into the
//! local state store.

pub mod address;
pub mod client;
pub mod command;
pub mod config;
pub mod constants;
pub mod devices {
    pub mod boiler;
    pub mod climate;
    pub mod device;
    pub mod heat_pump;
    pub mod heater;
    pub mod pod;
    pub mod sensor;
    pub mod water_heater;
}
pub mod error;
pub mod models {
    pub mod setup;
}
pub mod registry;
pub mod setup;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::client::{CozytouchApi, CozytouchClient};
pub use crate::config::Config;
pub use crate::error::CozytouchError;
pub use crate::setup::Setup;
