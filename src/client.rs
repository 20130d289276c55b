//! Blocking HTTP client for the Cozytouch enduser API.
//!
//! - Uses `ureq` (no async); the agent's cookie store carries the session
//!   established by the form login.
//! - Every call retries exactly once on HTTP 401 after re-login; no other
//!   retry or backoff lives in this crate.
//! - The device-list fetch is throttled: a single-slot cache with a TTL
//!   serves callers inside the window, and an exclusive-fetch guard serves
//!   the stale copy rather than starting a second fetch.

use serde::de::DeserializeOwned;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Instant;

use crate::command::CommandBatch;
use crate::config::Config;
use crate::constants::USER_AGENT;
use crate::error::CozytouchError;
use crate::models::setup::{RawDevice, RawSetup, RawState};
use crate::setup::Setup;

/// The operations the device graph consumes from the HTTP collaborator.
/// Devices hold this behind `Rc<dyn CozytouchApi>`; tests substitute a stub.
pub trait CozytouchApi {
    /// Fetch the full setup snapshot (places tree, gateways, devices).
    fn get_setup_document(&self) -> Result<RawSetup, CozytouchError>;
    /// Fetch the current state list of one device.
    fn get_device_states(&self, device_url: &str) -> Result<Vec<RawState>, CozytouchError>;
    /// Submit a command batch; returns the remote execution id.
    fn apply_commands(&self, batch: &CommandBatch) -> Result<String, CozytouchError>;
}

struct DeviceListCache {
    fetched_at: Instant,
    devices: Vec<RawDevice>,
}

pub struct CozytouchClient {
    agent: ureq::Agent,
    config: Config,
    devices: RefCell<Option<DeviceListCache>>,
    fetch_in_flight: Cell<bool>,
}

impl CozytouchClient {
    /// Build a client and perform the initial login.
    pub fn new(config: Config) -> Result<CozytouchClient, CozytouchError> {
        let agent = ureq::AgentBuilder::new().user_agent(USER_AGENT).build();
        let client = CozytouchClient {
            agent,
            config,
            devices: RefCell::new(None),
            fetch_in_flight: Cell::new(false),
        };
        client.login()?;
        Ok(client)
    }

    /// Fetch the setup snapshot and assemble the device graph, handing each
    /// device a handle back to this client for command submission.
    pub fn get_setup(self: &Rc<Self>) -> Result<Setup, CozytouchError> {
        let raw = self.get_setup_document()?;
        Setup::build(raw, Some(Rc::clone(self) as Rc<dyn CozytouchApi>))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    fn login(&self) -> Result<(), CozytouchError> {
        log::debug!("POST login");
        let resp = self
            .agent
            .post(&self.url("login"))
            .set("Accept", "application/json")
            .send_form(&[
                ("userId", self.config.username.as_str()),
                ("userPassword", self.config.password.as_str()),
            ]);

        #[derive(serde::Deserialize)]
        struct LoginResponse {
            #[serde(default)]
            success: bool,
        }

        match resp {
            Ok(res) => {
                let body: LoginResponse = decode(res)?;
                if body.success {
                    Ok(())
                } else {
                    Err(CozytouchError::Auth("login rejected".to_string()))
                }
            }
            Err(ureq::Error::Status(status, res)) => Err(auth_flavored(classify_status(status, read_body(res)))),
            Err(ureq::Error::Transport(t)) => Err(CozytouchError::Transport(t.to_string())),
        }
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CozytouchError> {
        log::debug!("GET {}", path);
        let request = || self.agent.get(&self.url(path)).set("Accept", "application/json").call();
        match request() {
            Ok(res) => decode(res),
            Err(ureq::Error::Status(401, _)) => {
                self.login()?;
                match request() {
                    Ok(res) => decode(res),
                    Err(e) => Err(map_error(e)),
                }
            }
            Err(e) => Err(map_error(e)),
        }
    }

    fn post_json<T: DeserializeOwned>(&self, path: &str, payload: &serde_json::Value) -> Result<T, CozytouchError> {
        log::debug!("POST {}", path);
        let request = || {
            self.agent
                .post(&self.url(path))
                .set("Accept", "application/json")
                .send_json(payload.clone())
        };
        match request() {
            Ok(res) => decode(res),
            Err(ureq::Error::Status(401, _)) => {
                self.login()?;
                match request() {
                    Ok(res) => decode(res),
                    Err(e) => Err(map_error(e)),
                }
            }
            Err(e) => Err(map_error(e)),
        }
    }

    /// Current device list, served from the single-slot cache while inside
    /// the throttle window. At most one fetch is in flight at a time; a
    /// re-entrant caller gets the stale copy instead of a second fetch.
    fn devices_snapshot(&self) -> Result<Vec<RawDevice>, CozytouchError> {
        if let Some(cache) = self.devices.borrow().as_ref()
            && cache.fetched_at.elapsed() < self.config.throttle
        {
            return Ok(cache.devices.clone());
        }

        if self.fetch_in_flight.replace(true) {
            if let Some(cache) = self.devices.borrow().as_ref() {
                return Ok(cache.devices.clone());
            }
            return Err(CozytouchError::Transport("device list fetch already in flight".to_string()));
        }
        let result: Result<Vec<RawDevice>, CozytouchError> = self.get_json("setup/devices");
        self.fetch_in_flight.set(false);

        let devices = result?;
        *self.devices.borrow_mut() = Some(DeviceListCache {
            fetched_at: Instant::now(),
            devices: devices.clone(),
        });
        Ok(devices)
    }
}

impl CozytouchApi for CozytouchClient {
    fn get_setup_document(&self) -> Result<RawSetup, CozytouchError> {
        self.get_json("setup")
    }

    fn get_device_states(&self, device_url: &str) -> Result<Vec<RawState>, CozytouchError> {
        let devices = self.devices_snapshot()?;
        devices
            .into_iter()
            .find(|d| d.device_url == device_url)
            .map(|d| d.states)
            .ok_or_else(|| CozytouchError::DeviceNotFound(device_url.to_string()))
    }

    fn apply_commands(&self, batch: &CommandBatch) -> Result<String, CozytouchError> {
        #[derive(serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct ExecResponse {
            exec_id: String,
        }
        let payload = serde_json::to_value(batch)?;
        let response: ExecResponse = self.post_json("exec/apply", &payload)?;
        Ok(response.exec_id)
    }
}

fn decode<T: DeserializeOwned>(res: ureq::Response) -> Result<T, CozytouchError> {
    let mut de = serde_json::Deserializer::from_reader(res.into_reader());
    serde_path_to_error::deserialize(&mut de).map_err(|e| CozytouchError::Decode {
        path: e.path().to_string(),
        message: e.into_inner().to_string(),
    })
}

fn read_body(res: ureq::Response) -> String {
    res.into_string().unwrap_or_else(|_| String::from("<no body>"))
}

fn map_error(e: ureq::Error) -> CozytouchError {
    match e {
        ureq::Error::Status(status, res) => classify_status(status, read_body(res)),
        ureq::Error::Transport(t) => CozytouchError::Transport(t.to_string()),
    }
}

/// Map an HTTP error response to the taxonomy. Overkiz error bodies carry
/// `{"errorCode": ..., "error": ...}`; authentication flavored messages
/// become `Auth`, everything else stays an opaque `Http`.
fn classify_status(status: u16, body: String) -> CozytouchError {
    #[derive(serde::Deserialize)]
    struct ApiErrorBody {
        #[serde(default)]
        error: Option<String>,
    }

    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or(body);

    let auth_flavored = message.contains("Bad credentials")
        || message.contains("Not authenticated")
        || message.contains("Too many requests");
    if auth_flavored {
        CozytouchError::Auth(message)
    } else {
        CozytouchError::Http { status, message }
    }
}

/// Login failures are auth errors whatever their shape.
fn auth_flavored(error: CozytouchError) -> CozytouchError {
    match error {
        CozytouchError::Http { status, message } => CozytouchError::Auth(format!("http {}: {}", status, message)),
        other => other,
    }
}
