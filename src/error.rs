//! Error taxonomy for graph assembly and the command protocol.
//!
//! Graph-assembly errors are caught per actuator by the setup builder and
//! degrade to omit-and-log; gateway place resolution and command-protocol
//! validation errors propagate to the caller. Transport/auth errors originate
//! in the HTTP client and are never interpreted further up.

#[derive(Debug)]
pub enum CozytouchError {
    /// Malformed device address or unrecognized scheme.
    Addressing(String),
    /// A device or gateway referenced a place id absent from the place tree.
    PlaceNotFound(String),
    /// A device referenced a gateway id absent from the gateway list.
    GatewayNotFound(String),
    /// A device url was not present in the fetched device list.
    DeviceNotFound(String),
    /// Unrecognized widget tag on a device descriptor.
    UnknownDeviceType(String),
    /// The device does not declare the state an operation targets.
    UnsupportedCommand { device: String, state: String },
    /// No client handle attached; mutating operations cannot submit.
    UnboundClient,
    /// A proposed value failed the state's declared definition check.
    Validation(String),
    Transport(String),
    Http { status: u16, message: String },
    Auth(String),
    Json(serde_json::Error),
    /// JSON decode failure with the path that failed to deserialize.
    Decode { path: String, message: String },
}

impl core::fmt::Display for CozytouchError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CozytouchError::Addressing(url) => write!(f, "invalid device url: {}", url),
            CozytouchError::PlaceNotFound(oid) => write!(f, "place {} not found", oid),
            CozytouchError::GatewayNotFound(id) => write!(f, "gateway {} not found", id),
            CozytouchError::DeviceNotFound(url) => write!(f, "device {} not in available devices", url),
            CozytouchError::UnknownDeviceType(widget) => write!(f, "unknown device type: {}", widget),
            CozytouchError::UnsupportedCommand { device, state } => {
                write!(f, "device {} does not support state {}", device, state)
            }
            CozytouchError::UnboundClient => write!(f, "no client attached to device"),
            CozytouchError::Validation(msg) => write!(f, "invalid value: {}", msg),
            CozytouchError::Transport(s) => write!(f, "transport error: {}", s),
            CozytouchError::Http { status, message } => write!(f, "http {}: {}", status, message),
            CozytouchError::Auth(s) => write!(f, "auth error: {}", s),
            CozytouchError::Json(e) => write!(f, "json error: {}", e),
            CozytouchError::Decode { path, message } => write!(f, "decode error at {}: {}", path, message),
        }
    }
}

impl std::error::Error for CozytouchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CozytouchError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CozytouchError {
    fn from(value: serde_json::Error) -> Self {
        CozytouchError::Json(value)
    }
}
