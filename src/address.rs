//! Device addressing: `scheme://gateway_id/device_id[#entity_id]`.
//!
//! Parsing and reconstruction round-trip exactly: for any well-formed url,
//! `DeviceUrl::parse(s)?.to_string() == s`. Two addresses with equal
//! `device_id` name the same physical unit regardless of scheme or entity id;
//! the setup builder uses this to group sensors under their actuator.

use crate::error::CozytouchError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Scheme {
    Io,
    Internal,
}

impl Scheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Io => "io",
            Scheme::Internal => "internal",
        }
    }

    fn parse(s: &str) -> Option<Scheme> {
        match s {
            "io" => Some(Scheme::Io),
            "internal" => Some(Scheme::Internal),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceUrl {
    pub scheme: Scheme,
    pub gateway_id: String,
    pub device_id: String,
    pub entity_id: Option<String>,
}

impl DeviceUrl {
    pub fn parse(url: &str) -> Result<DeviceUrl, CozytouchError> {
        let scheme_end = url
            .find("://")
            .ok_or_else(|| CozytouchError::Addressing(url.to_string()))?;
        let scheme = Scheme::parse(&url[..scheme_end])
            .ok_or_else(|| CozytouchError::Addressing(url.to_string()))?;

        let rest = url[scheme_end + 3..].replace('#', "/");
        let parts: Vec<&str> = rest.split('/').collect();
        if parts.len() < 2 || parts[0].is_empty() || parts[1].is_empty() {
            return Err(CozytouchError::Addressing(url.to_string()));
        }

        Ok(DeviceUrl {
            scheme,
            gateway_id: parts[0].to_string(),
            device_id: parts[1].to_string(),
            entity_id: parts.get(2).map(|s| s.to_string()),
        })
    }

    /// True when both urls address the same physical unit.
    pub fn same_unit(&self, other: &DeviceUrl) -> bool {
        self.device_id == other.device_id
    }
}

impl core::fmt::Display for DeviceUrl {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}://{}/{}",
            self.scheme.as_str(),
            self.gateway_id,
            self.device_id
        )?;
        if let Some(entity) = &self.entity_id {
            write!(f, "#{}", entity)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_with_entity_id() {
        let url = "io://0812-9894-4518/10071767#1";
        let parsed = DeviceUrl::parse(url).unwrap();
        assert_eq!(parsed.scheme, Scheme::Io);
        assert_eq!(parsed.gateway_id, "0812-9894-4518");
        assert_eq!(parsed.device_id, "10071767");
        assert_eq!(parsed.entity_id.as_deref(), Some("1"));
        assert_eq!(parsed.to_string(), url);
    }

    #[test]
    fn round_trips_without_entity_id() {
        let url = "internal://GW1/pod-0";
        let parsed = DeviceUrl::parse(url).unwrap();
        assert_eq!(parsed.scheme, Scheme::Internal);
        assert!(parsed.entity_id.is_none());
        assert_eq!(parsed.to_string(), url);
    }

    #[test]
    fn rejects_unknown_scheme() {
        assert!(matches!(
            DeviceUrl::parse("bogus://x/y"),
            Err(CozytouchError::Addressing(_))
        ));
    }

    #[test]
    fn rejects_too_few_segments() {
        assert!(matches!(
            DeviceUrl::parse("io://onlyonepart"),
            Err(CozytouchError::Addressing(_))
        ));
    }

    #[test]
    fn rejects_missing_scheme_separator() {
        assert!(DeviceUrl::parse("io:/GW1/DEV1").is_err());
    }

    #[test]
    fn groups_by_device_id_across_entities() {
        let a = DeviceUrl::parse("io://GW1/DEV1#1").unwrap();
        let b = DeviceUrl::parse("io://GW1/DEV1#2").unwrap();
        let c = DeviceUrl::parse("io://GW1/DEV2#1").unwrap();
        assert!(a.same_unit(&b));
        assert!(!a.same_unit(&c));
    }
}
