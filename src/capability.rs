//! Media capture capability probing.

use crate::error::CapabilityError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Answers whether live user-media capture (camera, microphone) exists in the runtime
pub trait MediaCapability: Send + Sync {
    fn user_media_available(&self) -> Result<bool, CapabilityError>;
}

impl<F> MediaCapability for F
where
    F: Fn() -> Result<bool, CapabilityError> + Send + Sync,
{
    fn user_media_available(&self) -> Result<bool, CapabilityError> {
        self()
    }
}

/// Fixed answer, typically taken from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticCapability(pub bool);

impl MediaCapability for StaticCapability {
    fn user_media_available(&self) -> Result<bool, CapabilityError> {
        Ok(self.0)
    }
}

/// Capability section of the widget configuration
///
/// `user_media = None` models a runtime with no capture API at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_media: Option<bool>,
}

impl CapabilityConfig {
    pub fn provider(&self) -> Option<StaticCapability> {
        self.user_media.map(StaticCapability)
    }
}

/// Collapse a probe into a plain answer. A missing provider or a failed probe
/// both count as "not available".
pub fn probe_user_media(capability: Option<&dyn MediaCapability>) -> bool {
    let Some(capability) = capability else {
        debug!("No media capability provider; capture features fall back to upload");
        return false;
    };
    match capability.user_media_available() {
        Ok(available) => available,
        Err(e) => {
            debug!(error = %e, "Media capability probe failed; treating as unavailable");
            false
        }
    }
}
