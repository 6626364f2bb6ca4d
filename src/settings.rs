use serde::{Deserialize, Serialize};

/// Partial-execution settings as delivered by the backend's frontend settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialExecutionSettings {
    pub version: i32,
    #[serde(default)]
    pub enforce: bool,
}

impl PartialExecutionSettings {
    /// First version that understands dirtiness.
    pub const DIRTINESS_VERSION: i32 = 2;
}

impl Default for PartialExecutionSettings {
    fn default() -> Self {
        Self {
            version: 1,
            enforce: false,
        }
    }
}

/// Knobs that shape a dirtiness evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirtinessConfig {
    /// When `false`, evaluation returns an empty map without looking at the snapshot.
    pub enabled: bool,
    /// Whether a dirty node marks its executed main-connection successors `upstream-dirty`.
    ///
    /// Sub-node to host propagation always happens.
    pub propagate_downstream: bool,
}

impl Default for DirtinessConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            propagate_downstream: true,
        }
    }
}

impl DirtinessConfig {
    pub fn from_settings(settings: &PartialExecutionSettings) -> Self {
        Self {
            enabled: settings.version >= PartialExecutionSettings::DIRTINESS_VERSION,
            ..Self::default()
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn with_downstream_propagation(mut self, propagate: bool) -> Self {
        self.propagate_downstream = propagate;
        self
    }
}
