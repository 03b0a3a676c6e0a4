use serde::{Deserialize, Serialize};

/// One entry of the ordered policy chain attached to an api.
///
/// Kept for the legacy policy accessors; new code stores a single JSON
/// descriptor per api instead.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfiguration {
    /// Policy identifier, e.g. `rate-limit`.
    pub policy: String,
    /// Raw JSON configuration of the policy.
    pub configuration: String,
}

impl PolicyConfiguration {
    pub fn new(policy: impl Into<String>, configuration: impl Into<String>) -> Self {
        Self { policy: policy.into(), configuration: configuration.into() }
    }
}
