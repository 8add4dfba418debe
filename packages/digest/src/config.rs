//! Engine configuration

use crate::error::{DigestError, Result};
use crate::hash_type::HashType;
use crate::host::Nid;
use serde::{Deserialize, Serialize};

/// Runtime choices for digest registration
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Algorithm names to register; every compiled-in algorithm when absent
    pub digests: Option<Vec<String>>,

    /// Install the env_logger backend during engine initialization
    pub debug_log: bool,

    /// Key-type identifiers the registered digests may sign with
    pub pkey_nids: Vec<i32>,
}

impl EngineConfig {
    /// Parse a JSON configuration document
    ///
    /// # Errors
    ///
    /// [`DigestError::Config`] for malformed JSON, unknown fields or unknown
    /// algorithm names.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| DigestError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every named algorithm is known
    ///
    /// # Errors
    ///
    /// [`DigestError::Config`] naming the first unknown algorithm.
    pub fn validate(&self) -> Result<()> {
        if let Some(names) = &self.digests {
            if let Some(unknown) = names.iter().find(|name| HashType::from_name(name).is_none()) {
                return Err(DigestError::Config(format!("unknown digest algorithm: {unknown}")));
            }
        }
        Ok(())
    }

    /// Whether `hash_type` should be registered
    #[must_use]
    pub fn wants(&self, hash_type: HashType) -> bool {
        match &self.digests {
            None => true,
            Some(names) => names
                .iter()
                .any(|name| HashType::from_name(name) == Some(hash_type)),
        }
    }

    /// Required key types as host identifiers
    #[must_use]
    pub fn pkey_nids(&self) -> Vec<Nid> {
        self.pkey_nids.iter().copied().map(Nid).collect()
    }
}
