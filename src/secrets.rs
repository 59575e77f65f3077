//! Read-only secrets looked up by key.
//!
//! Secrets are a flat JSON object of string values. A lookup for an unknown
//! key is an error the caller has to surface.

use log::{debug, warn};
use std::collections::HashMap;

#[derive(Debug, thiserror::Error)]
pub enum SecretsError {
    #[error("Secrets file is malformed: {source}")]
    Malformed {
        #[from]
        source: serde_json::Error,
    },

    #[error("No secret found for key '{key}'")]
    Missing { key: String },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Secrets {
    values: HashMap<String, String>,
}

impl Secrets {
    pub fn from_json(json: &str) -> Result<Self, SecretsError> {
        let values: HashMap<String, String> = serde_json::from_str(json)?;
        debug!("Loaded {} secrets", values.len());
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Result<&str, SecretsError> {
        match self.values.get(key) {
            Some(value) => Ok(value.as_str()),
            None => {
                warn!("Secret '{}' requested but not configured", key);
                Err(SecretsError::Missing {
                    key: key.to_string(),
                })
            }
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
