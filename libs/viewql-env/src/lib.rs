// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;
use std::str::FromStr;

/// A source of configuration values keyed by (environment variable) name
pub trait Environment: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// Parse the value as a non-negative integer, falling back to `default_value` if unset
    fn get_usize(&self, key: &str, default_value: usize) -> Result<usize, EnvError> {
        match self.get(key) {
            Some(value) => {
                usize::from_str(value.trim()).map_err(|e| EnvError::InvalidNumber {
                    key: key.to_string(),
                    value,
                    message: e.to_string(),
                })
            }
            None => Ok(default_value),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error("Invalid value for {key}: {value}. Expected a non-negative integer ({message})")]
    InvalidNumber {
        key: String,
        value: String,
        message: String,
    },
}

/// Reads the process environment
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// An in-memory environment
#[derive(Clone, Default)]
pub struct MapEnvironment {
    values: HashMap<String, String>,
}

impl MapEnvironment {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Environment for MapEnvironment {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

impl<const N: usize> From<[(&str, &str); N]> for MapEnvironment {
    fn from(values: [(&str, &str); N]) -> Self {
        Self {
            values: values
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_lookup() {
        let env = MapEnvironment::from([("A", "a")]);

        assert_eq!(env.get("A"), Some("a".to_string()));
        assert_eq!(env.get("B"), None);
        assert_eq!(MapEnvironment::new().get("A"), None);
    }

    #[test]
    fn numbers() {
        let env = MapEnvironment::from([("DEPTH", " 6 "), ("NEGATIVE", "-1"), ("WORD", "four")]);

        assert_eq!(env.get_usize("DEPTH", 4).unwrap(), 6);
        assert_eq!(env.get_usize("MISSING", 4).unwrap(), 4);
        assert!(matches!(
            env.get_usize("NEGATIVE", 4),
            Err(EnvError::InvalidNumber { .. })
        ));
        assert!(matches!(
            env.get_usize("WORD", 4),
            Err(EnvError::InvalidNumber { .. })
        ));
    }
}
