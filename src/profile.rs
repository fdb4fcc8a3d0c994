//! Embedded generation profiles.
//!
//! Each profile is a TOML file compiled into the library. Fields omitted
//! from a profile inherit `GenConfig::default()` via `#[serde(default)]`,
//! so a profile only states what it changes. Lookup is by name; nothing
//! is ever read from disk.

use thiserror::Error;

use crate::generator::{ConfigError, GenConfig};

// Embedded profile TOML data (compiled into the library).
static PROFILES: &[(&str, &str)] = &[
    ("default", include_str!("../profiles/default.toml")),
    ("floats", include_str!("../profiles/floats.toml")),
    ("deep-nesting", include_str!("../profiles/deep-nesting.toml")),
    ("shallow", include_str!("../profiles/shallow.toml")),
];

/// Names of every embedded profile.
pub fn available_profiles() -> Vec<&'static str> {
    PROFILES.iter().map(|(name, _)| *name).collect()
}

/// Look up an embedded profile by name, parse it, and validate it.
pub fn get_profile(name: &str) -> Result<GenConfig, ProfileError> {
    for &(profile_name, toml_str) in PROFILES {
        if profile_name == name {
            let config: GenConfig =
                toml::from_str(toml_str).map_err(|e| ProfileError::Parse {
                    name: profile_name,
                    message: e.to_string(),
                })?;
            config.validate().map_err(|source| ProfileError::Invalid {
                name: profile_name,
                source,
            })?;
            tracing::debug!(profile = profile_name, "resolved profile");
            return Ok(config);
        }
    }
    Err(ProfileError::Unknown(name.to_string()))
}

/// Profile lookup failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    #[error("unknown profile '{0}', available profiles: {known}", known = available_profiles().join(", "))]
    Unknown(String),

    #[error("embedded profile '{name}' is not valid TOML: {message}")]
    Parse {
        name: &'static str,
        message: String,
    },

    #[error("embedded profile '{name}' is invalid: {source}")]
    Invalid {
        name: &'static str,
        #[source]
        source: ConfigError,
    },
}
