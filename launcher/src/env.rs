//! Snapshot of the environment variables that influence option defaults.

use std::collections::BTreeMap;

/// Port to bind when `-p` is not given.
pub const PORT: &str = "PORT";
/// Host to bind when `-b` is not given.
pub const HOST: &str = "HOST";
/// Application environment name, checked before [`RACK_ENV`].
pub const APP_ENV: &str = "APP_ENV";
pub const RACK_ENV: &str = "RACK_ENV";

const TRACKED: [&str; 4] = [PORT, HOST, APP_ENV, RACK_ENV];

/// Captured environment variables.
///
/// Resolution reads from this snapshot rather than the live process
/// environment so that it stays deterministic under test. Empty values are
/// treated as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvVars {
    vars: BTreeMap<String, String>,
}

impl EnvVars {
    /// Capture the tracked variables from the current process.
    pub fn from_process() -> Self {
        let vars = TRACKED
            .iter()
            .filter_map(|name| {
                std::env::var(name)
                    .ok()
                    .map(|value| (name.to_string(), value))
            })
            .collect();
        Self { vars }
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}
