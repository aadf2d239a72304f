//! Environment access
//!
//! The process environment is global shared state, so the plugin
//! reads and writes it through the [`EnvProvider`] trait: real builds
//! use [`ProcessEnv`], tests use an in-memory [`MapEnv`] and stay
//! isolated from each other. Dotenv loading follows the usual
//! convention that values already present in the provider win over
//! file values.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use thiserror::Error;

/// Key/value provider abstracting the process environment.
pub trait EnvProvider {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// Provider backed by the real process environment.
#[derive(Debug, Default)]
pub struct ProcessEnv;

impl EnvProvider for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn set(&self, key: &str, value: &str) {
        std::env::set_var(key, value);
    }
}

/// In-memory provider for tests.
#[derive(Debug, Default)]
pub struct MapEnv {
    vars: Mutex<HashMap<String, String>>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EnvProvider for MapEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.lock().unwrap_or_else(|e| e.into_inner()).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.vars
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
    }
}

/// Error reading or parsing a dotenv file.
#[derive(Debug, Error)]
pub enum EnvFileError {
    #[error("env file error: {0}")]
    Dotenv(#[from] dotenvy::Error),
}

/// Load `KEY=VALUE` pairs from the dotenv file at `path` into the
/// provider. Keys the provider already has are left untouched.
/// Returns the number of pairs read from the file.
///
/// Values follow dotenv quoting rules: JSON payloads must be
/// single-quoted (`KEY='{"a":1}'`) to keep their double quotes.
pub fn load_env_file(path: &Path, env: &dyn EnvProvider) -> Result<usize, EnvFileError> {
    let mut loaded = 0;
    for item in dotenvy::from_path_iter(path)? {
        let (key, value) = item?;
        if env.get(&key).is_none() {
            env.set(&key, &value);
        }
        loaded += 1;
    }
    Ok(loaded)
}
