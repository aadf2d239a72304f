//! Plugin configuration resolver
//!
//! Extracts this plugin's sub-configuration from the host's finalized
//! build options and normalizes it field by field. Absent or
//! malformed input silently yields defaults; resolution can never
//! fail the build.

use brsc_build::BuildOptions;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key of this plugin's sub-configuration in the host build options.
pub const CONFIG_KEY: &str = "mainArgs";

/// Normalized plugin configuration. Always fully populated after
/// [`resolve`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MainArgsConfig {
    /// Path of the dotenv file to load (default: `./.env`)
    pub env_file_path: String,

    /// Arguments appended to the entry function's args (default: empty)
    pub args: serde_json::Map<String, Value>,

    /// The environment variable to read (default: `MAIN_ARGS`)
    pub env_var: String,

    /// Whether to read the environment variable (default: false)
    pub use_env: bool,
}

impl Default for MainArgsConfig {
    fn default() -> Self {
        Self {
            env_file_path: "./.env".to_string(),
            args: serde_json::Map::new(),
            env_var: "MAIN_ARGS".to_string(),
            use_env: false,
        }
    }
}

/// Resolve the normalized configuration from the host's finalized
/// options. Each field falls back to its default independently, so a
/// single malformed value does not discard the rest.
pub fn resolve(options: &BuildOptions) -> MainArgsConfig {
    let raw = options.plugin_options(CONFIG_KEY);
    let defaults = MainArgsConfig::default();
    MainArgsConfig {
        env_file_path: raw
            .and_then(|v| v.get("envFilePath"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or(defaults.env_file_path),
        args: raw
            .and_then(|v| v.get("args"))
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or(defaults.args),
        env_var: raw
            .and_then(|v| v.get("envVar"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or(defaults.env_var),
        use_env: raw
            .and_then(|v| v.get("useEnv"))
            .and_then(Value::as_bool)
            .unwrap_or(defaults.use_env),
    }
}
