//! Build plugin that injects launch arguments into `main()`
//!
//! Merges a statically configured argument map with arguments sourced
//! from an environment variable (optionally loaded from a dotenv
//! file), then rewrites the program entry function so the merged set
//! is parsed from JSON and appended onto its first parameter at
//! startup. All failure paths degrade to injecting less, reported
//! through the logging channel; nothing here fails a build.

pub mod config;
pub mod env;
pub mod merge;
pub mod plugin;

pub use config::{resolve, MainArgsConfig, CONFIG_KEY};
pub use env::{load_env_file, EnvFileError, EnvProvider, MapEnv, ProcessEnv};
pub use merge::merge_args;
pub use plugin::{MainArgsPlugin, ENTRY_POINT_NAME};

/// Prefix tag carried by every log message this plugin emits.
pub const LOG_PREFIX: &str = "[MainArgsPlugin]";
