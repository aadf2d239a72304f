//! Argument merger
//!
//! Combines the statically configured arguments with arguments
//! sourced from the configured environment variable. Every failure
//! path degrades to the static arguments alone and reports through
//! the logging channel; nothing in here can fail the build.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, error};

use crate::config::MainArgsConfig;
use crate::env::{load_env_file, EnvProvider};
use crate::LOG_PREFIX;

/// Produce the final argument map for one rewrite.
///
/// With `use_env` off this is just the static args. With it on, the
/// dotenv file is loaded best-effort, the environment variable is
/// parsed as a JSON object, and environment keys win over static keys
/// on collision. A missing variable or a non-object value drops the
/// environment contribution entirely, never individual keys.
pub fn merge_args(
    config: &MainArgsConfig,
    env: &dyn EnvProvider,
) -> serde_json::Map<String, Value> {
    let static_args = config.args.clone();
    if !config.use_env {
        debug!("{} not loading environment variable", LOG_PREFIX);
        return static_args;
    }

    let file_loaded = match load_env_file(Path::new(&config.env_file_path), env) {
        Ok(count) => {
            debug!(
                "{} loaded {} entries from env file: {}",
                LOG_PREFIX, count, config.env_file_path
            );
            true
        }
        Err(err) => {
            debug!(
                "{} could not load env file {}: {}",
                LOG_PREFIX, config.env_file_path, err
            );
            false
        }
    };

    let raw = match env.get(&config.env_var) {
        Some(raw) => raw,
        None => {
            if file_loaded {
                error!(
                    "{} cannot find environment variable \"{}\" in env file: {}",
                    LOG_PREFIX, config.env_var, config.env_file_path
                );
            } else {
                error!(
                    "{} cannot find environment variable \"{}\"",
                    LOG_PREFIX, config.env_var
                );
            }
            return static_args;
        }
    };

    match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Object(env_args)) => {
            debug!("{} valid env data", LOG_PREFIX);
            let mut merged = static_args;
            for (key, value) in env_args {
                merged.insert(key, value);
            }
            merged
        }
        _ => {
            error!(
                "{} {} should be parsable as a JSON object, but found \"{}\"",
                LOG_PREFIX, config.env_var, raw
            );
            static_args
        }
    }
}
