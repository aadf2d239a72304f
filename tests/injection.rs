//! End-to-end injection tests
//!
//! Builds small programs through the host driver and asserts on the
//! transpiled output, the way the plugin behaves in a real build.

use std::fs;

use brsc_build::{BuildOptions, FunctionParameter, FunctionStatement, Program, Statement};
use brsc_plugin_main_args::{MainArgsPlugin, MapEnv, CONFIG_KEY};
use serde_json::json;
use tempfile::TempDir;

/// Write `MAIN_ARGS='<json>'` into a `.env` file under `dir`. The
/// payload is single-quoted so the dotenv parser keeps the embedded
/// double quotes intact.
fn write_env_file(dir: &TempDir, data: serde_json::Value) -> String {
    write_raw_env_file(dir, &format!("MAIN_ARGS='{}'", data))
}

fn write_raw_env_file(dir: &TempDir, line: &str) -> String {
    let path = dir.path().join(".env");
    fs::write(&path, format!("{}\n", line)).unwrap();
    path.to_string_lossy().to_string()
}

/// Program with the plugin registered against an isolated environment
fn program_with(config: serde_json::Value) -> Program {
    let mut options = BuildOptions::new();
    options.set_plugin_options(CONFIG_KEY, config);
    let mut program = Program::new(options);
    program.add_plugin(Box::new(MainArgsPlugin::with_env_provider(Box::new(
        MapEnv::new(),
    ))));
    program
}

fn empty_main() -> Vec<Statement> {
    vec![Statement::Function(FunctionStatement::sub("main"))]
}

// =============================================================================
// Injection sources: env file, static config, both merged
// =============================================================================

#[test]
fn test_includes_args_from_env() {
    let dir = TempDir::new().unwrap();
    let env_path = write_env_file(&dir, json!({ "arg": "value" }));
    let mut program = program_with(json!({ "useEnv": true, "envFilePath": env_path }));
    program.set_script_file("source/main.brs", empty_main());

    let output = program.build();

    assert!(program.diagnostics().is_empty());
    assert!(output["source/main.brs"]
        .contains("args.append(parseJson(\"{\"\"arg\"\":\"\"value\"\"}\"))"));
}

#[test]
fn test_includes_args_from_build_options() {
    let mut program = program_with(json!({ "useEnv": false, "args": { "test": 123 } }));
    program.set_script_file("source/main.brs", empty_main());

    let output = program.build();

    assert!(output["source/main.brs"].contains("args.append(parseJson(\"{\"\"test\"\":123}\"))"));
}

#[test]
fn test_includes_merged_args_from_options_and_env() {
    let dir = TempDir::new().unwrap();
    let env_path = write_env_file(&dir, json!({ "arg": "value" }));
    let mut program = program_with(json!({
        "useEnv": true,
        "envFilePath": env_path,
        "args": { "test": 123 }
    }));
    program.set_script_file("source/main.brs", empty_main());

    let output = program.build();

    assert!(program.diagnostics().is_empty());
    assert!(output["source/main.brs"]
        .contains("args.append(parseJson(\"{\"\"test\"\":123,\"\"arg\"\":\"\"value\"\"}\"))"));
}

#[test]
fn test_env_overrides_static_on_collision() {
    let dir = TempDir::new().unwrap();
    let env_path = write_env_file(&dir, json!({ "test": "env-wins" }));
    let mut program = program_with(json!({
        "useEnv": true,
        "envFilePath": env_path,
        "args": { "test": 123 }
    }));
    program.set_script_file("source/main.brs", empty_main());

    let output = program.build();

    assert!(output["source/main.brs"]
        .contains("args.append(parseJson(\"{\"\"test\"\":\"\"env-wins\"\"}\"))"));
}

// =============================================================================
// Entry function shapes
// =============================================================================

#[test]
fn test_updates_existing_parameter() {
    let dir = TempDir::new().unwrap();
    let env_path = write_env_file(&dir, json!({ "arg": "value" }));
    let mut program = program_with(json!({
        "useEnv": true,
        "envFilePath": env_path,
        "args": { "test": 123 }
    }));
    program.set_script_file(
        "source/main.brs",
        vec![Statement::Function(
            FunctionStatement::sub("main")
                .with_parameter(FunctionParameter::new("myArg").with_type("object")),
        )],
    );

    let output = program.build();

    assert!(program.diagnostics().is_empty());
    assert!(output["source/main.brs"]
        .contains("myArg.append(parseJson(\"{\"\"test\"\":123,\"\"arg\"\":\"\"value\"\"}\"))"));
}

#[test]
fn test_synthesized_parameter_renders_with_default() {
    let mut program = program_with(json!({ "args": { "test": 123 } }));
    program.set_script_file("source/main.brs", empty_main());

    let output = program.build();

    assert!(output["source/main.brs"].starts_with("sub main(args = {})"));
}

// =============================================================================
// Degraded and skipped paths
// =============================================================================

#[test]
fn test_empty_args_leaves_output_unmodified() {
    let mut program = program_with(json!({}));
    program.set_script_file("source/main.brs", empty_main());

    let output = program.build();

    assert_eq!(output["source/main.brs"], "sub main()\nend sub\n");
}

#[test]
fn test_malformed_env_value_still_injects_static_args() {
    let dir = TempDir::new().unwrap();
    let env_path = write_raw_env_file(&dir, "MAIN_ARGS=not-json");
    let mut program = program_with(json!({
        "useEnv": true,
        "envFilePath": env_path,
        "args": { "test": 123 }
    }));
    program.set_script_file("source/main.brs", empty_main());

    let output = program.build();

    assert!(program.diagnostics().is_empty());
    assert!(output["source/main.brs"].contains("args.append(parseJson(\"{\"\"test\"\":123}\"))"));
}

#[test]
fn test_auxiliary_scope_files_untouched() {
    let mut program = program_with(json!({ "args": { "test": 123 } }));
    program.set_script_file("components/widget.brs", empty_main());

    let output = program.build();

    assert_eq!(output["components/widget.brs"], "sub main()\nend sub\n");
}

#[test]
fn test_asset_files_untouched() {
    let mut program = program_with(json!({ "args": { "test": 123 } }));
    program.set_asset_file("source/notes.txt", "plain contents");

    let output = program.build();

    assert_eq!(output["source/notes.txt"], "plain contents");
}

// =============================================================================
// Staging output
// =============================================================================

#[test]
fn test_build_to_writes_staging_tree() {
    let staging = TempDir::new().unwrap();
    let mut program = program_with(json!({ "args": { "test": 123 } }));
    program.set_script_file("source/main.brs", empty_main());

    program.build_to(staging.path()).unwrap();

    let main_source = fs::read_to_string(staging.path().join("source/main.brs")).unwrap();
    assert!(main_source.contains("args.append(parseJson(\"{\"\"test\"\":123}\"))"));
}
