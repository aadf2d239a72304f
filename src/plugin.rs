//! Entry-point rewriter
//!
//! The plugin proper. Resolves its configuration at build start, then
//! for each file in the primary scope locates the entry function and
//! unshifts a statement into its body that parses the merged-argument
//! JSON and appends it onto the function's first parameter.

use brsc_build::{
    escape_double_quotes, BeforeBuildProgramEvent, CompilerPlugin, Expression,
    FunctionParameter, PrepareFileEvent, Statement,
};
use serde_json::Value;
use tracing::{error, info};

use crate::config::{resolve, MainArgsConfig};
use crate::env::{EnvProvider, ProcessEnv};
use crate::merge::merge_args;
use crate::LOG_PREFIX;

/// Reserved entry-point function name, matched case-insensitively.
pub const ENTRY_POINT_NAME: &str = "main";

/// Parameter synthesized when the entry function declares none.
const SYNTHESIZED_PARAM: &str = "args";

/// Build plugin that injects merged launch arguments into the entry
/// function's first parameter.
pub struct MainArgsPlugin {
    config: Option<MainArgsConfig>,
    env: Box<dyn EnvProvider>,
}

impl MainArgsPlugin {
    /// Plugin reading the real process environment
    pub fn new() -> Self {
        Self::with_env_provider(Box::new(ProcessEnv))
    }

    /// Plugin reading an injected provider, so tests never touch the
    /// process environment
    pub fn with_env_provider(env: Box<dyn EnvProvider>) -> Self {
        Self { config: None, env }
    }

    /// Configuration resolved by the current build, if any
    pub fn config(&self) -> Option<&MainArgsConfig> {
        self.config.as_ref()
    }
}

impl Default for MainArgsPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl CompilerPlugin for MainArgsPlugin {
    fn name(&self) -> &str {
        "brsc-plugin-main-args"
    }

    /// Resolve the configuration once per build. Replaces any record
    /// left over from a previous build wholesale.
    fn before_build_program(&mut self, event: &BeforeBuildProgramEvent<'_>) {
        self.config = Some(resolve(event.options));
    }

    /// Rewrite the entry function, if this file has one.
    ///
    /// Each guard is an independent early return: no configuration,
    /// auxiliary scope, non-script file, empty merged arguments, and
    /// no entry function all leave the file untouched.
    fn before_prepare_file(&mut self, event: &mut PrepareFileEvent<'_>) {
        let Some(config) = &self.config else {
            return;
        };
        if !event.scope.is_primary() {
            return;
        }
        let Some(script) = event.file.as_script_mut() else {
            return;
        };
        let args = merge_args(config, self.env.as_ref());
        if args.is_empty() {
            return;
        }
        let Some(main) = script.ast.iter_mut().find_map(|stmt| {
            stmt.as_function_mut()
                .filter(|func| func.name.eq_ignore_ascii_case(ENTRY_POINT_NAME))
        }) else {
            return;
        };

        let json = match serde_json::to_string(&Value::Object(args)) {
            Ok(json) => json,
            Err(err) => {
                error!("{} cannot serialize merged args: {}", LOG_PREFIX, err);
                return;
            }
        };
        info!("{} updating main() args with: {}", LOG_PREFIX, json);

        if main.parameters.is_empty() {
            main.parameters.push(
                FunctionParameter::new(SYNTHESIZED_PARAM)
                    .with_default(Expression::empty_assoc_array()),
            );
        }
        let first_param = main.parameters[0].name.clone();

        let parse_json_call = Expression::call(
            Expression::variable("parseJson"),
            vec![Expression::string_literal(escape_double_quotes(&json))],
        );
        let append_call = Expression::call(
            Expression::dotted_get(Expression::variable(first_param), "append"),
            vec![parse_json_call],
        );
        event
            .editor
            .array_unshift(&mut main.body, Statement::Expression(append_call));
    }
}
