//! Minimal build pipeline host for a BrightScript-style scripting
//! language.
//!
//! Provides the surfaces build plugins compile against: syntax-tree
//! nodes with source rendering, a statement-splicing editor, the
//! program/scope/file model with a host diagnostic collection, and
//! the plugin lifecycle trait fired by the build driver.

pub mod ast;
pub mod editor;
pub mod plugin;
pub mod program;

pub use ast::{
    escape_double_quotes, Expression, FunctionKind, FunctionParameter, FunctionStatement,
    Statement,
};
pub use editor::Editor;
pub use plugin::{BeforeBuildProgramEvent, CompilerPlugin, PrepareFileEvent};
pub use program::{
    AssetFile, BuildOptions, Diagnostic, File, Program, ScriptFile, Scope, Severity,
    PRIMARY_SCOPE,
};
