//! Plugin lifecycle hooks
//!
//! Build plugins implement [`CompilerPlugin`] and register with a
//! [`Program`](crate::program::Program). The build driver fires
//! `before_build_program` once per build, then `before_prepare_file`
//! exactly once per file, serially and in file insertion order. All
//! hooks default to no-ops so plugins implement only what they need.

use crate::editor::Editor;
use crate::program::{BuildOptions, File, Scope};

/// Fired once at build start, after options are finalized.
pub struct BeforeBuildProgramEvent<'a> {
    pub options: &'a BuildOptions,
}

/// Fired once per file, before the file is serialized.
pub struct PrepareFileEvent<'a> {
    /// The file being prepared; plugins may mutate its tree
    pub file: &'a mut File,
    /// The scope the file belongs to
    pub scope: &'a Scope,
    /// Splice facility for statement-list edits
    pub editor: &'a mut Editor,
}

/// A build plugin. Hooks are optional; `name` identifies the plugin
/// in logs.
pub trait CompilerPlugin {
    fn name(&self) -> &str;

    fn before_build_program(&mut self, _event: &BeforeBuildProgramEvent<'_>) {}

    fn before_prepare_file(&mut self, _event: &mut PrepareFileEvent<'_>) {}
}
