//! Program model and build driver
//!
//! Holds the finalized build options, the set of files grouped into
//! scopes, the registered plugins, and the host diagnostic collection.
//! `build()` runs the prepare/serialize lifecycle: plugin hooks fire
//! serially (once per file), then every script file is transpiled.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ast::Statement;
use crate::editor::Editor;
use crate::plugin::{BeforeBuildProgramEvent, CompilerPlugin, PrepareFileEvent};

/// Name of the primary compilation scope. Files under `source/` land
/// here; everything else is an auxiliary scope.
pub const PRIMARY_SCOPE: &str = "source";

/// Compilation scope a file belongs to, derived from the leading
/// segment of its pkg path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    name: String,
}

impl Scope {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_primary(&self) -> bool {
        self.name == PRIMARY_SCOPE
    }

    fn for_pkg_path(pkg_path: &str) -> Self {
        let leading = pkg_path.split('/').next().unwrap_or(pkg_path);
        Scope::new(leading)
    }
}

/// A parsed script file with a mutable syntax tree.
#[derive(Debug, Clone)]
pub struct ScriptFile {
    pub pkg_path: String,
    pub ast: Vec<Statement>,
}

impl ScriptFile {
    /// Serialize the tree back to source text
    pub fn transpile(&self) -> String {
        let mut out = self
            .ast
            .iter()
            .map(Statement::transpile)
            .collect::<Vec<_>>()
            .join("\n\n");
        out.push('\n');
        out
    }
}

/// A non-script asset carried through the build verbatim.
#[derive(Debug, Clone)]
pub struct AssetFile {
    pub pkg_path: String,
    pub contents: String,
}

/// A file registered with the program.
#[derive(Debug, Clone)]
pub enum File {
    Script(ScriptFile),
    Asset(AssetFile),
}

impl File {
    pub fn pkg_path(&self) -> &str {
        match self {
            File::Script(file) => &file.pkg_path,
            File::Asset(file) => &file.pkg_path,
        }
    }

    pub fn is_script(&self) -> bool {
        matches!(self, File::Script(_))
    }

    pub fn as_script(&self) -> Option<&ScriptFile> {
        match self {
            File::Script(file) => Some(file),
            File::Asset(_) => None,
        }
    }

    pub fn as_script_mut(&mut self) -> Option<&mut ScriptFile> {
        match self {
            File::Script(file) => Some(file),
            File::Asset(_) => None,
        }
    }
}

/// Finalized build options, including per-plugin sub-configuration
/// keyed by plugin identifier.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    plugin_options: serde_json::Map<String, Value>,
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sub-configuration for one plugin
    pub fn set_plugin_options(&mut self, key: impl Into<String>, options: Value) {
        self.plugin_options.insert(key.into(), options);
    }

    /// Sub-configuration for one plugin, if any was supplied
    pub fn plugin_options(&self, key: &str) -> Option<&Value> {
        self.plugin_options.get(key)
    }
}

/// Severity of a host diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Hint,
}

/// A diagnostic collected by the host. Error-severity diagnostics
/// fail the build; plugins that only want to report degrade through
/// the logging channel instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pkg_path: Option<String>,
}

struct ProgramFile {
    scope: Scope,
    file: File,
}

/// The program under compilation.
pub struct Program {
    pub options: BuildOptions,
    files: Vec<ProgramFile>,
    plugins: Vec<Box<dyn CompilerPlugin>>,
    diagnostics: Vec<Diagnostic>,
}

impl Program {
    pub fn new(options: BuildOptions) -> Self {
        Self {
            options,
            files: Vec::new(),
            plugins: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn add_plugin(&mut self, plugin: Box<dyn CompilerPlugin>) {
        self.plugins.push(plugin);
    }

    /// Register a script file. Replaces any file already at `pkg_path`.
    pub fn set_script_file(&mut self, pkg_path: impl Into<String>, ast: Vec<Statement>) {
        let pkg_path = pkg_path.into();
        self.set_file(File::Script(ScriptFile { pkg_path, ast }));
    }

    /// Register a non-script asset. Replaces any file already at `pkg_path`.
    pub fn set_asset_file(&mut self, pkg_path: impl Into<String>, contents: impl Into<String>) {
        let pkg_path = pkg_path.into();
        self.set_file(File::Asset(AssetFile {
            pkg_path,
            contents: contents.into(),
        }));
    }

    fn set_file(&mut self, file: File) {
        let scope = Scope::for_pkg_path(file.pkg_path());
        self.files.retain(|entry| entry.file.pkg_path() != file.pkg_path());
        self.files.push(ProgramFile { scope, file });
    }

    pub fn get_file(&self, pkg_path: &str) -> Option<&File> {
        self.files
            .iter()
            .find(|entry| entry.file.pkg_path() == pkg_path)
            .map(|entry| &entry.file)
    }

    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Run the build lifecycle and return the staging output, keyed by
    /// pkg path: transpiled source for script files, verbatim contents
    /// for assets.
    pub fn build(&mut self) -> BTreeMap<String, String> {
        let mut plugins = std::mem::take(&mut self.plugins);

        for plugin in &mut plugins {
            plugin.before_build_program(&BeforeBuildProgramEvent {
                options: &self.options,
            });
        }

        for entry in &mut self.files {
            let scope = entry.scope.clone();
            let mut editor = Editor::new();
            for plugin in &mut plugins {
                plugin.before_prepare_file(&mut PrepareFileEvent {
                    file: &mut entry.file,
                    scope: &scope,
                    editor: &mut editor,
                });
            }
        }

        self.plugins = plugins;

        self.files
            .iter()
            .map(|entry| match &entry.file {
                File::Script(file) => (file.pkg_path.clone(), file.transpile()),
                File::Asset(file) => (file.pkg_path.clone(), file.contents.clone()),
            })
            .collect()
    }

    /// Run the build lifecycle and also write the staging tree under
    /// `staging_dir`.
    pub fn build_to(&mut self, staging_dir: &Path) -> io::Result<BTreeMap<String, String>> {
        let output = self.build();
        for (pkg_path, contents) in &output {
            let dest = staging_dir.join(pkg_path);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(dest, contents)?;
        }
        Ok(output)
    }
}
