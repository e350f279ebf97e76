//! External schema compiler
//!
//! `protoc` is driven as a black box: include paths, output flags and source
//! files go in, generated files or a non-zero exit come out. Its stdout and
//! stderr are inherited so operators see the compiler's own diagnostics.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};

use crate::error::{RegenError, RegenResult};

/// What the compiler is asked to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// One API document per source file
    Document,
    /// Service stubs for a whole package
    Stub,
}

impl OutputMode {
    /// Parse a mode name, ignoring case and surrounding whitespace
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "document" => Some(OutputMode::Document),
            "stub" => Some(OutputMode::Stub),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputMode::Document => "document",
            OutputMode::Stub => "stub",
        }
    }
}

impl std::fmt::Display for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arguments for one compiler run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    includes: Vec<PathBuf>,
    outputs: Vec<(String, PathBuf)>,
    sources: Vec<PathBuf>,
}

impl Invocation {
    /// Start with the system include path and the declaration's base folder.
    ///
    /// An empty base folder is passed as `.`.
    pub fn new(system_include: &Path, base_folder: &Path) -> Self {
        let base = if base_folder.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            base_folder.to_path_buf()
        };

        Self {
            includes: vec![system_include.to_path_buf(), base],
            outputs: Vec::new(),
            sources: Vec::new(),
        }
    }

    /// Add `--<plugin>_out=<dir>`
    pub fn output(mut self, plugin: &str, dir: &Path) -> Self {
        self.outputs.push((plugin.to_string(), dir.to_path_buf()));
        self
    }

    pub fn sources<I, P>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.sources
            .extend(sources.into_iter().map(|p| p.as_ref().to_path_buf()));
        self
    }

    pub fn args(&self) -> Vec<OsString> {
        let mut args = Vec::with_capacity(self.includes.len() + self.outputs.len() + self.sources.len());

        for include in &self.includes {
            let mut arg = OsString::from("-I");
            arg.push(include);
            args.push(arg);
        }

        for (plugin, dir) in &self.outputs {
            let mut arg = OsString::from(format!("--{}_out=", plugin));
            arg.push(dir);
            args.push(arg);
        }

        args.extend(self.sources.iter().map(|s| s.as_os_str().to_os_string()));
        args
    }

    /// Human-readable command line, for logs
    pub fn display_command(&self, program: &str) -> String {
        let mut line = program.to_string();
        for arg in self.args() {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }
}

/// Something that can run a schema compilation
pub trait SchemaCompiler {
    /// Program name for logs and errors
    fn name(&self) -> &str;

    /// Run one compilation; blocks until the compiler exits.
    fn compile(&self, invocation: &Invocation) -> RegenResult<()>;
}

/// `protoc` (or a compatible binary) run as a subprocess
#[derive(Debug, Clone)]
pub struct Protoc {
    program: String,
}

impl Protoc {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl SchemaCompiler for Protoc {
    fn name(&self) -> &str {
        &self.program
    }

    fn compile(&self, invocation: &Invocation) -> RegenResult<()> {
        tracing::debug!(command = %invocation.display_command(&self.program), "running compiler");

        let status = Command::new(&self.program)
            .args(invocation.args())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| RegenError::CompilerSpawn {
                program: self.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(RegenError::CompilerFailed {
                program: self.program.clone(),
                code: status.code(),
            });
        }

        Ok(())
    }
}
