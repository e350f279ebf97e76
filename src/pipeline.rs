//! Generation pipeline
//!
//! Runs the schema compiler for every declaration and post-processes what it
//! leaves behind:
//!
//! - **document mode**: one compiler run per source file. The plugin writes a
//!   fixed-name document next to the final location; it is renamed to
//!   `<output>/<source relative to work>.<document_extension>` and deleted again when
//!   its `info.title` is missing or empty.
//! - **stub mode**: one compiler run per declaration, writing straight into
//!   the stub output root. That root is wiped once before the first run.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::compiler::{Invocation, OutputMode, SchemaCompiler};
use crate::config::Config;
use crate::declaration::Declaration;
use crate::error::{RegenError, RegenResult};
use crate::fs::{create_if_not_exists, exists, reset_directory};
use crate::paths::document_output_path;

/// Fate of one generated document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentOutcome {
    Kept,
    /// Removed because it has no title
    Dropped,
}

/// Counters for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub declarations: usize,
    pub directives_injected: usize,
    pub documents_kept: usize,
    pub documents_dropped: usize,
    pub stub_invocations: usize,
}

#[derive(Debug, Default, Deserialize)]
struct ApiDocument {
    #[serde(default)]
    info: ApiInfo,
}

#[derive(Debug, Default, Deserialize)]
struct ApiInfo {
    #[serde(default)]
    title: Option<String>,
}

/// Drives the compiler over a set of declarations, one invocation at a time
pub struct GenerationPipeline<'a, C: SchemaCompiler> {
    compiler: &'a C,
    config: &'a Config,
}

impl<'a, C: SchemaCompiler> GenerationPipeline<'a, C> {
    pub fn new(compiler: &'a C, config: &'a Config) -> Self {
        Self { compiler, config }
    }

    /// Generate every configured output for every declaration.
    ///
    /// The first failure aborts the run.
    pub fn run(&self, declarations: &[Declaration]) -> RegenResult<GenerationReport> {
        let mut report = GenerationReport {
            declarations: declarations.len(),
            ..GenerationReport::default()
        };

        let modes: Vec<OutputMode> = [OutputMode::Document, OutputMode::Stub]
            .into_iter()
            .filter(|m| self.config.runs(*m))
            .collect();

        if modes.contains(&OutputMode::Stub) {
            self.prepare_stub_output()?;
        }

        for decl in declarations {
            tracing::info!(
                package = %decl.package_identity,
                files = decl.members().len(),
                "generating"
            );

            for mode in &modes {
                match mode {
                    OutputMode::Document => {
                        for source in decl.members() {
                            match self.generate_document(decl, source)? {
                                DocumentOutcome::Kept => report.documents_kept += 1,
                                DocumentOutcome::Dropped => report.documents_dropped += 1,
                            }
                        }
                    }
                    OutputMode::Stub => {
                        self.generate_stubs(decl)?;
                        report.stub_invocations += 1;
                    }
                }
            }
        }

        Ok(report)
    }

    /// Fail early if any member has no document location.
    ///
    /// Runs before sources are modified, so a bad layout leaves the tree untouched.
    pub fn check_document_outputs(&self, declarations: &[Declaration]) -> RegenResult<()> {
        if !self.config.runs(OutputMode::Document) {
            return Ok(());
        }
        for decl in declarations {
            for source in decl.members() {
                self.document_output_file(source)?;
            }
        }
        Ok(())
    }

    fn document_output_file(&self, source: &Path) -> RegenResult<PathBuf> {
        let paths = &self.config.paths;
        document_output_path(
            source,
            &paths.work,
            &paths.output,
            &self.config.layout.document_extension,
        )
    }

    /// Remove and recreate the stub output root
    pub fn prepare_stub_output(&self) -> RegenResult<()> {
        let stub_out = &self.config.paths.stub_out;
        tracing::info!(dir = %stub_out.display(), "clearing stub output");
        reset_directory(stub_out)
    }

    /// Produce, place and validate the document for one source file
    pub fn generate_document(
        &self,
        decl: &Declaration,
        source: &Path,
    ) -> RegenResult<DocumentOutcome> {
        let compiler = &self.config.compiler;

        let output_file = self.document_output_file(source)?;
        let output_dir = output_file.parent().unwrap_or_else(|| Path::new("."));
        create_if_not_exists(output_dir, 0o755)?;

        let invocation = Invocation::new(&compiler.system_include, &decl.base_folder)
            .output(&compiler.document_plugin, output_dir)
            .sources([source]);
        self.compiler.compile(&invocation)?;

        let generated = output_dir.join(&compiler.document_file);
        relocate(&generated, &output_file)?;

        if remove_without_title(&output_file)? {
            tracing::warn!(
                source = %source.display(),
                "generated document has no title, removed"
            );
            Ok(DocumentOutcome::Dropped)
        } else {
            tracing::debug!(output = %output_file.display(), "document written");
            Ok(DocumentOutcome::Kept)
        }
    }

    /// Run the stub plugins over all members of one declaration
    pub fn generate_stubs(&self, decl: &Declaration) -> RegenResult<()> {
        let compiler = &self.config.compiler;
        let stub_out = &self.config.paths.stub_out;

        let invocation = compiler
            .stub_plugins
            .iter()
            .fold(
                Invocation::new(&compiler.system_include, &decl.base_folder),
                |inv, plugin| inv.output(plugin, stub_out),
            )
            .sources(decl.members());

        self.compiler.compile(&invocation)?;
        tracing::debug!(
            package = %decl.package_identity,
            dir = %stub_out.join(&decl.package_identity).display(),
            "stubs written"
        );
        Ok(())
    }
}

/// Move the compiler's fixed-name output to its final path
pub fn relocate(generated: &Path, output_file: &Path) -> RegenResult<()> {
    if !exists(generated) {
        return Err(RegenError::MissingArtifact {
            path: generated.to_path_buf(),
        });
    }

    if let Some(parent) = output_file.parent() {
        create_if_not_exists(parent, 0o755)?;
    }

    fs::rename(generated, output_file).map_err(|e| RegenError::file_io(generated, e))
}

/// Delete `document` if its `info.title` is missing or empty; returns whether it was deleted.
///
/// A document that is not valid YAML is left in place and reported as an error.
pub fn remove_without_title(document: &Path) -> RegenResult<bool> {
    let content = fs::read_to_string(document).map_err(|e| RegenError::file_io(document, e))?;

    let parsed: ApiDocument = if content.trim().is_empty() {
        ApiDocument::default()
    } else {
        serde_yaml_ng::from_str(&content).map_err(|source| RegenError::InvalidDocument {
            path: document.to_path_buf(),
            source,
        })?
    };

    let has_title = parsed
        .info
        .title
        .as_deref()
        .map(|t| !t.is_empty())
        .unwrap_or(false);

    if has_title {
        return Ok(false);
    }

    fs::remove_file(document).map_err(|e| RegenError::file_io(document, e))?;
    Ok(true)
}
