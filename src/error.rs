//! Error types for proto-regen
//!
//! Every failure aborts the run; variants exist so the top-level caller can
//! report what went wrong with the offending path attached.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for proto-regen operations
pub type RegenResult<T> = Result<T, RegenError>;

/// Main error type for proto-regen operations
#[derive(Error, Debug)]
pub enum RegenError {
    /// The source tree does not follow the `<base>/<sentinel>/...` convention
    #[error("no '{sentinel}' directory segment in {path} - sources must live under a '{sentinel}' directory")]
    SentinelNotFound { sentinel: String, path: PathBuf },

    /// A declaration was requested for an empty file group
    #[error("unexpected end of input: empty source group")]
    EmptyGroup,

    /// A source lies outside the work tree, so it has no place under the output root
    #[error("{path} is not inside the work tree {work}")]
    OutsideWorkTree { work: PathBuf, path: PathBuf },

    /// Path segment is not valid UTF-8 and cannot become part of a package identity
    #[error("path is not valid UTF-8: {path}")]
    NonUtf8Path { path: PathBuf },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// IO error on a known path
    #[error("IO error on {path}: {source}")]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory walk failed
    #[error("directory walk failed: {0}")]
    Walk(#[from] ignore::Error),

    /// The schema compiler could not be started
    #[error("failed to start '{program}': {source}")]
    CompilerSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The schema compiler exited unsuccessfully
    #[error("'{program}' failed with exit code: {code:?}")]
    CompilerFailed { program: String, code: Option<i32> },

    /// Compiler reported success but the expected output is absent
    #[error("expected generated file not found: {path}")]
    MissingArtifact { path: PathBuf },

    /// Generated document is not parseable YAML
    #[error("invalid generated document {path}: {source}")]
    InvalidDocument {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// Environment override has an unusable value
    #[error("invalid value '{value}' for {var}: {message}")]
    InvalidEnv {
        var: String,
        value: String,
        message: String,
    },

    /// Configuration file could not be parsed
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },
}

impl RegenError {
    /// Attach a path to an IO error
    pub fn file_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RegenError::FileIo {
            path: path.into(),
            source,
        }
    }
}
