//! Configuration type definitions

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::compiler::OutputMode;

/// Filesystem locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Tree copied into `work` before scanning
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// When false, `work` is scanned in place and `input` is ignored
    #[serde(default = "default_true")]
    pub copy_input: bool,

    #[serde(default = "default_work")]
    pub work: PathBuf,

    /// Document mode output root; mirrors the layout under `work`
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Stub mode output root, wiped before every run
    #[serde(default = "default_stub_out")]
    pub stub_out: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            copy_input: true,
            work: default_work(),
            output: default_output(),
            stub_out: default_stub_out(),
        }
    }
}

fn default_input() -> PathBuf {
    PathBuf::from("/input")
}

fn default_true() -> bool {
    true
}

fn default_work() -> PathBuf {
    PathBuf::from("/generator")
}

fn default_output() -> PathBuf {
    PathBuf::from("/output")
}

fn default_stub_out() -> PathBuf {
    PathBuf::from("/output/stubs")
}

/// Source tree conventions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_sentinel")]
    pub sentinel: String,

    #[serde(default = "default_vendor")]
    pub vendor: String,

    #[serde(default = "default_extension")]
    pub extension: String,

    #[serde(default = "default_document_extension")]
    pub document_extension: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            sentinel: default_sentinel(),
            vendor: default_vendor(),
            extension: default_extension(),
            document_extension: default_document_extension(),
        }
    }
}

fn default_sentinel() -> String {
    "proto".to_string()
}

fn default_vendor() -> String {
    "vendor".to_string()
}

fn default_extension() -> String {
    "proto".to_string()
}

fn default_document_extension() -> String {
    "yaml".to_string()
}

/// External schema compiler settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompilerConfig {
    #[serde(default = "default_program")]
    pub program: String,

    #[serde(default = "default_system_include")]
    pub system_include: PathBuf,

    #[serde(default = "default_modes")]
    pub modes: Vec<OutputMode>,

    /// Plugins run in stub mode, each as `--<plugin>_out=<stub_out>`
    #[serde(default = "default_stub_plugins")]
    pub stub_plugins: Vec<String>,

    #[serde(default = "default_document_plugin")]
    pub document_plugin: String,

    /// Fixed file name the document plugin writes into its output directory
    #[serde(default = "default_document_file")]
    pub document_file: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            system_include: default_system_include(),
            modes: default_modes(),
            stub_plugins: default_stub_plugins(),
            document_plugin: default_document_plugin(),
            document_file: default_document_file(),
        }
    }
}

fn default_program() -> String {
    "protoc".to_string()
}

fn default_system_include() -> PathBuf {
    PathBuf::from("/usr/local/include")
}

fn default_modes() -> Vec<OutputMode> {
    vec![OutputMode::Document]
}

fn default_stub_plugins() -> Vec<String> {
    vec!["go".to_string(), "go-grpc".to_string()]
}

fn default_document_plugin() -> String {
    "openapi".to_string()
}

fn default_document_file() -> String {
    "openapi.yaml".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub compiler: CompilerConfig,
}

impl Config {
    /// Whether `mode` is among the configured output modes
    pub fn runs(&self, mode: OutputMode) -> bool {
        self.compiler.modes.contains(&mode)
    }
}
