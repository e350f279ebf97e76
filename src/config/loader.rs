//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::compiler::OutputMode;
use crate::error::{RegenError, RegenResult};

use super::types::Config;

/// File looked up in the working directory when no `--config` is given
pub const CONFIG_FILE_NAME: &str = "proto-regen.toml";

/// Key in the config file that no section recognises
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// Dotted path, e.g. `layout.sentinal`
    pub key: String,
    pub file: PathBuf,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())
    }
}

/// Parse `path`, collecting unknown keys as warnings instead of failing.
pub fn load_with_warnings(path: &Path) -> RegenResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| RegenError::file_io(path, e))?;

    let mut warnings = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |key| {
        warnings.push(ConfigWarning {
            key: key.to_string(),
            file: path.to_path_buf(),
        });
    })
    .map_err(|e| RegenError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok((config, warnings))
}

/// Load the explicit config file, else `<cwd>/proto-regen.toml`, else defaults.
///
/// An explicit path must exist; the implicit one is optional.
pub fn load_or_default(
    explicit: Option<&Path>,
    cwd: &Path,
) -> RegenResult<(Config, Vec<ConfigWarning>)> {
    if let Some(path) = explicit {
        return load_with_warnings(path);
    }

    let implicit = cwd.join(CONFIG_FILE_NAME);
    if implicit.is_file() {
        return load_with_warnings(&implicit);
    }

    Ok((Config::default(), Vec::new()))
}

/// Apply environment variable overrides (PROTO_REGEN_* prefix)
pub fn with_env_overrides(config: Config) -> RegenResult<Config> {
    apply_env_overrides(config, |key| std::env::var(key).ok())
}

/// Apply overrides from an arbitrary variable source
pub fn apply_env_overrides<F>(mut config: Config, var: F) -> RegenResult<Config>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(work) = var("PROTO_REGEN_WORK") {
        config.paths.work = PathBuf::from(work);
    }

    if let Some(input) = var("PROTO_REGEN_INPUT") {
        config.paths.input = PathBuf::from(input);
    }

    if let Some(output) = var("PROTO_REGEN_OUTPUT") {
        config.paths.output = PathBuf::from(output);
    }

    if let Some(val) = var("PROTO_REGEN_COPY_INPUT") {
        config.paths.copy_input = val.to_lowercase() != "false" && val != "0";
    }

    // PROTO_REGEN_MODES (comma-separated); one bad entry rejects the whole value
    if let Some(modes) = var("PROTO_REGEN_MODES") {
        config.compiler.modes = parse_modes("PROTO_REGEN_MODES", &modes)?;
    }

    if let Some(program) = var("PROTO_REGEN_PROTOC") {
        config.compiler.program = program;
    }

    Ok(config)
}

fn parse_modes(var: &str, value: &str) -> RegenResult<Vec<OutputMode>> {
    let invalid = |message: String| RegenError::InvalidEnv {
        var: var.to_string(),
        value: value.to_string(),
        message,
    };

    if value.trim().is_empty() {
        return Err(invalid("no output modes given".to_string()));
    }

    value
        .split(',')
        .map(|item| {
            OutputMode::parse(item).ok_or_else(|| {
                invalid(format!(
                    "unknown output mode '{}' (expected 'document' or 'stub')",
                    item.trim()
                ))
            })
        })
        .collect()
}
