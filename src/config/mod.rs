//! Configuration module for proto-regen
//!
//! Precedence, highest first:
//! 1. CLI flags
//! 2. Environment variables (PROTO_REGEN_*)
//! 3. Config file (`--config`, else `./proto-regen.toml`)
//! 4. Built-in defaults

mod loader;
mod types;

pub use loader::{
    apply_env_overrides, load_or_default, load_with_warnings, with_env_overrides, ConfigWarning,
    CONFIG_FILE_NAME,
};
pub use types::{CompilerConfig, Config, LayoutConfig, PathsConfig};
