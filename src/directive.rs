//! `option go_package` injection
//!
//! Each source gets exactly one `option go_package` line. Files that already
//! mention the option are left byte-for-byte untouched.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::declaration::Declaration;
use crate::error::{RegenError, RegenResult};

/// Substring that marks a file as already carrying the directive
pub const DIRECTIVE_MARKER: &str = "option go_package";

/// What happened to one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectOutcome {
    Injected,
    AlreadyPresent,
}

/// The appended text, including the leading blank line
pub fn directive_line(go_package: &str) -> String {
    format!("\n{} = \"{}\";\n", DIRECTIVE_MARKER, go_package)
}

/// Append the directive to `path` unless a line already contains the marker.
///
/// The append is a single `write_all` on an `O_APPEND` handle.
pub fn inject_directive(path: &Path, go_package: &str) -> RegenResult<InjectOutcome> {
    let mut file = OpenOptions::new()
        .read(true)
        .append(true)
        .open(path)
        .map_err(|e| RegenError::file_io(path, e))?;

    if has_marker(&file).map_err(|e| RegenError::file_io(path, e))? {
        return Ok(InjectOutcome::AlreadyPresent);
    }

    file.write_all(directive_line(go_package).as_bytes())
        .map_err(|e| RegenError::file_io(path, e))?;

    Ok(InjectOutcome::Injected)
}

fn has_marker(file: &File) -> std::io::Result<bool> {
    let marker = DIRECTIVE_MARKER.as_bytes();
    for line in BufReader::new(file).split(b'\n') {
        let line = line?;
        if line.windows(marker.len()).any(|w| w == marker) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Inject into every member of every declaration; returns the number of files changed.
pub fn inject_all(declarations: &[Declaration]) -> RegenResult<usize> {
    let mut injected = 0;
    for decl in declarations {
        let go_package = decl.go_package();
        for file in decl.members() {
            match inject_directive(file, &go_package)? {
                InjectOutcome::Injected => {
                    tracing::debug!(file = %file.display(), %go_package, "injected go_package");
                    injected += 1;
                }
                InjectOutcome::AlreadyPresent => {
                    tracing::debug!(file = %file.display(), "go_package already present");
                }
            }
        }
    }
    Ok(injected)
}
