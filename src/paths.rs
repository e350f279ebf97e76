//! Path conventions for protobuf source trees
//!
//! Sources live under a sentinel directory (usually `proto`). The segments
//! from the sentinel down to the file's directory form the package identity;
//! everything above the sentinel is the include root handed to the compiler.

use std::path::{Component, Path, PathBuf};

use crate::error::{RegenError, RegenResult};

/// Package identity and include root derived from one source path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageLocation {
    /// Underscore-joined segments from the sentinel (inclusive) to the file's directory
    pub identity: String,
    /// Path above the sentinel segment
    pub base_folder: PathBuf,
}

/// Derive the package identity and base folder for a source file.
///
/// The rightmost directory segment equal to `sentinel` is the anchor:
///
/// ```text
/// a/proto/x/one.proto  ->  identity "proto_x", base folder "a"
/// ```
pub fn locate_package(file: &Path, sentinel: &str) -> RegenResult<PackageLocation> {
    let dir = file.parent().unwrap_or_else(|| Path::new(""));
    let components: Vec<Component<'_>> = dir.components().collect();

    let anchor = components
        .iter()
        .rposition(|c| matches!(c, Component::Normal(segment) if *segment == sentinel))
        .ok_or_else(|| RegenError::SentinelNotFound {
            sentinel: sentinel.to_string(),
            path: file.to_path_buf(),
        })?;

    let mut segments = Vec::with_capacity(components.len() - anchor);
    for component in &components[anchor..] {
        if let Component::Normal(segment) = component {
            let segment = segment.to_str().ok_or_else(|| RegenError::NonUtf8Path {
                path: file.to_path_buf(),
            })?;
            segments.push(segment);
        }
    }

    Ok(PackageLocation {
        identity: segments.join("_"),
        base_folder: components[..anchor].iter().collect(),
    })
}

/// Where document mode places the final document for `source`.
///
/// The `work` prefix is swapped for `output` and the extension becomes
/// `extension`; with `work = /generator` and `output = /output`,
/// `/generator/a/proto/x/one.proto` maps to `/output/a/proto/x/one.yaml`.
pub fn document_output_path(
    source: &Path,
    work: &Path,
    output: &Path,
    extension: &str,
) -> RegenResult<PathBuf> {
    let relative = source
        .strip_prefix(work)
        .map_err(|_| RegenError::OutsideWorkTree {
            work: work.to_path_buf(),
            path: source.to_path_buf(),
        })?;

    let mut out = output.join(relative);
    out.set_extension(extension);
    Ok(out)
}
