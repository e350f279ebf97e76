//! Source discovery
//!
//! Walks a tree and groups protobuf files by the directory that directly
//! contains them. Vendored subtrees are skipped wholesale.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::config::LayoutConfig;
use crate::error::RegenResult;

/// Directory -> source files directly inside it, both sorted
pub type SourceGroups = BTreeMap<PathBuf, Vec<PathBuf>>;

/// Walks a source tree and groups matching files per directory
#[derive(Debug, Clone)]
pub struct SourceScanner {
    vendor: String,
    extension: String,
}

impl SourceScanner {
    pub fn new(vendor: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            vendor: vendor.into(),
            extension: extension.into(),
        }
    }

    pub fn from_layout(layout: &LayoutConfig) -> Self {
        Self::new(&layout.vendor, &layout.extension)
    }

    /// Walk `root` and return every directory holding at least one source file.
    ///
    /// Any walk error aborts the scan; no partial map is returned.
    pub fn scan(&self, root: &Path) -> RegenResult<SourceGroups> {
        let vendor = self.vendor.clone();
        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_path(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
                !(is_dir && entry.file_name() == vendor.as_str())
            })
            .build();

        let mut groups = SourceGroups::new();
        for entry in walker {
            let entry = entry?;
            if entry.file_type().map(|t| t.is_dir()).unwrap_or(true) {
                continue;
            }

            let path = entry.path();
            if !self.matches_extension(path) || !path.is_file() {
                continue;
            }

            let dir = path.parent().unwrap_or(root).to_path_buf();
            groups.entry(dir).or_default().push(path.to_path_buf());
        }

        for files in groups.values_mut() {
            files.sort();
        }

        tracing::debug!(
            root = %root.display(),
            groups = groups.len(),
            "scanned source tree"
        );
        Ok(groups)
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .map(|e| e == self.extension.as_str())
            .unwrap_or(false)
    }
}
