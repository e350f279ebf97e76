//! Declarations: one generation unit per source directory

use std::path::PathBuf;

use crate::error::{RegenError, RegenResult};
use crate::paths::locate_package;
use crate::scanner::SourceGroups;

/// All source files of one directory plus the package they belong to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub package_identity: String,
    pub base_folder: PathBuf,
    members: Vec<PathBuf>,
}

impl Declaration {
    /// Build a declaration from files sharing one directory.
    ///
    /// The identity is derived from the first member; an empty group is an
    /// invariant violation reported as [`RegenError::EmptyGroup`].
    pub fn from_group(files: Vec<PathBuf>, sentinel: &str) -> RegenResult<Self> {
        let first = files.first().ok_or(RegenError::EmptyGroup)?;
        let location = locate_package(first, sentinel)?;

        Ok(Self {
            package_identity: location.identity,
            base_folder: location.base_folder,
            members: files,
        })
    }

    pub fn members(&self) -> &[PathBuf] {
        &self.members
    }

    /// Directive parameter for this package (`/<identity>`)
    pub fn go_package(&self) -> String {
        format!("/{}", self.package_identity)
    }
}

/// Turn every scanned group into a declaration, in directory order.
///
/// Stops at the first malformed group.
pub fn build_declarations(groups: SourceGroups, sentinel: &str) -> RegenResult<Vec<Declaration>> {
    groups
        .into_values()
        .map(|files| Declaration::from_group(files, sentinel))
        .collect()
}
