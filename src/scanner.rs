//! Artifact discovery on the filesystem
//!
//! Directory layout does not need to encode package structure; packages come
//! exclusively from the decoded qualified names.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::classfile::ClassFile;
use crate::error::{Error, Result};
use crate::metrics::package_name;

/// Collect every `.class` artifact below `root`.
///
/// Unreadable directory entries are logged and skipped; a missing root is an
/// error.
pub fn find_class_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(Error::Io(format!(
            "root directory not found: {}",
            root.display()
        )));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable directory entry: {}", e);
                continue;
            }
        };
        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == "class")
        {
            files.push(entry.into_path());
        }
    }

    debug!(
        "Discovered {} class artifacts under {}",
        files.len(),
        root.display()
    );
    Ok(files)
}

/// Derive the set of owning packages from every decodable artifact below
/// `root`.
///
/// Used when the caller supplies no target package list; malformed artifacts
/// are skipped exactly as during analysis.
pub fn discover_packages(root: &Path) -> Result<BTreeSet<String>> {
    let mut packages = BTreeSet::new();
    for path in find_class_files(root)? {
        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(e) => {
                warn!("Skipping unreadable artifact {}: {}", path.display(), e);
                continue;
            }
        };
        match ClassFile::parse(&data) {
            Ok(class) => {
                packages.insert(package_name(&class.name).to_string());
            }
            Err(e) => warn!("Skipping malformed artifact {}: {}", path.display(), e),
        }
    }
    Ok(packages)
}
