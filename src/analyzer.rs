//! Scan orchestration
//!
//! Drives artifact discovery, decoding, reference extraction and graph
//! accumulation, then reduces the result to per-package metrics. Individual
//! unreadable or malformed artifacts are logged and skipped; the scan only
//! fails when the root itself cannot be traversed.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use rayon::prelude::*;

use crate::classfile::ClassFile;
use crate::error::Result;
use crate::metrics::{engine, PackageDependencyGraph, PackageMetrics, ReferenceExtractor};
use crate::scanner;

/// Scan configuration
#[derive(Debug, Clone)]
pub struct AnalyzerOptions {
    /// Decode artifacts on the rayon worker pool; sequential when false
    pub parallel: bool,
    /// Override the platform-builtin namespace prefixes excluded from coupling
    pub builtin_prefixes: Option<Vec<String>>,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            builtin_prefixes: None,
        }
    }
}

/// Main analyzer struct
pub struct Analyzer {
    options: AnalyzerOptions,
}

impl Analyzer {
    pub fn new() -> Self {
        Self::with_options(AnalyzerOptions::default())
    }

    pub fn with_options(options: AnalyzerOptions) -> Self {
        Self { options }
    }

    /// Compute coupling metrics for `target_packages` over every class
    /// artifact below `root`.
    ///
    /// An empty target list yields an empty mapping. The result is
    /// independent of artifact processing order and worker count.
    pub fn analyze(
        &self,
        root: &Path,
        target_packages: &[String],
    ) -> Result<BTreeMap<String, PackageMetrics>> {
        if target_packages.is_empty() {
            return Ok(BTreeMap::new());
        }

        let files = scanner::find_class_files(root)?;
        info!(
            "Analyzing {} artifacts for {} target packages",
            files.len(),
            target_packages.len()
        );

        let graph = PackageDependencyGraph::new(target_packages.iter().cloned());
        let extractor = match &self.options.builtin_prefixes {
            Some(prefixes) => ReferenceExtractor::with_prefixes(prefixes.clone()),
            None => ReferenceExtractor::default(),
        };

        let process = |path: &PathBuf| {
            let data = match fs::read(path) {
                Ok(data) => data,
                Err(e) => {
                    warn!("Skipping unreadable artifact {}: {}", path.display(), e);
                    return;
                }
            };
            let class = match ClassFile::parse(&data) {
                Ok(class) => class,
                Err(e) => {
                    warn!("Skipping malformed artifact {}: {}", path.display(), e);
                    return;
                }
            };
            let referenced = extractor.extract_class(&class);
            graph.record(&class, &referenced);
        };

        if self.options.parallel {
            files.par_iter().for_each(process);
        } else {
            files.iter().for_each(process);
        }

        Ok(engine::compute(&graph))
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}
