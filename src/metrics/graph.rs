//! Directed package dependency accumulation
//!
//! The maps here are the only shared mutable state in a scan. Every update
//! is atomic per key and edge insertion is idempotent, so the accumulated
//! contents do not depend on artifact processing order or worker count.

use std::collections::BTreeSet;

use dashmap::DashMap;
use log::trace;

use crate::classfile::ClassFile;

use super::package_name;

/// Accumulated package dependency edges and class counts for a fixed set of
/// target packages.
#[derive(Debug)]
pub struct PackageDependencyGraph {
    targets: BTreeSet<String>,
    outgoing: DashMap<String, BTreeSet<String>>,
    incoming: DashMap<String, BTreeSet<String>>,
    total_classes: DashMap<String, usize>,
    abstract_classes: DashMap<String, usize>,
}

impl PackageDependencyGraph {
    pub fn new(target_packages: impl IntoIterator<Item = String>) -> Self {
        Self {
            targets: target_packages.into_iter().collect(),
            outgoing: DashMap::new(),
            incoming: DashMap::new(),
            total_classes: DashMap::new(),
            abstract_classes: DashMap::new(),
        }
    }

    pub fn targets(&self) -> &BTreeSet<String> {
        &self.targets
    }

    /// Fold one decoded class and its referenced types into the graph.
    ///
    /// No-op unless the owning package is a target. Self-references are
    /// dropped; edges to non-target packages are kept (only target packages
    /// are ever read back out).
    pub fn record(&self, class: &ClassFile, referenced_types: &BTreeSet<String>) {
        let owner_package = package_name(&class.name);
        if !self.targets.contains(owner_package) {
            return;
        }
        trace!("Recording class {} in package {}", class.name, owner_package);

        *self
            .total_classes
            .entry(owner_package.to_string())
            .or_insert(0) += 1;
        if class.is_abstract_or_interface {
            *self
                .abstract_classes
                .entry(owner_package.to_string())
                .or_insert(0) += 1;
        }

        for referenced in referenced_types {
            let to_package = package_name(referenced);
            if to_package == owner_package {
                continue;
            }
            self.outgoing
                .entry(owner_package.to_string())
                .or_default()
                .insert(to_package.to_string());
            self.incoming
                .entry(to_package.to_string())
                .or_default()
                .insert(owner_package.to_string());
        }
    }

    pub fn outgoing_of(&self, package: &str) -> BTreeSet<String> {
        self.outgoing
            .get(package)
            .map(|edges| edges.clone())
            .unwrap_or_default()
    }

    pub fn incoming_of(&self, package: &str) -> BTreeSet<String> {
        self.incoming
            .get(package)
            .map(|edges| edges.clone())
            .unwrap_or_default()
    }

    pub fn total_classes_of(&self, package: &str) -> usize {
        self.total_classes.get(package).map(|n| *n).unwrap_or(0)
    }

    pub fn abstract_classes_of(&self, package: &str) -> usize {
        self.abstract_classes.get(package).map(|n| *n).unwrap_or(0)
    }
}
