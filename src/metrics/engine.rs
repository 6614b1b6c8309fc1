//! Metric reduction
//!
//! Reduces the accumulated dependency graph to the four standard numbers per
//! package: efferent/afferent coupling, instability, abstractness, and the
//! distance from the main sequence.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use serde::{Deserialize, Serialize};

use super::graph::PackageDependencyGraph;

/// Final coupling and abstraction numbers for one package
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackageMetrics {
    pub package_name: String,
    /// Efferent coupling: distinct packages this package depends on
    pub ce: usize,
    /// Afferent coupling: distinct packages depending on this package
    pub ca: usize,
    pub total_classes: usize,
    pub abstract_classes: usize,
    pub instability: f64,
    pub abstractness: f64,
    pub distance: f64,
    pub outgoing_dependencies: BTreeSet<String>,
    pub incoming_dependencies: BTreeSet<String>,
}

/// Reduce the accumulated graph into per-package metrics, keyed in
/// lexicographic package order.
///
/// A target package absent from every map yields all-zero metrics except
/// `distance = 1.0`.
pub fn compute(graph: &PackageDependencyGraph) -> BTreeMap<String, PackageMetrics> {
    let mut metrics = BTreeMap::new();
    for package in graph.targets() {
        let outgoing = graph.outgoing_of(package);
        let incoming = graph.incoming_of(package);
        let ce = outgoing.len();
        let ca = incoming.len();
        let instability = if ce + ca == 0 {
            0.0
        } else {
            ce as f64 / (ce + ca) as f64
        };

        let total_classes = graph.total_classes_of(package);
        let abstract_classes = graph.abstract_classes_of(package);
        let abstractness = if total_classes == 0 {
            0.0
        } else {
            abstract_classes as f64 / total_classes as f64
        };

        let distance = (abstractness + instability - 1.0).abs();

        debug!(
            "Metrics for package {}: I={:.4}, A={:.4}, D={:.4}, CE={}, CA={}",
            package, instability, abstractness, distance, ce, ca
        );

        metrics.insert(
            package.clone(),
            PackageMetrics {
                package_name: package.clone(),
                ce,
                ca,
                total_classes,
                abstract_classes,
                instability: round4(instability),
                abstractness: round4(abstractness),
                distance: round4(distance),
                outgoing_dependencies: outgoing,
                incoming_dependencies: incoming,
            },
        );
    }
    metrics
}

/// Round half away from zero to 4 decimal places
fn round4(value: f64) -> f64 {
    (value * 10000.0).round() / 10000.0
}
