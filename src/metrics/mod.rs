//! Package dependency accumulation and coupling metrics
//!
//! This module turns decoded class descriptors into a directed package
//! dependency graph and reduces it to Robert Martin's coupling numbers.

pub mod engine;
pub mod extractor;
pub mod graph;

pub use engine::PackageMetrics;
pub use extractor::ReferenceExtractor;
pub use graph::PackageDependencyGraph;

/// Owning package of a fully qualified dotted type name; empty when the name
/// has no package segment.
pub fn package_name(qualified: &str) -> &str {
    match qualified.rfind('.') {
        Some(index) => &qualified[..index],
        None => "",
    }
}
