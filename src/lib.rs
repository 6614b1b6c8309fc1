//! Classdep-rs: Rust-based package coupling metrics analyzer for JVM class files
//!
//! This library decodes compiled `.class` artifacts, extracts cross-class type
//! references, and aggregates them into Robert Martin's package-level coupling
//! and abstraction metrics (Ce, Ca, instability, abstractness, distance from
//! the main sequence).

pub mod analyzer;
pub mod classfile;
pub mod cli;
pub mod error;
pub mod metrics;
pub mod scanner;

pub use analyzer::{Analyzer, AnalyzerOptions};
pub use error::{Error as AnalyzerError, Result as AnalyzerResult};

// Re-export commonly used types
pub use classfile::{ClassFile, MethodInfo};
pub use metrics::{PackageDependencyGraph, PackageMetrics, ReferenceExtractor};
