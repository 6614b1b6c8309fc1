//! Cross-class type reference extraction
//!
//! Unions every type name a decoded method mentions, then drops primitives
//! and platform-builtin namespaces. Filtering happens once per distinct
//! name; arrays were already collapsed to their element type by the decoder.

use std::collections::BTreeSet;

use crate::classfile::{descriptor, ClassFile, MethodInfo};

use super::package_name;

/// Namespace prefixes owned by the platform, excluded from coupling analysis
pub const DEFAULT_BUILTIN_PREFIXES: &[&str] = &["java", "javax", "jdk", "sun", "com.sun"];

/// Extracts the distinct referenced type names from decoded classes
#[derive(Debug, Clone)]
pub struct ReferenceExtractor {
    builtin_prefixes: Vec<String>,
}

impl Default for ReferenceExtractor {
    fn default() -> Self {
        Self::with_prefixes(
            DEFAULT_BUILTIN_PREFIXES
                .iter()
                .map(|prefix| prefix.to_string())
                .collect(),
        )
    }
}

impl ReferenceExtractor {
    /// Create an extractor with a custom builtin-namespace prefix list
    pub fn with_prefixes(builtin_prefixes: Vec<String>) -> Self {
        Self { builtin_prefixes }
    }

    /// Distinct qualified type names referenced by one method
    pub fn extract_method(&self, method: &MethodInfo) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        names.insert(method.return_type.clone());
        names.extend(method.parameter_types.iter().cloned());
        names.extend(method.declared_exceptions.iter().cloned());
        names.extend(method.instruction_operand_types.iter().cloned());
        names.extend(method.local_variable_types.iter().cloned());
        names.retain(|name| !self.is_excluded(name));
        names
    }

    /// Distinct qualified type names referenced across all of a class's methods
    pub fn extract_class(&self, class: &ClassFile) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        for method in &class.methods {
            names.extend(self.extract_method(method));
        }
        names
    }

    fn is_excluded(&self, name: &str) -> bool {
        descriptor::is_primitive(name) || self.is_builtin(package_name(name))
    }

    fn is_builtin(&self, package: &str) -> bool {
        self.builtin_prefixes.iter().any(|prefix| {
            package == prefix
                || package
                    .strip_prefix(prefix.as_str())
                    .is_some_and(|rest| rest.starts_with('.'))
        })
    }
}
