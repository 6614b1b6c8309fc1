//! Type descriptor grammar
//!
//! Field and method descriptors use single-letter primitive codes, `[` array
//! prefixes and the `L<name>;` object form. All parsing resolves to fully
//! qualified dotted names; array types collapse to their element type, which
//! is the granularity coupling analysis cares about.

use crate::error::{Error, Result};

/// Parse a method descriptor into its return type and ordered parameter types
pub fn parse_method_descriptor(descriptor: &str) -> Result<(String, Vec<String>)> {
    let bytes = descriptor.as_bytes();
    if bytes.first() != Some(&b'(') {
        return Err(malformed(descriptor));
    }

    let mut pos = 1;
    let mut parameter_types = Vec::new();
    while bytes.get(pos).is_some_and(|&b| b != b')') {
        parameter_types.push(parse_type(descriptor, &mut pos)?);
    }
    if bytes.get(pos) != Some(&b')') {
        return Err(malformed(descriptor));
    }
    pos += 1;

    let return_type = parse_type(descriptor, &mut pos)?;
    if pos != bytes.len() {
        return Err(malformed(descriptor));
    }
    Ok((return_type, parameter_types))
}

/// Parse a field or local variable descriptor into a qualified type name
pub fn parse_field_descriptor(descriptor: &str) -> Result<String> {
    let mut pos = 0;
    let name = parse_type(descriptor, &mut pos)?;
    if pos != descriptor.len() {
        return Err(malformed(descriptor));
    }
    Ok(name)
}

/// Convert an internal slash-separated class name to dotted form.
///
/// Class constants may carry an array descriptor instead of a plain name
/// (e.g. for `anewarray`); those resolve through the descriptor grammar.
pub fn qualify_internal_name(internal: &str) -> Result<String> {
    if internal.starts_with('[') {
        parse_field_descriptor(internal)
    } else {
        Ok(internal.replace('/', "."))
    }
}

/// True for the primitive and void type names produced by descriptor parsing
pub fn is_primitive(name: &str) -> bool {
    matches!(
        name,
        "byte" | "char" | "double" | "float" | "int" | "long" | "short" | "boolean" | "void"
    )
}

fn parse_type(descriptor: &str, pos: &mut usize) -> Result<String> {
    let bytes = descriptor.as_bytes();

    // array dimensions collapse to the element type
    while bytes.get(*pos) == Some(&b'[') {
        *pos += 1;
    }

    let Some(&code) = bytes.get(*pos) else {
        return Err(malformed(descriptor));
    };
    *pos += 1;

    let name = match code {
        b'B' => "byte".to_string(),
        b'C' => "char".to_string(),
        b'D' => "double".to_string(),
        b'F' => "float".to_string(),
        b'I' => "int".to_string(),
        b'J' => "long".to_string(),
        b'S' => "short".to_string(),
        b'Z' => "boolean".to_string(),
        b'V' => "void".to_string(),
        b'L' => {
            let Some(end) = descriptor[*pos..].find(';') else {
                return Err(malformed(descriptor));
            };
            let name = descriptor[*pos..*pos + end].replace('/', ".");
            *pos += end + 1;
            name
        }
        _ => return Err(malformed(descriptor)),
    };
    Ok(name)
}

fn malformed(descriptor: &str) -> Error {
    Error::MalformedDescriptor {
        descriptor: descriptor.to_string(),
    }
}
