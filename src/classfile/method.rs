//! Methods table and attribute decoding
//!
//! Each method contributes type names from five places: its descriptor
//! (return and parameter types), the `Exceptions` attribute, the `Code`
//! attribute's instruction stream, and the `LocalVariableTable` nested inside
//! `Code`. Unknown attributes are skipped by their declared length.

use std::collections::BTreeSet;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::constant_pool::ConstantPool;
use super::{descriptor, opcodes, read_u16, read_u32};

/// Structural descriptor of one method.
///
/// All type names are fully qualified dotted names; array types have already
/// been collapsed to their element type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MethodInfo {
    pub name: String,
    pub return_type: String,
    pub parameter_types: Vec<String>,
    pub declared_exceptions: BTreeSet<String>,
    pub instruction_operand_types: Vec<String>,
    pub local_variable_types: Vec<String>,
}

/// Parse the length-prefixed methods table at `offset`
pub(crate) fn parse_methods(
    data: &[u8],
    offset: &mut usize,
    pool: &ConstantPool,
) -> Result<Vec<MethodInfo>> {
    let count = read_u16(data, offset)?;
    let mut methods = Vec::with_capacity(count as usize);
    for _ in 0..count {
        methods.push(parse_method(data, offset, pool)?);
    }
    Ok(methods)
}

fn parse_method(data: &[u8], offset: &mut usize, pool: &ConstantPool) -> Result<MethodInfo> {
    let _access_flags = read_u16(data, offset)?;
    let name_index = read_u16(data, offset)?;
    let descriptor_index = read_u16(data, offset)?;

    let name = pool.utf8(name_index)?.to_string();
    let (return_type, parameter_types) =
        descriptor::parse_method_descriptor(pool.utf8(descriptor_index)?)?;

    let mut method = MethodInfo {
        name,
        return_type,
        parameter_types,
        declared_exceptions: BTreeSet::new(),
        instruction_operand_types: Vec::new(),
        local_variable_types: Vec::new(),
    };

    let attribute_count = read_u16(data, offset)?;
    for _ in 0..attribute_count {
        parse_attribute(data, offset, pool, &mut method)?;
    }

    Ok(method)
}

fn parse_attribute(
    data: &[u8],
    offset: &mut usize,
    pool: &ConstantPool,
    method: &mut MethodInfo,
) -> Result<()> {
    let name_index = read_u16(data, offset)?;
    let length = read_u32(data, offset)? as usize;
    let start = *offset;
    if start + length > data.len() {
        return Err(Error::parse(
            start,
            format!("attribute length {} exceeds remaining bytes", length),
        ));
    }
    let body = &data[start..start + length];

    match pool.utf8(name_index) {
        Ok("Exceptions") => parse_exceptions(body, pool, method)?,
        Ok("Code") => parse_code(body, pool, method)?,
        Ok(_) => {}
        Err(e) => warn!("Skipping attribute with unresolvable name: {}", e),
    }

    // always advance by the declared length
    *offset = start + length;
    Ok(())
}

fn parse_exceptions(body: &[u8], pool: &ConstantPool, method: &mut MethodInfo) -> Result<()> {
    let mut offset = 0;
    let count = read_u16(body, &mut offset)?;
    for _ in 0..count {
        let index = read_u16(body, &mut offset)?;
        match pool.class_name(index) {
            Ok(name) => {
                method.declared_exceptions.insert(name);
            }
            Err(e) => warn!("Skipping unresolvable declared exception: {}", e),
        }
    }
    Ok(())
}

fn parse_code(body: &[u8], pool: &ConstantPool, method: &mut MethodInfo) -> Result<()> {
    let mut offset = 0;
    let _max_stack = read_u16(body, &mut offset)?;
    let _max_locals = read_u16(body, &mut offset)?;

    let code_length = read_u32(body, &mut offset)? as usize;
    if offset + code_length > body.len() {
        return Err(Error::parse(
            offset,
            format!("code length {} exceeds attribute bounds", code_length),
        ));
    }
    let code = &body[offset..offset + code_length];
    offset += code_length;
    method
        .instruction_operand_types
        .extend(opcodes::scan_operand_types(code, pool));

    // exception handler table: catch types do not count toward coupling
    let handler_count = read_u16(body, &mut offset)? as usize;
    if offset + handler_count * 8 > body.len() {
        return Err(Error::parse(
            offset,
            "exception handler table exceeds attribute bounds",
        ));
    }
    offset += handler_count * 8;

    let attribute_count = read_u16(body, &mut offset)?;
    for _ in 0..attribute_count {
        parse_code_attribute(body, &mut offset, pool, method)?;
    }
    Ok(())
}

fn parse_code_attribute(
    body: &[u8],
    offset: &mut usize,
    pool: &ConstantPool,
    method: &mut MethodInfo,
) -> Result<()> {
    let name_index = read_u16(body, offset)?;
    let length = read_u32(body, offset)? as usize;
    let start = *offset;
    if start + length > body.len() {
        return Err(Error::parse(
            start,
            format!("nested attribute length {} exceeds bounds", length),
        ));
    }

    match pool.utf8(name_index) {
        Ok("LocalVariableTable") => {
            parse_local_variables(&body[start..start + length], pool, method)?
        }
        Ok(_) => {}
        Err(e) => warn!("Skipping nested attribute with unresolvable name: {}", e),
    }

    *offset = start + length;
    Ok(())
}

fn parse_local_variables(body: &[u8], pool: &ConstantPool, method: &mut MethodInfo) -> Result<()> {
    let mut offset = 0;
    let count = read_u16(body, &mut offset)?;
    for _ in 0..count {
        let _start_pc = read_u16(body, &mut offset)?;
        let _length = read_u16(body, &mut offset)?;
        let _name_index = read_u16(body, &mut offset)?;
        let descriptor_index = read_u16(body, &mut offset)?;
        let _slot = read_u16(body, &mut offset)?;

        let parsed = pool
            .utf8(descriptor_index)
            .and_then(descriptor::parse_field_descriptor);
        match parsed {
            Ok(name) => method.local_variable_types.push(name),
            Err(e) => warn!("Skipping unresolvable local variable type: {}", e),
        }
    }
    Ok(())
}
