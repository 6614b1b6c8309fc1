//! JVM class file parsing module
//!
//! This module handles decoding of `.class` artifacts: the magic/version
//! header, the constant pool, and the methods table with its attributes.
//! The output is a flat structural descriptor holding every type name the
//! class refers to; no bytecode semantics beyond that are retained.

use log::debug;
use scroll::Pread;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub mod constant_pool;
pub mod descriptor;
pub mod method;
pub mod opcodes;

pub use constant_pool::{Constant, ConstantPool};
pub use method::MethodInfo;

/// Magic number for JVM class files
pub const CLASS_MAGIC: u32 = 0xCAFEBABE;

const ACC_INTERFACE: u16 = 0x0200;
const ACC_ABSTRACT: u16 = 0x0400;

/// Classes compiled for JDK 1.1 and newer
fn min_supported_major() -> u16 {
    45
}

/// Classes compiled up to and including Java 25
fn max_supported_major() -> u16 {
    69
}

/// Structural descriptor of one compiled class
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassFile {
    pub minor_version: u16,
    pub major_version: u16,
    /// Fully qualified dotted class name
    pub name: String,
    /// Set when the access flags carry the abstract or interface bit
    pub is_abstract_or_interface: bool,
    pub methods: Vec<MethodInfo>,
}

impl ClassFile {
    /// Parse a class file from a byte slice
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut offset = 0;

        let magic = read_u32(data, &mut offset)?;
        if magic != CLASS_MAGIC {
            return Err(Error::InvalidMagic {
                expected: CLASS_MAGIC,
                got: magic,
            });
        }

        let minor_version = read_u16(data, &mut offset)?;
        let major_version = read_u16(data, &mut offset)?;
        if major_version < min_supported_major() || major_version > max_supported_major() {
            return Err(Error::UnsupportedVersion {
                major: major_version,
                minor: minor_version,
            });
        }

        let pool = ConstantPool::parse(data, &mut offset)?;

        let access_flags = read_u16(data, &mut offset)?;
        let this_class = read_u16(data, &mut offset)?;
        let _super_class = read_u16(data, &mut offset)?;
        let name = pool.class_name(this_class)?;

        // implemented interfaces: walked, not interpreted
        let interface_count = read_u16(data, &mut offset)?;
        skip(data, &mut offset, interface_count as usize * 2)?;

        // field declarations do not count toward coupling
        skip_member_table(data, &mut offset)?;

        let methods = method::parse_methods(data, &mut offset, &pool)?;

        // trailing class attributes: walked so truncation is still detected
        skip_attribute_table(data, &mut offset)?;

        debug!("Decoded class {} ({} methods)", name, methods.len());

        Ok(ClassFile {
            minor_version,
            major_version,
            name,
            is_abstract_or_interface: access_flags & (ACC_ABSTRACT | ACC_INTERFACE) != 0,
            methods,
        })
    }
}

pub(crate) fn read_u8(data: &[u8], offset: &mut usize) -> Result<u8> {
    data.gread_with::<u8>(offset, scroll::BE)
        .map_err(|_| Error::parse(*offset, "unexpected end of class file"))
}

pub(crate) fn read_u16(data: &[u8], offset: &mut usize) -> Result<u16> {
    data.gread_with::<u16>(offset, scroll::BE)
        .map_err(|_| Error::parse(*offset, "unexpected end of class file"))
}

pub(crate) fn read_u32(data: &[u8], offset: &mut usize) -> Result<u32> {
    data.gread_with::<u32>(offset, scroll::BE)
        .map_err(|_| Error::parse(*offset, "unexpected end of class file"))
}

pub(crate) fn skip(data: &[u8], offset: &mut usize, count: usize) -> Result<()> {
    if *offset + count > data.len() {
        return Err(Error::parse(
            *offset,
            format!("length prefix {} exceeds remaining bytes", count),
        ));
    }
    *offset += count;
    Ok(())
}

fn skip_member_table(data: &[u8], offset: &mut usize) -> Result<()> {
    let count = read_u16(data, offset)?;
    for _ in 0..count {
        // access flags, name index, descriptor index
        skip(data, offset, 6)?;
        skip_attribute_table(data, offset)?;
    }
    Ok(())
}

fn skip_attribute_table(data: &[u8], offset: &mut usize) -> Result<()> {
    let count = read_u16(data, offset)?;
    for _ in 0..count {
        skip(data, offset, 2)?;
        let length = read_u32(data, offset)? as usize;
        skip(data, offset, length)?;
    }
    Ok(())
}
