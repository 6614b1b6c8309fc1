use crate::error::{Error, Result};

use super::{read_u16, read_u8, skip};

const TAG_UTF8: u8 = 1;
const TAG_INTEGER: u8 = 3;
const TAG_FLOAT: u8 = 4;
const TAG_LONG: u8 = 5;
const TAG_DOUBLE: u8 = 6;
const TAG_CLASS: u8 = 7;
const TAG_STRING: u8 = 8;
const TAG_FIELD_REF: u8 = 9;
const TAG_METHOD_REF: u8 = 10;
const TAG_INTERFACE_METHOD_REF: u8 = 11;
const TAG_NAME_AND_TYPE: u8 = 12;
const TAG_METHOD_HANDLE: u8 = 15;
const TAG_METHOD_TYPE: u8 = 16;
const TAG_DYNAMIC: u8 = 17;
const TAG_INVOKE_DYNAMIC: u8 = 18;
const TAG_MODULE: u8 = 19;
const TAG_PACKAGE: u8 = 20;

/// One constant pool entry, reduced to what dependency analysis consumes.
///
/// Only UTF-8 data, class references and the owner side of field/method
/// references are interpreted; every other tag is validated for width and
/// stored as `Skipped`.
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    /// Modified UTF-8 string data
    Utf8(String),
    /// Class reference; indexes the Utf8 entry holding the internal name
    Class { name_index: u16 },
    /// Field reference; indexes the Class entry naming the owner
    FieldRef { class_index: u16 },
    /// Method reference; indexes the Class entry naming the owner
    MethodRef { class_index: u16 },
    /// Interface method reference; indexes the Class entry naming the owner
    InterfaceMethodRef { class_index: u16 },
    /// Entry irrelevant to dependency analysis, skipped by its declared width
    Skipped,
    /// Placeholder for index 0 and the second slot of 8-byte constants
    Unused,
}

/// The class file constant pool, 1-indexed as in the binary format.
#[derive(Debug, Clone)]
pub struct ConstantPool {
    entries: Vec<Constant>,
}

impl ConstantPool {
    /// Parse the length-prefixed constant pool table at `offset`.
    ///
    /// `Long` and `Double` entries occupy two slots; the second slot is
    /// padded with `Unused` so raw indices stay valid.
    pub fn parse(data: &[u8], offset: &mut usize) -> Result<Self> {
        let count = read_u16(data, offset)?;
        let mut entries = vec![Constant::Unused];

        let mut index: u16 = 1;
        while index < count {
            let tag = read_u8(data, offset)?;
            match tag {
                TAG_LONG | TAG_DOUBLE => {
                    skip(data, offset, 8)?;
                    entries.push(Constant::Skipped);
                    entries.push(Constant::Unused);
                    index += 2;
                }
                _ => {
                    entries.push(Self::parse_entry(tag, data, offset)?);
                    index += 1;
                }
            }
        }

        Ok(ConstantPool { entries })
    }

    fn parse_entry(tag: u8, data: &[u8], offset: &mut usize) -> Result<Constant> {
        let entry = match tag {
            TAG_UTF8 => {
                let length = read_u16(data, offset)? as usize;
                if *offset + length > data.len() {
                    return Err(Error::parse(
                        *offset,
                        format!("UTF-8 constant length {} exceeds remaining bytes", length),
                    ));
                }
                let bytes = &data[*offset..*offset + length];
                *offset += length;
                Constant::Utf8(String::from_utf8_lossy(bytes).into_owned())
            }
            TAG_CLASS => Constant::Class {
                name_index: read_u16(data, offset)?,
            },
            TAG_FIELD_REF => {
                let class_index = read_u16(data, offset)?;
                let _name_and_type_index = read_u16(data, offset)?;
                Constant::FieldRef { class_index }
            }
            TAG_METHOD_REF => {
                let class_index = read_u16(data, offset)?;
                let _name_and_type_index = read_u16(data, offset)?;
                Constant::MethodRef { class_index }
            }
            TAG_INTERFACE_METHOD_REF => {
                let class_index = read_u16(data, offset)?;
                let _name_and_type_index = read_u16(data, offset)?;
                Constant::InterfaceMethodRef { class_index }
            }
            TAG_INTEGER | TAG_FLOAT => {
                skip(data, offset, 4)?;
                Constant::Skipped
            }
            TAG_STRING | TAG_METHOD_TYPE | TAG_MODULE | TAG_PACKAGE => {
                skip(data, offset, 2)?;
                Constant::Skipped
            }
            TAG_NAME_AND_TYPE | TAG_DYNAMIC | TAG_INVOKE_DYNAMIC => {
                skip(data, offset, 4)?;
                Constant::Skipped
            }
            TAG_METHOD_HANDLE => {
                skip(data, offset, 3)?;
                Constant::Skipped
            }
            other => {
                return Err(Error::parse(
                    *offset,
                    format!("unknown constant pool tag {}", other),
                ));
            }
        };
        Ok(entry)
    }

    fn get(&self, index: u16) -> Option<&Constant> {
        if index == 0 {
            return None;
        }
        self.entries.get(index as usize)
    }

    /// Resolve a UTF-8 entry
    pub fn utf8(&self, index: u16) -> Result<&str> {
        match self.get(index) {
            Some(Constant::Utf8(value)) => Ok(value),
            _ => Err(Error::UnresolvedConstant {
                index,
                expected: "Utf8",
            }),
        }
    }

    /// Resolve a Class entry to the fully qualified dotted type name.
    ///
    /// Array-form entries resolve to their element type.
    pub fn class_name(&self, index: u16) -> Result<String> {
        match self.get(index) {
            Some(Constant::Class { name_index }) => {
                let internal = self.utf8(*name_index)?;
                super::descriptor::qualify_internal_name(internal)
            }
            _ => Err(Error::UnresolvedConstant {
                index,
                expected: "Class",
            }),
        }
    }

    /// Resolve a field/method/interface-method reference to its owner class name
    pub fn ref_owner_class(&self, index: u16) -> Result<String> {
        match self.get(index) {
            Some(
                Constant::FieldRef { class_index }
                | Constant::MethodRef { class_index }
                | Constant::InterfaceMethodRef { class_index },
            ) => self.class_name(*class_index),
            _ => Err(Error::UnresolvedConstant {
                index,
                expected: "Fieldref/Methodref/InterfaceMethodref",
            }),
        }
    }

    /// Number of slots, including the unused zero slot
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.len() <= 1
    }
}
