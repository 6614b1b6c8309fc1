//! Synthetic class file assembly for tests
//!
//! Builds minimal but format-correct class files in memory so tests do not
//! depend on a Java toolchain or checked-in binary fixtures.

#![allow(dead_code)]

pub const ACC_PUBLIC: u16 = 0x0001;
pub const ACC_SUPER: u16 = 0x0020;
pub const ACC_INTERFACE: u16 = 0x0200;
pub const ACC_ABSTRACT: u16 = 0x0400;

/// Incremental class file builder. Constant pool indices are handed back as
/// entries are added; `build` serializes the whole artifact.
pub struct ClassBytes {
    pool: Vec<Vec<u8>>,
    methods: Vec<Vec<u8>>,
    this_class: u16,
    super_class: u16,
}

impl ClassBytes {
    pub fn new(internal_name: &str) -> Self {
        let mut builder = ClassBytes {
            pool: Vec::new(),
            methods: Vec::new(),
            this_class: 0,
            super_class: 0,
        };
        builder.this_class = builder.class(internal_name);
        builder.super_class = builder.class("java/lang/Object");
        builder
    }

    pub fn utf8(&mut self, value: &str) -> u16 {
        let mut entry = vec![1u8];
        entry.extend_from_slice(&(value.len() as u16).to_be_bytes());
        entry.extend_from_slice(value.as_bytes());
        self.push(entry)
    }

    pub fn class(&mut self, internal_name: &str) -> u16 {
        let name_index = self.utf8(internal_name);
        let mut entry = vec![7u8];
        entry.extend_from_slice(&name_index.to_be_bytes());
        self.push(entry)
    }

    pub fn method_ref(&mut self, owner_internal: &str) -> u16 {
        self.member_ref(10, owner_internal, "()V")
    }

    pub fn field_ref(&mut self, owner_internal: &str) -> u16 {
        self.member_ref(9, owner_internal, "I")
    }

    fn member_ref(&mut self, tag: u8, owner_internal: &str, descriptor: &str) -> u16 {
        let class_index = self.class(owner_internal);
        let name_index = self.utf8("m");
        let desc_index = self.utf8(descriptor);

        let mut name_and_type = vec![12u8];
        name_and_type.extend_from_slice(&name_index.to_be_bytes());
        name_and_type.extend_from_slice(&desc_index.to_be_bytes());
        let name_and_type_index = self.push(name_and_type);

        let mut entry = vec![tag];
        entry.extend_from_slice(&class_index.to_be_bytes());
        entry.extend_from_slice(&name_and_type_index.to_be_bytes());
        self.push(entry)
    }

    /// Add a public method named `m`.
    ///
    /// `exceptions` holds internal class names for an `Exceptions` attribute;
    /// `code` becomes a `Code` attribute; `locals` holds field descriptors
    /// for a `LocalVariableTable` nested inside `Code`.
    pub fn add_method(
        &mut self,
        descriptor: &str,
        exceptions: &[&str],
        code: Option<Vec<u8>>,
        locals: &[&str],
    ) {
        let name_index = self.utf8("m");
        let desc_index = self.utf8(descriptor);

        let mut attributes: Vec<Vec<u8>> = Vec::new();

        if !exceptions.is_empty() {
            let attr_name = self.utf8("Exceptions");
            let mut body = (exceptions.len() as u16).to_be_bytes().to_vec();
            for exception in exceptions {
                let index = self.class(exception);
                body.extend_from_slice(&index.to_be_bytes());
            }
            attributes.push(attribute(attr_name, &body));
        }

        if let Some(code) = code {
            let attr_name = self.utf8("Code");
            let mut body = Vec::new();
            body.extend_from_slice(&0u16.to_be_bytes()); // max_stack
            body.extend_from_slice(&0u16.to_be_bytes()); // max_locals
            body.extend_from_slice(&(code.len() as u32).to_be_bytes());
            body.extend_from_slice(&code);
            body.extend_from_slice(&0u16.to_be_bytes()); // exception handler table

            if locals.is_empty() {
                body.extend_from_slice(&0u16.to_be_bytes());
            } else {
                let lvt_name = self.utf8("LocalVariableTable");
                let var_name = self.utf8("v");
                let mut lvt = (locals.len() as u16).to_be_bytes().to_vec();
                for local_descriptor in locals {
                    let local_desc_index = self.utf8(local_descriptor);
                    lvt.extend_from_slice(&0u16.to_be_bytes()); // start_pc
                    lvt.extend_from_slice(&0u16.to_be_bytes()); // length
                    lvt.extend_from_slice(&var_name.to_be_bytes());
                    lvt.extend_from_slice(&local_desc_index.to_be_bytes());
                    lvt.extend_from_slice(&0u16.to_be_bytes()); // slot
                }
                body.extend_from_slice(&1u16.to_be_bytes());
                body.extend_from_slice(&attribute(lvt_name, &lvt));
            }

            attributes.push(attribute(attr_name, &body));
        }

        let mut method = Vec::new();
        method.extend_from_slice(&ACC_PUBLIC.to_be_bytes());
        method.extend_from_slice(&name_index.to_be_bytes());
        method.extend_from_slice(&desc_index.to_be_bytes());
        method.extend_from_slice(&(attributes.len() as u16).to_be_bytes());
        for attr in &attributes {
            method.extend_from_slice(attr);
        }
        self.methods.push(method);
    }

    pub fn build(self, access_flags: u16) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&0xCAFEBABEu32.to_be_bytes());
        bytes.extend_from_slice(&0u16.to_be_bytes()); // minor version
        bytes.extend_from_slice(&52u16.to_be_bytes()); // major version (Java 8)
        bytes.extend_from_slice(&((self.pool.len() + 1) as u16).to_be_bytes());
        for entry in &self.pool {
            bytes.extend_from_slice(entry);
        }
        bytes.extend_from_slice(&access_flags.to_be_bytes());
        bytes.extend_from_slice(&self.this_class.to_be_bytes());
        bytes.extend_from_slice(&self.super_class.to_be_bytes());
        bytes.extend_from_slice(&0u16.to_be_bytes()); // interfaces
        bytes.extend_from_slice(&0u16.to_be_bytes()); // fields
        bytes.extend_from_slice(&(self.methods.len() as u16).to_be_bytes());
        for method in &self.methods {
            bytes.extend_from_slice(method);
        }
        bytes.extend_from_slice(&0u16.to_be_bytes()); // class attributes
        bytes
    }

    fn push(&mut self, entry: Vec<u8>) -> u16 {
        self.pool.push(entry);
        self.pool.len() as u16
    }
}

fn attribute(name_index: u16, body: &[u8]) -> Vec<u8> {
    let mut attr = name_index.to_be_bytes().to_vec();
    attr.extend_from_slice(&(body.len() as u32).to_be_bytes());
    attr.extend_from_slice(body);
    attr
}

pub fn invoke_virtual(index: u16) -> Vec<u8> {
    op_with_index(0xb6, index)
}

pub fn invoke_static(index: u16) -> Vec<u8> {
    op_with_index(0xb8, index)
}

pub fn get_field(index: u16) -> Vec<u8> {
    op_with_index(0xb4, index)
}

pub fn new_instance(index: u16) -> Vec<u8> {
    op_with_index(0xbb, index)
}

pub fn check_cast(index: u16) -> Vec<u8> {
    op_with_index(0xc0, index)
}

pub fn vreturn() -> Vec<u8> {
    vec![0xb1]
}

fn op_with_index(opcode: u8, index: u16) -> Vec<u8> {
    let mut op = vec![opcode];
    op.extend_from_slice(&index.to_be_bytes());
    op
}
