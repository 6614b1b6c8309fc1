use miette::Diagnostic;
use thiserror::Error;

/// Result type for analyzer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Custom error types for the class file analyzer
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum Error {
    #[error("I/O error: {0}")]
    #[diagnostic(code(classdep::io_error))]
    Io(String),

    #[error("Invalid class file magic number: expected 0x{expected:08X}, got 0x{got:08X}")]
    #[diagnostic(code(classdep::invalid_magic))]
    InvalidMagic { expected: u32, got: u32 },

    #[error("Unsupported class file version: {major}.{minor}")]
    #[diagnostic(code(classdep::unsupported_version))]
    UnsupportedVersion { major: u16, minor: u16 },

    #[error("Parse error at offset {offset}: {message}")]
    #[diagnostic(code(classdep::parse_error))]
    Parse { offset: usize, message: String },

    #[error("Constant pool index {index} does not resolve to a {expected} entry")]
    #[diagnostic(code(classdep::unresolved_constant))]
    UnresolvedConstant { index: u16, expected: &'static str },

    #[error("Malformed type descriptor: {descriptor}")]
    #[diagnostic(code(classdep::malformed_descriptor))]
    MalformedDescriptor { descriptor: String },

    #[error("Internal error: {message}")]
    #[diagnostic(code(classdep::internal_error))]
    Internal { message: String },
}

impl Error {
    /// Create a parse error at the given byte offset
    pub fn parse(offset: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            offset,
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}
