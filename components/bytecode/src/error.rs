//! Bytecode errors

use thiserror::Error;

/// Errors surfaced by the bytecode container codec
#[derive(Debug, Error)]
pub enum BytecodeError {
    /// The first 32 bits do not match the container magic
    #[error("invalid bytecode file: bad magic")]
    BadMagic,

    /// The container was written by an incompatible major version
    #[error("incompatible bytecode version: {major}.{minor}")]
    IncompatibleVersion {
        /// Major version found in the header
        major: u8,
        /// Minor version found in the header
        minor: u8,
    },

    /// A constant record carries a type tag outside the known range
    #[error("unknown constant tag: {0}")]
    UnknownConstTag(u8),

    /// An instruction record carries an opcode ordinal outside the known set
    #[error("unknown opcode: {0}")]
    UnknownOpcode(u8),

    /// The underlying stream ended in the middle of a field
    #[error("unexpected end of bytecode")]
    UnexpectedEof,

    /// The underlying stream failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for bytecode operations
pub type Result<T> = std::result::Result<T, BytecodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            BytecodeError::BadMagic.to_string(),
            "invalid bytecode file: bad magic"
        );
        assert_eq!(
            BytecodeError::IncompatibleVersion { major: 2, minor: 1 }.to_string(),
            "incompatible bytecode version: 2.1"
        );
        assert_eq!(
            BytecodeError::UnknownConstTag(7).to_string(),
            "unknown constant tag: 7"
        );
    }
}
