//! Error handling for registry decoding operations.
//!
//! Provides error types with file, line, and byte-offset context for
//! format detection, binary and text decoding, and cascade traversal.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot read file: {}", path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A binary read ended mid-record. For the trailing chunk of a file this
    /// is recoverable (the partial record is dropped); anywhere else it is
    /// propagated as fatal.
    #[error(
        "Truncated record in {} at byte offset {offset}: expected {expected} bytes, found {found}",
        path.display()
    )]
    TruncatedRecord {
        path: PathBuf,
        offset: u64,
        expected: usize,
        found: usize,
    },

    /// Non-blank field content that is not lexically valid for the requested
    /// numeric type.
    #[error("Invalid {kind} field: '{value}'")]
    FieldFormat { kind: &'static str, value: String },

    /// A data line inside a text block failed column parsing. Fatal for the
    /// whole parse: once a fixed-width line misaligns, the rest of the block
    /// is unreliable.
    #[error("Parse failure in {} line {line} ({block} block): {reason}", path.display())]
    BlockParse {
        path: PathBuf,
        line: usize,
        block: &'static str,
        reason: String,
    },

    /// A traversal revisited a plant already on the walk.
    #[error("Cascade cycle detected at plant {plant_num} (chain: {chain:?})")]
    CycleDetected { plant_num: i32, chain: Vec<i32> },

    #[error("Duplicate plant number {plant_num} in decoded registry")]
    DuplicatePlant { plant_num: i32 },

    #[error("Plant {plant_num} not found in registry")]
    PlantNotFound { plant_num: i32 },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl RegistryError {
    /// Create a field format error for a value that failed numeric parsing
    pub fn field_format(kind: &'static str, value: impl Into<String>) -> Self {
        Self::FieldFormat {
            kind,
            value: value.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// File path carried by this error, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::FileUnreadable { path, .. }
            | Self::TruncatedRecord { path, .. }
            | Self::BlockParse { path, .. } => Some(path),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
