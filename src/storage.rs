use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("scope i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("scope is corrupt: {0}")]
    Corrupt(&'static str),
    #[error("can't store {0}: line breaks aren't allowed")]
    Unstorable(String),
}

/// A key/value scope, the stand-in for one of the browser's storage areas.
pub trait Scope {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Drop every key, not just the ones this crate writes.
    fn clear(&self) -> Result<(), StorageError>;
}

mod storage_file;
pub use storage_file::FileScope;

#[cfg(test)]
mod storage_memory;
#[cfg(test)]
pub use storage_memory::MemoryScope;
