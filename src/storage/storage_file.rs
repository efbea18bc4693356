use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::PathBuf;
#[cfg(test)]
use std::path::Path;

use log::{debug, error};

use super::{Scope, StorageError};

mod kv;
use kv::KeyValues;

/// A scope kept in a `key: value` line file.
pub struct FileScope {
    path: PathBuf,
}

impl FileScope {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[cfg(test)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<KeyValues, StorageError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(KeyValues::new()),
            Err(e) => {
                error!("open {:?}: {e:?}", self.path);
                return Err(e.into());
            }
        };

        kv::read(file)
    }

    fn write(&self, keyvalues: &KeyValues) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)?;

        kv::write(file, keyvalues)?;
        Ok(())
    }
}

impl Scope for FileScope {
    fn get(&self, key: &str) -> Option<String> {
        match self.read() {
            Ok(mut kv) => kv.remove(key),
            Err(e) => {
                error!("read {:?}: {e}", self.path);
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        kv::check(key, value)?;

        let mut kv = self.read()?;
        kv.insert(key.into(), value.into());

        debug!("{:?}: set {key}", self.path);
        self.write(&kv)
    }

    fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("{:?}: cleared", self.path);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => {
                error!("remove {:?}: {e:?}", self.path);
                Err(e.into())
            }
        }
    }
}
