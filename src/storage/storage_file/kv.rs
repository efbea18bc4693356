use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};

use log::error;

use crate::storage::StorageError;

pub type KeyValues = HashMap<String, String>;

pub fn read(input: impl Read) -> Result<KeyValues, StorageError> {
    let mut kv = HashMap::new();

    for line in BufReader::new(input).lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }

        let (k, v) = line.split_once(':').ok_or_else(|| {
            error!("invalid line, can't split");
            StorageError::Corrupt("line without colon")
        })?;

        let v = v.strip_prefix(' ').ok_or_else(|| {
            error!("invalid line - no whitespace after colon");
            StorageError::Corrupt("no whitespace after colon")
        })?;

        kv.insert(k.into(), v.into());
    }

    Ok(kv)
}

/// Keys can't hold the separator and neither side can span lines.
pub fn check(key: &str, value: &str) -> Result<(), StorageError> {
    let breaks = |s: &str| s.contains(['\n', '\r']);

    if key.is_empty() || key.contains(':') || breaks(key) {
        error!("refusing to store key {key:?}");
        return Err(StorageError::Unstorable(format!("key {key:?}")));
    }
    if breaks(value) {
        error!("refusing to store value for {key}");
        return Err(StorageError::Unstorable(key.into()));
    }
    Ok(())
}

pub fn write(mut output: impl Write, keyvalues: &KeyValues) -> Result<(), std::io::Error> {
    let mut keys: Vec<_> = keyvalues.keys().collect();
    keys.sort();

    for k in keys {
        writeln!(output, "{}: {}", k, keyvalues[k])?;
    }
    Ok(())
}
