//! Flat-file JSON persistence.
//!
//! Each store lives in a single human-readable file that is rewritten in
//! full on every save. There is no locking: when two processes share the
//! same files, the last one to save wins.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::debug;

use crate::Result;

/// Indentation used for saved files.
const INDENT: &[u8] = b"    ";

/// Loads a store from `path`.
///
/// A missing file yields `T::default()`.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No store at {}, starting empty", path.display());
            return Ok(T::default());
        }
        Err(e) => return Err(e.into()),
    };

    let value = serde_json::from_str(&contents)?;
    debug!("Loaded store from {}", path.display());
    Ok(value)
}

/// Saves a store to `path`, replacing any previous contents.
///
/// The parent directory is created if needed.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn save<T>(path: &Path, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut serializer)?;

    fs::write(path, buf)?;
    debug!("Saved store to {}", path.display());
    Ok(())
}
