//! Flat-file JSON implementations of the store traits.
//!
//! Each store owns one file under the data directory and rewrites the whole
//! file on every mutation. This is the fallback backend used when the SQLite
//! database cannot be opened.

mod budget;
mod transaction;

pub use budget::JsonBudgetStore;
pub use transaction::JsonTransactionStore;

use std::{fs, path::Path};

use serde::{Serialize, de::DeserializeOwned};

use crate::Error;

/// Read and parse the JSON file at `path`.
///
/// A missing file is treated as an empty store rather than an error, so the
/// first write creates the file.
pub(crate) fn load_or_default<T>(path: &Path) -> Result<T, Error>
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        return Ok(T::default());
    }

    let contents = fs::read_to_string(path)
        .map_err(|error| Error::StorageError(format!("could not read {path:?}: {error}")))?;

    serde_json::from_str(&contents).map_err(|error| error.into())
}

/// Serialize `value` and replace the contents of the file at `path`.
pub(crate) fn save<T>(path: &Path, value: &T) -> Result<(), Error>
where
    T: Serialize,
{
    let contents = serde_json::to_string_pretty(value)?;

    fs::write(path, contents)
        .map_err(|error| Error::StorageError(format!("could not write {path:?}: {error}")))
}
