//! YAML mapping loader.
//!
//! Expects a sequence of path/URL records:
//!
//! ```yaml
//! - path: /some-path
//!   url: https://www.some-url.com/demo
//! ```

use std::io::Read;

use serde::Deserialize;

use super::{DecodeError, Mapping};

/// One path/URL record in a YAML source.
#[derive(Debug, Deserialize)]
struct PathUrl {
    path: String,
    url: String,
}

/// Decode a YAML sequence of `{path, url}` records into a [`Mapping`].
pub fn load_yaml<R: Read>(reader: R) -> Result<Mapping, DecodeError> {
    let entries: Vec<PathUrl> = serde_yaml::from_reader(reader)?;

    let mut mapping = Mapping::with_capacity(entries.len());
    for entry in entries {
        mapping.insert(entry.path, entry.url);
    }

    Ok(mapping)
}
