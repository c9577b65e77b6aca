//! JSON mapping loader.
//!
//! Expects a flat object of path/URL string pairs:
//!
//! ```json
//! {
//!    "/some-path": "https://www.some-url.com/demo"
//! }
//! ```

use std::io::Read;

use super::{DecodeError, Mapping};

/// Decode a flat JSON object of `"path": "url"` pairs into a [`Mapping`].
pub fn load_json<R: Read>(reader: R) -> Result<Mapping, DecodeError> {
    let mapping: Mapping = serde_json::from_reader(reader)?;
    Ok(mapping)
}
