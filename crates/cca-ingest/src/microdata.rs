//! Survey microdata loading.

use std::path::Path;

use tracing::debug;

use cca_model::Microdata;

use crate::csv::read_delimited;
use crate::error::{IngestError, Result};

/// Loads the optional microdata file.
///
/// Returns `Ok(None)` when no file exists at `path`; the caller decides how
/// to report the skipped product.
pub fn load_microdata(path: &Path, separator: char) -> Result<Option<Microdata>> {
    if !path.is_file() {
        debug!(path = %path.display(), "microdata file not present");
        return Ok(None);
    }

    let raw = read_delimited(path, separator)?;
    let microdata = Microdata::new(raw.header, raw.rows).map_err(|source| IngestError::Schema {
        name: path.display().to_string(),
        source,
    })?;
    debug!(
        path = %path.display(),
        rows = microdata.height(),
        columns = microdata.columns().len(),
        "microdata loaded"
    );
    Ok(Some(microdata))
}
