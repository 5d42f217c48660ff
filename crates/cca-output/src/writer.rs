//! CSV encoding and atomic file replacement.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{OutputError, Result};
use crate::table::OutputTable;

/// Encodes `table` as comma-separated bytes with `\n` line endings.
///
/// The header row is always written, even for an empty table.
pub fn to_csv_bytes(table: &OutputTable) -> Result<Vec<u8>> {
    encode(table, Path::new("<memory>"))
}

fn encode(table: &OutputTable, path: &Path) -> Result<Vec<u8>> {
    let expected = table.headers().len();
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let encode_error = |source| OutputError::Encode {
        path: path.to_path_buf(),
        source,
    };
    writer.write_record(table.headers()).map_err(encode_error)?;
    for (idx, row) in table.rows().iter().enumerate() {
        if row.len() != expected {
            return Err(OutputError::RowWidth {
                row: idx,
                expected,
                found: row.len(),
            });
        }
        writer
            .write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))
            .map_err(encode_error)?;
    }

    writer.into_inner().map_err(|e| OutputError::Io {
        operation: "flush",
        path: path.to_path_buf(),
        source: e.into_error(),
    })
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Writes `table` to `path`, replacing any existing file.
///
/// The bytes go to a sibling temporary file which is synced and then renamed
/// over the target, so readers never observe a partial file. Missing parent
/// directories are created.
pub fn write_table(table: &OutputTable, path: &Path) -> Result<()> {
    let bytes = encode(table, path)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| OutputError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let temp_path = temp_path_for(path);
    let mut file = File::create(&temp_path).map_err(|e| OutputError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;
    file.write_all(&bytes).map_err(|e| OutputError::Io {
        operation: "write",
        path: temp_path.clone(),
        source: e,
    })?;
    file.sync_all().map_err(|e| OutputError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source: e,
    })?;
    drop(file);

    fs::rename(&temp_path, path).map_err(|e| OutputError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source: e,
    })?;

    info!(path = %path.display(), rows = table.len(), "wrote data product");
    Ok(())
}
