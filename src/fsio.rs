//! File I/O for the state file
//!
//! Reads treat a missing file as "no prior state". Writes go to a sibling
//! temporary file which is renamed over the destination, so readers only ever
//! see the old or the new contents.

use crate::error::StoreError;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Read the whole file, or `None` if it does not exist.
pub fn read_if_exists(path: &Path) -> Result<Option<Vec<u8>>, StoreError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::Read {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Temporary file used while replacing `path`: `<file name>.tmp` in the same
/// directory, so the final rename never crosses a filesystem boundary.
pub fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("state"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Replace `path` atomically with whatever `write` produces.
///
/// The closure writes into a buffered handle on the temporary file. If it
/// fails, or flushing, syncing or renaming fails, the temporary file is
/// removed and the destination is left as it was.
pub fn write_atomic<F>(path: &Path, sync: bool, write: F) -> Result<(), StoreError>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<(), StoreError>,
{
    let temp_path = temp_path(path);

    let result = write_temp(&temp_path, sync, write).and_then(|()| {
        fs::rename(&temp_path, path).map_err(|e| StoreError::Rename {
            from: temp_path.clone(),
            to: path.to_path_buf(),
            source: e,
        })
    });

    if let Err(ref e) = result {
        debug!(path = %path.display(), error = %e, "Atomic write failed, discarding temp file");
        let _ = fs::remove_file(&temp_path);
    } else {
        trace!(path = %path.display(), "Atomic write committed");
    }

    result
}

fn write_temp<F>(temp_path: &Path, sync: bool, write: F) -> Result<(), StoreError>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<(), StoreError>,
{
    let io_err = |e: std::io::Error| StoreError::Write {
        path: temp_path.to_path_buf(),
        source: e,
    };

    let file = File::create(temp_path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    write(&mut writer)?;
    writer.flush().map_err(io_err)?;

    if sync {
        writer.get_ref().sync_all().map_err(io_err)?;
    }

    Ok(())
}
