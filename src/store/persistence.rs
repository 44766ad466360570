//! Load-and-merge and encode paths of the store

use crate::config::StoreOptions;
use crate::error::StoreError;
use crate::fsio;
use crate::merge;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::io::Write;
use std::path::Path;
use tracing::{debug, trace};

/// Merge the state file at `path` onto `value` in place.
///
/// Returns `false` when there is no file, leaving `value` untouched. The
/// merged image is converted back into `T` before anything is assigned, so a
/// decode failure never half-updates the caller's value.
pub(crate) fn load_into<T>(path: &Path, value: &mut T) -> Result<bool, StoreError>
where
    T: Serialize + DeserializeOwned,
{
    let bytes = match fsio::read_if_exists(path)? {
        Some(bytes) => bytes,
        None => {
            debug!(path = %path.display(), "No state file, keeping defaults");
            return Ok(false);
        }
    };

    let decode_err = |e: serde_json::Error| StoreError::Decode {
        path: path.to_path_buf(),
        source: e,
    };

    let loaded: Value = serde_json::from_slice(&bytes).map_err(decode_err)?;
    let image = serde_json::to_value(&*value).map_err(StoreError::Encode)?;

    merge::check_shape(&image, &loaded).map_err(|(expected, found)| {
        StoreError::ShapeMismatch {
            path: path.to_path_buf(),
            expected,
            found,
        }
    })?;
    *value = merge_and_convert(image, loaded).map_err(decode_err)?;
    debug!(path = %path.display(), bytes = bytes.len(), "Merged persisted state onto defaults");
    Ok(true)
}

/// Plain merge first. If that does not decode, every variant site is
/// treated as an enum switch, then each site is turned back into a union
/// wherever the result still decodes. The first error is reported when no
/// combination decodes.
fn merge_and_convert<T>(image: Value, loaded: Value) -> Result<T, serde_json::Error>
where
    T: DeserializeOwned,
{
    let attempt = |switches: &[bool]| -> Result<T, serde_json::Error> {
        let mut merged = image.clone();
        merge::merge_with(&mut merged, loaded.clone(), switches);
        serde_json::from_value(merged)
    };

    let err = match attempt(&[]) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    let sites = merge::variant_sites(&image, &loaded);
    if sites == 0 {
        return Err(err);
    }

    let mut switches = vec![true; sites];
    let mut best = match attempt(&switches) {
        Ok(value) => value,
        Err(retry_err) => {
            trace!(error = %retry_err, sites, "Variant-aware merge did not decode either");
            return Err(err);
        }
    };

    for i in 0..sites {
        switches[i] = false;
        match attempt(&switches) {
            Ok(value) => best = value,
            Err(_) => switches[i] = true,
        }
    }

    trace!(sites, replaced = switches.iter().filter(|s| **s).count(), "Resolved enum variant switches");
    Ok(best)
}

/// Encode the bound value and atomically replace the file at `path`.
///
/// The value lock is held only while encoding into the temporary file.
pub(crate) fn save_from<T>(
    path: &Path,
    options: &StoreOptions,
    value: &Mutex<&mut T>,
) -> Result<(), StoreError>
where
    T: Serialize,
{
    if options.create_dirs {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Write {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }

    let temp_path = fsio::temp_path(path);
    fsio::write_atomic(path, options.sync, |writer| {
        let value = value.lock();
        encode(&mut *writer, &**value, options.pretty, &temp_path)
    })?;

    debug!(path = %path.display(), "Saved state");
    Ok(())
}

fn encode<W, T>(mut writer: W, value: &T, pretty: bool, temp_path: &Path) -> Result<(), StoreError>
where
    W: Write,
    T: Serialize + ?Sized,
{
    let result = if pretty {
        serde_json::to_writer_pretty(&mut writer, value)
    } else {
        serde_json::to_writer(&mut writer, value)
    };

    result.map_err(|e| {
        if e.is_io() {
            StoreError::Write {
                path: temp_path.to_path_buf(),
                source: e.into(),
            }
        } else {
            StoreError::Encode(e)
        }
    })?;

    if pretty {
        writer.write_all(b"\n").map_err(|e| StoreError::Write {
            path: temp_path.to_path_buf(),
            source: e,
        })?;
    }

    Ok(())
}
