//! State Store
//!
//! Binds a caller-owned value to a JSON file. Opening a store merges any
//! persisted state onto the value in place; [`Store::save`] writes the
//! current value back atomically.

mod persistence;

use crate::config::StoreOptions;
use crate::error::StoreError;
use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::trace;

/// A file-backed binding for one value
///
/// The store borrows the value exclusively for its whole lifetime and never
/// takes ownership of it. Access the value through [`Store::lock`] or
/// [`Store::update`], or end the binding with [`Store::into_inner`].
///
/// `Store` is `Sync` when `T: Send`; concurrent [`Store::save`] calls are
/// serialized and never interleave writes to the file. Two processes sharing
/// one file are not coordinated.
pub struct Store<'a, T> {
    path: PathBuf,
    options: StoreOptions,
    value: Mutex<&'a mut T>,
    write_guard: Mutex<()>,
}

impl<'a, T> Store<'a, T>
where
    T: Serialize + DeserializeOwned,
{
    /// Same as [`Store::open`].
    pub fn new<P: Into<PathBuf>>(path: P, value: &'a mut T) -> Result<Self, StoreError> {
        Self::open(path, value)
    }

    /// Bind `value` to `path` with default options.
    ///
    /// A missing file leaves `value` exactly as given. An existing file is
    /// decoded and merged onto `value`: persisted entries win, entries only in
    /// the default are kept, sequences are replaced, and a data-carrying enum
    /// stored under a different variant replaces the default's variant.
    /// Nothing is written.
    ///
    /// When a file exists, the default itself is serialized to merge onto; a
    /// default that cannot be serialized (e.g. a map with non-string keys)
    /// fails with [`StoreError::Encode`] rather than a decode error. With no
    /// file present the default is never serialized here.
    ///
    /// On error the contents of `value` must not be relied upon.
    pub fn open<P: Into<PathBuf>>(path: P, value: &'a mut T) -> Result<Self, StoreError> {
        Self::open_with(path, value, StoreOptions::default())
    }

    pub fn open_with<P: Into<PathBuf>>(
        path: P,
        value: &'a mut T,
        options: StoreOptions,
    ) -> Result<Self, StoreError> {
        let path = path.into();
        let merged = persistence::load_into(&path, value)?;
        trace!(path = %path.display(), merged, "Opened store");

        Ok(Self {
            path,
            options,
            value: Mutex::new(value),
            write_guard: Mutex::new(()),
        })
    }

    /// Persist the current value, replacing the file all-or-nothing.
    ///
    /// On error the previous file contents (or absence) are left intact.
    pub fn save(&self) -> Result<(), StoreError> {
        let _write = self.write_guard.lock();
        persistence::save_from(&self.path, &self.options, &self.value)
    }

    /// Mutate the value under the lock, then save.
    ///
    /// The mutation is kept in memory even if the save fails.
    pub fn update<R, F>(&self, f: F) -> Result<R, StoreError>
    where
        F: FnOnce(&mut T) -> R,
    {
        let result = {
            let mut value = self.lock();
            f(&mut *value)
        };
        self.save()?;
        Ok(result)
    }
}

impl<'a, T> Store<'a, T> {
    /// Exclusive access to the bound value.
    ///
    /// The guard holds the value lock, which is not reentrant: calling
    /// [`Store::save`] or [`Store::update`] on the same thread while the guard
    /// is alive deadlocks. Drop the guard first, or use [`Store::update`].
    /// A save on another thread waits until the guard is dropped.
    pub fn lock(&self) -> MappedMutexGuard<'_, T> {
        MutexGuard::map(self.value.lock(), |value| &mut **value)
    }

    /// End the binding and hand the borrow back.
    pub fn into_inner(self) -> &'a mut T {
        self.value.into_inner()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }
}
