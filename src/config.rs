//! Store options
//!
//! Encoding and durability tunables for a store. Options can be built in code
//! or loaded in layers: defaults, then an optional options file, then
//! `PERSIST_*` environment variables.

use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod defaults;
mod sources;

/// Environment prefix read by [`OptionsLoader`] unless overridden.
pub const DEFAULT_ENV_PREFIX: &str = "PERSIST";

/// How a store encodes and writes its file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreOptions {
    /// Indent the JSON so the file stays readable by humans
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    /// fsync the temporary file before it is renamed into place
    #[serde(default = "default_sync")]
    pub sync: bool,

    /// Create missing parent directories on save
    #[serde(default)]
    pub create_dirs: bool,
}

fn default_pretty() -> bool {
    true
}

fn default_sync() -> bool {
    true
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
            sync: default_sync(),
            create_dirs: false,
        }
    }
}

impl StoreOptions {
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    pub fn create_dirs(mut self, create_dirs: bool) -> Self {
        self.create_dirs = create_dirs;
        self
    }

    /// Load options from defaults, `file` (if given) and `PERSIST_*` variables.
    pub fn load(file: Option<&Path>) -> Result<Self, StoreError> {
        let mut loader = OptionsLoader::new();
        if let Some(file) = file {
            loader = loader.file(file);
        }
        loader.load()
    }
}

/// Layered loader for [`StoreOptions`]
///
/// Precedence, lowest to highest: built-in defaults, options file,
/// environment variables.
#[derive(Debug, Clone)]
pub struct OptionsLoader {
    file: Option<PathBuf>,
    env_prefix: String,
}

impl Default for OptionsLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl OptionsLoader {
    pub fn new() -> Self {
        Self {
            file: None,
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
        }
    }

    pub fn file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.file = Some(path.into());
        self
    }

    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn load(&self) -> Result<StoreOptions, StoreError> {
        let mut builder = defaults::builder_with_defaults()?;
        if let Some(ref file) = self.file {
            builder = sources::add_file(builder, file)?;
        }
        builder = sources::add_env(builder, &self.env_prefix)?;

        let options = builder.build()?.try_deserialize::<StoreOptions>()?;
        Ok(options)
    }
}
