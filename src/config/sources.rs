//! Option sources layered over the defaults: an options file, then environment.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use std::path::Path;
use tracing::warn;

/// Add an options file (TOML, JSON, YAML by extension) if it exists.
pub fn add_file(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if !path.exists() {
        warn!(
            config_path = %path.display(),
            "Store options file not found, using defaults and environment"
        );
        return Ok(builder);
    }
    Ok(builder.add_source(File::from(path).required(false)))
}

/// Add `{prefix}_*` environment variables, e.g. `PERSIST_PRETTY=false`.
pub fn add_env(
    builder: ConfigBuilder<DefaultState>,
    prefix: &str,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(
        Environment::with_prefix(prefix)
            .prefix_separator("_")
            .try_parsing(true),
    ))
}
