//! Built-in defaults, the lowest layer of option loading.

use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with the store defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("pretty", super::default_pretty())?
        .set_default("sync", super::default_sync())?
        .set_default("create_dirs", false)
}
