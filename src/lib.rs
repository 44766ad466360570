//! Persist: local JSON state for long-running processes
//!
//! Binds a caller-owned value (mapping, record, or sequence) to a file. At
//! startup any previously saved state is merged onto the caller's defaults;
//! afterwards the value is saved explicitly and atomically.
//!
//! ```no_run
//! use persist::Store;
//! use std::collections::HashMap;
//!
//! let mut settings: HashMap<String, String> =
//!     HashMap::from([("greeting".to_string(), "hello".to_string())]);
//!
//! let store = Store::open("settings.json", &mut settings)?;
//! store.lock().insert("channel".to_string(), "#ops".to_string());
//! store.save()?;
//! # Ok::<(), persist::StoreError>(())
//! ```

pub mod config;
pub mod error;
pub mod fsio;
pub mod logging;
pub mod merge;
pub mod shape;
pub mod store;

pub use config::{OptionsLoader, StoreOptions};
pub use error::StoreError;
pub use shape::Shape;
pub use store::Store;
