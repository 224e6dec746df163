//! # xmlconf-core
//!
//! A small, mutable key-value settings store persisted as an XML document,
//! with typed accessors layered over string values.
//!
//! The store is meant to sit behind a UI: the caller registers the keys it
//! expects together with their defaults, loads the file, reads typed values
//! to initialise its state, writes typed values as the user changes them,
//! and saves on shutdown.
//!
//! ```rust,no_run
//! use xmlconf_core::ConfigStore;
//!
//! let mut store = ConfigStore::new("Config.xml");
//! store.add_setting("FullScreen", "0");
//! store.add_setting("FontSize", "14");
//! store.load_file();
//!
//! let full_screen = store.read_boolean("FullScreen");
//! store.write_boolean("FullScreen", !full_screen);
//! store.write_double("FontSize", 16.5, 1);
//! store.save_file();
//! ```
//!
//! - **`store`** – [`ConfigStore`], the closed key-set policy, change
//!   notification.
//! - **`format`** – the XML document codec.
//! - **`values`** – string ↔ bool/int/double coercion and rounding.
//! - **`error`** – [`StoreError`], returned only by the `try_*` entry points.

pub mod error;
pub mod format;
pub mod store;
pub mod values;

pub use error::StoreError;
pub use store::{ConfigStore, LoadOutcome, Settings, SettingsObserver, SubscriptionId};
