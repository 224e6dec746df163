//! `ConfigStore`: a closed set of string settings persisted to an XML file.
//!
//! # Lifecycle
//!
//! ```text
//! ConfigStore::new(path)        -- empty, filesystem untouched
//!  └─ add_setting(key, default) -- registers the key set (caller-defined schema)
//!  └─ load_file()               -- creates the file from defaults, or
//!                                  overwrites registered keys from the file
//!  └─ read_* / write_*          -- typed access to registered keys
//!  └─ save_file()               -- writes every setting back
//! ```
//!
//! # Closed key set
//!
//! [`ConfigStore::add_setting`] is the only operation that introduces a key.
//! Writes to unregistered keys are silently rejected, and entries in the
//! file whose key was never registered are dropped at load time.  Reads of
//! unregistered keys return a sentinel (`None`, NaN, `0`, `false`).
//!
//! # Failure policy
//!
//! `load_file` and `save_file` never report errors; they log them at `warn`
//! level.  `try_load_file` and `try_save_file` return the same errors to the
//! caller.  A failed load leaves the in-memory settings unchanged.

pub mod observer;

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::error::{Result, StoreError};
use crate::format::xml::{parse_document, render_document};
use crate::values;

pub use observer::{ObserverRegistry, SettingsObserver, SubscriptionId};

/// Ordered mapping from setting key to its string value.
///
/// Insertion order is the order elements are written on save.
pub type Settings = IndexMap<String, String>;

/// What [`ConfigStore::try_load_file`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The store has an empty path; nothing was read.
    Skipped,
    /// The file did not exist and was written from the current settings.
    Created,
    /// The file was read.  `applied` entries overwrote registered keys;
    /// `ignored` entries named keys that were never registered.
    Loaded { applied: usize, ignored: usize },
}

/// A mutable key-value settings store backed by an XML file.
///
/// Single-owner: the store does no internal locking.  Callers sharing it
/// across threads must serialize access themselves.
#[derive(Debug)]
pub struct ConfigStore {
    file_path: PathBuf,
    settings: Settings,
    observers: ObserverRegistry,
}

impl ConfigStore {
    /// Creates an empty store bound to `file_path`.  Does not touch disk.
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            settings: Settings::new(),
            observers: ObserverRegistry::new(),
        }
    }

    /// Path the store loads from and saves to.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Borrows the live settings collection.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    // ── Key set ───────────────────────────────────────────────────────────────

    /// Registers `key` with `default_value`.
    ///
    /// If the key is already registered its value is overwritten, exactly as
    /// [`write_string`](Self::write_string) would.
    pub fn add_setting(&mut self, key: impl Into<String>, default_value: impl Into<String>) {
        let key = key.into();
        let value = default_value.into();
        match self.settings.get_mut(&key) {
            Some(existing) => *existing = value,
            None => {
                self.settings.insert(key, value);
            }
        }
    }

    pub fn contains_setting(&self, key: &str) -> bool {
        self.settings.contains_key(key)
    }

    /// Unregisters `key`.  Does nothing if it is not registered.
    ///
    /// The relative order of the remaining keys is kept.
    pub fn remove_setting(&mut self, key: &str) {
        self.settings.shift_remove(key);
    }

    /// Returns a snapshot copy of every setting.
    pub fn setting_dictionary(&self) -> Settings {
        self.settings.clone()
    }

    /// Replaces the whole settings collection and notifies observers.
    ///
    /// Every call is a replacement, so observers are notified even when
    /// `settings` holds the same entries as the current collection.  The new
    /// collection becomes the registered key set.
    pub fn replace_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.observers.notify(&self.settings);
    }

    // ── Observers ─────────────────────────────────────────────────────────────

    pub fn subscribe(&mut self, observer: impl SettingsObserver + 'static) -> SubscriptionId {
        self.observers.subscribe(Box::new(observer))
    }

    pub fn subscribe_fn<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&Settings) + Send + 'static,
    {
        self.observers.subscribe_fn(callback)
    }

    /// Detaches an observer.  Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    // ── Persistence ───────────────────────────────────────────────────────────

    /// Loads settings from the file, logging and discarding any error.
    ///
    /// See [`try_load_file`](Self::try_load_file) for the exact behaviour.
    pub fn load_file(&mut self) {
        if let Err(e) = self.try_load_file() {
            warn!("failed to load settings from {}: {e}", self.file_path.display());
        }
    }

    /// Loads settings from the file.
    ///
    /// - Empty path: nothing happens ([`LoadOutcome::Skipped`]).
    /// - Missing file: the current settings are saved to create it
    ///   ([`LoadOutcome::Created`]), so defaults must be registered first.
    /// - Otherwise every child element of the root is written through
    ///   [`write_string`](Self::write_string); entries for unregistered keys
    ///   are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file cannot be read (or created),
    /// and [`StoreError::Xml`] / [`StoreError::Malformed`] if it is not a
    /// valid settings document.  The in-memory settings are unchanged on
    /// error.
    pub fn try_load_file(&mut self) -> Result<LoadOutcome> {
        if self.file_path.as_os_str().is_empty() {
            return Ok(LoadOutcome::Skipped);
        }

        let content = match std::fs::read_to_string(&self.file_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                self.try_save_file()?;
                info!(
                    "created settings file {} with {} default(s)",
                    self.file_path.display(),
                    self.settings.len()
                );
                return Ok(LoadOutcome::Created);
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.file_path.clone(),
                    source,
                })
            }
        };

        // Parse completely before applying anything.
        let entries = parse_document(&content)?;

        let mut applied = 0;
        let mut ignored = 0;
        for (key, value) in entries {
            if self.contains_setting(&key) {
                self.write_string(&key, value);
                applied += 1;
            } else {
                debug!("ignoring unregistered setting {key:?} in {}", self.file_path.display());
                ignored += 1;
            }
        }

        debug!(
            "loaded {applied} setting(s) from {} ({ignored} ignored)",
            self.file_path.display()
        );
        Ok(LoadOutcome::Loaded { applied, ignored })
    }

    /// Saves every setting to the file, logging and discarding any error.
    pub fn save_file(&self) {
        if let Err(e) = self.try_save_file() {
            warn!("failed to save settings to {}: {e}", self.file_path.display());
        }
    }

    /// Writes every setting to the file, replacing its previous content.
    ///
    /// The document is rendered in memory first, so an invalid key leaves
    /// the existing file untouched.  Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EmptyPath`], [`StoreError::InvalidElementName`]
    /// or [`StoreError::Io`].
    pub fn try_save_file(&self) -> Result<()> {
        if self.file_path.as_os_str().is_empty() {
            return Err(StoreError::EmptyPath);
        }

        let document = render_document(&self.settings)?;

        if let Some(dir) = self.file_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|source| StoreError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        std::fs::write(&self.file_path, document).map_err(|source| StoreError::Io {
            path: self.file_path.clone(),
            source,
        })?;

        debug!(
            "saved {} setting(s) to {}",
            self.settings.len(),
            self.file_path.display()
        );
        Ok(())
    }

    // ── Typed reads ───────────────────────────────────────────────────────────

    /// Returns the stored value, or `None` if `key` is not registered.
    pub fn read_string(&self, key: &str) -> Option<&str> {
        self.settings.get(key).map(String::as_str)
    }

    /// Reads a floating-point setting, rounded to `digits` fractional digits.
    ///
    /// `digits < 0` disables rounding.  Returns NaN if the key is not
    /// registered or the value does not parse.
    pub fn read_double(&self, key: &str, digits: i32) -> f64 {
        match self.read_string(key).and_then(values::parse_double) {
            Some(value) => values::round_to_digits(value, digits),
            None => f64::NAN,
        }
    }

    /// Reads an integer setting.
    ///
    /// Returns `0` both when the key is not registered and when the value
    /// does not parse; use [`contains_setting`](Self::contains_setting) or
    /// [`read_string`](Self::read_string) to tell them apart.
    pub fn read_int(&self, key: &str) -> i32 {
        self.read_string(key).and_then(values::parse_int).unwrap_or(0)
    }

    /// Reads a boolean setting: `"1"`, `"yes"` or `"true"` in any case.
    /// Every other value, and an unregistered key, is `false`.
    pub fn read_boolean(&self, key: &str) -> bool {
        self.read_string(key).is_some_and(values::parse_bool)
    }

    // ── Typed writes ──────────────────────────────────────────────────────────

    /// Overwrites a registered setting.  Writes to unregistered keys are
    /// rejected without error.
    pub fn write_string(&mut self, key: &str, value: impl Into<String>) {
        match self.settings.get_mut(key) {
            Some(existing) => *existing = value.into(),
            None => debug!("rejected write to unregistered setting {key:?}"),
        }
    }

    /// Writes a floating-point setting with at most `digits` fractional
    /// digits (trailing zeros trimmed).  `digits < 0` writes the shortest
    /// exact representation.
    pub fn write_double(&mut self, key: &str, value: f64, digits: i32) {
        self.write_string(key, values::format_double(value, digits));
    }

    pub fn write_int(&mut self, key: &str, value: i32) {
        self.write_string(key, value.to_string());
    }

    /// Writes `"1"` for true and `"0"` for false.
    pub fn write_boolean(&mut self, key: &str, value: bool) {
        self.write_string(key, values::format_bool(value));
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
