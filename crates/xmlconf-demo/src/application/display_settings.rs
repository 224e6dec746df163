//! Display preferences backed by a settings file.
//!
//! Holds the two preferences a window shell keeps between runs:
//!
//! | Key          | Default | Meaning                                   |
//! |--------------|---------|-------------------------------------------|
//! | `FullScreen` | `0`     | Start maximised                           |
//! | `FontSize`   | `14`    | Font size for labels and inputs (points)  |
//!
//! The shell opens the preferences at startup, reads them to initialise its
//! widgets, writes them as the user toggles options, and saves on close.

use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;
use xmlconf_core::{ConfigStore, StoreError};

pub const FULL_SCREEN_KEY: &str = "FullScreen";
pub const FONT_SIZE_KEY: &str = "FontSize";

const DEFAULT_FULL_SCREEN: &str = "0";
const DEFAULT_FONT_SIZE: &str = "14";

/// Why a font size entered by the user was not applied.
#[derive(Debug, Error, PartialEq)]
pub enum FontSizeError {
    #[error("font size {0:?} is not a number")]
    NotANumber(String),
    #[error("font size {0} must not be negative")]
    Negative(f64),
}

/// Typed view over the display keys of a [`ConfigStore`].
#[derive(Debug)]
pub struct DisplaySettings {
    store: ConfigStore,
}

impl DisplaySettings {
    /// Registers the display defaults and loads `path`.
    ///
    /// A missing file is created from the defaults.  An unreadable or
    /// corrupt file is logged and the defaults stay in effect.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut store = ConfigStore::new(path);
        store.add_setting(FULL_SCREEN_KEY, DEFAULT_FULL_SCREEN);
        store.add_setting(FONT_SIZE_KEY, DEFAULT_FONT_SIZE);
        store.load_file();
        Self { store }
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn is_full_screen(&self) -> bool {
        self.store.read_boolean(FULL_SCREEN_KEY)
    }

    /// Stores the full-screen flag and returns the value read back, which
    /// is what the window uses to pick its state.
    pub fn set_full_screen(&mut self, on: bool) -> bool {
        self.store.write_boolean(FULL_SCREEN_KEY, on);
        self.is_full_screen()
    }

    /// The stored font size when it is a positive number.
    ///
    /// `None` means the display should keep whatever size it already uses.
    pub fn font_size(&self) -> Option<f64> {
        let size = self.store.read_double(FONT_SIZE_KEY, -1);
        (size > 0.0).then_some(size)
    }

    /// Raw stored font size, as shown in the text box.
    pub fn font_size_text(&self) -> &str {
        self.store.read_string(FONT_SIZE_KEY).unwrap_or_default()
    }

    /// Parses `text` as a font size and stores it.
    ///
    /// `digits` limits the stored fractional digits; negative keeps full
    /// precision.  Rejected input leaves the stored value unchanged.
    ///
    /// # Errors
    ///
    /// [`FontSizeError::NotANumber`] if `text` does not parse and
    /// [`FontSizeError::Negative`] if it is below zero.
    pub fn apply_font_size(&mut self, text: &str, digits: i32) -> Result<Option<f64>, FontSizeError> {
        let size: f64 = text
            .trim()
            .parse()
            .map_err(|_| FontSizeError::NotANumber(text.to_string()))?;
        if size < 0.0 {
            return Err(FontSizeError::Negative(size));
        }

        self.store.write_double(FONT_SIZE_KEY, size, digits);
        debug!("font size set to {}", self.font_size_text());
        Ok(self.font_size())
    }

    /// Saves the preferences, logging any failure.
    pub fn close(self) {
        self.store.save_file();
    }

    /// Saves the preferences and reports failure to the caller.
    ///
    /// # Errors
    ///
    /// Returns the [`StoreError`] from the underlying save.
    pub fn try_close(self) -> Result<(), StoreError> {
        self.store.try_save_file()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Preferences that never touch disk (empty path skips loading).
    fn in_memory() -> DisplaySettings {
        DisplaySettings::open("")
    }

    #[test]
    fn test_defaults_are_windowed_and_14pt() {
        // Arrange / Act
        let display = in_memory();

        // Assert
        assert!(!display.is_full_screen());
        assert_eq!(display.font_size(), Some(14.0));
        assert_eq!(display.font_size_text(), "14");
    }

    #[test]
    fn test_set_full_screen_round_trips() {
        let mut display = in_memory();
        assert!(display.set_full_screen(true));
        assert_eq!(display.store().read_string(FULL_SCREEN_KEY), Some("1"));
        assert!(!display.set_full_screen(false));
        assert_eq!(display.store().read_string(FULL_SCREEN_KEY), Some("0"));
    }

    #[test]
    fn test_apply_font_size_stores_trimmed_value() {
        let mut display = in_memory();

        let applied = display.apply_font_size(" 16.500 ", 2);

        assert_eq!(applied, Ok(Some(16.5)));
        assert_eq!(display.font_size_text(), "16.5");
    }

    #[test]
    fn test_apply_font_size_rejects_text() {
        let mut display = in_memory();

        let result = display.apply_font_size("big", -1);

        assert_eq!(result, Err(FontSizeError::NotANumber("big".to_string())));
        assert_eq!(display.font_size_text(), "14");
    }

    #[test]
    fn test_apply_font_size_rejects_negative() {
        let mut display = in_memory();

        let result = display.apply_font_size("-3", -1);

        assert_eq!(result, Err(FontSizeError::Negative(-3.0)));
        assert_eq!(display.font_size(), Some(14.0));
    }

    #[test]
    fn test_zero_font_size_is_stored_but_not_applied() {
        let mut display = in_memory();

        let result = display.apply_font_size("0", -1);

        assert_eq!(result, Ok(None));
        assert_eq!(display.font_size_text(), "0");
        assert_eq!(display.font_size(), None);
    }

    #[test]
    fn test_try_close_without_path_reports_error() {
        let display = in_memory();
        assert!(matches!(display.try_close(), Err(StoreError::EmptyPath)));
    }
}
