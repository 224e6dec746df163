//! Application layer for the demo shell.
//!
//! Everything here talks to the settings file only through
//! [`xmlconf_core::ConfigStore`]'s typed accessors.

pub mod display_settings;

pub use display_settings::{DisplaySettings, FontSizeError, FONT_SIZE_KEY, FULL_SCREEN_KEY};
