//! Presentation preferences kept apart from the header engine.
//!
//! A [`PreferenceStore`] is an explicit key/value store with `init`, `read`
//! and `write`. [`Preferences`] adds typed access on top of any store.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::PreferenceError;

/// Key under which the colour theme is stored.
pub const THEME_KEY: &str = "theme";

/// Colour theme of the presentation layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light colours.
    Light,
    /// Dark colours.
    Dark,
    /// Follow the operating system.
    #[default]
    System,
}

impl Theme {
    /// Stored representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            other => Err(PreferenceError::InvalidValue {
                key: THEME_KEY.to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// String key/value storage for preferences.
///
/// Stores must be initialized before use.
pub trait PreferenceStore {
    /// Prepares the store. Calling it twice is harmless.
    fn init(&self) -> Result<(), PreferenceError>;

    /// Reads a value; `Ok(None)` if it was never written.
    fn read(&self, key: &str) -> Result<Option<String>, PreferenceError>;

    /// Writes a value, replacing any previous one.
    fn write(&self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// In-memory [`PreferenceStore`], safe to share between threads.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: DashMap<String, String>,
    initialized: AtomicBool,
}

impl MemoryPreferenceStore {
    /// Creates an uninitialized, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_initialized(&self) -> Result<(), PreferenceError> {
        if self.initialized.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(PreferenceError::NotInitialized)
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn init(&self) -> Result<(), PreferenceError> {
        self.initialized.store(true, Ordering::Release);
        Ok(())
    }

    fn read(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        self.ensure_initialized()?;
        Ok(self.values.get(key).map(|value| value.clone()))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.ensure_initialized()?;
        trace!(key, value, "writing preference");
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Typed preferences over a [`PreferenceStore`].
#[derive(Debug)]
pub struct Preferences<S> {
    store: S,
}

impl<S> Preferences<S>
where
    S: PreferenceStore,
{
    /// Initializes `store` and wraps it.
    pub fn init(store: S) -> Result<Self, PreferenceError> {
        store.init()?;
        Ok(Self { store })
    }

    /// Current theme, [`Theme::System`] when unset.
    pub fn theme(&self) -> Result<Theme, PreferenceError> {
        match self.store.read(THEME_KEY)? {
            Some(value) => value.parse(),
            None => Ok(Theme::default()),
        }
    }

    /// Stores the theme.
    pub fn set_theme(&self, theme: Theme) -> Result<(), PreferenceError> {
        self.store.write(THEME_KEY, theme.as_str())
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
