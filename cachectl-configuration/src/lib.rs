//! Declarative configuration for [`cachectl`].
//!
//! - [`from_yaml`] / [`from_json`] load a single
//!   [`GenerationConfig`](cachectl::GenerationConfig) in form field naming.
//! - [`PolicyFile`] holds named policies, each a [`Preset`] or an explicit
//!   configuration.
//! - [`Preferences`] keeps presentation state such as the [`Theme`] behind
//!   the [`PreferenceStore`] interface, away from the header engine.

pub mod error;
pub mod loader;
pub mod policy;
pub mod preferences;

pub use error::{ConfigError, PreferenceError};
pub use loader::{from_json, from_yaml, to_json};
pub use policy::{PolicyEntry, PolicyFile, Preset};
pub use preferences::{MemoryPreferenceStore, PreferenceStore, Preferences, Theme};
