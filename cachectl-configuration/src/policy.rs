//! Named `Cache-Control` policies.
//!
//! A policy file maps names to either a [`Preset`] or an explicit
//! [`GenerationConfig`]. Order is preserved:
//!
//! ```yaml
//! policies:
//!   assets: static-assets
//!   account: private-user
//!   feed:
//!     cacheability: public
//!     sMaxAge: { amount: 5, unit: minutes, enabled: true }
//!     staleWhileRevalidate: { amount: 30, unit: seconds, enabled: true }
//! ```

use std::fmt;
use std::str::FromStr;

use cachectl::{Cacheability, GenerationConfig, TimeUnit, TimedDirective};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

/// Ready-made configurations for common situations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Fingerprinted assets: public for a year, never revalidated.
    StaticAssets,
    /// Nothing is stored anywhere.
    NoStore,
    /// Per-user pages: browser only, always revalidated.
    PrivateUser,
    /// Stored, but checked with the origin before each use.
    RevalidateAlways,
    /// Short shared-cache lifetime with background refresh.
    CdnShort,
}

impl Preset {
    /// Every preset.
    pub const ALL: [Preset; 5] = [
        Preset::StaticAssets,
        Preset::NoStore,
        Preset::PrivateUser,
        Preset::RevalidateAlways,
        Preset::CdnShort,
    ];

    /// Name used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::StaticAssets => "static-assets",
            Preset::NoStore => "no-store",
            Preset::PrivateUser => "private-user",
            Preset::RevalidateAlways => "revalidate-always",
            Preset::CdnShort => "cdn-short",
        }
    }

    /// The configuration this preset stands for.
    pub fn config(&self) -> GenerationConfig {
        match self {
            Preset::StaticAssets => GenerationConfig::default()
                .cacheability(Cacheability::Public)
                .immutable(true)
                .max_age(TimedDirective::new(365, TimeUnit::Days)),
            Preset::NoStore => GenerationConfig::default().no_store(true),
            Preset::PrivateUser => GenerationConfig::default()
                .cacheability(Cacheability::Private)
                .no_cache(true),
            Preset::RevalidateAlways => GenerationConfig::default()
                .no_cache(true)
                .max_age(TimedDirective::new(0, TimeUnit::Seconds)),
            Preset::CdnShort => GenerationConfig::default()
                .cacheability(Cacheability::Public)
                .max_age(TimedDirective::new(1, TimeUnit::Minutes))
                .s_max_age(TimedDirective::new(5, TimeUnit::Minutes))
                .stale_while_revalidate(TimedDirective::new(30, TimeUnit::Seconds))
                .stale_if_error(TimedDirective::new(1, TimeUnit::Days)),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownPreset(s.to_string()))
    }
}

/// One named policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PolicyEntry {
    /// Shorthand: `name: static-assets`
    Preset(Preset),
    /// Explicit form state.
    Config(GenerationConfig),
}

/// A policy entry before the preset name is resolved.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPolicyEntry {
    Preset(String),
    Config(GenerationConfig),
}

impl TryFrom<RawPolicyEntry> for PolicyEntry {
    type Error = ConfigError;

    fn try_from(raw: RawPolicyEntry) -> Result<Self, Self::Error> {
        match raw {
            RawPolicyEntry::Preset(name) => name.parse().map(PolicyEntry::Preset),
            RawPolicyEntry::Config(config) => Ok(PolicyEntry::Config(config)),
        }
    }
}

impl PolicyEntry {
    /// Resolves the entry to a configuration.
    pub fn config(&self) -> GenerationConfig {
        match self {
            PolicyEntry::Preset(preset) => preset.config(),
            PolicyEntry::Config(config) => config.clone(),
        }
    }
}

/// A document of named policies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPolicyFile")]
pub struct PolicyFile {
    /// Policies in document order.
    pub policies: IndexMap<String, PolicyEntry>,
}

#[derive(Debug, Deserialize)]
struct RawPolicyFile {
    #[serde(default)]
    policies: IndexMap<String, RawPolicyEntry>,
}

impl TryFrom<RawPolicyFile> for PolicyFile {
    type Error = ConfigError;

    fn try_from(raw: RawPolicyFile) -> Result<Self, Self::Error> {
        let policies = raw
            .policies
            .into_iter()
            .map(|(name, entry)| Ok((name, PolicyEntry::try_from(entry)?)))
            .collect::<Result<_, ConfigError>>()?;
        Ok(Self { policies })
    }
}

impl PolicyFile {
    /// Deserializes a policy file from YAML.
    ///
    /// A shorthand naming no known preset fails with
    /// [`ConfigError::UnknownPreset`].
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let raw: RawPolicyFile = serde_saphyr::from_str(yaml)?;
        let file = Self::try_from(raw)?;
        debug!(policies = file.policies.len(), "loaded cache-control policy file");
        Ok(file)
    }

    /// Configuration of the policy called `name`.
    pub fn get(&self, name: &str) -> Option<GenerationConfig> {
        self.policies.get(name).map(PolicyEntry::config)
    }

    /// Generated header of the policy called `name`.
    pub fn header(&self, name: &str) -> Option<String> {
        self.get(name).map(|config| cachectl::generate(&config))
    }

    /// Every policy rendered to its header, in document order.
    pub fn render(&self) -> IndexMap<String, String> {
        self.policies
            .iter()
            .map(|(name, entry)| (name.clone(), cachectl::generate(&entry.config())))
            .collect()
    }
}
