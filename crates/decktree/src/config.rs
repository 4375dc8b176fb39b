//! # Configuration
//!
//! Deck tree configuration is loaded with [`confique`], layering environment
//! variables over a TOML file over compiled defaults.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `DECKTREE_SNAPSHOT`, `DECKTREE_LOCALE`, etc.
//! 2. **Config file**: `decktree.toml`, either given explicitly or found in the OS
//!    config directory (the CLI resolves the path).
//! 3. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! A missing config file is not an error; a malformed one is.
//!
//! ## Available Settings
//!
//! | Key | Env | Default | Description |
//! |-----|-----|---------|-------------|
//! | `snapshot` | `DECKTREE_SNAPSHOT` | none | Collection snapshot to load |
//! | `legacy_schema` | `DECKTREE_LEGACY_SCHEMA` | from snapshot | Force legacy display rules on or off |
//! | `default_deck_id` | `DECKTREE_DEFAULT_DECK_ID` | `1` | Id of the default deck |
//! | `locale` | `DECKTREE_LOCALE` | from `LC_ALL`/`LC_CTYPE`/`LANG` | Locale tag used for filtering |
//! | `seconds_per_card` | `DECKTREE_SECONDS_PER_CARD` | `10` | Review pace used for the ETA |

use crate::collection::memory::InMemoryCollection;
use crate::error::Result;
use crate::locale::Locale;
use crate::model::DeckId;
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "decktree.toml";

/// Configuration for the deck tree, stored in `decktree.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DeckTreeConfig {
    /// Path to a collection snapshot (JSON).
    #[config(env = "DECKTREE_SNAPSHOT")]
    pub snapshot: Option<PathBuf>,

    /// Overrides the schema recorded in the snapshot.
    #[config(env = "DECKTREE_LEGACY_SCHEMA")]
    pub legacy_schema: Option<bool>,

    /// Id of the collection's default deck.
    #[config(env = "DECKTREE_DEFAULT_DECK_ID", default = 1)]
    pub default_deck_id: DeckId,

    /// Locale tag such as "tr_TR.UTF-8". When absent, the process locale is used.
    #[config(env = "DECKTREE_LOCALE")]
    pub locale: Option<String>,

    /// Average seconds spent per card, used to estimate the ETA.
    #[config(env = "DECKTREE_SECONDS_PER_CARD", default = 10)]
    pub seconds_per_card: u32,
}

impl Default for DeckTreeConfig {
    fn default() -> Self {
        Self {
            snapshot: None,
            legacy_schema: None,
            default_deck_id: 1,
            locale: None,
            seconds_per_card: 10,
        }
    }
}

impl DeckTreeConfig {
    /// Loads configuration from the environment and, when given, a TOML file.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = file {
            builder = builder.file(path);
        }
        let config = builder.load()?;
        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// The configured locale, falling back to the process environment.
    pub fn locale(&self) -> Locale {
        self.locale
            .as_deref()
            .map(Locale::from_tag)
            .unwrap_or_else(Locale::from_env)
    }

    /// Renders the resolved configuration as TOML. Unset optional keys are omitted.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Applies the collection-level settings to a loaded collection.
    pub fn apply(&self, collection: InMemoryCollection) -> InMemoryCollection {
        let collection = collection
            .with_default_deck_id(self.default_deck_id)
            .with_seconds_per_card(self.seconds_per_card);
        match self.legacy_schema {
            Some(legacy) => collection.with_legacy_schema(legacy),
            None => collection,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::Collection;
    use crate::model::Counts;
    use std::io::Write;

    fn toml_file() -> tempfile::NamedTempFile {
        tempfile::Builder::new().suffix(".toml").tempfile().unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = DeckTreeConfig::default();
        assert_eq!(config.default_deck_id, 1);
        assert_eq!(config.seconds_per_card, 10);
        assert!(config.snapshot.is_none());
        assert!(config.legacy_schema.is_none());
    }

    #[test]
    fn test_explicit_locale_wins() {
        let config = DeckTreeConfig {
            locale: Some("tr_TR.UTF-8".to_string()),
            ..Default::default()
        };
        assert_eq!(config.locale(), Locale::Turkic);

        let config = DeckTreeConfig {
            locale: Some("en_US".to_string()),
            ..Default::default()
        };
        assert_eq!(config.locale(), Locale::Invariant);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = toml_file();
        writeln!(file, "locale = \"az\"").unwrap();
        writeln!(file, "seconds_per_card = 30").unwrap();
        writeln!(file, "legacy_schema = true").unwrap();

        let config = DeckTreeConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.locale.as_deref(), Some("az"));
        assert_eq!(config.seconds_per_card, 30);
        assert_eq!(config.legacy_schema, Some(true));
        assert_eq!(config.default_deck_id, 1);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DeckTreeConfig::load(Some(&dir.path().join(CONFIG_FILE_NAME))).unwrap();
        assert_eq!(config.seconds_per_card, 10);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = toml_file();
        writeln!(file, "seconds_per_card = \"slow\"").unwrap();
        assert!(DeckTreeConfig::load(Some(file.path())).is_err());
    }

    #[test]
    fn test_apply_to_collection() {
        let config = DeckTreeConfig {
            legacy_schema: Some(true),
            default_deck_id: 7,
            seconds_per_card: 60,
            ..Default::default()
        };
        let collection = config.apply(InMemoryCollection::default());
        assert!(collection.legacy_schema());
        assert_eq!(collection.default_deck_id(), 7);
        assert_eq!(collection.eta(Counts::new(2, 0, 0)), Some(2));
    }

    #[test]
    fn test_renders_as_toml() {
        let text = DeckTreeConfig::default().to_toml().unwrap();
        assert!(text.contains("default_deck_id = 1"));
        assert!(text.contains("seconds_per_card = 10"));
        assert!(!text.contains("locale"));

        let config = DeckTreeConfig {
            snapshot: Some(PathBuf::from("decks.json")),
            ..Default::default()
        };
        let text = config.to_toml().unwrap();
        assert!(text.contains("snapshot = \"decks.json\""));
        let back: DeckTreeConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }
}
