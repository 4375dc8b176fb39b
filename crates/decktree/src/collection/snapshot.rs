//! # Collection Snapshots
//!
//! A snapshot is a JSON export of everything the deck list needs from a
//! collection. Two shapes are accepted, selected by the `schema` field.
//!
//! ## Modern
//!
//! The backend already produces a tree. Each deck carries its own component name,
//! counts and flags; full names and depths are derived from nesting.
//!
//! ```json
//! {
//!   "schema": "modern",
//!   "current_deck": 11,
//!   "decks": [
//!     { "id": 10, "name": "Languages", "counts": { "new": 12, "learning": 3, "review": 20 },
//!       "children": [ { "id": 11, "name": "Spanish" } ] }
//!   ]
//! }
//! ```
//!
//! ## Legacy
//!
//! A flat list of decks keyed by qualified names, with the dynamic flag stored as
//! `dyn` and counts as a `[new, learning, review]` triple. The tree is rebuilt from
//! the names, siblings sorted by name. A deck whose parent is missing from the list
//! gets a synthesized parent with zero counts and a negative id.
//!
//! ```json
//! {
//!   "schema": "legacy",
//!   "current_deck": 11,
//!   "default_deck_cards": 0,
//!   "decks": [
//!     { "id": 1, "name": "Default" },
//!     { "id": 11, "name": "Languages::Spanish", "collapsed": true, "dyn": 0, "counts": [1, 0, 2] }
//!   ]
//! }
//! ```
//!
//! Both shapes end up as the same [`DeckNode`] tree inside an
//! [`InMemoryCollection`]; nothing downstream knows which one was loaded.

use super::memory::InMemoryCollection;
use crate::error::{DeckError, Result};
use crate::model::{forest, Counts, DeckId, DeckNode, NAME_SEPARATOR};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(tag = "schema", rename_all = "lowercase")]
enum SnapshotFile {
    Modern {
        #[serde(default)]
        current_deck: Option<DeckId>,
        #[serde(default)]
        decks: Vec<ModernDeck>,
    },
    Legacy {
        #[serde(default)]
        current_deck: Option<DeckId>,
        #[serde(default)]
        default_deck_cards: u32,
        #[serde(default)]
        decks: Vec<LegacyDeck>,
    },
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct ModernDeck {
    id: DeckId,
    name: String,
    #[serde(default)]
    counts: Counts,
    #[serde(default)]
    collapsed: bool,
    #[serde(default)]
    filtered: bool,
    #[serde(default = "default_true")]
    display_counts: bool,
    #[serde(default)]
    children: Vec<ModernDeck>,
}

#[derive(Debug, Clone, Deserialize)]
struct LegacyDeck {
    id: DeckId,
    name: String,
    #[serde(default)]
    collapsed: bool,
    #[serde(rename = "dyn", default)]
    dynamic: u8,
    #[serde(default)]
    counts: [u32; 3],
}

pub fn load_snapshot(path: &Path) -> Result<InMemoryCollection> {
    let content = std::fs::read_to_string(path)?;
    parse_snapshot(&content)
}

pub fn parse_snapshot(json: &str) -> Result<InMemoryCollection> {
    let file: SnapshotFile = serde_json::from_str(json)?;
    let mut seen = HashSet::new();

    let (decks, current, legacy, default_deck_cards) = match file {
        SnapshotFile::Modern {
            current_deck,
            decks,
        } => {
            let nodes = decks
                .into_iter()
                .map(|deck| modern_node(deck, None, &mut seen))
                .collect::<Result<Vec<_>>>()?;
            (nodes, current_deck, false, 0)
        }
        SnapshotFile::Legacy {
            current_deck,
            default_deck_cards,
            decks,
        } => {
            for deck in &decks {
                check_unique(deck.id, &mut seen)?;
            }
            (legacy_tree(decks)?, current_deck, true, default_deck_cards)
        }
    };

    let mut collection = InMemoryCollection::new(forest(decks))
        .with_legacy_schema(legacy)
        .with_default_deck_cards(default_deck_cards);
    if let Some(id) = current {
        collection.select_deck(id);
    }
    Ok(collection)
}

fn check_unique(id: DeckId, seen: &mut HashSet<DeckId>) -> Result<()> {
    if seen.insert(id) {
        Ok(())
    } else {
        Err(DeckError::Snapshot(format!("duplicate deck id {}", id)))
    }
}

fn modern_node(
    deck: ModernDeck,
    parent: Option<&str>,
    seen: &mut HashSet<DeckId>,
) -> Result<DeckNode> {
    check_unique(deck.id, seen)?;
    if deck.name.contains(NAME_SEPARATOR) {
        return Err(DeckError::Snapshot(format!(
            "deck {} has '{}' in its component name \"{}\"",
            deck.id, NAME_SEPARATOR, deck.name
        )));
    }

    let full_name = match parent {
        Some(parent) => format!("{}{}{}", parent, NAME_SEPARATOR, deck.name),
        None => deck.name,
    };
    let children = deck
        .children
        .into_iter()
        .map(|child| modern_node(child, Some(&full_name), seen))
        .collect::<Result<Vec<_>>>()?;

    Ok(DeckNode::new(deck.id, full_name)
        .with_counts(deck.counts)
        .with_collapsed(deck.collapsed)
        .with_filtered(deck.filtered)
        .with_display_counts(deck.display_counts)
        .with_children(children))
}

/// Lower-cased name components; orders parents before children and siblings by name.
type NameKey = Vec<String>;

fn name_key(name: &str) -> NameKey {
    name.split(NAME_SEPARATOR)
        .map(|part| part.to_lowercase())
        .collect()
}

fn legacy_tree(decks: Vec<LegacyDeck>) -> Result<Vec<DeckNode>> {
    let mut by_name: BTreeMap<NameKey, LegacyDeck> = BTreeMap::new();
    for deck in decks {
        if deck.name.split(NAME_SEPARATOR).any(|part| part.is_empty()) {
            return Err(DeckError::Snapshot(format!(
                "deck {} has an empty name component: \"{}\"",
                deck.id, deck.name
            )));
        }
        let key = name_key(&deck.name);
        if let Some(existing) = by_name.get(&key) {
            return Err(DeckError::Snapshot(format!(
                "decks {} and {} share the name \"{}\"",
                existing.id, deck.id, deck.name
            )));
        }
        by_name.insert(key, deck);
    }

    // Synthesize missing ancestors
    let mut next_synthetic: DeckId = -1;
    let names: Vec<String> = by_name.values().map(|deck| deck.name.clone()).collect();
    for name in names {
        let parts: Vec<&str> = name.split(NAME_SEPARATOR).collect();
        for len in 1..parts.len() {
            let ancestor = parts[..len].join(NAME_SEPARATOR);
            by_name.entry(name_key(&ancestor)).or_insert_with(|| {
                let deck = LegacyDeck {
                    id: next_synthetic,
                    name: ancestor.clone(),
                    collapsed: false,
                    dynamic: 0,
                    counts: [0, 0, 0],
                };
                next_synthetic -= 1;
                deck
            });
        }
    }

    Ok(children_of(&[], &by_name))
}

fn children_of(prefix: &[String], by_name: &BTreeMap<NameKey, LegacyDeck>) -> Vec<DeckNode> {
    by_name
        .iter()
        .filter(|(key, _)| key.len() == prefix.len() + 1 && key.starts_with(prefix))
        .map(|(key, deck)| {
            let [new, learning, review] = deck.counts;
            DeckNode::new(deck.id, deck.name.clone())
                .with_counts(Counts::new(new, learning, review))
                .with_collapsed(deck.collapsed)
                .with_filtered(deck.dynamic != 0)
                .with_children(children_of(key, by_name))
        })
        .collect()
}
