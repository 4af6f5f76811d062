//! Character catalog and roster resolution.

use std::str::FromStr;

use anyhow::{Context, bail};
use battle_core::{CharacterDefinition, Progression};

/// One roster slot: a character id plus the owner's progression for it.
///
/// Parsed from `id`, `id:level` or `id:level:limit_break`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosterEntry {
    pub id: String,
    pub progression: Progression,
}

impl RosterEntry {
    pub fn new(id: impl Into<String>, progression: Progression) -> Self {
        Self {
            id: id.into(),
            progression,
        }
    }

    /// Parses a comma-separated roster such as `gojo,nanami:10,yuji:20:1`.
    pub fn parse_list(list: &str) -> anyhow::Result<Vec<Self>> {
        list.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl FromStr for RosterEntry {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        let id = parts.next().unwrap_or_default().trim();
        if id.is_empty() {
            bail!("roster entry '{s}' has no character id");
        }

        let mut number = |what: &str, default: u32| -> anyhow::Result<u32> {
            match parts.next() {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .with_context(|| format!("invalid {what} in roster entry '{s}'")),
                None => Ok(default),
            }
        };
        let level = number("level", Progression::BASE.level)?;
        let limit_break = number("limit break", Progression::BASE.limit_break)?;
        if level == 0 {
            bail!("roster entry '{s}' has level 0");
        }
        if parts.next().is_some() {
            bail!("roster entry '{s}' has too many fields");
        }

        Ok(Self::new(id, Progression::new(level, limit_break)))
    }
}

/// Character definitions indexed by id, in authoring order.
#[derive(Clone, Debug, Default)]
pub struct CharacterCatalog {
    characters: Vec<CharacterDefinition>,
}

impl CharacterCatalog {
    /// Builds a catalog, rejecting duplicate ids.
    pub fn new(characters: Vec<CharacterDefinition>) -> anyhow::Result<Self> {
        for (index, character) in characters.iter().enumerate() {
            if characters[..index].iter().any(|other| other.id == character.id) {
                bail!("duplicate character id '{}'", character.id);
            }
        }
        Ok(Self { characters })
    }

    pub fn get(&self, id: &str) -> Option<&CharacterDefinition> {
        self.characters.iter().find(|character| character.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CharacterDefinition> {
        self.characters.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.characters.iter().map(|character| character.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Resolves every entry to its definition.
    pub fn roster(
        &self,
        entries: &[RosterEntry],
    ) -> anyhow::Result<Vec<(&CharacterDefinition, Progression)>> {
        entries
            .iter()
            .map(|entry| {
                self.get(&entry.id)
                    .map(|definition| (definition, entry.progression))
                    .with_context(|| format!("unknown character id '{}'", entry.id))
            })
            .collect()
    }
}
