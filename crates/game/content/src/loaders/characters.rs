//! Character catalog loader.

use std::path::Path;

use battle_core::CharacterDefinition;
use serde::{Deserialize, Serialize};

use crate::catalog::CharacterCatalog;
use crate::loaders::{LoadResult, read_file};

/// Character catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterFile {
    pub characters: Vec<CharacterDefinition>,
}

/// Loader for character catalogs from RON files.
pub struct CharacterLoader;

impl CharacterLoader {
    /// Load a character catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<CharacterCatalog> {
        let content = read_file(path)?;
        let catalog = Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;
        tracing::debug!(path = %path.display(), characters = catalog.len(), "loaded character catalog");
        Ok(catalog)
    }

    pub fn parse(content: &str) -> LoadResult<CharacterCatalog> {
        let file: CharacterFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse character catalog RON: {}", e))?;

        CharacterCatalog::new(file.characters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{AbilityKind, PassiveEffect, StatusKind};

    const SAMPLE: &str = r#"
(
    characters: [
        (
            id: "ember",
            name: "Ember",
            rarity: epic,
            stats: (max_hp: 90, max_mana: 60, attack: 18),
            abilities: [
                (
                    id: "spark",
                    name: "Spark",
                    kind: Attack,
                    damage: 20,
                    status: Some((kind: burn, chance_pct: 50, magnitude: 6)),
                ),
            ],
            ultimate: (
                id: "wildfire",
                name: "Wildfire",
                kind: UltimateSweep,
                damage: 35,
                mana_cost: 40,
                cooldown: 4,
            ),
            passive: Some((name: "Kindling", effect: Burn(4))),
        ),
    ],
)
"#;

    #[test]
    fn parses_catalog_with_defaults() {
        let catalog = CharacterLoader::parse(SAMPLE).unwrap();
        let ember = catalog.get("ember").unwrap();

        assert_eq!(ember.stats.max_hp, 90);
        assert_eq!(ember.stats.defense, 0);
        assert_eq!(ember.abilities[0].kind, AbilityKind::Attack);
        assert_eq!(ember.abilities[0].mana_cost, 0);
        assert_eq!(ember.abilities[0].status.map(|s| s.kind), Some(StatusKind::Burn));
        assert_eq!(ember.ultimate.cooldown, 4);
        assert_eq!(ember.passive.as_ref().map(|p| p.effect), Some(PassiveEffect::Burn(4)));
        assert_eq!(ember.crit_chance, 0);
    }

    #[test]
    fn load_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("characters.ron");
        std::fs::write(&path, "(characters: [ (id: ) ])").unwrap();

        let err = CharacterLoader::load(&path).unwrap_err();
        assert!(err.to_string().contains("characters.ron"));
    }
}
