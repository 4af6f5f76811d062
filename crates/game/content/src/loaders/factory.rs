//! Content factory for loading battle content from a data directory.

use std::path::{Path, PathBuf};

use battle_core::BattleConfig;

use crate::catalog::CharacterCatalog;
use crate::loaders::{CharacterLoader, ConfigLoader, LoadResult};

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── battle.toml
/// └── characters.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory for the sample data shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load battle configuration from `battle.toml`.
    ///
    /// A missing file yields the default configuration.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        let path = self.data_dir.join("battle.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no battle config, using defaults");
            return Ok(BattleConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the character catalog from `characters.ron`.
    pub fn load_characters(&self) -> LoadResult<CharacterCatalog> {
        let path = self.data_dir.join("characters.ron");
        CharacterLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RosterEntry;
    use battle_core::{Outcome, Progression, start_battle};

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap(), BattleConfig::default());
        assert!(factory.load_characters().is_err());
    }

    #[test]
    fn bundled_content_starts_a_battle() {
        let factory = ContentFactory::bundled();
        let config = factory.load_config().unwrap();
        let catalog = factory.load_characters().unwrap();
        assert!(catalog.len() >= 6);

        let ids: Vec<&str> = catalog.ids().collect();
        let players: Vec<_> = ids[..3]
            .iter()
            .map(|id| catalog.get(id).unwrap().clone())
            .collect();
        let opponents: Vec<_> = ids[3..6]
            .iter()
            .map(|id| catalog.get(id).unwrap().clone())
            .collect();

        let state = start_battle(&players, &opponents, &config).unwrap();
        assert_eq!(state.outcome(), Outcome::InProgress);
    }

    #[test]
    fn bundled_rosters_scale_with_progression() {
        let factory = ContentFactory::bundled();
        let config = factory.load_config().unwrap();
        let catalog = factory.load_characters().unwrap();
        let first = catalog.ids().next().unwrap().to_string();

        let roster = catalog
            .roster(&[RosterEntry::new(first.clone(), Progression::new(11, 1))])
            .unwrap();
        let (definition, progression) = roster[0];
        assert_eq!(definition.id, first);
        assert!(progression.scale(definition.stats.max_hp, &config) > definition.stats.max_hp);
    }
}
