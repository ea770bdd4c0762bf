//! Local storage for a MainSeed
//!
//! The file holds a single `MainSeedRecord` as pretty JSON, so anything that
//! can write the raw record can feed the store.

use crate::error::Result;
use crate::seed::{MainSeed, MainSeedRecord};
use log::info;
use std::path::{Path, PathBuf};

pub const DEFAULT_STORE_FILE: &str = "seed-store.json";

/// Where the store lives and how strictly it is loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub path: PathBuf,
    /// Reject stale derived fields instead of repairing them on open
    pub strict: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_STORE_FILE),
            strict: false,
        }
    }
}

impl StoreConfig {
    /// Read `SEED_STORE` and `SEED_STRICT` from the environment
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("SEED_STORE").ok(),
            std::env::var("SEED_STRICT").ok(),
        )
    }

    fn from_vars(path: Option<String>, strict: Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            path: path
                .filter(|p| !p.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.path),
            strict: strict
                .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
                .unwrap_or(defaults.strict),
        }
    }
}

#[derive(Debug)]
pub struct SeedStore {
    seed: MainSeed,
    path: PathBuf,
}

impl SeedStore {
    /// Open the store at `config.path`, or start an empty seed if it is missing.
    ///
    /// A strict config checks the seed's global fields strictly whatever the
    /// file's own flag says. The file's flag is what gets saved back.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let path = config.path.clone();
        let seed = if path.exists() {
            let data = std::fs::read_to_string(&path)?;
            let mut record: MainSeedRecord = serde_json::from_str(&data)?;
            let stored_strict = record.strict;
            record.strict |= config.strict;
            let mut seed = MainSeed::load(record)?;
            seed.set_strict(stored_strict);
            info!("Opened {}: {}", path.display(), seed.summary());
            seed
        } else {
            info!("No store at {}, starting empty", path.display());
            MainSeed::new()
        };
        Ok(Self { seed, path })
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, self.seed.to_json()?)?;
        info!("Saved {}", self.path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn seed(&self) -> &MainSeed {
        &self.seed
    }

    pub fn seed_mut(&mut self) -> &mut MainSeed {
        &mut self.seed
    }

    pub fn summary(&self) -> String {
        format!("SeedStore '{}' | {}", self.path.display(), self.seed.summary())
    }
}
