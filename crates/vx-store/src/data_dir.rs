use std::path::{Path, PathBuf};
use std::{env, fs};

use crate::config::EngineConfig;
use crate::error::{Result, StoreError};
use crate::store::Store;

pub const CONFIG_FILE: &str = "config.toml";
pub const CATALOG_FILE: &str = "catalog.db";

/// Default base directory for all vx state.
pub fn default_base_dir() -> PathBuf {
    dirs_home().join(".vortex-harmonics")
}

fn dirs_home() -> PathBuf {
    env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// Resolved data directory holding `config.toml` and `catalog.db`.
#[derive(Debug, Clone)]
pub struct DataDir {
    base: PathBuf,
}

impl DataDir {
    /// Use `base_dir` if given, else `$VX_DATA_DIR`, else `~/.vortex-harmonics`.
    /// Nothing is created on disk until a catalog is opened.
    pub fn resolve(base_dir: Option<&Path>) -> Self {
        let base = base_dir
            .map(Path::to_path_buf)
            .or_else(|| env::var("VX_DATA_DIR").ok().map(PathBuf::from))
            .unwrap_or_else(default_base_dir);
        Self { base }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn config_path(&self) -> PathBuf {
        self.base.join(CONFIG_FILE)
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.base.join(CATALOG_FILE)
    }

    pub fn load_config(&self) -> Result<EngineConfig> {
        EngineConfig::load(&self.config_path())
    }

    /// Open (creating if needed) the catalog database.
    pub fn open_catalog(&self) -> Result<Store> {
        fs::create_dir_all(&self.base).map_err(|e| {
            StoreError::InvalidData(format!(
                "failed to create data dir {}: {e}",
                self.base.display()
            ))
        })?;
        let path = self.catalog_path();
        tracing::debug!("opening catalog at {}", path.display());
        Store::open(&path)
    }
}
