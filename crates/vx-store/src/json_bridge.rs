use std::fs;
use std::path::Path;

use vx_core::{RelationCatalog, export_json, import_json};

use crate::error::{Result, StoreError};
use crate::store::Store;

/// Write a catalog as a versioned JSON file.
pub fn export_json_file(catalog: &RelationCatalog, path: &Path) -> Result<()> {
    let json = export_json(catalog)
        .map_err(|e| StoreError::InvalidData(format!("JSON export failed: {e}")))?;
    fs::write(path, json)
        .map_err(|e| StoreError::InvalidData(format!("failed to write {}: {e}", path.display())))
}

impl Store {
    /// Import a JSON export file and store it as the current catalog.
    pub fn import_json_file(&self, path: &Path) -> Result<RelationCatalog> {
        let json = fs::read_to_string(path).map_err(|e| {
            StoreError::InvalidData(format!("failed to read {}: {e}", path.display()))
        })?;
        self.import_json_str(&json)
    }

    /// Import a JSON export string and store it as the current catalog.
    pub fn import_json_str(&self, json: &str) -> Result<RelationCatalog> {
        let catalog = import_json(json)?;
        self.save_catalog(&catalog)?;
        Ok(catalog)
    }
}
