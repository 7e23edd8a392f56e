//! Versioned JSON wire format for a full relation catalog.
//!
//! Relations keep the camelCase field names the documentation layers read.
//! Matrices are stored as plain `u8` grids.

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogError, RelationCatalog};
use crate::color::ColorPolicy;
use crate::constants::{BASE_FREQUENCY_HZ, MATRIX_SIZE};
use crate::digit::Digit;
use crate::harmonic::PairRelation;
use crate::matrix::InteractionMatrix;
use crate::table::MultiplierTable;

pub const CURRENT_VERSION: &str = "1.0.0";

#[derive(Serialize, Deserialize, Debug)]
pub struct WireExport {
    pub version: String,
    #[serde(rename = "baseFrequencyHz")]
    pub base_frequency_hz: u32,
    #[serde(rename = "colorPolicy", default)]
    pub color_policy: ColorPolicy,
    pub table: MultiplierTable,
    pub relations: Vec<PairRelation>,
    pub matrices: Vec<WireMatrix>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct WireMatrix {
    pub anchor: Digit,
    pub cells: [[u8; MATRIX_SIZE]; MATRIX_SIZE],
}

impl WireMatrix {
    fn into_domain(self) -> Result<InteractionMatrix, CatalogError> {
        let mut cells = [[Digit::NINE; MATRIX_SIZE]; MATRIX_SIZE];
        for (i, row) in self.cells.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                cells[i][j] = Digit::nonzero(v).map_err(|source| CatalogError::Cell {
                    anchor: self.anchor,
                    i,
                    j,
                    source,
                })?;
            }
        }
        Ok(InteractionMatrix {
            anchor: self.anchor,
            cells,
        })
    }
}

impl WireExport {
    pub fn from_catalog(catalog: &RelationCatalog) -> Self {
        WireExport {
            version: CURRENT_VERSION.to_string(),
            base_frequency_hz: BASE_FREQUENCY_HZ,
            color_policy: catalog.policy,
            table: catalog.table.clone(),
            relations: catalog.relations().to_vec(),
            matrices: catalog
                .matrices()
                .iter()
                .map(|m| WireMatrix {
                    anchor: m.anchor,
                    cells: m.to_values(),
                })
                .collect(),
        }
    }

    /// Rebuild the catalog, rejecting any part that does not match a fresh
    /// derivation from the exported table.
    pub fn into_catalog(self) -> Result<RelationCatalog, CatalogError> {
        if self.base_frequency_hz != BASE_FREQUENCY_HZ {
            return Err(CatalogError::BaseFrequency {
                found: self.base_frequency_hz,
                expected: BASE_FREQUENCY_HZ,
            });
        }
        let matrices = self
            .matrices
            .into_iter()
            .map(WireMatrix::into_domain)
            .collect::<Result<Vec<_>, _>>()?;
        RelationCatalog::from_parts(self.table, self.color_policy, self.relations, matrices)
    }
}

/// Serialize a catalog to pretty JSON.
pub fn export_json(catalog: &RelationCatalog) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&WireExport::from_catalog(catalog))
}

/// Parse a JSON export back into a catalog.
pub fn import_json(json: &str) -> Result<RelationCatalog, CatalogError> {
    let wire: WireExport = serde_json::from_str(json)?;
    wire.into_catalog()
}
