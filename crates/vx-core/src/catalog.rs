use thiserror::Error;

use crate::color::ColorPolicy;
use crate::digit::{Digit, DigitError};
use crate::engine::HarmonicEngine;
use crate::harmonic::PairRelation;
use crate::matrix::InteractionMatrix;
use crate::table::MultiplierTable;

/// Raised when a catalog cannot be assembled or imported.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("base frequency {found} does not match {expected}")]
    BaseFrequency { found: u32, expected: u32 },
    #[error("expected 100 relations, got {0}")]
    RelationCount(usize),
    #[error("expected 10 matrices, got {0}")]
    MatrixCount(usize),
    #[error("relation {index} is ({a}, {b}), expected row-major order")]
    RelationOrder { index: usize, a: Digit, b: Digit },
    #[error("relation ({a}, {b}) does not match its derivation from the table")]
    RelationMismatch { a: Digit, b: Digit },
    #[error("matrix {index} has anchor {anchor}")]
    MatrixOrder { index: usize, anchor: Digit },
    #[error("matrix {anchor} does not match its derivation")]
    MatrixMismatch { anchor: Digit },
    #[error("matrix {anchor} cell ({i}, {j}): {source}")]
    Cell {
        anchor: Digit,
        i: usize,
        j: usize,
        source: DigitError,
    },
}

/// Every relation and matrix for one table, computed eagerly.
///
/// Observationally identical to calling the engine on demand; exists so the
/// whole derived space can be persisted or exported in one piece.
#[derive(Clone, Debug)]
pub struct RelationCatalog {
    pub table: MultiplierTable,
    pub policy: ColorPolicy,
    /// Row-major: index `a * 10 + b`.
    relations: Vec<PairRelation>,
    /// Index `anchor`.
    matrices: Vec<InteractionMatrix>,
}

impl RelationCatalog {
    pub fn build(engine: &HarmonicEngine) -> Self {
        let relations = Digit::all()
            .flat_map(|a| Digit::all().map(move |b| (a, b)))
            .map(|(a, b)| engine.get_relation(a, b))
            .collect();
        let matrices = Digit::all().map(|d| engine.get_matrix(d)).collect();
        Self {
            table: engine.table().clone(),
            policy: engine.policy(),
            relations,
            matrices,
        }
    }

    /// Assemble from already-derived parts, typically read back from an
    /// export. Each part is checked against a fresh derivation from `table`
    /// and `policy`; the first one that disagrees is reported.
    pub fn from_parts(
        table: MultiplierTable,
        policy: ColorPolicy,
        relations: Vec<PairRelation>,
        matrices: Vec<InteractionMatrix>,
    ) -> Result<Self, CatalogError> {
        if relations.len() != 100 {
            return Err(CatalogError::RelationCount(relations.len()));
        }
        if matrices.len() != 10 {
            return Err(CatalogError::MatrixCount(matrices.len()));
        }

        let derived = Self::build(&HarmonicEngine::new(table, policy));

        for (index, (got, want)) in relations.iter().zip(derived.relations()).enumerate() {
            if (got.a, got.b) != (want.a, want.b) {
                return Err(CatalogError::RelationOrder {
                    index,
                    a: got.a,
                    b: got.b,
                });
            }
            if !same_relation(got, want) {
                return Err(CatalogError::RelationMismatch { a: got.a, b: got.b });
            }
        }
        for (index, (got, want)) in matrices.iter().zip(derived.matrices()).enumerate() {
            if got.anchor != want.anchor {
                return Err(CatalogError::MatrixOrder {
                    index,
                    anchor: got.anchor,
                });
            }
            if got != want {
                return Err(CatalogError::MatrixMismatch { anchor: got.anchor });
            }
        }

        Ok(derived)
    }

    pub fn relation(&self, a: Digit, b: Digit) -> &PairRelation {
        &self.relations[a.value() as usize * 10 + b.value() as usize]
    }

    pub fn matrix(&self, anchor: Digit) -> &InteractionMatrix {
        &self.matrices[anchor.value() as usize]
    }

    pub fn relations(&self) -> &[PairRelation] {
        &self.relations
    }

    pub fn matrices(&self) -> &[InteractionMatrix] {
        &self.matrices
    }
}

/// Exact on every field except `sound_hz`, which may lose its last bit
/// through a decimal round trip.
fn same_relation(got: &PairRelation, want: &PairRelation) -> bool {
    got.relation_label == want.relation_label
        && got.result == want.result
        && got.consciousness == want.consciousness
        && got.frequency_hz == want.frequency_hz
        && got.harmonic == want.harmonic
        && got.vortex_flow == want.vortex_flow
        && got.color_hsl == want.color_hsl
        && (got.sound_hz - want.sound_hz).abs() <= 1e-9 * want.sound_hz.abs().max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Fraction;

    fn parts(catalog: &RelationCatalog) -> (Vec<PairRelation>, Vec<InteractionMatrix>) {
        (catalog.relations().to_vec(), catalog.matrices().to_vec())
    }

    #[test]
    fn test_catalog_matches_engine() {
        let engine = HarmonicEngine::default();
        let catalog = RelationCatalog::build(&engine);
        assert_eq!(catalog.relations().len(), 100);
        assert_eq!(catalog.matrices().len(), 10);
        for a in Digit::all() {
            for b in Digit::all() {
                assert_eq!(catalog.relation(a, b), &engine.get_relation(a, b));
            }
            assert_eq!(catalog.matrix(a), &engine.get_matrix(a));
        }
    }

    #[test]
    fn test_from_parts_accepts_own_output() {
        let catalog = RelationCatalog::build(&HarmonicEngine::default());
        let (relations, matrices) = parts(&catalog);
        let rebuilt =
            RelationCatalog::from_parts(catalog.table.clone(), catalog.policy, relations, matrices)
                .unwrap();
        assert_eq!(rebuilt.relations(), catalog.relations());
    }

    #[test]
    fn test_from_parts_rejects_wrong_order() {
        let catalog = RelationCatalog::build(&HarmonicEngine::default());
        let (mut relations, matrices) = parts(&catalog);
        relations.swap(0, 1);
        let err =
            RelationCatalog::from_parts(catalog.table.clone(), catalog.policy, relations, matrices)
                .unwrap_err();
        assert!(matches!(err, CatalogError::RelationOrder { index: 0, .. }), "got {err}");
    }

    #[test]
    fn test_from_parts_rejects_short() {
        let catalog = RelationCatalog::build(&HarmonicEngine::default());
        let (relations, matrices) = parts(&catalog);
        let err = RelationCatalog::from_parts(
            catalog.table.clone(),
            catalog.policy,
            relations[..10].to_vec(),
            matrices,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::RelationCount(10)));
    }

    #[test]
    fn test_from_parts_rejects_tampered_relation() {
        let catalog = RelationCatalog::build(&HarmonicEngine::default());
        let (mut relations, matrices) = parts(&catalog);
        relations[11].frequency_hz = 1000;
        let err =
            RelationCatalog::from_parts(catalog.table.clone(), catalog.policy, relations, matrices)
                .unwrap_err();
        assert!(matches!(err, CatalogError::RelationMismatch { .. }), "got {err}");
        assert!(err.to_string().contains("(1, 1)"));
    }

    #[test]
    fn test_from_parts_rejects_relation_from_another_table() {
        let catalog = RelationCatalog::build(&HarmonicEngine::default());
        let (relations, matrices) = parts(&catalog);
        let edited = catalog
            .table
            .clone()
            .with_multiplier(Digit::new(8).unwrap(), Fraction::whole(1), "edit");
        let err = RelationCatalog::from_parts(edited, catalog.policy, relations, matrices)
            .unwrap_err();
        assert!(matches!(err, CatalogError::RelationMismatch { .. }), "got {err}");
    }

    #[test]
    fn test_from_parts_rejects_tampered_matrix() {
        let catalog = RelationCatalog::build(&HarmonicEngine::default());
        let (relations, mut matrices) = parts(&catalog);
        matrices[4].cells[2][3] = Digit::NINE;
        let err =
            RelationCatalog::from_parts(catalog.table.clone(), catalog.policy, relations, matrices)
                .unwrap_err();
        assert!(matches!(err, CatalogError::MatrixMismatch { .. }), "got {err}");
    }
}
