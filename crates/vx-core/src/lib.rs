//! Digit-pair harmonic derivation engine.
//!
//! Maps an ordered pair of decimal digits to a bundle of derived attributes:
//! a digital-root result, a resonance ("consciousness"), a harmonic scaled
//! onto 432 Hz, an HSL color, a sound frequency, and a vortex flow sequence.
//! Also builds the 10×10 interaction matrix for any anchor digit.
//!
//! Zero I/O. Pure arithmetic with no opinions about transport or persistence.

pub mod catalog;
pub mod color;
pub mod constants;
pub mod digit;
pub mod digital_root;
pub mod engine;
pub mod harmonic;
pub mod matrix;
pub mod sequence;
pub mod serde_compat;
pub mod table;

pub use catalog::{CatalogError, RelationCatalog};
pub use color::{ColorPolicy, Hsl, to_color, to_sound};
pub use constants::{AXIS_CYCLE, BASE_FREQUENCY_HZ, MATRIX_SIZE, VORTEX_CYCLE};
pub use digit::{Digit, DigitError};
pub use digital_root::{digital_root, remap_zero};
pub use engine::HarmonicEngine;
pub use harmonic::{PairRelation, derive_relation};
pub use matrix::{InteractionMatrix, build_matrix};
pub use sequence::{SequenceFamily, pair_flow, vortex_flow};
pub use serde_compat::{CURRENT_VERSION, export_json, import_json};
pub use table::{
    Convention, DigitAttributes, Discrepancy, Fraction, FractionError, MultiplierTable,
    TableError,
};
