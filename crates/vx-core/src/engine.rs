use crate::color::ColorPolicy;
use crate::digit::{Digit, DigitError};
use crate::harmonic::{PairRelation, derive_relation};
use crate::matrix::{InteractionMatrix, build_matrix};
use crate::sequence::vortex_flow;
use crate::table::MultiplierTable;

/// Single parameterized entry point for every digit-pair derivation.
///
/// Holds only immutable configuration; every method is a pure function of
/// its arguments and can be called from any number of threads.
#[derive(Clone, Debug, Default)]
pub struct HarmonicEngine {
    table: MultiplierTable,
    policy: ColorPolicy,
}

impl HarmonicEngine {
    pub fn new(table: MultiplierTable, policy: ColorPolicy) -> Self {
        Self { table, policy }
    }

    pub fn table(&self) -> &MultiplierTable {
        &self.table
    }

    pub fn policy(&self) -> ColorPolicy {
        self.policy
    }

    pub fn get_relation(&self, a: Digit, b: Digit) -> PairRelation {
        derive_relation(a, b, &self.table, self.policy)
    }

    pub fn get_matrix(&self, anchor: Digit) -> InteractionMatrix {
        build_matrix(anchor)
    }

    pub fn get_color(&self, a: Digit, b: Digit) -> String {
        self.get_relation(a, b).color_hsl
    }

    pub fn get_sound(&self, a: Digit, b: Digit) -> f64 {
        self.get_relation(a, b).sound_hz
    }

    pub fn get_vortex_flow(&self, d: Digit) -> Vec<Digit> {
        vortex_flow(d)
    }

    // --- Integer boundary: validate, never coerce ---

    pub fn relation_for(&self, a: i64, b: i64) -> Result<PairRelation, DigitError> {
        Ok(self.get_relation(Digit::try_from(a)?, Digit::try_from(b)?))
    }

    pub fn matrix_for(&self, anchor: i64) -> Result<InteractionMatrix, DigitError> {
        Ok(self.get_matrix(Digit::try_from(anchor)?))
    }

    pub fn color_for(&self, a: i64, b: i64) -> Result<String, DigitError> {
        Ok(self.get_color(Digit::try_from(a)?, Digit::try_from(b)?))
    }

    pub fn sound_for(&self, a: i64, b: i64) -> Result<f64, DigitError> {
        Ok(self.get_sound(Digit::try_from(a)?, Digit::try_from(b)?))
    }

    pub fn vortex_flow_for(&self, d: i64) -> Result<Vec<Digit>, DigitError> {
        Ok(self.get_vortex_flow(Digit::try_from(d)?))
    }
}
