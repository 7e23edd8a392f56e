use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::constants::MATRIX_SIZE;
use crate::digit::Digit;
use crate::digital_root::harmonic_mod;

/// 10×10 grid of interaction values anchored to one digit.
/// Every cell is in `1..=9`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionMatrix {
    pub anchor: Digit,
    pub cells: [[Digit; MATRIX_SIZE]; MATRIX_SIZE],
}

impl InteractionMatrix {
    pub fn get(&self, i: Digit, j: Digit) -> Digit {
        self.cells[i.value() as usize][j.value() as usize]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Digit; MATRIX_SIZE]> {
        self.cells.iter()
    }

    /// Plain `u8` grid, for consumers that don't care about the newtype.
    pub fn to_values(&self) -> [[u8; MATRIX_SIZE]; MATRIX_SIZE] {
        self.cells.map(|row| row.map(Digit::value))
    }
}

impl Index<(usize, usize)> for InteractionMatrix {
    type Output = Digit;

    fn index(&self, (i, j): (usize, usize)) -> &Digit {
        &self.cells[i][j]
    }
}

/// Resonance of cell `(i, j)` for `anchor`: `remap_zero((anchor * (i + j)) mod 9)`.
pub fn cell_resonance(anchor: Digit, i: usize, j: usize) -> Digit {
    harmonic_mod(anchor.value() as u64 * (i + j) as u64)
}

/// Build the interaction matrix for `anchor`.
pub fn build_matrix(anchor: Digit) -> InteractionMatrix {
    let mut cells = [[Digit::NINE; MATRIX_SIZE]; MATRIX_SIZE];
    for (i, row) in cells.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = cell_resonance(anchor, i, j);
        }
    }
    InteractionMatrix { anchor, cells }
}
