use crate::constants::MODULUS;
use crate::digit::Digit;

/// Iterated digit-sum reduction of `n`.
///
/// `0` stays `0`; every other input lands in `1..=9`. Harmonic formulas that
/// must never produce 0 go through [`remap_zero`] instead of relying on this.
pub fn digital_root(n: u64) -> u8 {
    if n == 0 {
        0
    } else {
        (((n - 1) % MODULUS as u64) + 1) as u8
    }
}

/// Harmonic zero substitution: `0 → 9`, everything else unchanged.
pub fn remap_zero(x: u8) -> u8 {
    if x == 0 { 9 } else { x }
}

/// `remap_zero(n mod 9)` as a digit in `1..=9`.
pub fn harmonic_mod(n: u64) -> Digit {
    Digit::from_reduced(remap_zero((n % MODULUS as u64) as u8))
}

/// `remap_zero(digital_root(n))` as a digit in `1..=9`.
pub fn harmonic_root(n: u64) -> Digit {
    Digit::from_reduced(remap_zero(digital_root(n)))
}
