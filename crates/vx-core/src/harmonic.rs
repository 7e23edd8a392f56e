use serde::{Deserialize, Serialize};

use crate::color::{ColorPolicy, hsl, to_sound};
use crate::constants::BASE_FREQUENCY_HZ;
use crate::digit::Digit;
use crate::digital_root::{harmonic_mod, harmonic_root};
use crate::sequence::pair_flow;
use crate::table::MultiplierTable;

/// Everything derived from an ordered digit pair.
///
/// Field names on the wire match what the documentation layers read
/// (`relationLabel`, `frequencyHz`, `colorHSL`, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PairRelation {
    pub a: Digit,
    pub b: Digit,
    #[serde(rename = "relationLabel")]
    pub relation_label: String,
    /// `a` acting on `b` through multiplication, `1..=9`.
    pub result: Digit,
    /// Resonance of `a` under `b`'s multiplier, `1..=9`.
    pub consciousness: Digit,
    #[serde(rename = "frequencyHz")]
    pub frequency_hz: u32,
    pub harmonic: Digit,
    #[serde(rename = "vortexFlow")]
    pub vortex_flow: Vec<Digit>,
    #[serde(rename = "colorHSL")]
    pub color_hsl: String,
    #[serde(rename = "soundHz")]
    pub sound_hz: f64,
}

/// `result = remap_zero(digital_root(a * b))`.
pub fn multiplication_result(a: Digit, b: Digit) -> Digit {
    harmonic_root(a.value() as u64 * b.value() as u64)
}

/// `remap_zero((base_resonance(a) * multiplier(b)) mod 9)`.
pub fn consciousness(a: Digit, b: Digit, table: &MultiplierTable) -> Digit {
    let base = table.get(a).base_resonance as u64;
    let mult = table.get(b).multiplier.value() as u64;
    harmonic_mod(base * mult)
}

/// `remap_zero(digital_root(consciousness * result))`.
pub fn harmonic(consciousness: Digit, result: Digit) -> Digit {
    harmonic_root(consciousness.value() as u64 * result.value() as u64)
}

/// Harmonic scaled onto the base frequency. Always a multiple of 432.
pub fn frequency_hz(harmonic: Digit) -> u32 {
    harmonic.value() as u32 * BASE_FREQUENCY_HZ
}

/// Derive the full relation for `(a, b)` under `table`.
///
/// Total over all digit pairs and free of side effects: identical inputs
/// always give identical output.
pub fn derive_relation(
    a: Digit,
    b: Digit,
    table: &MultiplierTable,
    policy: ColorPolicy,
) -> PairRelation {
    let attrs_a = table.get(a);
    let attrs_b = table.get(b);

    let result = multiplication_result(a, b);
    let consciousness = consciousness(a, b, table);
    let harmonic = harmonic(consciousness, result);
    let frequency_hz = frequency_hz(harmonic);
    let resonance = harmonic.value() as u32;

    PairRelation {
        a,
        b,
        relation_label: format!("{}-{}", attrs_a.name, attrs_b.name),
        result,
        consciousness,
        frequency_hz,
        harmonic,
        vortex_flow: pair_flow(a, b),
        color_hsl: hsl(attrs_a.hue, attrs_b.hue, resonance, policy).css(),
        sound_hz: to_sound(frequency_hz, resonance),
    }
}
