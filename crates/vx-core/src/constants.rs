/// Base frequency every harmonic is scaled against (Hz).
pub const BASE_FREQUENCY_HZ: u32 = 432;

/// Doubling mod 9 starting at 1, skipping multiples of 3.
pub const VORTEX_CYCLE: [u8; 6] = [1, 2, 4, 8, 7, 5];

/// Multiples of 3 within a single digit.
pub const AXIS_CYCLE: [u8; 3] = [3, 6, 9];

/// Modulus of all digit-sum arithmetic.
pub const MODULUS: u32 = 9;

/// Hue step between consecutive digits, in degrees.
pub const HUE_STEP: u16 = 36;

/// Saturation of a zero-resonance color, in percent.
pub const SATURATION_BASE: u32 = 70;

/// Saturation added per unit of resonance.
pub const SATURATION_STEP: u32 = 6;

/// Lightness of a zero-resonance color, in percent.
pub const LIGHTNESS_BASE: u32 = 50;

/// Lightness added per unit of resonance.
pub const LIGHTNESS_STEP: u32 = 5;

/// Divisor applied to resonance before scaling a frequency into a sound.
pub const SOUND_DIVISOR: f64 = 5.0;

/// Side length of an interaction matrix.
pub const MATRIX_SIZE: usize = 10;
