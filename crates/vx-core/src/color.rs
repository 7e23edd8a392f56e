use serde::{Deserialize, Serialize};

use crate::constants::{
    LIGHTNESS_BASE, LIGHTNESS_STEP, SATURATION_BASE, SATURATION_STEP, SOUND_DIVISOR,
};

/// How saturation and lightness are bounded.
///
/// The affine formulas exceed 100% once resonance passes 5 (saturation) or
/// 10 (lightness). `Unclamped` reproduces that exactly and is the default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorPolicy {
    #[default]
    Unclamped,
    Clamped,
}

impl ColorPolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "unclamped" => Some(ColorPolicy::Unclamped),
            "clamped" => Some(ColorPolicy::Clamped),
            _ => None,
        }
    }
}

/// Components of an HSL color before rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hsl {
    pub hue: u32,
    pub saturation: u32,
    pub lightness: u32,
}

impl Hsl {
    /// CSS `hsl(h, s%, l%)`.
    pub fn css(self) -> String {
        format!(
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

/// Blend two hues and derive saturation/lightness from `resonance`.
pub fn hsl(hue_a: u16, hue_b: u16, resonance: u32, policy: ColorPolicy) -> Hsl {
    let mut saturation = SATURATION_BASE + resonance * SATURATION_STEP;
    let mut lightness = LIGHTNESS_BASE + resonance * LIGHTNESS_STEP;
    if policy == ColorPolicy::Clamped {
        saturation = saturation.min(100);
        lightness = lightness.min(100);
    }
    Hsl {
        hue: (hue_a as u32 + hue_b as u32) / 2,
        saturation,
        lightness,
    }
}

/// CSS color string for a pair of hues at a given resonance. Unclamped.
pub fn to_color(hue_a: u16, hue_b: u16, resonance: u32) -> String {
    hsl(hue_a, hue_b, resonance, ColorPolicy::Unclamped).css()
}

/// `frequency_hz * (resonance / 5)`.
pub fn to_sound(frequency_hz: u32, resonance: u32) -> f64 {
    frequency_hz as f64 * (resonance as f64 / SOUND_DIVISOR)
}
