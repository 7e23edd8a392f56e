//! Per-digit multiplier, resonance, and hue tables.
//!
//! No closed-form rule generates these rows, and the source modules disagree
//! on some of them. Every row carries the source it came from, and
//! [`MultiplierTable::discrepancy_report`] lists where a table diverges from
//! either built-in convention instead of silently choosing one.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{HUE_STEP, MATRIX_SIZE};
use crate::digit::Digit;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FractionError {
    #[error("multiplier {numerator}/{denominator} is not integral (denominator must be 1)")]
    NonIntegral { numerator: u32, denominator: u32 },
}

/// Small-integer ratio. Every multiplier in every table is `n/1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FractionRepr")]
pub struct Fraction {
    pub numerator: u32,
    pub denominator: u32,
}

#[derive(Deserialize)]
struct FractionRepr {
    numerator: u32,
    denominator: u32,
}

impl Fraction {
    pub const fn whole(numerator: u32) -> Self {
        Self {
            numerator,
            denominator: 1,
        }
    }

    /// Validated constructor. Rejects any denominator other than 1.
    pub fn new(numerator: u32, denominator: u32) -> Result<Self, FractionError> {
        if denominator != 1 {
            return Err(FractionError::NonIntegral {
                numerator,
                denominator,
            });
        }
        Ok(Self::whole(numerator))
    }

    /// Integer value. Exact because the denominator is always 1.
    pub fn value(self) -> u32 {
        self.numerator
    }
}

impl TryFrom<FractionRepr> for Fraction {
    type Error = FractionError;

    fn try_from(raw: FractionRepr) -> Result<Self, Self::Error> {
        Self::new(raw.numerator, raw.denominator)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Static attributes of one digit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitAttributes {
    pub digit: Digit,
    pub name: String,
    pub essence: String,
    pub multiplier: Fraction,
    #[serde(rename = "baseResonance")]
    pub base_resonance: u32,
    pub hue: u16,
    /// Where this row's values were observed: a built-in convention name
    /// or the source given with a configured override.
    pub source: String,
}

/// A hardcoded source convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Convention {
    /// Per-pair relation modules. The default.
    Relation,
    /// Per-digit main modules.
    Main,
}

impl Convention {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "relation" => Some(Convention::Relation),
            "main" => Some(Convention::Main),
            _ => None,
        }
    }
}

impl fmt::Display for Convention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Convention::Relation => write!(f, "relation"),
            Convention::Main => write!(f, "main"),
        }
    }
}

/// (name, essence, multiplier numerator, base resonance) for digits 0..=9.
const RELATION_ROWS: [(&str, &str, u32, u32); 10] = [
    ("Void", "potential", 1, 9),
    ("Unity", "origin", 1, 9),
    ("Duality", "polarity", 1, 2),
    ("Trinity", "creation", 3, 3),
    ("Foundation", "structure", 1, 4),
    ("Change", "motion", 5, 5),
    ("Harmony", "balance", 3, 6),
    ("Mystery", "insight", 1, 7),
    ("Infinity", "abundance", 3, 8),
    ("Spirit", "completion", 3, 9),
];

/// Same as [`RELATION_ROWS`] except digit 8, which the main modules give 1/1.
const MAIN_ROWS: [(&str, &str, u32, u32); 10] = [
    ("Void", "potential", 1, 9),
    ("Unity", "origin", 1, 9),
    ("Duality", "polarity", 1, 2),
    ("Trinity", "creation", 3, 3),
    ("Foundation", "structure", 1, 4),
    ("Change", "motion", 5, 5),
    ("Harmony", "balance", 3, 6),
    ("Mystery", "insight", 1, 7),
    ("Infinity", "abundance", 1, 8),
    ("Spirit", "completion", 3, 9),
];

fn hue_for(d: u8) -> u16 {
    (d as u16 * HUE_STEP) % 360
}

/// One row that differs between two tables, labelled with each row's source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Discrepancy {
    pub digit: Digit,
    pub left: String,
    pub left_multiplier: Fraction,
    pub left_base_resonance: u32,
    pub right: String,
    pub right_multiplier: Fraction,
    pub right_base_resonance: u32,
}

/// Raised when deserialized rows do not form a complete table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("table has {0} rows, expected 10")]
    RowCount(usize),
    #[error("row {index} describes digit {digit}")]
    RowOrder { index: usize, digit: Digit },
    #[error("digit {digit} has hue {hue}, expected {expected}")]
    Hue { digit: Digit, hue: u16, expected: u16 },
}

/// Ten-row lookup from digit to its attributes.
///
/// `convention` is the built-in table the rows started from; overridden
/// rows keep their own `source`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TableRepr")]
pub struct MultiplierTable {
    pub convention: Convention,
    rows: Vec<DigitAttributes>,
}

#[derive(Deserialize)]
struct TableRepr {
    convention: Convention,
    rows: Vec<DigitAttributes>,
}

impl TryFrom<TableRepr> for MultiplierTable {
    type Error = TableError;

    fn try_from(raw: TableRepr) -> Result<Self, Self::Error> {
        if raw.rows.len() != MATRIX_SIZE {
            return Err(TableError::RowCount(raw.rows.len()));
        }
        for (index, row) in raw.rows.iter().enumerate() {
            if row.digit.value() as usize != index {
                return Err(TableError::RowOrder {
                    index,
                    digit: row.digit,
                });
            }
            let expected = hue_for(row.digit.value());
            if row.hue != expected {
                return Err(TableError::Hue {
                    digit: row.digit,
                    hue: row.hue,
                    expected,
                });
            }
        }
        Ok(Self {
            convention: raw.convention,
            rows: raw.rows,
        })
    }
}

impl MultiplierTable {
    /// The hardcoded table for a built-in convention.
    pub fn builtin(convention: Convention) -> Self {
        let literal = match convention {
            Convention::Relation => &RELATION_ROWS,
            Convention::Main => &MAIN_ROWS,
        };
        let source = convention.to_string();
        let rows = literal
            .iter()
            .enumerate()
            .map(|(i, &(name, essence, mult, base))| DigitAttributes {
                digit: Digit::from_reduced(i as u8),
                name: name.to_string(),
                essence: essence.to_string(),
                multiplier: Fraction::whole(mult),
                base_resonance: base,
                hue: hue_for(i as u8),
                source: source.clone(),
            })
            .collect();
        Self { convention, rows }
    }

    pub fn relation() -> Self {
        Self::builtin(Convention::Relation)
    }

    pub fn main() -> Self {
        Self::builtin(Convention::Main)
    }

    pub fn get(&self, d: Digit) -> &DigitAttributes {
        &self.rows[d.value() as usize]
    }

    pub fn rows(&self) -> &[DigitAttributes] {
        &self.rows
    }

    /// Copy of this table with one digit's multiplier replaced and that row
    /// attributed to `source`. Other rows keep their provenance.
    pub fn with_multiplier(mut self, d: Digit, multiplier: Fraction, source: &str) -> Self {
        let row = &mut self.rows[d.value() as usize];
        row.multiplier = multiplier;
        row.source = source.to_string();
        self
    }

    /// Rows whose source is not the base convention.
    pub fn overrides(&self) -> impl Iterator<Item = &DigitAttributes> {
        let base = self.convention.to_string();
        self.rows.iter().filter(move |row| row.source != base)
    }

    pub fn is_custom(&self) -> bool {
        self.overrides().next().is_some()
    }

    /// `"relation"`, `"main"`, or the base followed by each override
    /// source in digit order, e.g. `"main+audit"`.
    pub fn label(&self) -> String {
        let mut label = self.convention.to_string();
        let mut seen: Vec<&str> = Vec::new();
        for row in self.overrides() {
            if !seen.contains(&row.source.as_str()) {
                seen.push(&row.source);
                label.push('+');
                label.push_str(&row.source);
            }
        }
        label
    }

    /// Digits whose multiplier or base resonance differ from `other`.
    pub fn discrepancies(&self, other: &MultiplierTable) -> Vec<Discrepancy> {
        self.rows
            .iter()
            .zip(other.rows.iter())
            .filter(|(l, r)| l.multiplier != r.multiplier || l.base_resonance != r.base_resonance)
            .map(|(l, r)| Discrepancy {
                digit: l.digit,
                left: l.source.clone(),
                left_multiplier: l.multiplier,
                left_base_resonance: l.base_resonance,
                right: r.source.clone(),
                right_multiplier: r.multiplier,
                right_base_resonance: r.base_resonance,
            })
            .collect()
    }

    /// Discrepancies against the relation table, then against the main table.
    pub fn discrepancy_report(&self) -> Vec<Discrepancy> {
        [Self::relation(), Self::main()]
            .iter()
            .flat_map(|builtin| self.discrepancies(builtin))
            .collect()
    }
}

impl Default for MultiplierTable {
    fn default() -> Self {
        Self::relation()
    }
}
