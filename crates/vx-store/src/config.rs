//! `config.toml` loading and resolution into a [`HarmonicEngine`].

use std::fs;
use std::path::Path;

use serde::Deserialize;
use vx_core::{ColorPolicy, Convention, Digit, Fraction, HarmonicEngine, MultiplierTable};

use crate::error::{Result, StoreError};

/// One configured multiplier replacing a built-in row.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct MultiplierOverride {
    pub digit: i64,
    pub numerator: u32,
    #[serde(default = "default_denominator")]
    pub denominator: u32,
    /// Where the value was observed. Recorded as the row's source.
    #[serde(default)]
    pub source: Option<String>,
}

fn default_denominator() -> u32 {
    1
}

/// Deserialized `config.toml`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    pub convention: Option<String>,
    pub color_policy: Option<String>,
    pub multiplier_overrides: Vec<MultiplierOverride>,
}

impl EngineConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read `path`, or return the default config if it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| {
            StoreError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply command-line overrides on top of file values.
    pub fn with_overrides(mut self, convention: Option<&str>, clamp_color: bool) -> Self {
        if let Some(c) = convention {
            self.convention = Some(c.to_string());
        }
        if clamp_color {
            self.color_policy = Some("clamped".to_string());
        }
        self
    }

    pub fn resolve_convention(&self) -> Result<Convention> {
        match self.convention.as_deref() {
            None => Ok(Convention::Relation),
            Some(s) => Convention::parse(s)
                .ok_or_else(|| StoreError::Config(format!("unknown convention '{s}'"))),
        }
    }

    pub fn resolve_policy(&self) -> Result<ColorPolicy> {
        match self.color_policy.as_deref() {
            None => Ok(ColorPolicy::default()),
            Some(s) => ColorPolicy::parse(s)
                .ok_or_else(|| StoreError::Config(format!("unknown color policy '{s}'"))),
        }
    }

    /// Built-in table for the selected convention with overrides applied.
    /// Each overridden row is attributed to its own `source`.
    pub fn resolve_table(&self) -> Result<MultiplierTable> {
        let mut table = MultiplierTable::builtin(self.resolve_convention()?);
        for o in &self.multiplier_overrides {
            let digit = Digit::try_from(o.digit)?;
            let multiplier = Fraction::new(o.numerator, o.denominator)
                .map_err(|e| StoreError::Config(format!("digit {digit}: {e}")))?;
            let source = o.source.as_deref().unwrap_or("config");
            let previous = table.get(digit).multiplier;
            if previous != multiplier {
                tracing::warn!(
                    "overriding multiplier for digit {digit}: {previous} → {multiplier} ({source})"
                );
            }
            table = table.with_multiplier(digit, multiplier, source);
        }
        Ok(table)
    }

    pub fn build_engine(&self) -> Result<HarmonicEngine> {
        Ok(HarmonicEngine::new(
            self.resolve_table()?,
            self.resolve_policy()?,
        ))
    }
}
