//! Prize table loader
//!
//! The weighted catalog of outcomes the mock settlement engine draws from.
//! Scenario strings are opaque here; only presentation interprets them.

use crate::errors::{WrapperError, WrapperResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One possible visual result within a prize entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScenarioVariant {
    pub scenario: String,
}

impl ScenarioVariant {
    pub fn new(scenario: impl Into<String>) -> Self {
        Self {
            scenario: scenario.into(),
        }
    }
}

/// Weighted outcome definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrizeEntry {
    /// Draw weight; legacy prize-table documents spell this field `n`
    #[serde(alias = "n")]
    pub weight: f64,
    pub win: bool,
    pub scenarios: Vec<ScenarioVariant>,
}

/// Ordered, validated prize catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrizeTable {
    entries: Vec<PrizeEntry>,
}

impl PrizeTable {
    /// Build from entries, rejecting tables the engine cannot draw from
    pub fn new(entries: Vec<PrizeEntry>) -> WrapperResult<Self> {
        let table = Self { entries };
        table.validate()?;
        Ok(table)
    }

    /// Parse a prize table document
    pub fn from_json_str(raw: &str) -> WrapperResult<Self> {
        let entries: Vec<PrizeEntry> = serde_json::from_str(raw)?;
        Self::new(entries)
    }

    /// Load a prize table document from disk
    pub fn load(path: impl AsRef<Path>) -> WrapperResult<Self> {
        let raw = std::fs::read_to_string(&path).map_err(|e| {
            WrapperError::Configuration(format!(
                "failed to read prize table {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_json_str(&raw)
    }

    /// Built-in demo table: mostly losses, a few weighted win tiers
    pub fn demo() -> Self {
        let entries = vec![
            PrizeEntry {
                weight: 70.0,
                win: false,
                scenarios: vec![
                    ScenarioVariant::new("ABC"),
                    ScenarioVariant::new("BCA"),
                    ScenarioVariant::new("CAB"),
                    ScenarioVariant::new("ACB"),
                ],
            },
            PrizeEntry {
                weight: 20.0,
                win: true,
                scenarios: vec![ScenarioVariant::new("AAB"), ScenarioVariant::new("BBA")],
            },
            PrizeEntry {
                weight: 8.0,
                win: true,
                scenarios: vec![ScenarioVariant::new("AAA"), ScenarioVariant::new("BBB")],
            },
            PrizeEntry {
                weight: 2.0,
                win: true,
                scenarios: vec![ScenarioVariant::new("777")],
            },
        ];
        // The built-in table is statically well formed.
        Self::new(entries).unwrap()
    }

    pub fn entries(&self) -> &[PrizeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|e| e.weight).sum()
    }

    /// Invariants: non-empty, finite non-negative weights summing above
    /// zero, at least one scenario per entry
    pub fn validate(&self) -> WrapperResult<()> {
        if self.entries.is_empty() {
            return Err(WrapperError::Configuration(
                "prize table is empty".to_string(),
            ));
        }
        for (index, entry) in self.entries.iter().enumerate() {
            if !entry.weight.is_finite() || entry.weight < 0.0 {
                return Err(WrapperError::Validation(format!(
                    "prize entry {} has invalid weight {}",
                    index, entry.weight
                )));
            }
            if entry.scenarios.is_empty() {
                return Err(WrapperError::Validation(format!(
                    "prize entry {} has no scenarios",
                    index
                )));
            }
        }
        if self.total_weight() <= 0.0 {
            return Err(WrapperError::Configuration(
                "prize table total weight must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
