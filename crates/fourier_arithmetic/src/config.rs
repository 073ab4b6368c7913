// =============================================================================
// Fourier Arithmetic Simulator - Configuration
// =============================================================================
// Table of Contents:
//   1. LargeAdditionConfiguration - Single wide addition with state dump
//   2. ArithmeticSuiteConfiguration - Ranges of the experiment suite
//   3. Loading and validation
// =============================================================================
// Purpose: Serde-backed settings for the experiment suite. Every field has a
//          default, so a TOML file only needs the keys it overrides.
// =============================================================================

use crate::error::{ArithmeticError, ArithmeticResult, ErrorContext};
use amplitude_engine::state_dump::StateDumpOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Widest operand accepted. Two registers of `width + 1` qubits give a
/// 2^26-amplitude state at this limit.
pub const MAX_OPERAND_WIDTH: usize = 12;

// =============================================================================
// 1. LargeAdditionConfiguration
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LargeAdditionConfiguration {
    pub operand_width: usize,
    pub init_a: u64,
    pub init_b: u64,
}

impl Default for LargeAdditionConfiguration {
    fn default() -> Self {
        Self {
            operand_width: 8,
            init_a: 1,
            init_b: 2,
        }
    }
}

// =============================================================================
// 2. ArithmeticSuiteConfiguration
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArithmeticSuiteConfiguration {
    /// Operand width of the addition, subtraction and multiplication loops.
    pub operand_width: usize,
    /// Addition and constant addition run every pair below this bound.
    pub addition_range: u64,
    /// Subtraction runs `i - j` for `j < i < subtraction_range`.
    pub subtraction_range: u64,
    /// Pseudo multiplication runs `0 + j * i` below this bound.
    pub multiplication_range: u64,
    pub dump_large_addition: bool,
    pub json_report: bool,
    pub large_addition: LargeAdditionConfiguration,
    pub dump_options: StateDumpOptions,
}

impl Default for ArithmeticSuiteConfiguration {
    fn default() -> Self {
        Self {
            operand_width: 6,
            addition_range: 7,
            subtraction_range: 8,
            multiplication_range: 7,
            dump_large_addition: true,
            json_report: false,
            large_addition: LargeAdditionConfiguration::default(),
            dump_options: StateDumpOptions::default(),
        }
    }
}

impl ArithmeticSuiteConfiguration {
    /// Small widths and ranges, finishes in well under a second.
    pub fn quick() -> Self {
        Self {
            operand_width: 3,
            addition_range: 4,
            subtraction_range: 5,
            multiplication_range: 3,
            large_addition: LargeAdditionConfiguration {
                operand_width: 4,
                init_a: 3,
                init_b: 9,
            },
            dump_large_addition: false,
            ..Self::default()
        }
    }

    pub fn with_json_report(mut self, json_report: bool) -> Self {
        self.json_report = json_report;
        self
    }

    pub fn with_operand_width(mut self, operand_width: usize) -> Self {
        self.operand_width = operand_width;
        self
    }

    // =========================================================================
    // 3. Loading and validation
    // =========================================================================

    pub fn from_toml_str(source: &str) -> ArithmeticResult<Self> {
        let configuration: Self = toml::from_str(source).context("parsing suite configuration")?;
        configuration.validate()?;
        Ok(configuration)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> ArithmeticResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        tracing::debug!(path = %path.display(), "Loading suite configuration");
        Self::from_toml_str(&source)
    }

    pub fn to_toml_string(&self) -> ArithmeticResult<String> {
        toml::to_string(self).context("serializing suite configuration")
    }

    /// Operands must fit the operand width and products the overflow bit.
    pub fn validate(&self) -> ArithmeticResult<()> {
        check_width(self.operand_width)?;
        check_width(self.large_addition.operand_width)?;

        let capacity = 1u64 << self.operand_width;
        let checks = [
            ("addition_range", self.addition_range, capacity),
            ("subtraction_range", self.subtraction_range, capacity),
            ("multiplication_range", self.multiplication_range, capacity),
        ];
        for (key, range, limit) in checks {
            if range > limit {
                return Err(ArithmeticError::Configuration(format!(
                    "{key} = {range} exceeds {limit} for {}-bit operands",
                    self.operand_width
                )));
            }
        }

        // Constant addition reads back only `operand_width` bits.
        let largest_sum = 2 * self.addition_range.saturating_sub(1);
        if largest_sum >= capacity {
            return Err(ArithmeticError::Configuration(format!(
                "addition_range = {} overflows {}-bit constant addition",
                self.addition_range, self.operand_width
            )));
        }

        let largest_product = self.multiplication_range.saturating_sub(1).pow(2);
        if largest_product >= 2 * capacity {
            return Err(ArithmeticError::Configuration(format!(
                "multiplication_range = {} overflows the {}-qubit result register",
                self.multiplication_range,
                self.operand_width + 1
            )));
        }

        let large = &self.large_addition;
        let large_capacity = 1u64 << large.operand_width;
        for operand in [large.init_a, large.init_b] {
            if operand >= large_capacity {
                return Err(ArithmeticError::OperandTooWide {
                    operand,
                    width: large.operand_width,
                });
            }
        }

        if !(0.0..=1.0).contains(&self.dump_options.probability_threshold) {
            return Err(ArithmeticError::Configuration(format!(
                "probability_threshold = {} outside [0, 1]",
                self.dump_options.probability_threshold
            )));
        }
        Ok(())
    }
}

pub(crate) fn check_width(width: usize) -> ArithmeticResult<()> {
    if width == 0 || width > MAX_OPERAND_WIDTH {
        return Err(ArithmeticError::InvalidOperandWidth {
            width,
            max: MAX_OPERAND_WIDTH,
        });
    }
    Ok(())
}
