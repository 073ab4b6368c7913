// =============================================================================
// Fourier Arithmetic Simulator - State Dump
// =============================================================================
// Table of Contents:
//   1. StateDumpOptions - Threshold and filtering
//   2. Line rendering
// =============================================================================
// Purpose: Human-readable listing of basis patterns with amplitude,
//          probability and phase, one line per pattern, sorted.
// =============================================================================

use crate::bit_order::{bits2val, val2bits};
use crate::quantum_state::{QuantumState, amplitude_phase_degrees};
use serde::{Deserialize, Serialize};

// =============================================================================
// 1. StateDumpOptions - Threshold and filtering
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateDumpOptions {
    /// Patterns below this probability are skipped when
    /// `probabilities_only` is set.
    pub probability_threshold: f64,
    pub probabilities_only: bool,
}

impl Default for StateDumpOptions {
    fn default() -> Self {
        Self {
            probability_threshold: 1e-5,
            probabilities_only: true,
        }
    }
}

impl StateDumpOptions {
    /// Every pattern, including zero-probability ones.
    pub fn all_patterns() -> Self {
        Self {
            probabilities_only: false,
            ..Self::default()
        }
    }
}

// =============================================================================
// 2. Line rendering
// =============================================================================

/// `|010> (|2>)`.
pub fn state_to_string(bits: &[u8]) -> String {
    let digits: String = bits.iter().map(|bit| char::from(b'0' + bit)).collect();
    format!("|{}> (|{}>)", digits, bits2val(bits))
}

/// Sorted dump lines, without the header.
pub fn dump_lines(state: &QuantumState, options: &StateDumpOptions) -> Vec<String> {
    let nbits = state.nbits();
    let mut lines: Vec<String> = state
        .amplitudes()
        .iter()
        .enumerate()
        .filter_map(|(offset, amplitude)| {
            let probability = amplitude.norm_sqr();
            if options.probabilities_only && probability < options.probability_threshold {
                return None;
            }
            Some(format!(
                "{}:  ampl: {:+.2}{:+.2}j prob: {:.2} Phase: {:5.1}",
                state_to_string(&val2bits(offset as u64, nbits)),
                amplitude.re,
                amplitude.im,
                probability,
                amplitude_phase_degrees(*amplitude)
            ))
        })
        .collect();
    lines.sort();
    lines
}

/// Header `|0123...> 'desc'` followed by the dump lines.
pub fn render_dump(
    state: &QuantumState,
    description: Option<&str>,
    options: &StateDumpOptions,
) -> String {
    let mut rendered = String::new();
    if let Some(description) = description {
        let positions: String = (0..state.nbits())
            .map(|index| char::from(b'0' + (index % 10) as u8))
            .collect();
        rendered.push_str(&format!("|{}> '{}'\n", positions, description));
    }
    for line in dump_lines(state, options) {
        rendered.push_str(&line);
        rendered.push('\n');
    }
    rendered
}

impl QuantumState {
    /// Dump with default options.
    pub fn dump(&self, description: Option<&str>) -> String {
        render_dump(self, description, &StateDumpOptions::default())
    }
}
