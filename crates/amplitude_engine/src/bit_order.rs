// =============================================================================
// Fourier Arithmetic Simulator - Bit Order Convention
// =============================================================================
// Table of Contents:
//   1. BitOrder - Mapping between bit positions and binary weights
//   2. Integer <-> bit pattern helpers (val2bits / bits2val)
//   3. Pattern enumeration and angle formatting helpers
// =============================================================================
// Purpose: Single source of truth for how a bit pattern maps to a vector
//          offset. Qubit 0 of a state is the most significant bit of the
//          offset (`BitOrder::HighToLow`). Arithmetic operands are stored
//          pre-reversed and use `BitOrder::LowToHigh` at both ends.
// =============================================================================

use crate::error::{EngineResult, StateError};
use crate::quantum_state::MAX_QUANTUM_BITS;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

// =============================================================================
// 1. BitOrder - Mapping between bit positions and binary weights
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BitOrder {
    /// Position 0 carries the highest weight, e.g. `[1, 1, 0]` is 6.
    #[default]
    HighToLow,
    /// Position 0 carries weight 1, e.g. `[1, 1, 0]` is 3.
    LowToHigh,
}

impl BitOrder {
    /// The order every `QuantumState` uses to address its amplitudes.
    pub const STATE: BitOrder = BitOrder::HighToLow;

    /// Binary weight of `position` in a pattern of `width` bits.
    ///
    /// `position` must be below `width`; callers validate indices first.
    #[inline]
    pub fn bit_weight(self, position: usize, width: usize) -> usize {
        match self {
            BitOrder::HighToLow => 1usize << (width - 1 - position),
            BitOrder::LowToHigh => 1usize << position,
        }
    }

    pub fn bits_to_value(self, bits: &[u8]) -> u64 {
        match self {
            BitOrder::HighToLow => bits
                .iter()
                .fold(0u64, |acc, &bit| (acc << 1) | (bit as u64 & 1)),
            BitOrder::LowToHigh => bits
                .iter()
                .rev()
                .fold(0u64, |acc, &bit| (acc << 1) | (bit as u64 & 1)),
        }
    }

    /// Zero-padded `width`-bit pattern for `value`. Bits above `width` are
    /// dropped.
    pub fn value_to_bits(self, value: u64, width: usize) -> Vec<u8> {
        let low_to_high = (0..width).map(|position| {
            if position < u64::BITS as usize {
                ((value >> position) & 1) as u8
            } else {
                0
            }
        });
        match self {
            BitOrder::LowToHigh => low_to_high.collect(),
            BitOrder::HighToLow => {
                let mut bits: Vec<u8> = low_to_high.collect();
                bits.reverse();
                bits
            }
        }
    }

    /// Vector offset addressed by `bits`.
    pub fn offset_of(self, bits: &[u8]) -> usize {
        self.bits_to_value(bits) as usize
    }

    pub fn reversed(self) -> Self {
        match self {
            BitOrder::HighToLow => BitOrder::LowToHigh,
            BitOrder::LowToHigh => BitOrder::HighToLow,
        }
    }
}

// =============================================================================
// 2. Integer <-> bit pattern helpers
// =============================================================================

/// `val2bits(6, 3) == [1, 1, 0]`.
pub fn val2bits(value: u64, number_of_bits: usize) -> Vec<u8> {
    BitOrder::HighToLow.value_to_bits(value, number_of_bits)
}

/// `bits2val(&[1, 1, 0]) == 6`.
pub fn bits2val(bits: &[u8]) -> u64 {
    BitOrder::HighToLow.bits_to_value(bits)
}

/// Binary fraction `0.b0 b1 b2 ...` of a pattern.
pub fn bits2frac(bits: &[u8]) -> f64 {
    bits.iter()
        .enumerate()
        .map(|(i, &bit)| bit as f64 * 2f64.powi(-(i as i32) - 1))
        .sum()
}

// =============================================================================
// 3. Pattern enumeration and angle formatting helpers
// =============================================================================

/// Every `number_of_bits`-bit pattern in lexicographic order, all zeros
/// first and all ones last.
pub fn bit_patterns(number_of_bits: usize) -> EngineResult<BitPatterns> {
    if number_of_bits > MAX_QUANTUM_BITS {
        return Err(StateError::TooManyQubits {
            requested: number_of_bits,
            max: MAX_QUANTUM_BITS,
        }
        .into());
    }
    Ok(BitPatterns {
        next_value: 0,
        end: 1usize << number_of_bits,
        number_of_bits,
    })
}

#[derive(Debug, Clone)]
pub struct BitPatterns {
    next_value: usize,
    end: usize,
    number_of_bits: usize,
}

impl Iterator for BitPatterns {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_value >= self.end {
            return None;
        }
        let bits = val2bits(self.next_value as u64, self.number_of_bits);
        self.next_value += 1;
        Some(bits)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next_value;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BitPatterns {}

fn is_close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs())
}

/// Render an angle as a fraction of π, e.g. `"pi/4"` or `"-3*pi/2"`.
///
/// Falls back to the plain decimal value when no multiplier in 1..=3 over a
/// denominator in -128..128 matches.
pub fn pi_fractions(value: f64) -> String {
    pi_fractions_named(value, "pi")
}

pub fn pi_fractions_named(value: f64, pi_name: &str) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    for multiplier in 1..4i32 {
        for denominator in -128..128i32 {
            if denominator == 0 {
                continue;
            }
            if !is_close(value, multiplier as f64 * PI / denominator as f64) {
                continue;
            }
            let prefix = if multiplier != 1 {
                format!("{}*", multiplier)
            } else {
                String::new()
            };
            return match denominator {
                -1 => format!("-{}{}", prefix, pi_name),
                1 => format!("{}{}", prefix, pi_name),
                d if d < 0 => format!("-{}{}/{}", prefix, pi_name, -d),
                d => format!("{}{}/{}", prefix, pi_name, d),
            };
        }
    }
    format!("{}", value)
}
