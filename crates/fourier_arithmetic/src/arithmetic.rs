// =============================================================================
// Fourier Arithmetic Simulator - Register Arithmetic
// =============================================================================
// Table of Contents:
//   1. ArithmeticOperation - Add, subtract, scaled add
//   2. ArithmeticOutcome - Verified result of one run
//   3. Register arithmetic (a + factor * b)
//   4. Constant addition (a + c with precomputed angles)
// =============================================================================
// Purpose: Builds the Fourier-basis adder on a fresh circuit, runs it on the
//          dense state, decodes the most probable pattern and verifies it
//          against classical arithmetic. A mismatch is always an error.
// =============================================================================

use crate::circuit::FourierCircuit;
use crate::config::check_width;
use crate::error::{ArithmeticError, ArithmeticResult};
use crate::qft::{evolve, fourier_transform, inverse_fourier_transform};
use amplitude_engine::bit_order::{BitOrder, val2bits};
use amplitude_engine::register::RegisterInitializer;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

// =============================================================================
// 1. ArithmeticOperation - Add, subtract, scaled add
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArithmeticOperation {
    Add,
    Subtract,
    /// `a + factor * b`; with `a = 0` this is a multiplication.
    ScaledAdd(f64),
}

impl ArithmeticOperation {
    pub fn factor(self) -> f64 {
        match self {
            ArithmeticOperation::Add => 1.0,
            ArithmeticOperation::Subtract => -1.0,
            ArithmeticOperation::ScaledAdd(factor) => factor,
        }
    }

    /// Only integer factors have a classical result to verify against.
    pub fn integer_factor(self) -> ArithmeticResult<i64> {
        let factor = self.factor();
        if !factor.is_finite() || factor.fract() != 0.0 || factor.abs() > i64::MAX as f64 {
            return Err(ArithmeticError::InvalidFactor { factor });
        }
        Ok(factor as i64)
    }
}

impl fmt::Display for ArithmeticOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArithmeticOperation::Add => write!(f, "add"),
            ArithmeticOperation::Subtract => write!(f, "subtract"),
            ArithmeticOperation::ScaledAdd(factor) => write!(f, "scaled_add({})", factor),
        }
    }
}

// =============================================================================
// 2. ArithmeticOutcome - Verified result of one run
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArithmeticKind {
    Register,
    Constant,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArithmeticOutcome {
    pub kind: ArithmeticKind,
    pub operand_width: usize,
    pub init_a: u64,
    /// Register operand `b`, or the classical constant.
    pub operand: u64,
    pub factor: f64,
    pub expected: u64,
    pub result: u64,
    pub probability: f64,
    pub number_of_quantum_bits: usize,
    pub gate_count: usize,
}

impl ArithmeticOutcome {
    pub fn to_json(&self) -> ArithmeticResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl fmt::Display for ArithmeticOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ArithmeticKind::Register => write!(
                f,
                "{} + ({} * {}) = {}",
                self.init_a, self.factor, self.operand, self.result
            ),
            ArithmeticKind::Constant => {
                write!(f, "{} + const {} = {}", self.init_a, self.operand, self.result)
            }
        }?;
        write!(
            f,
            " [{} qubits, {} gates, p = {:.4}]",
            self.number_of_quantum_bits, self.gate_count, self.probability
        )
    }
}

/// A finished run together with the circuit that produced it.
#[derive(Debug, Clone)]
pub struct ArithmeticRun {
    pub outcome: ArithmeticOutcome,
    pub circuit: FourierCircuit,
}

fn check_operand(operand: u64, width: usize) -> ArithmeticResult<()> {
    if operand >> width != 0 {
        return Err(ArithmeticError::OperandTooWide { operand, width });
    }
    Ok(())
}

/// `width`-bit operand, least significant bit first. The register is one
/// qubit wider, so the overflow qubit starts at 0.
fn operand_initializer(operand: u64, width: usize) -> RegisterInitializer {
    RegisterInitializer::FromBitSequence(BitOrder::LowToHigh.value_to_bits(operand, width))
}

/// Decode the first `width` qubits of the most probable pattern.
fn decode_most_probable(circuit: &FourierCircuit, width: usize) -> ArithmeticResult<(u64, f64)> {
    let (bits, probability) = circuit.state()?.maxprob();
    Ok((BitOrder::LowToHigh.bits_to_value(&bits[..width]), probability))
}

fn verify(expected: u64, actual: u64, probability: f64) -> ArithmeticResult<()> {
    if expected != actual {
        tracing::warn!(expected, actual, probability, "Incorrect arithmetic result");
        return Err(ArithmeticError::ArithmeticMismatch {
            expected,
            actual,
            probability,
        });
    }
    Ok(())
}

// =============================================================================
// 3. Register arithmetic (a + factor * b)
// =============================================================================

/// Compute `init_a + factor * init_b` modulo `2^(operand_width + 1)` with
/// two registers of `operand_width + 1` qubits each.
pub fn run_register_arithmetic(
    operand_width: usize,
    init_a: u64,
    init_b: u64,
    operation: ArithmeticOperation,
) -> ArithmeticResult<ArithmeticRun> {
    check_width(operand_width)?;
    check_operand(init_a, operand_width)?;
    check_operand(init_b, operand_width)?;
    let factor = operation.integer_factor()?;

    let register_size = operand_width + 1;
    let mut circuit = FourierCircuit::new("qadd");
    let a = circuit.add_register("a", register_size, &operand_initializer(init_a, operand_width))?;
    let b = circuit.add_register("b", register_size, &operand_initializer(init_b, operand_width))?;

    fourier_transform(&mut circuit, &a)?;
    evolve(&mut circuit, &a, &b, operation.factor())?;
    inverse_fourier_transform(&mut circuit, &a)?;

    let (result, probability) = decode_most_probable(&circuit, register_size)?;
    let modulus = 1i128 << register_size;
    let expected = (init_a as i128 + factor as i128 * init_b as i128).rem_euclid(modulus) as u64;
    verify(expected, result, probability)?;

    let outcome = ArithmeticOutcome {
        kind: ArithmeticKind::Register,
        operand_width,
        init_a,
        operand: init_b,
        factor: operation.factor(),
        expected,
        result,
        probability,
        number_of_quantum_bits: circuit.number_of_quantum_bits(),
        gate_count: circuit.gate_count(),
    };
    tracing::info!(
        operation = %operation,
        init_a,
        init_b,
        result,
        qubits = outcome.number_of_quantum_bits,
        "Register arithmetic verified"
    );
    Ok(ArithmeticRun { outcome, circuit })
}

pub fn run_addition(operand_width: usize, init_a: u64, init_b: u64) -> ArithmeticResult<ArithmeticOutcome> {
    Ok(run_register_arithmetic(operand_width, init_a, init_b, ArithmeticOperation::Add)?.outcome)
}

pub fn run_subtraction(operand_width: usize, init_a: u64, init_b: u64) -> ArithmeticResult<ArithmeticOutcome> {
    Ok(run_register_arithmetic(operand_width, init_a, init_b, ArithmeticOperation::Subtract)?.outcome)
}

// =============================================================================
// 4. Constant addition (a + c with precomputed angles)
// =============================================================================

/// Phase angles that add the classical `constant` in the Fourier basis.
/// `angles[n - i - 1] = pi * sum(2^-(j - i))` over the set bits `j >= i` of
/// the `n`-bit pattern of `constant`, most significant bit first.
pub fn precompute_constant_angles(constant: u64, operand_width: usize) -> ArithmeticResult<Vec<f64>> {
    if operand_width < 64 && constant >> operand_width != 0 {
        return Err(ArithmeticError::ConstantTooWide {
            constant,
            width: operand_width,
        });
    }
    let bits = val2bits(constant, operand_width);
    let mut angles = vec![0.0; operand_width];
    for i in 0..operand_width {
        let weight: f64 = (i..operand_width)
            .filter(|&j| bits[j] == 1)
            .map(|j| 2f64.powi(-((j - i) as i32)))
            .sum();
        angles[operand_width - i - 1] = PI * weight;
    }
    Ok(angles)
}

/// Compute `init_a + constant` modulo `2^operand_width` with a single
/// register. Only phase gates encode the constant.
pub fn run_constant_addition(
    operand_width: usize,
    init_a: u64,
    constant: u64,
) -> ArithmeticResult<ArithmeticRun> {
    check_width(operand_width)?;
    check_operand(init_a, operand_width)?;
    let angles = precompute_constant_angles(constant, operand_width)?;

    let mut circuit = FourierCircuit::new("qadd_constant");
    let a = circuit.add_register("a", operand_width + 1, &operand_initializer(init_a, operand_width))?;

    fourier_transform(&mut circuit, &a)?;
    for (i, &angle) in angles.iter().enumerate() {
        circuit.phase(a[i], angle)?;
    }
    inverse_fourier_transform(&mut circuit, &a)?;

    let (result, probability) = decode_most_probable(&circuit, operand_width)?;
    let expected = (init_a + constant) % (1u64 << operand_width);
    verify(expected, result, probability)?;

    let outcome = ArithmeticOutcome {
        kind: ArithmeticKind::Constant,
        operand_width,
        init_a,
        operand: constant,
        factor: 1.0,
        expected,
        result,
        probability,
        number_of_quantum_bits: circuit.number_of_quantum_bits(),
        gate_count: circuit.gate_count(),
    };
    tracing::info!(init_a, constant, result, probability, "Constant addition verified");
    Ok(ArithmeticRun { outcome, circuit })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_factors() {
        assert_eq!(ArithmeticOperation::Add.factor(), 1.0);
        assert_eq!(ArithmeticOperation::Subtract.integer_factor().unwrap(), -1);
        assert_eq!(ArithmeticOperation::ScaledAdd(3.0).integer_factor().unwrap(), 3);
        assert!(matches!(
            ArithmeticOperation::ScaledAdd(0.5).integer_factor(),
            Err(ArithmeticError::InvalidFactor { .. })
        ));
        assert!(ArithmeticOperation::ScaledAdd(f64::NAN).integer_factor().is_err());
    }

    #[test]
    fn test_precompute_angles() {
        // c = 1 over two bits: s = "01"
        let angles = precompute_constant_angles(1, 2).unwrap();
        assert!((angles[1] - PI / 2.0).abs() < 1e-12);
        assert!((angles[0] - PI).abs() < 1e-12);

        // c = 2 over two bits: s = "10"
        let angles = precompute_constant_angles(2, 2).unwrap();
        assert!((angles[1] - PI).abs() < 1e-12);
        assert!(angles[0].abs() < 1e-12);

        assert!(matches!(
            precompute_constant_angles(4, 2),
            Err(ArithmeticError::ConstantTooWide { constant: 4, width: 2 })
        ));
    }

    #[test]
    fn test_small_addition() {
        let outcome = run_addition(2, 1, 2).unwrap();
        assert_eq!(outcome.result, 3);
        assert_eq!(outcome.number_of_quantum_bits, 6);
        assert!((outcome.probability - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_subtraction_wraps_modulo_register() {
        let outcome = run_subtraction(3, 3, 5).unwrap();
        assert_eq!(outcome.expected, 14);
        assert_eq!(outcome.result, 14);
    }

    #[test]
    fn test_operand_validation() {
        assert!(matches!(
            run_addition(2, 4, 0),
            Err(ArithmeticError::OperandTooWide { operand: 4, width: 2 })
        ));
        assert!(matches!(
            run_addition(0, 0, 0),
            Err(ArithmeticError::InvalidOperandWidth { width: 0, .. })
        ));
    }

    #[test]
    fn test_constant_addition_small() {
        let run = run_constant_addition(3, 2, 3).unwrap();
        assert_eq!(run.outcome.result, 5);
        assert_eq!(run.outcome.kind, ArithmeticKind::Constant);
        assert_eq!(run.circuit.number_of_quantum_bits(), 4);
    }

    #[test]
    fn test_outcome_json() {
        let outcome = run_addition(2, 1, 1).unwrap();
        let json = outcome.to_json().unwrap();
        assert!(json.contains("\"kind\":\"register\""));
        assert!(json.contains("\"result\":2"));
    }
}
