// =============================================================================
// Fourier Arithmetic Simulator - QFT Stages
// =============================================================================
// Table of Contents:
//   1. Single stages (qft_stage, evolve_stage, inverse_qft_stage)
//   2. Whole-register passes
// =============================================================================
// Purpose: Phase-rotation stages of the Fourier-basis adder. The base angle
//          is pi, not 2*pi, and registers hold operands least significant
//          bit first.
// =============================================================================

use crate::circuit::FourierCircuit;
use crate::error::{ArithmeticError, ArithmeticResult};
use amplitude_engine::register::Register;
use std::f64::consts::PI;

fn check_stage(register: &Register, stage: usize) -> ArithmeticResult<()> {
    if stage >= register.size() {
        return Err(ArithmeticError::StageOutOfRange {
            register: register.name().to_string(),
            stage,
            size: register.size(),
        });
    }
    Ok(())
}

/// `pi / 2^exponent`.
#[inline]
fn pi_over_power_of_two(exponent: usize) -> f64 {
    PI / 2f64.powi(exponent as i32)
}

// =============================================================================
// 1. Single stages
// =============================================================================

/// Hadamard on `register[m]`, then rotations controlled by the qubits below.
pub fn qft_stage(
    circuit: &mut FourierCircuit,
    register: &Register,
    m: usize,
) -> ArithmeticResult<()> {
    check_stage(register, m)?;
    circuit.hadamard(register[m])?;
    for i in 0..m {
        circuit.controlled_phase(register[m - (i + 1)], register[m], pi_over_power_of_two(i + 1))?;
    }
    Ok(())
}

/// Rotate `a[m]` by `factor * pi / 2^i` controlled by `b[m - i]`.
pub fn evolve_stage(
    circuit: &mut FourierCircuit,
    a: &Register,
    b: &Register,
    m: usize,
    factor: f64,
) -> ArithmeticResult<()> {
    check_stage(a, m)?;
    check_stage(b, m)?;
    for i in 0..=m {
        circuit.controlled_phase(b[m - i], a[m], factor * pi_over_power_of_two(i))?;
    }
    Ok(())
}

/// Undo the rotations of `qft_stage`, then the Hadamard.
pub fn inverse_qft_stage(
    circuit: &mut FourierCircuit,
    register: &Register,
    m: usize,
) -> ArithmeticResult<()> {
    check_stage(register, m)?;
    for i in 0..m {
        circuit.controlled_phase(register[i], register[m], -pi_over_power_of_two(m - i))?;
    }
    circuit.hadamard(register[m])?;
    Ok(())
}

// =============================================================================
// 2. Whole-register passes
// =============================================================================

/// `qft_stage(m)` from the top qubit down to qubit 0.
pub fn fourier_transform(circuit: &mut FourierCircuit, register: &Register) -> ArithmeticResult<()> {
    let top = register.size() - 1;
    for i in 0..=top {
        qft_stage(circuit, register, top - i)?;
    }
    tracing::debug!(register = register.name(), gates = circuit.gate_count(), "Fourier transform applied");
    Ok(())
}

/// Add `factor * b` into the Fourier-transformed `a`.
pub fn evolve(
    circuit: &mut FourierCircuit,
    a: &Register,
    b: &Register,
    factor: f64,
) -> ArithmeticResult<()> {
    let top = a.size() - 1;
    for i in 0..=top {
        evolve_stage(circuit, a, b, top - i, factor)?;
    }
    tracing::debug!(a = a.name(), b = b.name(), factor, "Evolution applied");
    Ok(())
}

/// `inverse_qft_stage(m)` from qubit 0 up to the top qubit.
pub fn inverse_fourier_transform(
    circuit: &mut FourierCircuit,
    register: &Register,
) -> ArithmeticResult<()> {
    for m in 0..register.size() {
        inverse_qft_stage(circuit, register, m)?;
    }
    tracing::debug!(register = register.name(), gates = circuit.gate_count(), "Inverse Fourier transform applied");
    Ok(())
}
