// =============================================================================
// Fourier Arithmetic Simulator - Quantum State
// =============================================================================
// Table of Contents:
//   1. QuantumState - Dense amplitude vector with a qubit count
//   2. Constructors (zeros, ones, bit patterns, single qubit, products)
//   3. Inspection (ampl, prob, phase, maxprob, density, schmidt_number)
//   4. Gate application (apply1, applyc)
// =============================================================================
// Purpose: An n-qubit state of length 2^n. Qubit 0 is the most significant
//          bit of an amplitude offset. Gates mutate the vector in place and
//          every index is validated before the first amplitude is written.
// =============================================================================

use crate::amplitude_tensor::AmplitudeTensor;
use crate::bit_order::{BitOrder, val2bits};
use crate::density_matrix::DensityMatrix;
use crate::error::{EngineResult, StateError};
use crate::gate_matrices::GateMatrix;
use nalgebra::DMatrix;
use num_complex::Complex64;
use rand::Rng;
use std::fmt;

/// Total probability below which `normalize` refuses to rescale.
pub const DEGENERATE_PROBABILITY: f64 = 1e-14;

/// Singular values above this count towards the Schmidt number.
pub const SCHMIDT_TOLERANCE: f64 = 1e-10;

/// Widest state the dense engine will allocate or enumerate.
pub const MAX_QUANTUM_BITS: usize = 32;

pub(crate) fn check_qubit_count(number_of_quantum_bits: usize) -> EngineResult<()> {
    if number_of_quantum_bits == 0 {
        return Err(StateError::ZeroQubits.into());
    }
    if number_of_quantum_bits > MAX_QUANTUM_BITS {
        return Err(StateError::TooManyQubits {
            requested: number_of_quantum_bits,
            max: MAX_QUANTUM_BITS,
        }
        .into());
    }
    Ok(())
}

// =============================================================================
// 1. QuantumState - Dense amplitude vector with a qubit count
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct QuantumState {
    tensor: AmplitudeTensor,
    number_of_quantum_bits: usize,
}

impl QuantumState {
    pub fn from_tensor(tensor: AmplitudeTensor) -> Self {
        let number_of_quantum_bits = tensor.rank();
        Self {
            tensor,
            number_of_quantum_bits,
        }
    }

    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> EngineResult<Self> {
        Ok(Self::from_tensor(AmplitudeTensor::from_amplitudes(amplitudes)?))
    }

    // =========================================================================
    // 2. Constructors
    // =========================================================================

    /// `|00...0>`.
    pub fn zeros(number_of_quantum_bits: usize) -> EngineResult<Self> {
        Self::basis(number_of_quantum_bits, 0)
    }

    /// `|11...1>`.
    pub fn ones(number_of_quantum_bits: usize) -> EngineResult<Self> {
        check_qubit_count(number_of_quantum_bits)?;
        let last = (1usize << number_of_quantum_bits) - 1;
        Self::basis(number_of_quantum_bits, last)
    }

    /// Basis state for an explicit bit pattern, `from_bits(&[1, 0])` is `|10>`.
    pub fn from_bits(bits: &[u8]) -> EngineResult<Self> {
        validate_bit_values(bits)?;
        check_qubit_count(bits.len())?;
        Self::basis(bits.len(), BitOrder::STATE.offset_of(bits))
    }

    fn basis(number_of_quantum_bits: usize, offset: usize) -> EngineResult<Self> {
        check_qubit_count(number_of_quantum_bits)?;
        Ok(Self {
            tensor: AmplitudeTensor::basis(number_of_quantum_bits, offset),
            number_of_quantum_bits,
        })
    }

    /// `alpha|0> + beta|1>`. A missing amplitude is derived from the other
    /// so that the probabilities sum to one.
    pub fn single_qubit(alpha: Option<Complex64>, beta: Option<Complex64>) -> EngineResult<Self> {
        let complement = |known: Complex64| -> EngineResult<Complex64> {
            let remaining = 1.0 - known.norm_sqr();
            if remaining < -1e-12 {
                return Err(StateError::InvalidQubitAmplitudes(format!(
                    "|{}|^2 exceeds 1",
                    known
                ))
                .into());
            }
            Ok(Complex64::new(remaining.max(0.0).sqrt(), 0.0))
        };

        let (alpha, beta) = match (alpha, beta) {
            (None, None) => {
                return Err(StateError::InvalidQubitAmplitudes(
                    "alpha or beta must be given".to_string(),
                )
                .into());
            }
            (Some(alpha), None) => (alpha, complement(alpha)?),
            (None, Some(beta)) => (complement(beta)?, beta),
            (Some(alpha), Some(beta)) => (alpha, beta),
        };

        let total = alpha.norm_sqr() + beta.norm_sqr();
        if (total - 1.0).abs() > 1e-9 {
            return Err(StateError::InvalidQubitAmplitudes(format!(
                "probabilities sum to {total}, not 1"
            ))
            .into());
        }
        Self::from_amplitudes(vec![alpha, beta])
    }

    /// Uniformly chosen computational basis state.
    pub fn random_basis_state<R: Rng>(
        number_of_quantum_bits: usize,
        rng: &mut R,
    ) -> EngineResult<Self> {
        let bits: Vec<u8> = (0..number_of_quantum_bits)
            .map(|_| rng.gen_range(0..2u8))
            .collect();
        Self::from_bits(&bits)
    }

    /// `self (x) other`; `self` supplies the leading qubits.
    pub fn tensor_product(&self, other: &Self) -> Self {
        Self::from_tensor(self.tensor.kronecker(&other.tensor))
    }

    pub fn number_of_quantum_bits(&self) -> usize {
        self.number_of_quantum_bits
    }

    /// Alias of `number_of_quantum_bits`.
    pub fn nbits(&self) -> usize {
        self.number_of_quantum_bits
    }

    pub fn dimension(&self) -> usize {
        self.tensor.len()
    }

    pub fn tensor(&self) -> &AmplitudeTensor {
        &self.tensor
    }

    pub fn amplitudes(&self) -> &[Complex64] {
        self.tensor.amplitudes()
    }

    // =========================================================================
    // 3. Inspection
    // =========================================================================

    fn offset_of(&self, bits: &[u8]) -> EngineResult<usize> {
        if bits.len() != self.number_of_quantum_bits {
            return Err(StateError::BitPatternLength {
                expected: self.number_of_quantum_bits,
                actual: bits.len(),
            }
            .into());
        }
        validate_bit_values(bits)?;
        Ok(BitOrder::STATE.offset_of(bits))
    }

    pub fn ampl(&self, bits: &[u8]) -> EngineResult<Complex64> {
        Ok(self.tensor[self.offset_of(bits)?])
    }

    pub fn prob(&self, bits: &[u8]) -> EngineResult<f64> {
        Ok(self.ampl(bits)?.norm_sqr())
    }

    /// Phase of the amplitude in degrees, 0 for an exactly zero amplitude.
    pub fn phase(&self, bits: &[u8]) -> EngineResult<f64> {
        let amplitude = self.ampl(bits)?;
        Ok(amplitude_phase_degrees(amplitude))
    }

    /// Most probable basis pattern. Patterns are scanned in lexicographic
    /// order and only a strictly larger probability replaces the current
    /// best, so ties resolve to the first pattern seen.
    pub fn maxprob(&self) -> (Vec<u8>, f64) {
        let mut best_offset = 0usize;
        let mut best_probability = 0.0f64;
        for (offset, amplitude) in self.tensor.amplitudes().iter().enumerate() {
            let probability = amplitude.norm_sqr();
            if probability > best_probability {
                best_offset = offset;
                best_probability = probability;
            }
        }
        (
            val2bits(best_offset as u64, self.number_of_quantum_bits),
            best_probability,
        )
    }

    pub fn total_probability(&self) -> f64 {
        self.tensor.norm_squared()
    }

    pub fn normalize(&mut self) -> EngineResult<()> {
        let total = self.total_probability();
        if total < DEGENERATE_PROBABILITY {
            return Err(StateError::DegenerateState.into());
        }
        let factor = Complex64::new(1.0 / total.sqrt(), 0.0);
        self.tensor.scale_in_place(factor);
        tracing::debug!(
            number_of_quantum_bits = self.number_of_quantum_bits,
            previous_total = total,
            "State normalized"
        );
        Ok(())
    }

    /// `|psi><psi|`; quadratic in the dimension, diagnostics only.
    pub fn density(&self) -> DensityMatrix {
        DensityMatrix::from_state(self)
    }

    /// Conjugated amplitudes (the bra of this ket).
    pub fn adjoint(&self) -> Self {
        Self::from_tensor(self.tensor.conjugate())
    }

    pub fn inner_product(&self, other: &Self) -> EngineResult<Complex64> {
        self.tensor.inner_product(&other.tensor)
    }

    pub fn is_close(&self, other: &Self, tolerance: f64) -> bool {
        self.tensor.is_close(&other.tensor, tolerance)
    }

    /// Number of non-zero singular values of the amplitudes reshaped into
    /// an `included x excluded` matrix. 1 for a product state.
    pub fn schmidt_number(&self, included: &[usize]) -> EngineResult<usize> {
        let n = self.number_of_quantum_bits;
        if included.is_empty() || included.len() >= n {
            return Err(StateError::InvalidPartition(format!(
                "{} of {} qubits included; at least one must be in each part",
                included.len(),
                n
            ))
            .into());
        }
        let mut is_included = vec![false; n];
        for &index in included {
            if index >= n {
                return Err(StateError::InvalidPartition(format!(
                    "qubit {index} outside a {n}-qubit state"
                ))
                .into());
            }
            if is_included[index] {
                return Err(
                    StateError::InvalidPartition(format!("qubit {index} listed twice")).into(),
                );
            }
            is_included[index] = true;
        }

        let axes: Vec<usize> = included
            .iter()
            .copied()
            .chain((0..n).filter(|&index| !is_included[index]))
            .collect();
        let rows = 1usize << included.len();
        let columns = 1usize << (n - included.len());
        let permuted = self.tensor.permuted_matrix(&axes, rows, columns)?;

        let matrix = DMatrix::from_fn(rows, columns, |row, column| permuted[[row, column]]);
        let singular_values = matrix.singular_values();
        Ok(singular_values
            .iter()
            .filter(|&&value| value > SCHMIDT_TOLERANCE)
            .count())
    }

    // =========================================================================
    // 4. Gate application
    // =========================================================================

    fn check_qubit(&self, index: usize) -> EngineResult<()> {
        if index >= self.number_of_quantum_bits {
            return Err(StateError::QubitIndexOutOfRange {
                index,
                total: self.number_of_quantum_bits,
            }
            .into());
        }
        Ok(())
    }

    /// Apply a single-qubit gate to qubit `index`.
    pub fn apply1(&mut self, gate: &GateMatrix, index: usize) -> EngineResult<()> {
        self.check_qubit(index)?;
        let target_bit = self.number_of_quantum_bits - 1 - index;
        tracing::trace!(target_qubit = index, "apply1");
        apply_to_pairs(self.tensor.amplitudes_mut(), 1usize << target_bit, gate, None);
        Ok(())
    }

    /// Apply `gate` to `target` on the amplitudes where qubit `control` is 1.
    pub fn applyc(&mut self, gate: &GateMatrix, control: usize, target: usize) -> EngineResult<()> {
        self.check_qubit(control)?;
        self.check_qubit(target)?;
        if control == target {
            return Err(StateError::SameControlTarget { qubit: control }.into());
        }
        let n = self.number_of_quantum_bits;
        let control_mask = 1usize << (n - 1 - control);
        let target_bit = n - 1 - target;
        tracing::trace!(control_qubit = control, target_qubit = target, "applyc");
        apply_to_pairs(
            self.tensor.amplitudes_mut(),
            1usize << target_bit,
            gate,
            Some(control_mask),
        );
        Ok(())
    }
}

fn validate_bit_values(bits: &[u8]) -> EngineResult<()> {
    match bits.iter().position(|&bit| bit > 1) {
        Some(position) => Err(StateError::InvalidBitValue {
            position,
            value: bits[position],
        }
        .into()),
        None => Ok(()),
    }
}

pub(crate) fn amplitude_phase_degrees(amplitude: Complex64) -> f64 {
    if amplitude.re == 0.0 && amplitude.im == 0.0 {
        0.0
    } else {
        amplitude.arg().to_degrees()
    }
}

/// Walk blocks of `2 * stride`, pairing offset `i` with `i + stride`.
fn apply_to_pairs(
    amplitudes: &mut [Complex64],
    stride: usize,
    gate: &GateMatrix,
    control_mask: Option<usize>,
) {
    let block_size = 2 * stride;

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        amplitudes
            .par_chunks_mut(block_size)
            .enumerate()
            .for_each(|(block, chunk)| {
                update_block(block * block_size, chunk, stride, gate, control_mask)
            });
    }

    #[cfg(not(feature = "parallel"))]
    {
        amplitudes
            .chunks_mut(block_size)
            .enumerate()
            .for_each(|(block, chunk)| {
                update_block(block * block_size, chunk, stride, gate, control_mask)
            });
    }
}

fn update_block(
    base: usize,
    chunk: &mut [Complex64],
    stride: usize,
    gate: &GateMatrix,
    control_mask: Option<usize>,
) {
    let (low, high) = chunk.split_at_mut(stride);
    for (offset, (a, b)) in low.iter_mut().zip(high.iter_mut()).enumerate() {
        if let Some(mask) = control_mask {
            if (base + offset) & mask == 0 {
                continue;
            }
        }
        let zero_amplitude = *a;
        let one_amplitude = *b;
        *a = gate.get(0, 0) * zero_amplitude + gate.get(0, 1) * one_amplitude;
        *b = gate.get(1, 0) * zero_amplitude + gate.get(1, 1) * one_amplitude;
    }
}

impl fmt::Display for QuantumState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}-qubit state. Tensor:", self.number_of_quantum_bits)?;
        let rendered: Vec<String> = self
            .tensor
            .amplitudes()
            .iter()
            .map(|a| format!("{:.4}{:+.4}j", a.re, a.im))
            .collect();
        write!(f, "[{}]", rendered.join(" "))
    }
}
