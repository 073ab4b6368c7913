// =============================================================================
// Fourier Arithmetic Simulator - Amplitude Tensor
// =============================================================================
// Table of Contents:
//   1. AmplitudeTensor - Flat complex storage of length 2^n
//   2. Elementwise arithmetic and products
//   3. Reshape / axis permutation for sub-system extraction
// =============================================================================
// Purpose: Opaque amplitude storage with no gate semantics. Higher layers
//          (QuantumState) add bit-pattern addressing and gate application.
// =============================================================================

use crate::error::{EngineResult, TensorError};
use ndarray::{Array2, ArrayView, ArrayViewD, IxDyn};
use num_complex::Complex64;
use std::ops::{Index, Mul};

// =============================================================================
// 1. AmplitudeTensor - Flat complex storage of length 2^n
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct AmplitudeTensor {
    amplitudes: Vec<Complex64>,
}

impl AmplitudeTensor {
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> EngineResult<Self> {
        let length = amplitudes.len();
        if length < 2 || !length.is_power_of_two() {
            return Err(TensorError::NotPowerOfTwo { length }.into());
        }
        Ok(Self { amplitudes })
    }

    pub fn from_real(values: &[f64]) -> EngineResult<Self> {
        Self::from_amplitudes(values.iter().map(|&v| Complex64::new(v, 0.0)).collect())
    }

    /// Basis vector with a single 1 at `offset`.
    pub(crate) fn basis(rank: usize, offset: usize) -> Self {
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); 1usize << rank];
        amplitudes[offset] = Complex64::new(1.0, 0.0);
        Self { amplitudes }
    }

    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// Number of 2-dimensional axes, `log2(len)`.
    pub fn rank(&self) -> usize {
        self.amplitudes.len().trailing_zeros() as usize
    }

    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    pub fn amplitudes_mut(&mut self) -> &mut [Complex64] {
        &mut self.amplitudes
    }

    pub fn into_amplitudes(self) -> Vec<Complex64> {
        self.amplitudes
    }

    pub fn is_close(&self, other: &Self, tolerance: f64) -> bool {
        self.len() == other.len()
            && self
                .amplitudes
                .iter()
                .zip(other.amplitudes.iter())
                .all(|(a, b)| (a - b).norm() <= tolerance)
    }

    // =========================================================================
    // 2. Elementwise arithmetic and products
    // =========================================================================

    fn check_same_length(&self, other: &Self) -> EngineResult<()> {
        if self.len() != other.len() {
            return Err(TensorError::DimensionMismatch {
                left: self.len(),
                right: other.len(),
            }
            .into());
        }
        Ok(())
    }

    pub fn checked_add(&self, other: &Self) -> EngineResult<Self> {
        self.check_same_length(other)?;
        let amplitudes = self
            .amplitudes
            .iter()
            .zip(other.amplitudes.iter())
            .map(|(a, b)| a + b)
            .collect();
        Ok(Self { amplitudes })
    }

    pub fn checked_sub(&self, other: &Self) -> EngineResult<Self> {
        self.check_same_length(other)?;
        let amplitudes = self
            .amplitudes
            .iter()
            .zip(other.amplitudes.iter())
            .map(|(a, b)| a - b)
            .collect();
        Ok(Self { amplitudes })
    }

    pub fn scale_in_place(&mut self, factor: Complex64) {
        for amp in &mut self.amplitudes {
            *amp *= factor;
        }
    }

    pub fn conjugate(&self) -> Self {
        Self {
            amplitudes: self.amplitudes.iter().map(|a| a.conj()).collect(),
        }
    }

    /// `<self|other>`, conjugating the left operand.
    pub fn inner_product(&self, other: &Self) -> EngineResult<Complex64> {
        self.check_same_length(other)?;
        Ok(self
            .amplitudes
            .iter()
            .zip(other.amplitudes.iter())
            .map(|(a, b)| a.conj() * b)
            .sum())
    }

    pub fn norm_squared(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// `m[i][j] = self[i] * other[j]`; no conjugation is applied.
    pub fn outer_product(&self, other: &Self) -> Array2<Complex64> {
        Array2::from_shape_fn((self.len(), other.len()), |(i, j)| {
            self.amplitudes[i] * other.amplitudes[j]
        })
    }

    /// Kronecker product; `self` occupies the high-order axes.
    pub fn kronecker(&self, other: &Self) -> Self {
        let amplitudes = self
            .amplitudes
            .iter()
            .flat_map(|a| other.amplitudes.iter().map(move |b| a * b))
            .collect();
        Self { amplitudes }
    }

    // =========================================================================
    // 3. Reshape / axis permutation
    // =========================================================================

    pub fn reshape(&self, shape: &[usize]) -> EngineResult<ArrayViewD<'_, Complex64>> {
        Ok(ArrayView::from_shape(IxDyn(shape), &self.amplitudes)?)
    }

    /// Reshape to `2 x 2 x ... x 2`, permute the axes and flatten into a
    /// `rows x cols` matrix.
    pub fn permuted_matrix(
        &self,
        axes: &[usize],
        rows: usize,
        cols: usize,
    ) -> EngineResult<Array2<Complex64>> {
        let rank = self.rank();
        let mut seen = vec![false; rank];
        let is_permutation = axes.len() == rank
            && axes.iter().all(|&axis| {
                axis < rank && !std::mem::replace(&mut seen[axis], true)
            });
        if !is_permutation {
            return Err(TensorError::InvalidPermutation {
                axes: axes.to_vec(),
                rank,
            }
            .into());
        }

        let twos = self.reshape(&vec![2; rank])?;
        let permuted = twos.permuted_axes(IxDyn(axes));
        let flattened = permuted.as_standard_layout().into_owned();
        Ok(flattened.into_shape_with_order((rows, cols))?)
    }
}

impl Index<usize> for AmplitudeTensor {
    type Output = Complex64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.amplitudes[index]
    }
}

impl Mul<Complex64> for &AmplitudeTensor {
    type Output = AmplitudeTensor;

    fn mul(self, factor: Complex64) -> Self::Output {
        let mut scaled = self.clone();
        scaled.scale_in_place(factor);
        scaled
    }
}

impl Mul<f64> for &AmplitudeTensor {
    type Output = AmplitudeTensor;

    fn mul(self, factor: f64) -> Self::Output {
        self * Complex64::new(factor, 0.0)
    }
}
