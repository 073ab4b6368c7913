// =============================================================================
// Fourier Arithmetic Simulator - Density Matrix Diagnostics
// =============================================================================
// Table of Contents:
//   1. DensityMatrix - Outer product |psi><psi|
//   2. Structural checks (hermitian, density, pure, unitary)
//   3. Single-qubit Bloch coordinates
// =============================================================================
// Purpose: Diagnostics on 2^n x 2^n operators. Quadratic in the state
//          dimension, so only used on small states and in tests.
// =============================================================================

use crate::error::{EngineResult, TensorError};
use crate::quantum_state::QuantumState;
use ndarray::Array2;
use num_complex::Complex64;

// =============================================================================
// 1. DensityMatrix - Outer product |psi><psi|
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct DensityMatrix {
    matrix: Array2<Complex64>,
}

impl DensityMatrix {
    pub fn from_state(state: &QuantumState) -> Self {
        let ket = state.tensor();
        Self {
            matrix: ket.outer_product(&ket.conjugate()),
        }
    }

    pub fn from_matrix(matrix: Array2<Complex64>) -> EngineResult<Self> {
        let (rows, columns) = matrix.dim();
        if rows != columns {
            return Err(TensorError::DimensionMismatch {
                left: rows,
                right: columns,
            }
            .into());
        }
        if rows < 2 || !rows.is_power_of_two() {
            return Err(TensorError::NotPowerOfTwo { length: rows }.into());
        }
        Ok(Self { matrix })
    }

    pub fn matrix(&self) -> &Array2<Complex64> {
        &self.matrix
    }

    pub fn dimension(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn number_of_quantum_bits(&self) -> usize {
        self.dimension().trailing_zeros() as usize
    }

    pub fn trace(&self) -> Complex64 {
        self.matrix.diag().iter().sum()
    }

    /// Diagonal entries, the basis-state probabilities.
    pub fn probabilities(&self) -> Vec<f64> {
        self.matrix.diag().iter().map(|p| p.re).collect()
    }

    fn adjoint(&self) -> Array2<Complex64> {
        self.matrix.t().mapv(|x| x.conj())
    }

    // =========================================================================
    // 2. Structural checks
    // =========================================================================

    pub fn is_hermitian(&self, tolerance: f64) -> bool {
        self.matrix
            .iter()
            .zip(self.adjoint().iter())
            .all(|(a, b)| (a - b).norm() <= tolerance)
    }

    /// Hermitian with unit trace.
    pub fn is_density(&self, tolerance: f64) -> bool {
        self.is_hermitian(tolerance) && (self.trace() - Complex64::new(1.0, 0.0)).norm() <= tolerance
    }

    /// `tr(rho^2) == 1`.
    pub fn is_pure(&self, tolerance: f64) -> bool {
        let squared_trace: Complex64 = self.matrix.dot(&self.matrix).diag().iter().sum();
        (squared_trace - Complex64::new(1.0, 0.0)).norm() <= tolerance
    }

    pub fn is_unitary(&self, tolerance: f64) -> bool {
        let product = self.adjoint().dot(&self.matrix);
        let identity = Array2::<Complex64>::eye(self.dimension());
        product
            .iter()
            .zip(identity.iter())
            .all(|(a, b)| (a - b).norm() <= tolerance)
    }

    // =========================================================================
    // 3. Single-qubit Bloch coordinates
    // =========================================================================

    /// `(x, y, z)` with `x = 2 Re rho10`, `y = 2 Im rho10`, `z = 2 rho00 - 1`.
    pub fn bloch_coordinates(&self) -> EngineResult<(f64, f64, f64)> {
        if self.dimension() != 2 {
            return Err(TensorError::DimensionMismatch {
                left: self.dimension(),
                right: 2,
            }
            .into());
        }
        let rho00 = self.matrix[[0, 0]];
        let rho10 = self.matrix[[1, 0]];
        Ok((2.0 * rho10.re, 2.0 * rho10.im, 2.0 * rho00.re - 1.0))
    }
}
