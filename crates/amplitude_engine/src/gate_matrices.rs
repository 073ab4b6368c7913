// =============================================================================
// Fourier Arithmetic Simulator - Gate Matrices
// =============================================================================
// Table of Contents:
//   1. GateMatrix - 2x2 complex operator
//   2. Standard single-qubit gates (Identity, Hadamard, Pauli, S, T)
//   3. Parameterized gates (Phase/U1, Rotations)
//   4. Algebra (adjoint, multiply, unitarity check)
// =============================================================================
// Purpose: Concrete 2x2 operators consumed by `QuantumState::apply1` and
//          `QuantumState::applyc`. Application never checks unitarity.
// =============================================================================

use num_complex::Complex64;
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_4};
use std::fmt;
use std::ops::Mul;

// =============================================================================
// 1. GateMatrix - 2x2 complex operator
// =============================================================================

/// Row-major 2x2 operator, `elements[row][column]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateMatrix {
    elements: [[Complex64; 2]; 2],
}

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

impl GateMatrix {
    pub const fn new(elements: [[Complex64; 2]; 2]) -> Self {
        Self { elements }
    }

    pub fn from_real(elements: [[f64; 2]; 2]) -> Self {
        Self::new([
            [Complex64::new(elements[0][0], 0.0), Complex64::new(elements[0][1], 0.0)],
            [Complex64::new(elements[1][0], 0.0), Complex64::new(elements[1][1], 0.0)],
        ])
    }

    #[inline]
    pub fn get(&self, row: usize, column: usize) -> Complex64 {
        self.elements[row][column]
    }

    pub fn elements(&self) -> &[[Complex64; 2]; 2] {
        &self.elements
    }

    // =========================================================================
    // 2. Standard single-qubit gates
    // =========================================================================

    pub const fn identity() -> Self {
        Self::new([[ONE, ZERO], [ZERO, ONE]])
    }

    pub fn hadamard() -> Self {
        Self::from_real([[FRAC_1_SQRT_2, FRAC_1_SQRT_2], [FRAC_1_SQRT_2, -FRAC_1_SQRT_2]])
    }

    pub const fn pauli_x() -> Self {
        Self::new([[ZERO, ONE], [ONE, ZERO]])
    }

    pub const fn pauli_y() -> Self {
        Self::new([
            [ZERO, Complex64::new(0.0, -1.0)],
            [Complex64::new(0.0, 1.0), ZERO],
        ])
    }

    pub const fn pauli_z() -> Self {
        Self::new([[ONE, ZERO], [ZERO, Complex64::new(-1.0, 0.0)]])
    }

    pub const fn s() -> Self {
        Self::new([[ONE, ZERO], [ZERO, Complex64::new(0.0, 1.0)]])
    }

    pub fn t() -> Self {
        Self::phase(FRAC_PI_4)
    }

    // =========================================================================
    // 3. Parameterized gates
    // =========================================================================

    /// U1 gate, `diag(1, e^{i lambda})`.
    pub fn phase(lambda: f64) -> Self {
        Self::new([[ONE, ZERO], [ZERO, Complex64::from_polar(1.0, lambda)]])
    }

    pub fn rotation_x(theta: f64) -> Self {
        let c = Complex64::new((theta / 2.0).cos(), 0.0);
        let s = Complex64::new(0.0, -(theta / 2.0).sin());
        Self::new([[c, s], [s, c]])
    }

    pub fn rotation_y(theta: f64) -> Self {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        Self::from_real([[c, -s], [s, c]])
    }

    pub fn rotation_z(theta: f64) -> Self {
        Self::new([
            [Complex64::from_polar(1.0, -theta / 2.0), ZERO],
            [ZERO, Complex64::from_polar(1.0, theta / 2.0)],
        ])
    }

    // =========================================================================
    // 4. Algebra
    // =========================================================================

    /// Conjugate transpose.
    pub fn adjoint(&self) -> Self {
        let e = &self.elements;
        Self::new([
            [e[0][0].conj(), e[1][0].conj()],
            [e[0][1].conj(), e[1][1].conj()],
        ])
    }

    /// Matrix product `self * other`.
    pub fn multiply(&self, other: &Self) -> Self {
        let mut product = [[ZERO; 2]; 2];
        for (row, product_row) in product.iter_mut().enumerate() {
            for (column, entry) in product_row.iter_mut().enumerate() {
                *entry = self.elements[row][0] * other.elements[0][column]
                    + self.elements[row][1] * other.elements[1][column];
            }
        }
        Self::new(product)
    }

    pub fn is_close(&self, other: &Self, tolerance: f64) -> bool {
        self.elements
            .iter()
            .flatten()
            .zip(other.elements.iter().flatten())
            .all(|(a, b)| (a - b).norm() <= tolerance)
    }

    /// `U^dagger U == I` within `tolerance`.
    pub fn is_unitary(&self, tolerance: f64) -> bool {
        self.adjoint()
            .multiply(self)
            .is_close(&Self::identity(), tolerance)
    }
}

impl Default for GateMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for GateMatrix {
    type Output = GateMatrix;

    fn mul(self, rhs: GateMatrix) -> Self::Output {
        self.multiply(&rhs)
    }
}

impl fmt::Display for GateMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.elements {
            writeln!(f, "[{:.4} {:.4}]", row[0], row[1])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_standard_gates_are_unitary() {
        for gate in [
            GateMatrix::identity(),
            GateMatrix::hadamard(),
            GateMatrix::pauli_x(),
            GateMatrix::pauli_y(),
            GateMatrix::pauli_z(),
            GateMatrix::s(),
            GateMatrix::t(),
            GateMatrix::phase(0.3),
            GateMatrix::rotation_x(1.1),
            GateMatrix::rotation_y(-0.7),
            GateMatrix::rotation_z(2.5),
        ] {
            assert!(gate.is_unitary(1e-10), "{gate}");
        }
        assert!(!GateMatrix::from_real([[1.0, 1.0], [0.0, 1.0]]).is_unitary(1e-10));
    }

    #[test]
    fn test_hadamard_squared_is_identity() {
        let hh = GateMatrix::hadamard() * GateMatrix::hadamard();
        assert!(hh.is_close(&GateMatrix::identity(), 1e-10));
    }

    #[test]
    fn test_t_squared_is_s() {
        let tt = GateMatrix::t().multiply(&GateMatrix::t());
        assert!(tt.is_close(&GateMatrix::s(), 1e-10));
    }

    #[test]
    fn test_phase_adjoint_negates_angle() {
        let u = GateMatrix::phase(PI / 8.0);
        assert!(u.adjoint().is_close(&GateMatrix::phase(-PI / 8.0), 1e-10));
    }

    #[test]
    fn test_xyz_relation() {
        // X * Y = i Z
        let xy = GateMatrix::pauli_x() * GateMatrix::pauli_y();
        let iz = GateMatrix::new([
            [Complex64::new(0.0, 1.0), ZERO],
            [ZERO, Complex64::new(0.0, -1.0)],
        ]);
        assert!(xy.is_close(&iz, 1e-12));
    }

    #[test]
    fn test_rotation_x_pi_is_x_up_to_phase() {
        let rx = GateMatrix::rotation_x(PI);
        assert!((rx.get(0, 1) - Complex64::new(0.0, -1.0)).norm() < 1e-10);
        assert!(rx.get(0, 0).norm() < 1e-10);
    }
}
