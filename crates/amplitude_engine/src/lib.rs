// =============================================================================
// Fourier Arithmetic Simulator - Amplitude Engine
// =============================================================================
// Table of Contents:
//   1. Module Declarations
//   2. Prelude Module
// =============================================================================
// Purpose: Dense state-vector layer. Amplitude storage, the bit-order
//          convention, single-qubit and controlled gate application,
//          registers, and diagnostics (density matrix, Schmidt number,
//          state dumps).
// =============================================================================

pub mod amplitude_tensor;
pub mod bit_order;
pub mod density_matrix;
pub mod error;
pub mod gate_matrices;
pub mod quantum_state;
pub mod register;
pub mod state_dump;

pub mod prelude {
    pub use crate::amplitude_tensor::*;
    pub use crate::bit_order::*;
    pub use crate::density_matrix::*;
    pub use crate::error::*;
    pub use crate::gate_matrices::*;
    pub use crate::quantum_state::*;
    pub use crate::register::*;
    pub use crate::state_dump::*;
}
