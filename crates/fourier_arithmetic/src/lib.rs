// =============================================================================
// Fourier Arithmetic Simulator - Fourier Arithmetic
// =============================================================================
// Table of Contents:
//   1. Module Declarations
//   2. Prelude Module
// =============================================================================
// Purpose: Register arithmetic in the Fourier basis on top of the amplitude
//          engine. Recorded circuits, QFT stages, verified runners, and the
//          configurable experiment suite.
// =============================================================================

pub mod arithmetic;
pub mod circuit;
pub mod config;
pub mod error;
pub mod qft;
pub mod suite;

pub mod prelude {
    pub use crate::arithmetic::*;
    pub use crate::circuit::*;
    pub use crate::config::*;
    pub use crate::error::*;
    pub use crate::qft::*;
    pub use crate::suite::*;
}
