// =============================================================================
// Fourier Arithmetic Simulator - Engine Error Types
// =============================================================================
// Table of Contents:
//   1. AmplitudeEngineError - Main error enum
//   2. TensorError - Amplitude storage and reshape errors
//   3. StateError - Qubit indexing and state semantics errors
//   4. RegisterError - Register construction errors
// =============================================================================
// Purpose: Unified error handling for the amplitude engine. Every error is
//          raised at the point of detection, before the amplitude vector is
//          touched.
// =============================================================================

use thiserror::Error;

// =============================================================================
// 1. AmplitudeEngineError - Main error enum
// =============================================================================

#[derive(Debug, Error)]
pub enum AmplitudeEngineError {
    #[error("Tensor error: {0}")]
    Tensor(#[from] TensorError),

    #[error("State error: {0}")]
    State(#[from] StateError),

    #[error("Register error: {0}")]
    Register(#[from] RegisterError),
}

impl From<ndarray::ShapeError> for AmplitudeEngineError {
    fn from(err: ndarray::ShapeError) -> Self {
        AmplitudeEngineError::Tensor(TensorError::Shape(err))
    }
}

// =============================================================================
// 2. TensorError - Amplitude storage and reshape errors
// =============================================================================

#[derive(Debug, Error)]
pub enum TensorError {
    #[error("Reshape failed: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("Amplitude vector length {length} is not a power of two >= 2")]
    NotPowerOfTwo { length: usize },

    #[error("Dimension mismatch: {left} vs {right} amplitudes")]
    DimensionMismatch { left: usize, right: usize },

    #[error("Axes {axes:?} are not a permutation of 0..{rank}")]
    InvalidPermutation { axes: Vec<usize>, rank: usize },
}

// =============================================================================
// 3. StateError - Qubit indexing and state semantics errors
// =============================================================================

#[derive(Debug, Error)]
pub enum StateError {
    #[error("Invalid qubit index {index}: state has {total} qubits")]
    QubitIndexOutOfRange { index: usize, total: usize },

    #[error("Control and target qubits must be different (both {qubit})")]
    SameControlTarget { qubit: usize },

    #[error("Bit pattern has {actual} bits, state has {expected} qubits")]
    BitPatternLength { expected: usize, actual: usize },

    #[error("Bits must be 0 or 1, got {value} at position {position}")]
    InvalidBitValue { position: usize, value: u8 },

    #[error("Invalid bipartition: {0}")]
    InvalidPartition(String),

    #[error("A state needs at least one qubit")]
    ZeroQubits,

    #[error("{requested} qubits exceed the dense limit of {max}")]
    TooManyQubits { requested: usize, max: usize },

    #[error("Invalid single-qubit amplitudes: {0}")]
    InvalidQubitAmplitudes(String),

    #[error("Normalizing a zero-probability state")]
    DegenerateState,
}

// =============================================================================
// 4. RegisterError - Register construction errors
// =============================================================================

#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("Register must hold at least one qubit")]
    EmptyRegister,

    #[error("Value {value} does not fit into {size} bits")]
    ValueTooWide { value: u64, size: usize },

    #[error("Register of {size} qubits cannot hold {provided} initial bits")]
    TooManyBits { size: usize, provided: usize },

    #[error("Register bits must be 0 or 1, got {value} at position {position}")]
    InvalidBitValue { position: usize, value: u8 },

    #[error("Register '{name}' starts at qubit {actual}, expected {expected}")]
    OrderMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("No registers to build a state from")]
    NoRegisters,
}

// =============================================================================
// Result type alias
// =============================================================================

pub type EngineResult<T> = Result<T, AmplitudeEngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_error_message() {
        let err = StateError::QubitIndexOutOfRange { index: 5, total: 3 };
        assert!(err.to_string().contains("5"));
        assert!(err.to_string().contains("3"));
    }

    #[test]
    fn test_error_conversion() {
        let engine_err: AmplitudeEngineError = StateError::DegenerateState.into();
        assert!(matches!(
            engine_err,
            AmplitudeEngineError::State(StateError::DegenerateState)
        ));

        let engine_err: AmplitudeEngineError = RegisterError::EmptyRegister.into();
        assert!(matches!(engine_err, AmplitudeEngineError::Register(_)));
    }

    #[test]
    fn test_shape_error_bridging() {
        let data = [0.0_f64; 4];
        let shape_err = ndarray::ArrayView::from_shape((5,), &data[..]).unwrap_err();
        let engine_err: AmplitudeEngineError = shape_err.into();
        assert!(matches!(
            engine_err,
            AmplitudeEngineError::Tensor(TensorError::Shape(_))
        ));
    }
}
