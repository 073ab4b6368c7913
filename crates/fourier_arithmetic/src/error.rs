// =============================================================================
// Fourier Arithmetic Simulator - Arithmetic Error Types
// =============================================================================
// Table of Contents:
//   1. ArithmeticError - Main error enum
//   2. ErrorContext - Attach context to foreign errors
// =============================================================================
// Purpose: Errors of circuit construction, configuration and result
//          verification. Engine errors pass through unchanged.
// =============================================================================

use amplitude_engine::error::AmplitudeEngineError;
use thiserror::Error;

// =============================================================================
// 1. ArithmeticError - Main error enum
// =============================================================================

#[derive(Debug, Error)]
pub enum ArithmeticError {
    #[error("Engine error: {0}")]
    Engine(#[from] AmplitudeEngineError),

    #[error("Incorrect arithmetic: expected {expected}, decoded {actual} (probability {probability:.4})")]
    ArithmeticMismatch {
        expected: u64,
        actual: u64,
        probability: f64,
    },

    #[error("Operand width {width} outside 1..={max}")]
    InvalidOperandWidth { width: usize, max: usize },

    #[error("Operand {operand} does not fit into {width} bits")]
    OperandTooWide { operand: u64, width: usize },

    #[error("Constant {constant} does not fit into {width} bits")]
    ConstantTooWide { constant: u64, width: usize },

    #[error("Factor {factor} is not an integer")]
    InvalidFactor { factor: f64 },

    #[error("Stage {stage} needs qubit {stage} of register '{register}' ({size} qubits)")]
    StageOutOfRange {
        register: String,
        stage: usize,
        size: usize,
    },

    #[error("Unknown register: {0}")]
    UnknownRegister(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Report serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

// =============================================================================
// Result type alias
// =============================================================================

pub type ArithmeticResult<T> = Result<T, ArithmeticError>;

// =============================================================================
// 2. ErrorContext - Attach context to foreign errors
// =============================================================================

pub trait ErrorContext<T> {
    fn context(self, msg: impl Into<String>) -> ArithmeticResult<T>;
    fn with_context<F>(self, f: F) -> ArithmeticResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: std::error::Error> ErrorContext<T> for Result<T, E> {
    fn context(self, msg: impl Into<String>) -> ArithmeticResult<T> {
        self.map_err(|e| ArithmeticError::Configuration(format!("{}: {}", msg.into(), e)))
    }

    fn with_context<F>(self, f: F) -> ArithmeticResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| ArithmeticError::Configuration(format!("{}: {}", f(), e)))
    }
}

impl<T> ErrorContext<T> for Option<T> {
    fn context(self, msg: impl Into<String>) -> ArithmeticResult<T> {
        self.ok_or_else(|| ArithmeticError::UnknownRegister(msg.into()))
    }

    fn with_context<F>(self, f: F) -> ArithmeticResult<T>
    where
        F: FnOnce() -> String,
    {
        self.ok_or_else(|| ArithmeticError::UnknownRegister(f()))
    }
}
