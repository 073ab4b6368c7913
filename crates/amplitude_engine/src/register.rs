// =============================================================================
// Fourier Arithmetic Simulator - Registers
// =============================================================================
// Table of Contents:
//   1. RegisterInitializer - Classical initial value
//   2. Register - Named run of absolute qubit indices
//   3. RegisterAllocator - Explicit running qubit offset
//   4. from_registers - Joint basis state of several registers
// =============================================================================
// Purpose: Maps register-relative positions to absolute qubit indices of
//          one joint state. The initial bits only seed the basis state.
// =============================================================================

use crate::bit_order::BitOrder;
use crate::error::{EngineResult, RegisterError};
use crate::quantum_state::QuantumState;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, Range};

// =============================================================================
// 1. RegisterInitializer - Classical initial value
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegisterInitializer {
    /// `size`-bit binary, most significant bit at position 0.
    FromInteger(u64),
    /// Explicit bits from position 0; missing trailing bits are 0.
    FromBitSequence(Vec<u8>),
}

impl Default for RegisterInitializer {
    fn default() -> Self {
        RegisterInitializer::FromInteger(0)
    }
}

impl RegisterInitializer {
    fn resolve(&self, size: usize) -> EngineResult<Vec<u8>> {
        match self {
            RegisterInitializer::FromInteger(value) => {
                let fits = size >= u64::BITS as usize || *value >> size == 0;
                if !fits {
                    return Err(RegisterError::ValueTooWide {
                        value: *value,
                        size,
                    }
                    .into());
                }
                Ok(BitOrder::HighToLow.value_to_bits(*value, size))
            }
            RegisterInitializer::FromBitSequence(bits) => {
                if bits.len() > size {
                    return Err(RegisterError::TooManyBits {
                        size,
                        provided: bits.len(),
                    }
                    .into());
                }
                if let Some(position) = bits.iter().position(|&bit| bit > 1) {
                    return Err(RegisterError::InvalidBitValue {
                        position,
                        value: bits[position],
                    }
                    .into());
                }
                let mut resolved = bits.clone();
                resolved.resize(size, 0);
                Ok(resolved)
            }
        }
    }
}

// =============================================================================
// 2. Register - Named run of absolute qubit indices
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Register {
    name: String,
    global_indices: Vec<usize>,
    initial_bits: Vec<u8>,
}

impl Register {
    pub fn new(
        name: impl Into<String>,
        size: usize,
        initializer: &RegisterInitializer,
        global_offset: usize,
    ) -> EngineResult<Self> {
        if size == 0 {
            return Err(RegisterError::EmptyRegister.into());
        }
        let initial_bits = initializer.resolve(size)?;
        Ok(Self {
            name: name.into(),
            global_indices: (global_offset..global_offset + size).collect(),
            initial_bits,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> usize {
        self.global_indices.len()
    }

    pub fn global_indices(&self) -> &[usize] {
        &self.global_indices
    }

    /// Absolute qubit range covered by this register.
    pub fn span(&self) -> Range<usize> {
        let start = self.global_indices[0];
        start..start + self.size()
    }

    pub fn initial_bits(&self) -> &[u8] {
        &self.initial_bits
    }

    /// Basis state `|initial_bits>` over this register alone.
    pub fn psi(&self) -> EngineResult<QuantumState> {
        QuantumState::from_bits(&self.initial_bits)
    }
}

impl Index<usize> for Register {
    type Output = usize;

    fn index(&self, position: usize) -> &Self::Output {
        &self.global_indices[position]
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "|")?;
        for bit in &self.initial_bits {
            write!(f, "{}", bit)?;
        }
        write!(f, ">")
    }
}

// =============================================================================
// 3. RegisterAllocator - Explicit running qubit offset
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct RegisterAllocator {
    next_offset: usize,
}

impl RegisterAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next register starts right after the previously allocated one.
    pub fn allocate(
        &mut self,
        name: impl Into<String>,
        size: usize,
        initializer: &RegisterInitializer,
    ) -> EngineResult<Register> {
        let register = Register::new(name, size, initializer, self.next_offset)?;
        self.next_offset += size;
        tracing::debug!(
            register = register.name(),
            size,
            first_qubit = register[0],
            initial = %register,
            "Register allocated"
        );
        Ok(register)
    }

    pub fn total_quantum_bits(&self) -> usize {
        self.next_offset
    }
}

// =============================================================================
// 4. from_registers - Joint basis state of several registers
// =============================================================================

/// Tensor product of the registers' basis states, in argument order. Each
/// register must start where the previous one ended, the first at qubit 0.
pub fn from_registers(registers: &[&Register]) -> EngineResult<QuantumState> {
    let mut expected_start = 0usize;
    let mut joint: Option<QuantumState> = None;
    for register in registers {
        let span = register.span();
        if span.start != expected_start {
            return Err(RegisterError::OrderMismatch {
                name: register.name().to_string(),
                expected: expected_start,
                actual: span.start,
            }
            .into());
        }
        expected_start = span.end;
        let psi = register.psi()?;
        joint = Some(match joint {
            Some(state) => state.tensor_product(&psi),
            None => psi,
        });
    }
    joint.ok_or_else(|| RegisterError::NoRegisters.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AmplitudeEngineError;

    #[test]
    fn test_integer_initializer_is_msb_first() {
        let register = Register::new("r", 3, &RegisterInitializer::FromInteger(3), 0).unwrap();
        assert_eq!(register.initial_bits(), &[0, 1, 1]);
        assert_eq!(register.to_string(), "|011>");
    }

    #[test]
    fn test_short_bit_sequence_pads_trailing_zeros() {
        let register = Register::new(
            "a",
            4,
            &RegisterInitializer::FromBitSequence(vec![1, 1, 0]),
            2,
        )
        .unwrap();
        assert_eq!(register.initial_bits(), &[1, 1, 0, 0]);
        assert_eq!(register[0], 2);
        assert_eq!(register[3], 5);
        assert_eq!(register.span(), 2..6);
    }

    #[test]
    fn test_initializer_errors() {
        assert!(matches!(
            Register::new("r", 0, &RegisterInitializer::default(), 0),
            Err(AmplitudeEngineError::Register(RegisterError::EmptyRegister))
        ));
        assert!(matches!(
            Register::new("r", 2, &RegisterInitializer::FromInteger(4), 0),
            Err(AmplitudeEngineError::Register(RegisterError::ValueTooWide { value: 4, size: 2 }))
        ));
        assert!(Register::new("r", 2, &RegisterInitializer::FromBitSequence(vec![1, 0, 1]), 0)
            .is_err());
        assert!(Register::new("r", 2, &RegisterInitializer::FromBitSequence(vec![2]), 0).is_err());
    }

    #[test]
    fn test_allocator_assigns_consecutive_offsets() {
        let mut allocator = RegisterAllocator::new();
        let a = allocator
            .allocate("a", 3, &RegisterInitializer::FromInteger(1))
            .unwrap();
        let b = allocator
            .allocate("b", 2, &RegisterInitializer::FromInteger(2))
            .unwrap();
        assert_eq!(a.global_indices(), &[0, 1, 2]);
        assert_eq!(b.global_indices(), &[3, 4]);
        assert_eq!(allocator.total_quantum_bits(), 5);
    }

    #[test]
    fn test_from_registers_joint_state() {
        let mut allocator = RegisterAllocator::new();
        let a = allocator
            .allocate("a", 2, &RegisterInitializer::FromInteger(2))
            .unwrap();
        let b = allocator
            .allocate("b", 2, &RegisterInitializer::FromInteger(1))
            .unwrap();
        let psi = from_registers(&[&a, &b]).unwrap();
        assert_eq!(psi.nbits(), 4);
        assert_eq!(psi.prob(&[1, 0, 0, 1]).unwrap(), 1.0);
    }

    #[test]
    fn test_from_registers_checks_order() {
        let mut allocator = RegisterAllocator::new();
        let a = allocator.allocate("a", 2, &RegisterInitializer::default()).unwrap();
        let b = allocator.allocate("b", 2, &RegisterInitializer::default()).unwrap();
        assert!(matches!(
            from_registers(&[&b, &a]),
            Err(AmplitudeEngineError::Register(RegisterError::OrderMismatch { expected: 0, actual: 2, .. }))
        ));
        assert!(matches!(
            from_registers(&[]),
            Err(AmplitudeEngineError::Register(RegisterError::NoRegisters))
        ));
    }

    #[test]
    fn test_initial_bits_fixed_at_construction() {
        let register = Register::new("r", 3, &RegisterInitializer::FromInteger(5), 0).unwrap();
        let first = register.psi().unwrap();
        let mut evolved = first.clone();
        evolved.apply1(&crate::gate_matrices::GateMatrix::pauli_x(), 0).unwrap();
        assert_eq!(register.initial_bits(), &[1, 0, 1]);
        assert_eq!(register.psi().unwrap(), first);
    }
}
