// =============================================================================
// Fourier Arithmetic Simulator - Recorded Circuit
// =============================================================================
// Table of Contents:
//   1. GateRecord - One logged gate application
//   2. FourierCircuit - Registers, joint state and gate log
//   3. Gate builders (hadamard, phase, controlled_phase)
// =============================================================================
// Purpose: Applies gates to the joint state immediately and keeps a log of
//          what was applied, rendered with pi fractions for inspection.
// =============================================================================

use crate::error::{ArithmeticError, ArithmeticResult, ErrorContext};
use amplitude_engine::bit_order::pi_fractions;
use amplitude_engine::error::RegisterError;
use amplitude_engine::gate_matrices::GateMatrix;
use amplitude_engine::quantum_state::QuantumState;
use amplitude_engine::register::{
    Register, RegisterAllocator, RegisterInitializer, from_registers,
};
use amplitude_engine::state_dump::{StateDumpOptions, render_dump};
use serde::Serialize;
use std::fmt;

// =============================================================================
// 1. GateRecord - One logged gate application
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "gate", rename_all = "snake_case")]
pub enum GateRecord {
    Hadamard { target: usize },
    Phase { target: usize, angle: f64 },
    ControlledPhase { control: usize, target: usize, angle: f64 },
}

impl GateRecord {
    pub fn gate_name(&self) -> &'static str {
        match self {
            GateRecord::Hadamard { .. } => "h",
            GateRecord::Phase { .. } => "u1",
            GateRecord::ControlledPhase { .. } => "cu1",
        }
    }
}

impl fmt::Display for GateRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            GateRecord::Hadamard { target } => write!(f, "h({})", target),
            GateRecord::Phase { target, angle } => {
                write!(f, "u1({}, {})", target, pi_fractions(angle))
            }
            GateRecord::ControlledPhase {
                control,
                target,
                angle,
            } => write!(f, "cu1({}, {}, {})", control, target, pi_fractions(angle)),
        }
    }
}

// =============================================================================
// 2. FourierCircuit - Registers, joint state and gate log
// =============================================================================

#[derive(Debug, Clone)]
pub struct FourierCircuit {
    name: String,
    allocator: RegisterAllocator,
    registers: Vec<Register>,
    state: Option<QuantumState>,
    gate_log: Vec<GateRecord>,
}

impl FourierCircuit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            allocator: RegisterAllocator::new(),
            registers: Vec::new(),
            state: None,
            gate_log: Vec::new(),
        }
    }

    /// Circuit over registers built elsewhere; they must be contiguous and
    /// start at qubit 0.
    pub fn with_registers(
        name: impl Into<String>,
        registers: Vec<Register>,
    ) -> ArithmeticResult<Self> {
        let state = from_registers(&registers.iter().collect::<Vec<_>>())?;
        let mut allocator = RegisterAllocator::new();
        for register in &registers {
            allocator.allocate(register.name(), register.size(), &RegisterInitializer::default())?;
        }
        Ok(Self {
            name: name.into(),
            allocator,
            registers,
            state: Some(state),
            gate_log: Vec::new(),
        })
    }

    /// Allocate a register after the existing ones and extend the joint
    /// state with its basis state.
    pub fn add_register(
        &mut self,
        name: impl Into<String>,
        size: usize,
        initializer: &RegisterInitializer,
    ) -> ArithmeticResult<Register> {
        let register = self.allocator.allocate(name, size, initializer)?;
        let psi = register.psi()?;
        self.state = Some(match self.state.take() {
            Some(state) => state.tensor_product(&psi),
            None => psi,
        });
        self.registers.push(register.clone());
        Ok(register)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn registers(&self) -> &[Register] {
        &self.registers
    }

    pub fn register(&self, name: &str) -> ArithmeticResult<&Register> {
        self.registers
            .iter()
            .find(|register| register.name() == name)
            .with_context(|| name.to_string())
    }

    pub fn number_of_quantum_bits(&self) -> usize {
        self.allocator.total_quantum_bits()
    }

    pub fn state(&self) -> ArithmeticResult<&QuantumState> {
        self.state.as_ref().ok_or_else(no_registers)
    }

    pub fn into_state(self) -> ArithmeticResult<QuantumState> {
        self.state.ok_or_else(no_registers)
    }

    fn state_mut(&mut self) -> ArithmeticResult<&mut QuantumState> {
        self.state.as_mut().ok_or_else(no_registers)
    }

    pub fn gate_log(&self) -> &[GateRecord] {
        &self.gate_log
    }

    pub fn gate_count(&self) -> usize {
        self.gate_log.len()
    }

    /// One line per applied gate, angles as pi fractions.
    pub fn render_gate_log(&self) -> String {
        self.gate_log
            .iter()
            .map(|record| format!("{}\n", record))
            .collect()
    }

    pub fn dump(&self, description: Option<&str>, options: &StateDumpOptions) -> ArithmeticResult<String> {
        Ok(render_dump(self.state()?, description, options))
    }

    // =========================================================================
    // 3. Gate builders
    // =========================================================================

    pub fn hadamard(&mut self, target: usize) -> ArithmeticResult<&mut Self> {
        self.state_mut()?.apply1(&GateMatrix::hadamard(), target)?;
        self.gate_log.push(GateRecord::Hadamard { target });
        Ok(self)
    }

    /// U1 on `target`.
    pub fn phase(&mut self, target: usize, angle: f64) -> ArithmeticResult<&mut Self> {
        self.state_mut()?.apply1(&GateMatrix::phase(angle), target)?;
        self.gate_log.push(GateRecord::Phase { target, angle });
        Ok(self)
    }

    /// Controlled U1.
    pub fn controlled_phase(
        &mut self,
        control: usize,
        target: usize,
        angle: f64,
    ) -> ArithmeticResult<&mut Self> {
        self.state_mut()?
            .applyc(&GateMatrix::phase(angle), control, target)?;
        self.gate_log.push(GateRecord::ControlledPhase {
            control,
            target,
            angle,
        });
        Ok(self)
    }
}

fn no_registers() -> ArithmeticError {
    ArithmeticError::Engine(RegisterError::NoRegisters.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_registers_extend_joint_state() {
        let mut circuit = FourierCircuit::new("joint");
        let a = circuit
            .add_register("a", 2, &RegisterInitializer::FromInteger(1))
            .unwrap();
        let b = circuit
            .add_register("b", 1, &RegisterInitializer::FromInteger(1))
            .unwrap();
        assert_eq!(a[1], 1);
        assert_eq!(b[0], 2);
        assert_eq!(circuit.number_of_quantum_bits(), 3);
        assert_eq!(circuit.state().unwrap().prob(&[0, 1, 1]).unwrap(), 1.0);
        assert_eq!(circuit.register("b").unwrap().size(), 1);
        assert!(matches!(
            circuit.register("c"),
            Err(ArithmeticError::UnknownRegister(_))
        ));
    }

    #[test]
    fn test_gates_without_registers_fail() {
        let mut circuit = FourierCircuit::new("empty");
        assert!(circuit.hadamard(0).is_err());
        assert!(circuit.state().is_err());
        assert_eq!(circuit.gate_count(), 0);
    }

    #[test]
    fn test_gate_log_rendering() {
        let mut circuit = FourierCircuit::new("log");
        circuit
            .add_register("r", 2, &RegisterInitializer::default())
            .unwrap();
        circuit
            .hadamard(1)
            .unwrap()
            .controlled_phase(0, 1, PI / 2.0)
            .unwrap()
            .phase(0, -PI / 4.0)
            .unwrap();
        assert_eq!(circuit.gate_count(), 3);
        assert_eq!(circuit.render_gate_log(), "h(1)\ncu1(0, 1, pi/2)\nu1(0, -pi/4)\n");
        assert_eq!(circuit.gate_log()[1].gate_name(), "cu1");
    }

    #[test]
    fn test_failed_gate_is_not_logged() {
        let mut circuit = FourierCircuit::new("bad");
        circuit
            .add_register("r", 2, &RegisterInitializer::default())
            .unwrap();
        assert!(circuit.controlled_phase(1, 1, PI).is_err());
        assert!(circuit.hadamard(2).is_err());
        assert_eq!(circuit.gate_count(), 0);
    }

    #[test]
    fn test_with_registers() {
        let mut allocator = RegisterAllocator::new();
        let a = allocator
            .allocate("a", 2, &RegisterInitializer::FromInteger(3))
            .unwrap();
        let b = allocator
            .allocate("b", 1, &RegisterInitializer::default())
            .unwrap();
        let circuit = FourierCircuit::with_registers("prebuilt", vec![a, b]).unwrap();
        assert_eq!(circuit.number_of_quantum_bits(), 3);
        assert_eq!(circuit.state().unwrap().prob(&[1, 1, 0]).unwrap(), 1.0);

        let stray = Register::new("x", 1, &RegisterInitializer::default(), 4).unwrap();
        assert!(FourierCircuit::with_registers("bad", vec![stray]).is_err());
    }

    #[test]
    fn test_gate_record_serializes_with_tag() {
        let record = GateRecord::Phase { target: 2, angle: 0.5 };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"gate":"phase","target":2,"angle":0.5}"#);
    }
}
