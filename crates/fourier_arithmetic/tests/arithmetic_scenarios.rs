//! End-to-end arithmetic scenarios on the dense simulator
//!
//! Register addition and subtraction, constant addition, pseudo
//! multiplication, and entanglement checks on the joint state.

use amplitude_engine::prelude::*;
use fourier_arithmetic::prelude::*;

// ============================================================================
// Register arithmetic
// ============================================================================

#[test]
fn addition_two_plus_five_is_seven() {
    let run = run_register_arithmetic(3, 2, 5, ArithmeticOperation::Add).unwrap();
    assert_eq!(run.outcome.result, 7);
    // two registers of four qubits each
    assert_eq!(run.circuit.number_of_quantum_bits(), 8);
    assert!((run.outcome.probability - 1.0).abs() < 1e-9);
}

#[test]
fn subtraction_five_minus_three_is_two() {
    let run = run_register_arithmetic(3, 5, 3, ArithmeticOperation::Subtract).unwrap();
    assert_eq!(run.outcome.result, 2);
}

#[test]
fn register_b_is_left_unchanged() {
    let run = run_register_arithmetic(3, 2, 5, ArithmeticOperation::Add).unwrap();
    let (bits, _) = run.circuit.state().unwrap().maxprob();
    let b = run.circuit.register("b").unwrap();
    let b_bits: Vec<u8> = b.global_indices().iter().map(|&q| bits[q]).collect();
    assert_eq!(BitOrder::LowToHigh.bits_to_value(&b_bits), 5);
}

#[test]
fn all_small_additions_and_subtractions() {
    for a in 0..8u64 {
        for b in 0..8u64 {
            assert_eq!(run_addition(3, a, b).unwrap().result, a + b);
            assert_eq!(run_subtraction(3, a, b).unwrap().result, (a + 16 - b) % 16);
        }
    }
}

#[test]
fn pseudo_multiplication() {
    for i in 0..4u64 {
        for j in 0..4u64 {
            let run =
                run_register_arithmetic(3, 0, i, ArithmeticOperation::ScaledAdd(j as f64)).unwrap();
            assert_eq!(run.outcome.result, i * j);
        }
    }
}

#[test]
fn large_addition_eighteen_qubits() {
    let run = run_register_arithmetic(8, 1, 2, ArithmeticOperation::Add).unwrap();
    assert_eq!(run.outcome.result, 3);
    assert_eq!(run.outcome.number_of_quantum_bits, 18);
    let dump = run
        .circuit
        .dump(Some("large"), &StateDumpOptions::default())
        .unwrap();
    // a single basis state survives
    assert_eq!(dump.lines().count(), 2);
}

// ============================================================================
// Constant addition
// ============================================================================

#[test]
fn constant_addition_four_plus_nine_is_thirteen() {
    let run = run_constant_addition(6, 4, 9).unwrap();
    assert_eq!(run.outcome.result, 13);
    assert_eq!(run.circuit.number_of_quantum_bits(), 7);
}

#[test]
fn constant_addition_matches_register_addition() {
    for a in 0..7u64 {
        for c in 0..7u64 {
            let constant = run_constant_addition(6, a, c).unwrap().outcome.result;
            let register = run_addition(6, a, c).unwrap().result;
            assert_eq!(constant, register);
        }
    }
}

#[test]
fn constant_too_wide_is_rejected() {
    assert!(matches!(
        run_constant_addition(3, 1, 8),
        Err(ArithmeticError::ConstantTooWide { constant: 8, width: 3 })
    ));
}

// ============================================================================
// Joint state diagnostics
// ============================================================================

#[test]
fn schmidt_number_of_product_and_entangled_states() {
    let zeros = QuantumState::zeros(2).unwrap();
    assert_eq!(zeros.schmidt_number(&[1]).unwrap(), 1);

    let entangled =
        QuantumState::from_tensor(AmplitudeTensor::from_real(&[1.0, 1.0, 0.0, 1.0]).unwrap());
    assert!(entangled.schmidt_number(&[1]).unwrap() > 1);
}

#[test]
fn fourier_transformed_register_stays_separable_from_b() {
    let mut circuit = FourierCircuit::new("separable");
    let a = circuit
        .add_register("a", 3, &RegisterInitializer::FromInteger(5))
        .unwrap();
    circuit
        .add_register("b", 2, &RegisterInitializer::FromInteger(1))
        .unwrap();
    fourier_transform(&mut circuit, &a).unwrap();
    let state = circuit.state().unwrap();
    assert_eq!(state.schmidt_number(a.global_indices()).unwrap(), 1);
    assert!(state.density().is_pure(1e-9));
}

#[test]
fn suite_reports_json_lines() {
    let suite = ArithmeticSuite::new(ArithmeticSuiteConfiguration::quick()).unwrap();
    let mut lines = Vec::new();
    suite
        .run(|event| {
            if let SuiteEvent::Completed(outcome) = event {
                lines.push(outcome.to_json().unwrap());
            }
        })
        .unwrap();
    assert!(lines.iter().all(|line| line.starts_with('{') && line.contains("\"result\"")));
}
