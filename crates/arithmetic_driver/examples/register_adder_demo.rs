// =============================================================================
// Fourier Arithmetic Simulator - Register Adder Demo
// =============================================================================
// Table of Contents:
//   1. Circuit construction stage by stage
//   2. Gate log and state dump
//   3. Entanglement diagnostics
// =============================================================================
// Purpose: Walks through one two-register addition, printing the recorded
//          gates and the joint state between the transform stages.
// =============================================================================

use amplitude_engine::bit_order::BitOrder;
use amplitude_engine::register::RegisterInitializer;
use amplitude_engine::state_dump::StateDumpOptions;
use fourier_arithmetic::circuit::FourierCircuit;
use fourier_arithmetic::qft::{evolve, fourier_transform, inverse_fourier_transform};

fn main() -> anyhow::Result<()> {
    let operand_width = 2;
    let (init_a, init_b) = (1u64, 2u64);
    let options = StateDumpOptions::default();

    println!("Fourier adder: {} + {} with {}-bit operands", init_a, init_b, operand_width);
    println!();

    // =========================================================================
    // 1. Circuit construction stage by stage
    // =========================================================================
    let mut circuit = FourierCircuit::new("demo");
    let encode = |value: u64| {
        RegisterInitializer::FromBitSequence(BitOrder::LowToHigh.value_to_bits(value, operand_width))
    };
    let a = circuit.add_register("a", operand_width + 1, &encode(init_a))?;
    let b = circuit.add_register("b", operand_width + 1, &encode(init_b))?;
    println!("a = {} on qubits {:?}", a, a.global_indices());
    println!("b = {} on qubits {:?}", b, b.global_indices());
    print!("{}", circuit.dump(Some("initial"), &options)?);
    println!();

    fourier_transform(&mut circuit, &a)?;
    print!("{}", circuit.dump(Some("after transform of a"), &options)?);
    println!();

    evolve(&mut circuit, &a, &b, 1.0)?;
    inverse_fourier_transform(&mut circuit, &a)?;

    // =========================================================================
    // 2. Gate log and state dump
    // =========================================================================
    println!("Applied {} gates:", circuit.gate_count());
    print!("{}", circuit.render_gate_log());
    println!();
    print!("{}", circuit.dump(Some("result"), &options)?);

    let state = circuit.state()?;
    let (bits, probability) = state.maxprob();
    let sum = BitOrder::LowToHigh.bits_to_value(&bits[..operand_width + 1]);
    println!("Decoded a = {} with probability {:.4}", sum, probability);

    // =========================================================================
    // 3. Entanglement diagnostics
    // =========================================================================
    let schmidt = state.schmidt_number(a.global_indices())?;
    println!("Schmidt number between a and b: {}", schmidt);
    println!("Joint state pure: {}", state.density().is_pure(1e-9));
    Ok(())
}
