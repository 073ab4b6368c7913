//! Property-based tests for amplitude_engine using proptest
//!
//! Bit-pattern conversions, gate reversibility, normalization and the
//! determinism of `maxprob`.

use amplitude_engine::prelude::*;
use num_complex::Complex64;
use proptest::prelude::*;

fn arbitrary_gate() -> impl Strategy<Value = GateMatrix> {
    prop_oneof![
        Just(GateMatrix::hadamard()),
        Just(GateMatrix::pauli_x()),
        Just(GateMatrix::pauli_y()),
        Just(GateMatrix::pauli_z()),
        Just(GateMatrix::s()),
        Just(GateMatrix::t()),
        (-6.3f64..6.3).prop_map(GateMatrix::phase),
        (-6.3f64..6.3).prop_map(GateMatrix::rotation_x),
        (-6.3f64..6.3).prop_map(GateMatrix::rotation_y),
        (-6.3f64..6.3).prop_map(GateMatrix::rotation_z),
    ]
}

fn arbitrary_state(max_qubits: usize) -> impl Strategy<Value = QuantumState> {
    (1..=max_qubits)
        .prop_flat_map(|n| {
            prop::collection::vec((-1.0f64..1.0, -1.0f64..1.0), 1usize << n)
        })
        .prop_filter_map("non-degenerate amplitudes", |pairs| {
            let amplitudes = pairs
                .into_iter()
                .map(|(re, im)| Complex64::new(re, im))
                .collect();
            let mut state = QuantumState::from_amplitudes(amplitudes).ok()?;
            state.normalize().ok()?;
            Some(state)
        })
}

// ============================================================================
// Bit pattern properties
// ============================================================================

proptest! {
    /// bits2val(val2bits(v, n)) == v for every v < 2^n
    #[test]
    fn val2bits_round_trip(n in 1usize..20, raw in any::<u64>()) {
        let value = raw % (1u64 << n);
        let bits = val2bits(value, n);
        prop_assert_eq!(bits.len(), n);
        prop_assert_eq!(bits2val(&bits), value);
    }

    /// Both orders decode their own encodings
    #[test]
    fn bit_order_round_trip(n in 1usize..16, raw in any::<u64>()) {
        let value = raw % (1u64 << n);
        for order in [BitOrder::HighToLow, BitOrder::LowToHigh] {
            prop_assert_eq!(order.bits_to_value(&order.value_to_bits(value, n)), value);
        }
    }

    /// zeros / ones put all probability on the extreme patterns
    #[test]
    fn zeros_and_ones_are_extremes(n in 1usize..8) {
        let zeros = QuantumState::zeros(n).unwrap();
        let ones = QuantumState::ones(n).unwrap();
        prop_assert_eq!(zeros.prob(&vec![0; n]).unwrap(), 1.0);
        prop_assert_eq!(ones.prob(&vec![1; n]).unwrap(), 1.0);
    }
}

// ============================================================================
// State properties
// ============================================================================

proptest! {
    /// Applying G then G^dagger restores the state
    #[test]
    fn gate_then_adjoint_is_identity(
        state in arbitrary_state(5),
        gate in arbitrary_gate(),
        raw_index in 0usize..5,
    ) {
        let index = raw_index % state.nbits();
        let mut evolved = state.clone();
        evolved.apply1(&gate, index).unwrap();
        evolved.apply1(&gate.adjoint(), index).unwrap();
        prop_assert!(evolved.is_close(&state, 1e-9));
    }

    /// Same for the controlled form
    #[test]
    fn controlled_gate_then_adjoint_is_identity(
        state in arbitrary_state(5),
        gate in arbitrary_gate(),
        raw_control in 0usize..5,
        raw_target in 0usize..5,
    ) {
        let n = state.nbits();
        prop_assume!(n >= 2);
        let control = raw_control % n;
        let target = raw_target % n;
        prop_assume!(control != target);

        let mut evolved = state.clone();
        evolved.applyc(&gate, control, target).unwrap();
        evolved.applyc(&gate.adjoint(), control, target).unwrap();
        prop_assert!(evolved.is_close(&state, 1e-9));
    }

    /// Unitary gates preserve the total probability
    #[test]
    fn gates_preserve_norm(state in arbitrary_state(4), gate in arbitrary_gate()) {
        let mut evolved = state.clone();
        for index in 0..evolved.nbits() {
            evolved.apply1(&gate, index).unwrap();
        }
        prop_assert!((evolved.total_probability() - 1.0).abs() < 1e-9);
    }

    /// After normalize the squared magnitudes sum to 1
    #[test]
    fn normalize_sums_to_one(
        pairs in prop::collection::vec((-10.0f64..10.0, -10.0f64..10.0), 8)
    ) {
        let amplitudes: Vec<Complex64> =
            pairs.into_iter().map(|(re, im)| Complex64::new(re, im)).collect();
        prop_assume!(amplitudes.iter().map(|a| a.norm_sqr()).sum::<f64>() > 1e-6);
        let mut state = QuantumState::from_amplitudes(amplitudes).unwrap();
        state.normalize().unwrap();
        let total: f64 = state.amplitudes().iter().map(|a| a.norm_sqr()).sum();
        prop_assert!((total - 1.0).abs() < 1e-10);
    }

    /// maxprob is deterministic and returns the first maximum in scan order
    #[test]
    fn maxprob_is_first_maximum(state in arbitrary_state(5)) {
        let (bits, probability) = state.maxprob();
        prop_assert_eq!(state.maxprob(), (bits.clone(), probability));

        let winner = bits2val(&bits) as usize;
        for (offset, amplitude) in state.amplitudes().iter().enumerate() {
            let p = amplitude.norm_sqr();
            prop_assert!(p <= probability);
            if offset < winner {
                prop_assert!(p < probability);
            }
        }
    }

    /// Basis states are product states
    #[test]
    fn basis_states_have_schmidt_number_one(n in 2usize..6, raw in any::<u64>(), split in 1usize..5) {
        let bits = val2bits(raw % (1u64 << n), n);
        let state = QuantumState::from_bits(&bits).unwrap();
        let included: Vec<usize> = (0..split.min(n - 1)).collect();
        prop_assert_eq!(state.schmidt_number(&included).unwrap(), 1);
    }
}
