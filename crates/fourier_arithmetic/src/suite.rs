// =============================================================================
// Fourier Arithmetic Simulator - Experiment Suite
// =============================================================================
// Table of Contents:
//   1. SuiteEvent / SuiteSummary - Progress reporting
//   2. ArithmeticSuite - Large addition, addition, subtraction, multiplication
// =============================================================================
// Purpose: Runs every configured experiment in a fixed order and stops at
//          the first failing run. Progress goes to a caller-supplied observer.
// =============================================================================

use crate::arithmetic::{
    ArithmeticOperation, ArithmeticOutcome, run_addition, run_constant_addition,
    run_register_arithmetic, run_subtraction,
};
use crate::config::ArithmeticSuiteConfiguration;
use crate::error::ArithmeticResult;
use serde::Serialize;

// =============================================================================
// 1. SuiteEvent / SuiteSummary - Progress reporting
// =============================================================================

#[derive(Debug, Clone, Copy)]
pub enum SuiteEvent<'a> {
    SectionStarted(&'static str),
    Completed(&'a ArithmeticOutcome),
    StateDump(&'a str),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SuiteSummary {
    pub runs: usize,
    pub total_gates: usize,
    pub widest_state: usize,
}

impl SuiteSummary {
    fn record(&mut self, outcome: &ArithmeticOutcome) {
        self.runs += 1;
        self.total_gates += outcome.gate_count;
        self.widest_state = self.widest_state.max(outcome.number_of_quantum_bits);
    }
}

// =============================================================================
// 2. ArithmeticSuite
// =============================================================================

#[derive(Debug, Clone)]
pub struct ArithmeticSuite {
    configuration: ArithmeticSuiteConfiguration,
}

impl ArithmeticSuite {
    pub fn new(configuration: ArithmeticSuiteConfiguration) -> ArithmeticResult<Self> {
        configuration.validate()?;
        Ok(Self { configuration })
    }

    pub fn configuration(&self) -> &ArithmeticSuiteConfiguration {
        &self.configuration
    }

    pub fn run<F>(&self, mut observer: F) -> ArithmeticResult<SuiteSummary>
    where
        F: FnMut(SuiteEvent<'_>),
    {
        let configuration = &self.configuration;
        let width = configuration.operand_width;
        let mut summary = SuiteSummary::default();
        let mut report = |outcome: &ArithmeticOutcome, observer: &mut F| {
            summary.record(outcome);
            observer(SuiteEvent::Completed(outcome));
        };

        let large = &configuration.large_addition;
        observer(SuiteEvent::SectionStarted("Check large addition"));
        let large_run = run_register_arithmetic(
            large.operand_width,
            large.init_a,
            large.init_b,
            ArithmeticOperation::Add,
        )?;
        report(&large_run.outcome, &mut observer);
        if configuration.dump_large_addition {
            let dump = large_run
                .circuit
                .dump(Some("large addition"), &configuration.dump_options)?;
            observer(SuiteEvent::StateDump(&dump));
        }

        observer(SuiteEvent::SectionStarted("Check quantum addition"));
        for i in 0..configuration.addition_range {
            for j in 0..configuration.addition_range {
                report(&run_addition(width, i, j)?, &mut observer);
                report(&run_constant_addition(width, i, j)?.outcome, &mut observer);
            }
        }

        observer(SuiteEvent::SectionStarted("Check quantum subtraction"));
        for i in 0..configuration.subtraction_range {
            for j in 0..i {
                report(&run_subtraction(width, i, j)?, &mut observer);
            }
        }

        observer(SuiteEvent::SectionStarted("Check quantum (pseudo) multiplication"));
        for i in 0..configuration.multiplication_range {
            for j in 0..configuration.multiplication_range {
                let run = run_register_arithmetic(
                    width,
                    0,
                    i,
                    ArithmeticOperation::ScaledAdd(j as f64),
                )?;
                report(&run.outcome, &mut observer);
            }
        }

        tracing::info!(
            runs = summary.runs,
            total_gates = summary.total_gates,
            "Arithmetic suite finished"
        );
        Ok(summary)
    }
}
