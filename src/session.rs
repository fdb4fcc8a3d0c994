//! Fuzzing session: generate expressions, print them, feed them to an
//! evaluator, and tally the outcomes.
//!
//! The evaluator is an external collaborator (typically a debugger
//! evaluating in a live target's frame) behind the narrow [`Evaluator`]
//! trait. Evaluation failures are recorded outcomes, never aborts; a
//! session always completes its configured iterations.

use rand::Rng;
use thiserror::Error;

use crate::dump::AstDumper;
use crate::generator::ExprGenerator;
use crate::printer;

// ---------------------------------------------------------------------------
// Evaluator seam
// ---------------------------------------------------------------------------

/// External expression evaluator.
///
/// Implementations accept one printed expression at a time and return its
/// textual value. The session treats them as black boxes: it never
/// inspects values, only records them.
pub trait Evaluator {
    fn evaluate(&mut self, expr: &str) -> Result<String, EvalError>;
}

/// Error returned by an [`Evaluator`] for one expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct EvalError {
    pub message: String,
}

impl EvalError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Session policy.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Number of expressions to generate and evaluate.
    pub iterations: usize,
    /// Log each tree's diagnostic dump before evaluating it.
    pub dump_trees: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            iterations: 20,
            dump_trees: false,
        }
    }
}

/// What the evaluator said about one expression.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalOutcome {
    Value(String),
    Failed(EvalError),
}

/// One generated expression and its outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationRecord {
    pub text: String,
    pub node_count: usize,
    pub depth: usize,
    pub outcome: EvalOutcome,
}

/// Aggregate result of one session, in generation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionReport {
    pub records: Vec<IterationRecord>,
}

impl SessionReport {
    pub fn generated(&self) -> usize {
        self.records.len()
    }

    pub fn succeeded(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, EvalOutcome::Value(_)))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, EvalOutcome::Failed(_)))
            .count()
    }
}

/// Run one session: `config.iterations` rounds of generate, print,
/// evaluate, record.
pub fn run_session<R: Rng, E: Evaluator>(
    generator: &mut ExprGenerator<R>,
    evaluator: &mut E,
    config: &SessionConfig,
) -> SessionReport {
    let mut records = Vec::with_capacity(config.iterations);

    for iteration in 0..config.iterations {
        let expr = generator.generate();
        let text = printer::print(&expr);
        tracing::debug!(iteration, nodes = expr.node_count(), %text, "generated expression");

        if config.dump_trees {
            tracing::debug!(iteration, tree = %AstDumper::new().dump(&expr), "expression tree");
        }

        let outcome = match evaluator.evaluate(&text) {
            Ok(value) => {
                tracing::debug!(iteration, %value, "evaluated");
                EvalOutcome::Value(value)
            }
            Err(err) => {
                tracing::debug!(iteration, error = %err, "evaluation failed");
                EvalOutcome::Failed(err)
            }
        };

        records.push(IterationRecord {
            text,
            node_count: expr.node_count(),
            depth: expr.depth(),
            outcome,
        });
    }

    let report = SessionReport { records };
    tracing::info!(
        generated = report.generated(),
        succeeded = report.succeeded(),
        failed = report.failed(),
        "session complete"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::GenConfig;

    /// Records every expression it sees; fails each call whose index is
    /// in `fail_on`.
    struct ScriptedEvaluator {
        seen: Vec<String>,
        fail_on: fn(usize) -> bool,
    }

    impl ScriptedEvaluator {
        fn accepting() -> Self {
            Self {
                seen: Vec::new(),
                fail_on: |_| false,
            }
        }
    }

    impl Evaluator for ScriptedEvaluator {
        fn evaluate(&mut self, expr: &str) -> Result<String, EvalError> {
            let index = self.seen.len();
            self.seen.push(expr.to_string());
            if (self.fail_on)(index) {
                Err(EvalError::new(format!("rejected call {index}")))
            } else {
                Ok(format!("value-{index}"))
            }
        }
    }

    #[test]
    fn session_runs_the_configured_iterations() {
        let mut generator = ExprGenerator::from_seed(9, GenConfig::default());
        let mut evaluator = ScriptedEvaluator::accepting();
        let report = run_session(&mut generator, &mut evaluator, &SessionConfig::default());

        assert_eq!(report.generated(), 20);
        assert_eq!(evaluator.seen.len(), 20);
        assert_eq!(report.succeeded(), 20);
        assert_eq!(report.failed(), 0);
    }

    #[test]
    fn evaluator_sees_printed_expressions_in_generation_order() {
        let config = SessionConfig {
            iterations: 8,
            ..SessionConfig::default()
        };
        let mut generator = ExprGenerator::from_seed(31, GenConfig::default());
        let mut evaluator = ScriptedEvaluator::accepting();
        let report = run_session(&mut generator, &mut evaluator, &config);

        // An identically seeded generator reproduces the session's texts.
        let mut twin = ExprGenerator::from_seed(31, GenConfig::default());
        for (i, seen) in evaluator.seen.iter().enumerate() {
            let expected = printer::print(&twin.generate());
            assert_eq!(seen, &expected, "call {i}");
            assert_eq!(report.records[i].text, expected);
        }
    }

    #[test]
    fn failures_are_recorded_and_do_not_stop_the_session() {
        let config = SessionConfig {
            iterations: 10,
            ..SessionConfig::default()
        };
        let mut generator = ExprGenerator::from_seed(5, GenConfig::default());
        let mut evaluator = ScriptedEvaluator {
            seen: Vec::new(),
            fail_on: |i| i % 3 == 0,
        };
        let report = run_session(&mut generator, &mut evaluator, &config);

        assert_eq!(report.generated(), 10);
        assert_eq!(report.failed(), 4); // calls 0, 3, 6, 9
        assert_eq!(report.succeeded() + report.failed(), report.generated());
        assert_eq!(
            report.records[3].outcome,
            EvalOutcome::Failed(EvalError::new("rejected call 3"))
        );
        assert!(matches!(report.records[1].outcome, EvalOutcome::Value(_)));
    }

    #[test]
    fn zero_iterations_give_an_empty_report() {
        let config = SessionConfig {
            iterations: 0,
            ..SessionConfig::default()
        };
        let mut generator = ExprGenerator::from_seed(1, GenConfig::default());
        let mut evaluator = ScriptedEvaluator::accepting();
        let report = run_session(&mut generator, &mut evaluator, &config);

        assert_eq!(report, SessionReport::default());
        assert!(evaluator.seen.is_empty());
    }

    #[test]
    fn records_carry_tree_metrics() {
        let config = SessionConfig {
            iterations: 5,
            ..SessionConfig::default()
        };
        let mut generator = ExprGenerator::from_seed(17, GenConfig::default());
        let mut evaluator = ScriptedEvaluator::accepting();
        let report = run_session(&mut generator, &mut evaluator, &config);

        for record in &report.records {
            assert!(record.depth >= 1);
            assert!(record.node_count >= record.depth);
            assert!(!record.text.is_empty());
        }
    }
}
