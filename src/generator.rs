//! Weighted random generation of expression trees.
//!
//! Every draw comes from one per-generator stream, so a seed fully
//! determines the sequence of trees. Node kinds are chosen by weighted
//! draw; the weight vector is threaded through recursion, and each
//! composite kind multiplies its own weight by a decay factor on the way
//! down. With decay below 1 the composite probability mass shrinks
//! geometrically with nesting, which is what bounds tree depth - there is
//! no hard cap.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ast::{BinaryOp, Expr, UnaryOp};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Relative weights steering the five-way node-kind choice.
///
/// Weights are relative, not normalized; only ratios matter. A kind with
/// weight zero is never generated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KindWeights {
    pub integer: f64,
    pub double: f64,
    pub variable: f64,
    pub binary: f64,
    pub unary: f64,
}

impl Default for KindWeights {
    fn default() -> Self {
        Self {
            integer: 1.0,
            double: 0.0,
            variable: 1.0,
            binary: 7.0,
            unary: 3.0,
        }
    }
}

impl KindWeights {
    pub fn total(&self) -> f64 {
        self.integer + self.double + self.variable + self.binary + self.unary
    }
}

/// Generation policy: kind weights, decay, value ranges, and the
/// parenthesization coin.
///
/// `Default` is the canonical fuzzing policy; embedded profiles override
/// only the fields they name. Run [`GenConfig::validate`] on anything
/// built by hand - generation assumes a validated configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenConfig {
    /// Multiplier applied to the binary weight inside binary operands.
    pub binary_decay: f64,
    /// Multiplier applied to the unary weight inside unary operands.
    pub unary_decay: f64,
    /// Integer constants are drawn uniformly from `0..=max_int`.
    pub max_int: u64,
    /// Double constants are drawn uniformly from `0.0..max_double`.
    pub max_double: f64,
    /// The single identifier generated for variable references.
    pub variable_name: String,
    /// Probability that any one node requests explicit parentheses.
    pub parens_probability: f64,
    /// Node-kind weights at the root of every generated tree.
    pub weights: KindWeights,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            binary_decay: 0.4,
            unary_decay: 0.4,
            max_int: 10,
            max_double: 10.0,
            variable_name: "x".to_string(),
            parens_probability: 0.5,
            weights: KindWeights::default(),
        }
    }
}

impl GenConfig {
    /// Check that this configuration can only produce terminating
    /// generation: finite non-negative weights, some leaf kind reachable,
    /// and composite decay strictly below 1 wherever the composite kind
    /// is reachable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.weights;
        let named = [
            ("integer", w.integer),
            ("double", w.double),
            ("variable", w.variable),
            ("binary", w.binary),
            ("unary", w.unary),
        ];
        for (kind, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { kind, value });
            }
        }
        if w.integer + w.double + w.variable <= 0.0 {
            return Err(ConfigError::NoLeafWeight);
        }
        if w.binary > 0.0 && !(0.0..1.0).contains(&self.binary_decay) {
            return Err(ConfigError::InvalidDecay {
                kind: "binary",
                value: self.binary_decay,
            });
        }
        if w.unary > 0.0 && !(0.0..1.0).contains(&self.unary_decay) {
            return Err(ConfigError::InvalidDecay {
                kind: "unary",
                value: self.unary_decay,
            });
        }
        if !(0.0..=1.0).contains(&self.parens_probability) {
            return Err(ConfigError::InvalidProbability(self.parens_probability));
        }
        if !self.max_double.is_finite() || self.max_double < 0.0 {
            return Err(ConfigError::InvalidMaxDouble(self.max_double));
        }
        if self.variable_name.is_empty() {
            return Err(ConfigError::EmptyVariableName);
        }
        Ok(())
    }
}

/// A generation policy that cannot be used safely.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{kind} weight is {value}, weights must be finite and non-negative")]
    InvalidWeight { kind: &'static str, value: f64 },

    #[error("no leaf kind has positive weight, so no tree could ever terminate")]
    NoLeafWeight,

    #[error("{kind} decay is {value}, must be in [0, 1) while the {kind} weight is positive")]
    InvalidDecay { kind: &'static str, value: f64 },

    #[error("parens probability {0} is outside [0, 1]")]
    InvalidProbability(f64),

    #[error("max double {0} must be finite and non-negative")]
    InvalidMaxDouble(f64),

    #[error("variable name must not be empty")]
    EmptyVariableName,
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Random expression generator owning its stream and policy.
///
/// Not shareable across threads without external synchronization (every
/// draw advances the stream); independent instances are fully
/// independent.
pub struct ExprGenerator<R: Rng> {
    rng: R,
    config: GenConfig,
}

impl ExprGenerator<StdRng> {
    /// Generator with a reproducible stream: the same seed and config
    /// yield the same sequence of trees.
    pub fn from_seed(seed: u64, config: GenConfig) -> Self {
        Self::new(StdRng::seed_from_u64(seed), config)
    }
}

impl<R: Rng> ExprGenerator<R> {
    pub fn new(rng: R, config: GenConfig) -> Self {
        Self { rng, config }
    }

    pub fn config(&self) -> &GenConfig {
        &self.config
    }

    /// Produce one random expression tree.
    ///
    /// # Panics
    ///
    /// May panic on a configuration that fails [`GenConfig::validate`]
    /// (for example an all-zero weight vector leaves nothing to sample).
    pub fn generate(&mut self) -> Expr {
        let weights = self.config.weights;
        self.gen_with_weights(&weights)
    }

    /// One weighted kind choice, then recurse per kind. Draw order per
    /// node is fixed and part of the reproducibility contract: kind,
    /// then children/values, then operator, then the parens flag.
    fn gen_with_weights(&mut self, weights: &KindWeights) -> Expr {
        let roll: f64 = self.rng.gen_range(0.0..weights.total());

        let mut bound = weights.integer;
        if roll < bound {
            return self.gen_integer_constant();
        }
        bound += weights.double;
        if roll < bound {
            return self.gen_double_constant();
        }
        bound += weights.variable;
        if roll < bound {
            return self.gen_variable_expr();
        }
        bound += weights.binary;
        if roll < bound {
            return self.gen_binary_expr(weights);
        }
        self.gen_unary_expr(weights)
    }

    // -- Per-kind generation ------------------------------------------------

    fn gen_integer_constant(&mut self) -> Expr {
        let value = self.rng.gen_range(0..=self.config.max_int);
        let parens = self.gen_parens();
        Expr::int(value, parens)
    }

    fn gen_double_constant(&mut self) -> Expr {
        let value = if self.config.max_double > 0.0 {
            self.rng.gen_range(0.0..self.config.max_double)
        } else {
            0.0
        };
        let parens = self.gen_parens();
        Expr::double(value, parens)
    }

    fn gen_variable_expr(&mut self) -> Expr {
        let name = self.config.variable_name.clone();
        let parens = self.gen_parens();
        Expr::variable(name, parens)
    }

    fn gen_binary_expr(&mut self, weights: &KindWeights) -> Expr {
        let mut child_weights = *weights;
        child_weights.binary *= self.config.binary_decay;

        let left = self.gen_with_weights(&child_weights);
        let right = self.gen_with_weights(&child_weights);
        let op = BinaryOp::ALL[self.rng.gen_range(0..BinaryOp::ALL.len())];
        let parens = self.gen_parens();
        Expr::binary(left, op, right, parens)
    }

    fn gen_unary_expr(&mut self, weights: &KindWeights) -> Expr {
        let mut child_weights = *weights;
        child_weights.unary *= self.config.unary_decay;

        let operand = self.gen_with_weights(&child_weights);
        let op = UnaryOp::ALL[self.rng.gen_range(0..UnaryOp::ALL.len())];
        let parens = self.gen_parens();
        Expr::unary(op, operand, parens)
    }

    // -- RNG convenience ----------------------------------------------------

    fn gen_parens(&mut self) -> bool {
        self.rng
            .gen_bool(self.config.parens_probability.clamp(0.0, 1.0))
    }
}
