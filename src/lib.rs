//! Random expression fuzzing: seeded generation of C-like expression
//! trees, a printer whose output parses back to the same tree, a
//! diagnostic dumper, and a session loop driving an external evaluator.

pub mod ast;
pub mod dump;
pub mod generator;
pub mod printer;
pub mod profile;
pub mod session;

pub use ast::{
    BinaryExpr, BinaryOp, DoubleConstant, Expr, IntegerConstant, UnaryExpr, UnaryOp, VariableExpr,
};
pub use dump::AstDumper;
pub use generator::{ConfigError, ExprGenerator, GenConfig, KindWeights};
pub use printer::print;
pub use profile::{ProfileError, available_profiles, get_profile};
pub use session::{
    EvalError, EvalOutcome, Evaluator, IterationRecord, SessionConfig, SessionReport, run_session,
};
