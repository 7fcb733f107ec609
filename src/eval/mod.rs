pub mod context;
pub mod evaluator;

pub use context::{Continuation, EvalContext};
pub use evaluator::EQ_TOLERANCE;
