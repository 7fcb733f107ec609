#![forbid(unsafe_code)]
//! Tween animation expressions: scanner, parser, AST and a tree-walking evaluator that drives
//! a host animation engine through [`EvalContext`].

pub mod asset;
pub mod ast;
pub mod compiler;
pub mod eval;
pub mod foundation;
pub mod record;
pub mod tween;

pub use asset::{AnimationExpression, AssetContext, ObjectMap, Variable};
pub use ast::{Arguments, BinaryOp, Expr, Node, TweenExpr, UnaryOp};
pub use compiler::{Operator, Parser, Scanner, Symbol, Token, parse_expression, parse_program};
pub use eval::{Continuation, EQ_TOLERANCE, EvalContext};
pub use foundation::error::{AnimExprError, AnimExprResult};
pub use record::{RecordingContext, RecordingTween, StartValues, Trace, TraceEvent, TweenRecord};
pub use tween::{ChannelKind, ChannelValues, Ease, EaseFamily, EaseMode, Tween};
