use std::sync::Arc;

use crate::ast::{Arguments, BinaryOp, Expr, Node, TweenExpr, UnaryOp};
use crate::eval::context::{Continuation, EvalContext};
use crate::foundation::error::{AnimExprError, AnimExprResult};
use crate::tween::{ChannelKind, ChannelValues, Tween};

/// Absolute tolerance used by `==` and `!=`.
pub const EQ_TOLERANCE: f64 = 1e-6;

impl Node {
    /// Run the node for its side effects.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn evaluate<C: EvalContext>(&self, ctx: &C) -> AnimExprResult<()> {
        match self {
            Self::Statements(nodes) => {
                for n in nodes {
                    n.evaluate(ctx)?;
                }
                Ok(())
            }
            Self::If { cond, body } => {
                if cond.evaluate_as_bool(ctx) {
                    body.evaluate(ctx)?;
                }
                Ok(())
            }
            Self::Expr(e) => e.evaluate(ctx),
        }
    }
}

impl Expr {
    /// Statement view: tween chains, `Active` and `Callback` act; everything else is computed
    /// and discarded.
    pub fn evaluate<C: EvalContext>(&self, ctx: &C) -> AnimExprResult<()> {
        match self {
            Self::Tween(t) => t.evaluate_as_tween(ctx).map(drop),
            Self::SetActive(args) => set_active(args, ctx),
            Self::Callback => {
                ctx.on_callback();
                Ok(())
            }
            Self::Number(_)
            | Self::Variable(_)
            | Self::Conditional { .. }
            | Self::Unary { .. }
            | Self::Binary { .. } => {
                self.evaluate_as_number(ctx);
                Ok(())
            }
        }
    }

    pub fn evaluate_as_number<C: EvalContext>(&self, ctx: &C) -> f64 {
        match self {
            Self::Number(v) => *v,
            Self::Variable(name) => ctx.resolve_variable(name).unwrap_or(0.0),
            Self::Conditional {
                cond,
                then,
                otherwise,
            } => {
                if cond.evaluate_as_bool(ctx) {
                    then.evaluate_as_number(ctx)
                } else {
                    otherwise.evaluate_as_number(ctx)
                }
            }
            Self::Unary {
                op: UnaryOp::Neg,
                expr,
            } => -expr.evaluate_as_number(ctx),
            Self::Binary { op, left, right } if op.is_arithmetic() => {
                let a = left.evaluate_as_number(ctx);
                let b = right.evaluate_as_number(ctx);
                match op {
                    BinaryOp::Add => a + b,
                    BinaryOp::Sub => a - b,
                    BinaryOp::Mul => a * b,
                    _ => a / b,
                }
            }
            Self::Tween(_) | Self::SetActive(_) | Self::Callback => 0.0,
            Self::Unary {
                op: UnaryOp::Not, ..
            }
            | Self::Binary { .. } => {
                if self.evaluate_as_bool(ctx) {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    pub fn evaluate_as_bool<C: EvalContext>(&self, ctx: &C) -> bool {
        match self {
            Self::Unary {
                op: UnaryOp::Not,
                expr,
            } => !expr.evaluate_as_bool(ctx),
            Self::Binary { op, left, right } if !op.is_arithmetic() => match op {
                BinaryOp::Or => left.evaluate_as_bool(ctx) || right.evaluate_as_bool(ctx),
                BinaryOp::And => left.evaluate_as_bool(ctx) && right.evaluate_as_bool(ctx),
                _ => {
                    let a = left.evaluate_as_number(ctx);
                    let b = right.evaluate_as_number(ctx);
                    match op {
                        BinaryOp::Eq => approx_eq(a, b),
                        BinaryOp::Ne => !approx_eq(a, b),
                        BinaryOp::Lt => a < b,
                        BinaryOp::Gt => a > b,
                        BinaryOp::Le => a <= b,
                        _ => a >= b,
                    }
                }
            },
            Self::Tween(_) | Self::SetActive(_) | Self::Callback => true,
            Self::Number(_)
            | Self::Variable(_)
            | Self::Conditional { .. }
            | Self::Unary {
                op: UnaryOp::Neg, ..
            }
            | Self::Binary { .. } => self.evaluate_as_number(ctx) > 0.0,
        }
    }
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EQ_TOLERANCE
}

impl BinaryOp {
    pub fn is_arithmetic(self) -> bool {
        matches!(self, Self::Add | Self::Sub | Self::Mul | Self::Div)
    }
}

struct Built<T> {
    channel: ChannelKind,
    handle: T,
}

impl TweenExpr {
    /// Create and configure the tween. Argument counts for the whole chain are checked before
    /// the host sees anything, so a bad count never leaves a half-configured tween behind.
    pub fn evaluate_as_tween<C: EvalContext>(&self, ctx: &C) -> AnimExprResult<C::Tween> {
        self.check_arity()?;
        Ok(self.build(ctx)?.handle)
    }

    fn check_arity(&self) -> AnimExprResult<ChannelKind> {
        match self {
            Self::Call {
                channel,
                name,
                args,
            } => {
                let w = channel.width();
                let n = args.len();
                if !(n == 2 || n == 3 || n == 2 + w) {
                    return Err(AnimExprError::arity(name.as_str(), call_arity(w), n));
                }
                object_name(name, args)?;
                Ok(*channel)
            }
            Self::From {
                target,
                args,
                relative,
            } => {
                let channel = target.check_arity()?;
                let w = channel.width();
                let n = args.len();
                if !(n == 1 || n == w) {
                    let call = if *relative { "FromRelative" } else { "From" };
                    return Err(AnimExprError::arity(call, from_arity(w), n));
                }
                Ok(channel)
            }
            Self::Delay { target, args } => {
                expect_count("Delay", args, 1, "1")?;
                target.check_arity()
            }
            Self::Animate { target, args } => {
                expect_count("Animate", args, 1, "1")?;
                target.check_arity()
            }
            Self::Ease { target, ease, args } => {
                expect_count(&ease.name(), args, 0, "0")?;
                target.check_arity()
            }
            Self::Then { target, .. } => target.check_arity(),
        }
    }

    // Counts were validated by `check_arity`; indexing below relies on that.
    fn build<C: EvalContext>(&self, ctx: &C) -> AnimExprResult<Built<C::Tween>> {
        match self {
            Self::Call {
                channel,
                name,
                args,
            } => {
                let object = ctx.resolve_object(object_name(name, args)?)?;
                let duration = args.0[1].evaluate_as_number(ctx);
                let to = match args.len() {
                    2 => None,
                    _ => Some(channel_values(&args.0[2..], channel.width(), ctx)),
                };
                tracing::debug!(channel = channel.name(), duration, ?to, "creating tween");
                let handle = ctx.create_tween(&object, *channel, duration, to)?;
                Ok(Built {
                    channel: *channel,
                    handle,
                })
            }
            Self::From {
                target,
                args,
                relative,
            } => {
                let mut built = target.build(ctx)?;
                let values = channel_values(&args.0, built.channel.width(), ctx);
                if *relative {
                    built.handle.set_from_relative(values);
                } else {
                    built.handle.set_from(values);
                }
                Ok(built)
            }
            Self::Delay { target, args } => {
                let mut built = target.build(ctx)?;
                built.handle.set_delay(args.0[0].evaluate_as_number(ctx));
                Ok(built)
            }
            Self::Animate { target, args } => {
                let mut built = target.build(ctx)?;
                built.handle.set_animate(args.0[0].evaluate_as_bool(ctx));
                Ok(built)
            }
            Self::Ease { target, ease, .. } => {
                let mut built = target.build(ctx)?;
                built.handle.set_easing(*ease);
                Ok(built)
            }
            Self::Then { target, body } => {
                let mut built = target.build(ctx)?;
                tracing::debug!(channel = built.channel.name(), "registering continuation");
                built
                    .handle
                    .on_complete(Continuation::new(Arc::clone(body), ctx.clone()));
                Ok(built)
            }
        }
    }
}

fn set_active<C: EvalContext>(args: &Arguments, ctx: &C) -> AnimExprResult<()> {
    expect_count("Active", args, 2, "2")?;
    let object = ctx.resolve_object(object_name("Active", args)?)?;
    let active = args.0[1].evaluate_as_bool(ctx);
    ctx.set_active(&object, active);
    Ok(())
}

fn object_name<'a>(call: &str, args: &'a Arguments) -> AnimExprResult<&'a str> {
    match args.get(0) {
        Some(Expr::Variable(name)) => Ok(name),
        _ => Err(AnimExprError::argument(format!(
            "first argument of {call} must be an object name"
        ))),
    }
}

fn expect_count(
    call: &str,
    args: &Arguments,
    count: usize,
    expected: &'static str,
) -> AnimExprResult<()> {
    if args.len() != count {
        return Err(AnimExprError::arity(call, expected, args.len()));
    }
    Ok(())
}

/// One value expands to every channel; otherwise values map one-to-one.
fn channel_values<C: EvalContext>(args: &[Expr], width: usize, ctx: &C) -> ChannelValues {
    if let [single] = args {
        let v = single.evaluate_as_number(ctx);
        return std::iter::repeat_n(v, width).collect();
    }
    args.iter().map(|a| a.evaluate_as_number(ctx)).collect()
}

fn call_arity(width: usize) -> &'static str {
    match width {
        1 => "2 or 3",
        2 => "2, 3 or 4",
        3 => "2, 3 or 5",
        _ => "2, 3 or 6",
    }
}

fn from_arity(width: usize) -> &'static str {
    match width {
        1 => "1",
        2 => "1 or 2",
        3 => "1 or 3",
        _ => "1 or 4",
    }
}
