use std::sync::Arc;

use crate::tween::{ChannelKind, Ease};

/// A statement-level node. Programs, blocks and `Then` bodies are all `Node`s.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Statements(Vec<Node>),
    /// `if (cond) body` with no else branch.
    If {
        cond: Expr,
        body: Box<Node>,
    },
    Expr(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Variable(String),
    /// `cond ? then : otherwise`
    Conditional {
        cond: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Tween(TweenExpr),
    /// `Active(object, flag)`
    SetActive(Arguments),
    /// `Callback(...)`; arguments are discarded at parse time.
    Callback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Or,
    And,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    Add,
    Sub,
    Mul,
    Div,
}

/// A tween call followed by its chained method suffixes.
///
/// Each suffix wraps the node built so far, so the outermost variant is the last suffix in
/// source order.
#[derive(Debug, Clone, PartialEq)]
pub enum TweenExpr {
    Call {
        channel: ChannelKind,
        /// Name as written in source, kept for diagnostics.
        name: String,
        args: Arguments,
    },
    From {
        target: Box<TweenExpr>,
        args: Arguments,
        relative: bool,
    },
    Delay {
        target: Box<TweenExpr>,
        args: Arguments,
    },
    Animate {
        target: Box<TweenExpr>,
        args: Arguments,
    },
    Ease {
        target: Box<TweenExpr>,
        ease: Ease,
        args: Arguments,
    },
    /// Body runs once, when the wrapped tween completes.
    Then {
        target: Box<TweenExpr>,
        body: Arc<Node>,
    },
}

/// Call arguments. Counts are checked when the call is evaluated, not when it is parsed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments(pub Vec<Expr>);

impl Arguments {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&Expr> {
        self.0.get(i)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Expr> {
        self.0.iter()
    }
}

impl Expr {
    pub(crate) fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Self::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub(crate) fn unary(op: UnaryOp, expr: Expr) -> Self {
        Self::Unary {
            op,
            expr: Box::new(expr),
        }
    }
}
