use std::sync::Arc;

use crate::ast::{Arguments, BinaryOp, Expr, Node, TweenExpr, UnaryOp};
use crate::compiler::scanner::Scanner;
use crate::compiler::token::{Operator, Symbol, Token};
use crate::foundation::error::{AnimExprError, AnimExprResult};
use crate::tween::{ChannelKind, Ease};

const EQUALITY_OPS: &[(Operator, BinaryOp)] = &[
    (Operator::Equal, BinaryOp::Eq),
    (Operator::NotEqual, BinaryOp::Ne),
];

const RELATIONAL_OPS: &[(Operator, BinaryOp)] = &[
    (Operator::Less, BinaryOp::Lt),
    (Operator::Greater, BinaryOp::Gt),
    (Operator::LessEqual, BinaryOp::Le),
    (Operator::GreaterEqual, BinaryOp::Ge),
];

const ADDITIVE_OPS: &[(Operator, BinaryOp)] = &[
    (Operator::Plus, BinaryOp::Add),
    (Operator::Minus, BinaryOp::Sub),
];

const MULTIPLICATIVE_OPS: &[(Operator, BinaryOp)] = &[
    (Operator::Star, BinaryOp::Mul),
    (Operator::Slash, BinaryOp::Div),
];

/// Parse a whole program: a sequence of statements.
#[tracing::instrument(level = "debug", skip(src), fields(len = src.len()))]
pub fn parse_program(src: &str) -> AnimExprResult<Node> {
    Parser::new(Scanner::new(src)).parse()
}

/// Parse a single expression with no statement terminator.
#[tracing::instrument(level = "debug", skip(src), fields(len = src.len()))]
pub fn parse_expression(src: &str) -> AnimExprResult<Expr> {
    Parser::new(Scanner::new(src)).parse_only_expression()
}

/// Recursive-descent parser with one token of lookahead.
pub struct Parser<'a> {
    scanner: Scanner<'a>,
    token: Option<Token>,
}

impl<'a> Parser<'a> {
    pub fn new(scanner: Scanner<'a>) -> Self {
        Self {
            scanner,
            token: None,
        }
    }

    /// Parse from the start of the source. A program of exactly one statement yields that
    /// statement rather than a one-element [`Node::Statements`].
    pub fn parse(&mut self) -> AnimExprResult<Node> {
        self.initialize()?;
        let mut nodes = Vec::new();
        while self.token.is_some() {
            nodes.push(self.parse_statement()?);
        }
        if nodes.len() == 1 {
            return Ok(nodes.remove(0));
        }
        Ok(Node::Statements(nodes))
    }

    pub fn parse_only_expression(&mut self) -> AnimExprResult<Expr> {
        self.initialize()?;
        let expr = self.parse_expression()?;
        if let Some(t) = &self.token {
            return Err(self.syntax_error(format!("Unexpected {t} after expression")));
        }
        Ok(expr)
    }

    fn initialize(&mut self) -> AnimExprResult<()> {
        self.scanner.rewind();
        self.next_token()
    }

    fn next_token(&mut self) -> AnimExprResult<()> {
        self.token = self.scanner.get_token()?;
        Ok(())
    }

    fn is_operator(&self, op: Operator) -> bool {
        self.token == Some(Token::Operator(op))
    }

    fn is_symbol(&self, sym: Symbol) -> bool {
        self.token == Some(Token::Symbol(sym))
    }

    fn syntax_error(&self, msg: impl Into<String>) -> AnimExprError {
        AnimExprError::syntax(self.scanner.line(), msg)
    }

    fn expect_symbol(&mut self, sym: Symbol, msg: &str) -> AnimExprResult<()> {
        if !self.is_symbol(sym) {
            return Err(self.syntax_error(msg));
        }
        self.next_token()
    }

    fn match_operator(&self, table: &[(Operator, BinaryOp)]) -> Option<BinaryOp> {
        match self.token {
            Some(Token::Operator(o)) => table.iter().find(|(t, _)| *t == o).map(|&(_, b)| b),
            _ => None,
        }
    }

    fn parse_statement(&mut self) -> AnimExprResult<Node> {
        match self.token {
            Some(Token::Symbol(Symbol::LBrace)) => self.parse_block(),
            Some(Token::Symbol(Symbol::If)) => self.parse_if_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_block(&mut self) -> AnimExprResult<Node> {
        self.expect_symbol(Symbol::LBrace, "Missing '{' of block")?;
        let mut nodes = Vec::new();
        while self.token.is_some() && !self.is_symbol(Symbol::RBrace) {
            nodes.push(self.parse_statement()?);
        }
        self.expect_symbol(Symbol::RBrace, "Missing '}' of block")?;
        Ok(Node::Statements(nodes))
    }

    fn parse_if_statement(&mut self) -> AnimExprResult<Node> {
        self.expect_symbol(Symbol::If, "Missing 'if' of if statement")?;
        self.expect_symbol(Symbol::LParen, "Missing '(' of if condition")?;
        let cond = self.parse_expression()?;
        self.expect_symbol(Symbol::RParen, "Missing ')' of if condition")?;
        let body = self.parse_statement()?;
        Ok(Node::If {
            cond,
            body: Box::new(body),
        })
    }

    fn parse_expression_statement(&mut self) -> AnimExprResult<Node> {
        let expr = self.parse_expression()?;
        self.expect_symbol(Symbol::Semicolon, "Missing ';' on statement")?;
        Ok(Node::Expr(expr))
    }

    fn parse_expression(&mut self) -> AnimExprResult<Expr> {
        self.parse_conditional()
    }

    fn parse_conditional(&mut self) -> AnimExprResult<Expr> {
        let cond = self.parse_logical_or()?;
        if !self.is_symbol(Symbol::Question) {
            return Ok(cond);
        }
        self.next_token()?;
        let then = self.parse_expression()?;
        self.expect_symbol(Symbol::Colon, "Missing ':'")?;
        let otherwise = self.parse_expression()?;
        Ok(Expr::Conditional {
            cond: Box::new(cond),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        })
    }

    fn parse_logical_or(&mut self) -> AnimExprResult<Expr> {
        let mut e = self.parse_logical_and()?;
        while self.is_operator(Operator::Or) {
            self.next_token()?;
            let r = self.parse_logical_and()?;
            e = Expr::binary(BinaryOp::Or, e, r);
        }
        Ok(e)
    }

    fn parse_logical_and(&mut self) -> AnimExprResult<Expr> {
        let mut e = self.parse_equality()?;
        while self.is_operator(Operator::And) {
            self.next_token()?;
            let r = self.parse_equality()?;
            e = Expr::binary(BinaryOp::And, e, r);
        }
        Ok(e)
    }

    fn parse_equality(&mut self) -> AnimExprResult<Expr> {
        let mut e = self.parse_relational()?;
        while let Some(op) = self.match_operator(EQUALITY_OPS) {
            self.next_token()?;
            let r = self.parse_relational()?;
            e = Expr::binary(op, e, r);
        }
        Ok(e)
    }

    fn parse_relational(&mut self) -> AnimExprResult<Expr> {
        let mut e = self.parse_additive()?;
        while let Some(op) = self.match_operator(RELATIONAL_OPS) {
            self.next_token()?;
            let r = self.parse_additive()?;
            e = Expr::binary(op, e, r);
        }
        Ok(e)
    }

    fn parse_additive(&mut self) -> AnimExprResult<Expr> {
        let mut e = self.parse_multiplicative()?;
        while let Some(op) = self.match_operator(ADDITIVE_OPS) {
            self.next_token()?;
            let r = self.parse_multiplicative()?;
            e = Expr::binary(op, e, r);
        }
        Ok(e)
    }

    fn parse_multiplicative(&mut self) -> AnimExprResult<Expr> {
        let mut e = self.parse_unary()?;
        while let Some(op) = self.match_operator(MULTIPLICATIVE_OPS) {
            self.next_token()?;
            let r = self.parse_unary()?;
            e = Expr::binary(op, e, r);
        }
        Ok(e)
    }

    fn parse_unary(&mut self) -> AnimExprResult<Expr> {
        match self.token {
            Some(Token::Operator(Operator::Plus)) => {
                self.next_token()?;
                self.parse_unary()
            }
            Some(Token::Operator(Operator::Minus)) => {
                self.next_token()?;
                Ok(Expr::unary(UnaryOp::Neg, self.parse_unary()?))
            }
            Some(Token::Operator(Operator::Not)) => {
                self.next_token()?;
                Ok(Expr::unary(UnaryOp::Not, self.parse_unary()?))
            }
            _ => self.parse_call(),
        }
    }

    fn parse_call(&mut self) -> AnimExprResult<Expr> {
        let left = self.parse_primary()?;
        if !self.is_symbol(Symbol::LParen) {
            return Ok(left);
        }
        let Expr::Variable(name) = left else {
            return Err(self.syntax_error("Invalid function call"));
        };

        if let Some(channel) = ChannelKind::from_name(&name) {
            let args = self.parse_arguments()?;
            let call = TweenExpr::Call {
                channel,
                name,
                args,
            };
            return Ok(Expr::Tween(self.parse_chain(call)?));
        }

        match name.as_str() {
            "Active" => Ok(Expr::SetActive(self.parse_arguments()?)),
            "Callback" => {
                self.parse_arguments()?;
                Ok(Expr::Callback)
            }
            _ => Err(self.syntax_error(format!("{name} is not valid tween name"))),
        }
    }

    fn parse_chain(&mut self, mut t: TweenExpr) -> AnimExprResult<TweenExpr> {
        while self.is_symbol(Symbol::Dot) {
            self.next_token()?;
            let name = match self.token.take() {
                Some(Token::Identifier(name)) => name,
                other => {
                    self.token = other;
                    return Err(self.syntax_error("Invalid method access"));
                }
            };
            self.next_token()?;
            if !self.is_symbol(Symbol::LParen) {
                return Err(self.syntax_error("Missing '(' after method access"));
            }

            let target = Box::new(t);
            t = match name.as_str() {
                "Then" => {
                    self.next_token()?;
                    let body = self.parse_statement()?;
                    self.expect_symbol(Symbol::RParen, "Missing ')' after Then body")?;
                    TweenExpr::Then {
                        target,
                        body: Arc::new(body),
                    }
                }
                "From" | "FromRelative" => TweenExpr::From {
                    target,
                    args: self.parse_arguments()?,
                    relative: name == "FromRelative",
                },
                "Delay" => TweenExpr::Delay {
                    target,
                    args: self.parse_arguments()?,
                },
                "Animate" => TweenExpr::Animate {
                    target,
                    args: self.parse_arguments()?,
                },
                n if n.starts_with("Ease") => {
                    let ease = Ease::from_name(n)
                        .ok_or_else(|| self.syntax_error(format!("{n} is not valid easing name")))?;
                    TweenExpr::Ease {
                        target,
                        ease,
                        args: self.parse_arguments()?,
                    }
                }
                n => return Err(self.syntax_error(format!("{n} is not valid method name"))),
            };
        }
        Ok(t)
    }

    fn parse_arguments(&mut self) -> AnimExprResult<Arguments> {
        self.expect_symbol(Symbol::LParen, "Missing '(' of arguments")?;
        let mut args = Vec::new();
        if !self.is_symbol(Symbol::RParen) {
            loop {
                args.push(self.parse_expression()?);
                if !self.is_symbol(Symbol::Comma) {
                    break;
                }
                self.next_token()?;
            }
        }
        self.expect_symbol(Symbol::RParen, "Missing ')' of arguments")?;
        Ok(Arguments(args))
    }

    fn parse_primary(&mut self) -> AnimExprResult<Expr> {
        match self.token.take() {
            Some(Token::Number(v)) => {
                self.next_token()?;
                Ok(Expr::Number(v))
            }
            Some(Token::Identifier(name)) => {
                self.next_token()?;
                Ok(Expr::Variable(name))
            }
            Some(Token::Symbol(Symbol::LParen)) => {
                self.next_token()?;
                let e = self.parse_expression()?;
                self.expect_symbol(Symbol::RParen, "Missing ')'")?;
                Ok(e)
            }
            Some(Token::Operator(o)) => {
                self.token = Some(Token::Operator(o));
                Err(self.syntax_error(format!("Unknown operator '{}'", o.as_str())))
            }
            Some(Token::Symbol(s)) => {
                self.token = Some(Token::Symbol(s));
                Err(self.syntax_error(format!("Unknown symbol '{}'", s.as_str())))
            }
            None => Err(self.syntax_error("Unexpected end of input")),
        }
    }
}
