//! Precedence-climbing parser and tree evaluation
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! sum     := product (('+' | '-') product)*
//! product := power (('*' | '/') power)*
//! power   := unary ('^' power)?
//! unary   := ('-' | '+') unary | postfix
//! postfix := primary '%'*
//! primary := number | constant | '(' sum ')' | '|' sum '|'
//!          | func '(' sum ')' | '√' ( '(' sum ')' | postfix )
//! ```
//!
//! Unary minus binds tighter than `^`, so `-2^2` is `4`.

use crate::error::{EvalError, EvalResult};
use crate::function::Builtin;
use crate::lexer::Token;

/// Nesting limit for groups and unary chains
pub const MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    pub fn apply(self, l: f64, r: f64) -> EvalResult<f64> {
        let value = match self {
            BinaryOp::Add => l + r,
            BinaryOp::Sub => l - r,
            BinaryOp::Mul => l * r,
            BinaryOp::Div => {
                if r == 0.0 {
                    return Err(EvalError::NonFiniteResult);
                }
                l / r
            }
            BinaryOp::Pow => l.powf(r),
        };
        finite(value)
    }
}

/// Parsed expression tree.
///
/// Sums and products are flat chains, so tree depth only grows with
/// groups, signs, roots and powers, all bounded by [`MAX_DEPTH`].
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Num(f64),
    Neg(Box<Expr>),
    /// Postfix `%` applied `n` times: operand divided by 100 each time
    Percent(Box<Expr>, usize),
    /// Left-associative run of one precedence level: `first op1 e1 op2 e2 ...`
    Chain(Box<Expr>, Vec<(BinaryOp, Expr)>),
    /// `base ^ exponent`
    Pow(Box<Expr>, Box<Expr>),
    Call(Builtin, Box<Expr>),
}

fn finite(value: f64) -> EvalResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::NonFiniteResult)
    }
}

impl Expr {
    /// Evaluate the tree. Every intermediate value must be finite.
    pub fn eval(&self) -> EvalResult<f64> {
        match self {
            Expr::Num(n) => finite(*n),
            Expr::Neg(inner) => finite(-inner.eval()?),
            Expr::Percent(inner, count) => {
                let mut value = inner.eval()?;
                for _ in 0..*count {
                    value /= 100.0;
                }
                finite(value)
            }
            Expr::Chain(first, rest) => rest
                .iter()
                .try_fold(first.eval()?, |acc, (op, rhs)| op.apply(acc, rhs.eval()?)),
            Expr::Pow(base, exponent) => BinaryOp::Pow.apply(base.eval()?, exponent.eval()?),
            Expr::Call(func, arg) => finite(func.apply(arg.eval()?)),
        }
    }
}

/// Parse a token stream into an expression tree
pub fn parse(tokens: &[Token]) -> EvalResult<Expr> {
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    if tokens.is_empty() {
        return Err(EvalError::InvalidOperandEmpty);
    }
    let expr = parser.parse_sum()?;
    match parser.next() {
        None => Ok(expr),
        Some(Token::RParen) => Err(EvalError::UnbalancedParentheses),
        Some(other) => Err(EvalError::UnexpectedToken(other.to_string())),
    }
}

fn chain(first: Expr, rest: Vec<(BinaryOp, Expr)>) -> Expr {
    if rest.is_empty() {
        first
    } else {
        Expr::Chain(Box::new(first), rest)
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Called right after an operator: something must follow it
    fn expect_operand(&self) -> EvalResult<()> {
        match self.peek() {
            None | Some(Token::RParen) => Err(EvalError::TrailingOperator),
            Some(_) => Ok(()),
        }
    }

    fn enter(&mut self) -> EvalResult<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(EvalError::NestingTooDeep);
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_sum(&mut self) -> EvalResult<Expr> {
        let first = self.parse_product()?;
        let mut rest = Vec::new();
        while let Some(token @ (Token::Plus | Token::Minus)) = self.peek() {
            self.pos += 1;
            self.expect_operand()?;
            let op = if token == Token::Plus {
                BinaryOp::Add
            } else {
                BinaryOp::Sub
            };
            rest.push((op, self.parse_product()?));
        }
        Ok(chain(first, rest))
    }

    fn parse_product(&mut self) -> EvalResult<Expr> {
        let first = self.parse_power()?;
        let mut rest = Vec::new();
        while let Some(token @ (Token::Star | Token::Slash)) = self.peek() {
            self.pos += 1;
            self.expect_operand()?;
            let op = if token == Token::Star {
                BinaryOp::Mul
            } else {
                BinaryOp::Div
            };
            rest.push((op, self.parse_power()?));
        }
        Ok(chain(first, rest))
    }

    fn parse_power(&mut self) -> EvalResult<Expr> {
        let base = self.parse_unary()?;
        if self.peek() != Some(Token::Caret) {
            return Ok(base);
        }
        self.pos += 1;
        self.expect_operand()?;
        self.enter()?;
        let exponent = self.parse_power();
        self.leave();
        Ok(Expr::Pow(Box::new(base), Box::new(exponent?)))
    }

    fn parse_unary(&mut self) -> EvalResult<Expr> {
        match self.peek() {
            Some(sign @ (Token::Minus | Token::Plus)) => {
                self.pos += 1;
                self.expect_operand()?;
                self.enter()?;
                let operand = self.parse_unary();
                self.leave();
                let operand = operand?;
                if sign == Token::Minus {
                    Ok(Expr::Neg(Box::new(operand)))
                } else {
                    Ok(operand)
                }
            }
            _ => self.parse_postfix(),
        }
    }

    fn parse_postfix(&mut self) -> EvalResult<Expr> {
        let expr = self.parse_primary()?;
        let mut count = 0;
        while self.peek() == Some(Token::Percent) {
            self.pos += 1;
            count += 1;
        }
        if count == 0 {
            Ok(expr)
        } else {
            Ok(Expr::Percent(Box::new(expr), count))
        }
    }

    fn parse_primary(&mut self) -> EvalResult<Expr> {
        match self.next() {
            None => Err(EvalError::TrailingOperator),
            Some(Token::Num(n)) => Ok(Expr::Num(n)),
            Some(Token::Const(c)) => Ok(Expr::Num(c.value())),
            Some(Token::LParen) => {
                if self.peek() == Some(Token::RParen) {
                    return Err(EvalError::UnexpectedToken(")".into()));
                }
                self.parse_group(Token::RParen)
            }
            Some(Token::Bar) => {
                let inner = self.parse_group(Token::Bar)?;
                Ok(Expr::Call(Builtin::Abs, Box::new(inner)))
            }
            Some(Token::Func(Builtin::Sqrt)) if self.peek() != Some(Token::LParen) => {
                if self.peek().is_none() {
                    return Err(EvalError::MalformedFunctionArgument(Builtin::Sqrt.name().into()));
                }
                self.enter()?;
                let operand = self.parse_postfix();
                self.leave();
                Ok(Expr::Call(Builtin::Sqrt, Box::new(operand?)))
            }
            Some(Token::Func(func)) => {
                if self.next() != Some(Token::LParen) {
                    return Err(EvalError::MalformedFunctionArgument(func.name().into()));
                }
                if self.peek() == Some(Token::RParen) {
                    return Err(EvalError::MalformedFunctionArgument(func.name().into()));
                }
                let arg = self.parse_group(Token::RParen)?;
                Ok(Expr::Call(func, Box::new(arg)))
            }
            Some(other) => Err(EvalError::UnexpectedToken(other.to_string())),
        }
    }

    /// Parse the inside of a group whose opener was consumed, then its closer
    fn parse_group(&mut self, close: Token) -> EvalResult<Expr> {
        if self.peek().is_none() {
            return Err(EvalError::UnbalancedParentheses);
        }
        self.enter()?;
        let inner = self.parse_sum();
        self.leave();
        let inner = inner?;
        match self.next() {
            Some(token) if token == close => Ok(inner),
            None => Err(EvalError::UnbalancedParentheses),
            Some(other) => Err(EvalError::UnexpectedToken(other.to_string())),
        }
    }
}
