//! Tokenizer for canonical buffers
//!
//! Input is expected to be normalized already (see [`crate::symbol`]).

use core::fmt;

use crate::error::{EvalError, EvalResult};
use crate::function::{Builtin, Constant};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Num(f64),
    Const(Constant),
    /// Named function or `√`
    Func(Builtin),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Percent,
    LParen,
    RParen,
    /// `|`, absolute value delimiter
    Bar,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Num(n) => write!(f, "{n}"),
            Token::Const(c) => write!(f, "{}", c.symbol()),
            Token::Func(func) => write!(f, "{}", func.name()),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Caret => write!(f, "^"),
            Token::Percent => write!(f, "%"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Bar => write!(f, "|"),
        }
    }
}

pub struct Lexer<'input> {
    input: &'input str,
    pos: usize,
}

impl<'input> Lexer<'input> {
    pub fn new(input: &'input str) -> Self {
        Lexer { input, pos: 0 }
    }

    fn rest(&self) -> &'input str {
        &self.input[self.pos..]
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'input str {
        let rest = self.rest();
        let len: usize = rest
            .chars()
            .take_while(|c| pred(*c))
            .map(char::len_utf8)
            .sum();
        self.pos += len;
        &rest[..len]
    }

    fn take_num(&mut self) -> EvalResult<Token> {
        let text = self.take_while(|c| c.is_ascii_digit() || c == '.');
        if text.matches('.').count() > 1 || !text.chars().any(|c| c.is_ascii_digit()) {
            return Err(EvalError::InvalidNumber(text.into()));
        }
        text.parse::<f64>()
            .map(Token::Num)
            .map_err(|_| EvalError::InvalidNumber(text.into()))
    }

    fn take_ident(&mut self) -> EvalResult<Token> {
        let ident = self.take_while(|c| c.is_ascii_alphabetic());
        match ident {
            "sin" => Ok(Token::Func(Builtin::Sin)),
            "cos" => Ok(Token::Func(Builtin::Cos)),
            "tan" => Ok(Token::Func(Builtin::Tan)),
            "ln" => Ok(Token::Func(Builtin::Ln)),
            "log" => Ok(Token::Func(Builtin::Log)),
            "e" => Ok(Token::Const(Constant::E)),
            "pi" => Ok(Token::Const(Constant::Pi)),
            other => Err(EvalError::UnknownIdentifier(other.into())),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = EvalResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.take_while(char::is_whitespace);
        let ch = self.rest().chars().next()?;

        if ch.is_ascii_digit() || ch == '.' {
            return Some(self.take_num());
        }
        if ch.is_ascii_alphabetic() {
            return Some(self.take_ident());
        }

        self.pos += ch.len_utf8();
        let token = match ch {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '^' => Token::Caret,
            '%' => Token::Percent,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '|' => Token::Bar,
            'π' => Token::Const(Constant::Pi),
            '√' => Token::Func(Builtin::Sqrt),
            other => return Some(Err(EvalError::UnexpectedToken(other.to_string()))),
        };
        Some(Ok(token))
    }
}

/// Tokenize a whole canonical buffer
pub fn tokenize(input: &str) -> EvalResult<Vec<Token>> {
    Lexer::new(input).collect()
}
