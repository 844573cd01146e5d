//! Scientific keys
//!
//! Function keys rewrite the whole buffer; they never operate on a
//! sub-expression at the cursor.

use core::f64::consts;

use serde::{Deserialize, Serialize};

/// A scientific function key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScientificFunction {
    Sin,
    Cos,
    Tan,
    /// Natural logarithm
    Ln,
    /// Base-10 logarithm
    Log,
    Sqrt,
    /// `1/x`
    Reciprocal,
    /// `|x|`
    Abs,
    /// `x²`
    Square,
    /// `xʸ`: appends a bare `^` and waits for the exponent
    Power,
}

impl ScientificFunction {
    pub const ALL: [ScientificFunction; 10] = [
        ScientificFunction::Sin,
        ScientificFunction::Cos,
        ScientificFunction::Tan,
        ScientificFunction::Ln,
        ScientificFunction::Log,
        ScientificFunction::Sqrt,
        ScientificFunction::Reciprocal,
        ScientificFunction::Abs,
        ScientificFunction::Square,
        ScientificFunction::Power,
    ];

    /// Keypad label
    pub fn label(&self) -> &'static str {
        match self {
            ScientificFunction::Sin => "sin",
            ScientificFunction::Cos => "cos",
            ScientificFunction::Tan => "tan",
            ScientificFunction::Ln => "ln",
            ScientificFunction::Log => "log",
            ScientificFunction::Sqrt => "√",
            ScientificFunction::Reciprocal => "1/x",
            ScientificFunction::Abs => "|x|",
            ScientificFunction::Square => "x²",
            ScientificFunction::Power => "xʸ",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.label() == label)
    }

    /// Rewrite a whole buffer as the argument of this function
    pub fn wrap(&self, expr: &str) -> String {
        match self {
            ScientificFunction::Sin
            | ScientificFunction::Cos
            | ScientificFunction::Tan
            | ScientificFunction::Ln
            | ScientificFunction::Log
            | ScientificFunction::Sqrt => format!("{}({})", self.label(), expr),
            ScientificFunction::Reciprocal => format!("1/({})", expr),
            ScientificFunction::Abs => format!("|{}|", expr),
            ScientificFunction::Square => format!("{}^2", expr),
            ScientificFunction::Power => format!("{}^", expr),
        }
    }
}

/// Functions the evaluator can call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Builtin {
    Sin,
    Cos,
    Tan,
    Ln,
    Log,
    Sqrt,
    Abs,
}

impl Builtin {
    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Sin => "sin",
            Builtin::Cos => "cos",
            Builtin::Tan => "tan",
            Builtin::Ln => "ln",
            Builtin::Log => "log",
            Builtin::Sqrt => "√",
            Builtin::Abs => "|x|",
        }
    }

    /// Raw application; domain errors come back as NaN or infinity.
    /// Trigonometry works in radians.
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Builtin::Sin => x.sin(),
            Builtin::Cos => x.cos(),
            Builtin::Tan => x.tan(),
            Builtin::Ln => x.ln(),
            Builtin::Log => x.log10(),
            Builtin::Sqrt => x.sqrt(),
            Builtin::Abs => x.abs(),
        }
    }
}

/// Named constants. Inserted pre-expanded, see [`Constant::expanded`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    pub fn symbol(&self) -> char {
        match self {
            Constant::Pi => 'π',
            Constant::E => 'e',
        }
    }

    pub fn from_symbol(ch: char) -> Option<Self> {
        match ch {
            'π' => Some(Constant::Pi),
            'e' => Some(Constant::E),
            _ => None,
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            Constant::Pi => consts::PI,
            Constant::E => consts::E,
        }
    }

    /// Shortest round-trip decimal text of the value
    pub fn expanded(&self) -> String {
        format!("{}", self.value())
    }
}
