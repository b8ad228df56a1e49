//! Static table of the named functions and constants understood by the engine.
//!
//! Lookup happens once, at parse time, so an unknown name is reported as a
//! parse error instead of silently producing nonsense during evaluation.
use crate::symbolic::symbolic_engine::AngleMode;
use std::f64::consts::{E, PI};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Every function the calculator exposes. All of them take exactly one argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum MathFunction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sqrt,
    Cbrt,
    /// base-10 logarithm
    Log,
    /// natural logarithm
    Ln,
    Exp,
    Abs,
}

impl MathFunction {
    /// `None` when `name` is not a known function
    pub fn lookup(name: &str) -> Option<MathFunction> {
        name.parse::<MathFunction>().ok()
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub fn arity(&self) -> usize {
        1
    }

    /// Apply the function to `arg` under the given angle policy.
    /// Direct trig converts its argument deg -> rad, inverse trig converts its result rad -> deg.
    pub fn apply(&self, arg: f64, mode: AngleMode) -> f64 {
        match self {
            MathFunction::Sin => mode.to_radians(arg).sin(),
            MathFunction::Cos => mode.to_radians(arg).cos(),
            MathFunction::Tan => mode.to_radians(arg).tan(),
            MathFunction::Asin => mode.from_radians(arg.asin()),
            MathFunction::Acos => mode.from_radians(arg.acos()),
            MathFunction::Atan => mode.from_radians(arg.atan()),
            MathFunction::Sqrt => arg.sqrt(),
            MathFunction::Cbrt => arg.cbrt(),
            MathFunction::Log => arg.log10(),
            MathFunction::Ln => arg.ln(),
            MathFunction::Exp => arg.exp(),
            MathFunction::Abs => arg.abs(),
        }
    }
}

/// named constants; these names are reserved and cannot be rebound by a context
pub fn lookup_constant(name: &str) -> Option<f64> {
    match name {
        "pi" => Some(PI),
        "e" => Some(E),
        _ => None,
    }
}
