//! # Symbolic Engine Module
//!
//! Immutable expression tree produced by the parser and the tree-walking
//! evaluator that turns it into an `f64`.
//!
//! ## Main Structures
//! - `Expr` - the tree: numbers, identifiers, unary minus, binary operators and calls
//! - `EvalContext` - everything an evaluation depends on: variable bindings and the angle mode
//! - `AngleMode` - degrees or radians policy for trigonometric functions
//!
//! Evaluation follows IEEE-754: `1/0` is `inf`, `0/0` is `NaN`, `sqrt(-1)` is `NaN`.
//! Those values are returned as ordinary results; only structural problems
//! (unknown identifier, wrong number of arguments) become `EvalError`.
//!
//! # Example
//! ```
//! use RustedCalc::symbolic::parse_expr::parse;
//! use RustedCalc::symbolic::symbolic_engine::{AngleMode, EvalContext};
//! let expr = parse("2x+3(x-1)").unwrap();
//! let ctx = EvalContext::new(AngleMode::Radians).with_variable("x", 2.0);
//! assert_eq!(expr.evaluate(&ctx).unwrap(), 7.0);
//! ```
use crate::calc_errors::EvalError;
use crate::symbolic::function_table::{MathFunction, lookup_constant};
use std::collections::HashMap;
use std::fmt;
use strum_macros::{Display, EnumIter, EnumString};

/// Core expression tree. Built once per request by the parser and never mutated.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Number(f64),
    /// constant (`pi`, `e`) or variable bound in the `EvalContext`
    Identifier(String),
    UnaryOp(UnaryOp, Box<Expr>),
    BinaryOp(BinaryOp, Box<Expr>, Box<Expr>),
    /// function name and its arguments
    Call(String, Vec<Expr>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    pub fn symbol(&self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
            BinaryOp::Pow => '^',
        }
    }

    pub fn apply(&self, lhs: f64, rhs: f64) -> f64 {
        match self {
            BinaryOp::Add => lhs + rhs,
            BinaryOp::Sub => lhs - rhs,
            BinaryOp::Mul => lhs * rhs,
            BinaryOp::Div => lhs / rhs,
            BinaryOp::Pow => lhs.powf(rhs),
        }
    }
}

/// Policy for trigonometric functions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum AngleMode {
    #[default]
    #[strum(to_string = "DEG", serialize = "deg", serialize = "degrees")]
    Degrees,
    #[strum(to_string = "RAD", serialize = "rad", serialize = "radians")]
    Radians,
}

impl AngleMode {
    /// argument conversion for sin/cos/tan
    pub fn to_radians(&self, angle: f64) -> f64 {
        match self {
            AngleMode::Degrees => angle.to_radians(),
            AngleMode::Radians => angle,
        }
    }

    /// result conversion for asin/acos/atan
    pub fn from_radians(&self, angle: f64) -> f64 {
        match self {
            AngleMode::Degrees => angle.to_degrees(),
            AngleMode::Radians => angle,
        }
    }

    pub fn toggled(&self) -> AngleMode {
        match self {
            AngleMode::Degrees => AngleMode::Radians,
            AngleMode::Radians => AngleMode::Degrees,
        }
    }
}

/// Explicit evaluation environment. There is no process-wide state: every
/// evaluation receives the bindings and the angle mode it should use.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EvalContext {
    pub variable_bindings: HashMap<String, f64>,
    pub angle_mode: AngleMode,
}

impl EvalContext {
    pub fn new(angle_mode: AngleMode) -> Self {
        EvalContext {
            variable_bindings: HashMap::new(),
            angle_mode,
        }
    }

    pub fn with_variable(mut self, name: &str, value: f64) -> Self {
        self.variable_bindings.insert(name.to_string(), value);
        self
    }

    pub fn bind(&mut self, name: &str, value: f64) {
        self.variable_bindings.insert(name.to_string(), value);
    }

    /// constants first (they are reserved), then bindings
    pub fn resolve(&self, name: &str) -> Option<f64> {
        lookup_constant(name).or_else(|| self.variable_bindings.get(name).copied())
    }
}

impl Expr {
    pub fn number(value: f64) -> Expr {
        Expr::Number(value)
    }

    pub fn ident(name: &str) -> Expr {
        Expr::Identifier(name.to_string())
    }

    pub fn neg(operand: Expr) -> Expr {
        Expr::UnaryOp(UnaryOp::Neg, Box::new(operand))
    }

    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
        Expr::BinaryOp(op, Box::new(lhs), Box::new(rhs))
    }

    pub fn call(name: &str, args: Vec<Expr>) -> Expr {
        Expr::Call(name.to_string(), args)
    }

    /// Walk the tree against `ctx`.
    pub fn evaluate(&self, ctx: &EvalContext) -> Result<f64, EvalError> {
        match self {
            Expr::Number(value) => Ok(*value),
            Expr::Identifier(name) => ctx
                .resolve(name)
                .ok_or_else(|| EvalError::UnknownIdentifier(name.clone())),
            Expr::UnaryOp(UnaryOp::Neg, operand) => Ok(-operand.evaluate(ctx)?),
            Expr::BinaryOp(op, lhs, rhs) => {
                let lhs = lhs.evaluate(ctx)?;
                let rhs = rhs.evaluate(ctx)?;
                Ok(op.apply(lhs, rhs))
            }
            Expr::Call(name, args) => {
                let function = MathFunction::lookup(name)
                    .ok_or_else(|| EvalError::UnknownIdentifier(name.clone()))?;
                if args.len() != function.arity() {
                    return Err(EvalError::WrongArity {
                        function: name.clone(),
                        expected: function.arity(),
                        got: args.len(),
                    });
                }
                let arg = args[0].evaluate(ctx)?;
                Ok(function.apply(arg, ctx.angle_mode))
            }
        }
    }

    /// Names of all identifiers that are neither constants nor function names, sorted.
    pub fn free_variables(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_variables(&mut names);
        names.sort();
        names.dedup();
        names
    }

    fn collect_variables(&self, names: &mut Vec<String>) {
        match self {
            Expr::Number(_) => {}
            Expr::Identifier(name) => {
                if lookup_constant(name).is_none() {
                    names.push(name.clone());
                }
            }
            Expr::UnaryOp(_, operand) => operand.collect_variables(names),
            Expr::BinaryOp(_, lhs, rhs) => {
                lhs.collect_variables(names);
                rhs.collect_variables(names);
            }
            Expr::Call(_, args) => args.iter().for_each(|a| a.collect_variables(names)),
        }
    }

    /// Build a closure `f(x)` binding `var` on top of `ctx`. Used by the integrator and the sampler.
    pub fn lambdify1D<'a>(
        &'a self,
        var: &'a str,
        ctx: &'a EvalContext,
    ) -> impl FnMut(f64) -> Result<f64, EvalError> + 'a {
        let mut local = ctx.clone();
        move |x| {
            local.bind(var, x);
            self.evaluate(&local)
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(value) => write!(f, "{}", value),
            Expr::Identifier(name) => write!(f, "{}", name),
            Expr::UnaryOp(UnaryOp::Neg, operand) => write!(f, "(-{})", operand),
            Expr::BinaryOp(op, lhs, rhs) => write!(f, "({} {} {})", lhs, op.symbol(), rhs),
            Expr::Call(name, args) => {
                let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
                write!(f, "{}({})", name, args.join(", "))
            }
        }
    }
}
