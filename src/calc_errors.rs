//! Error taxonomy shared by the parser, the evaluator, the matrix module, the
//! linear solver and the numerical routines.
//!
//! Every public operation of the engine returns one of these values instead of
//! panicking, so the calling layer can decide how to present a failure.
use std::fmt;

/// Malformed input text: unbalanced brackets, dangling operators, unknown
/// characters or function names, empty input.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub reason: String,
    /// character index into the text exactly as the user typed it
    pub position: Option<usize>,
}

impl ParseError {
    pub fn new(reason: impl Into<String>, position: Option<usize>) -> Self {
        ParseError {
            reason: reason.into(),
            position,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(pos) => write!(f, "parse error at position {}: {}", pos, self.reason),
            None => write!(f, "parse error: {}", self.reason),
        }
    }
}

impl std::error::Error for ParseError {}

/// Structural problems found while walking an expression tree.
/// Non-finite numeric results are NOT errors.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    UnknownIdentifier(String),
    WrongArity {
        function: String,
        expected: usize,
        got: usize,
    },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::UnknownIdentifier(name) => write!(f, "unknown identifier '{}'", name),
            EvalError::WrongArity {
                function,
                expected,
                got,
            } => write!(
                f,
                "function '{}' expects {} argument(s), got {}",
                function, expected, got
            ),
        }
    }
}

impl std::error::Error for EvalError {}

/// Operand shapes do not fit the requested operation.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionMismatch {
    pub operation: &'static str,
    pub expected: String,
    pub got: String,
}

impl fmt::Display for DimensionMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "dimension mismatch in {}: expected {}, got {}",
            self.operation, self.expected, self.got
        )
    }
}

impl std::error::Error for DimensionMismatch {}

/// The system has no unique solution / the matrix has no inverse.
/// Carries the offending pivot (elimination) or determinant (inverse).
#[derive(Debug, Clone, PartialEq)]
pub struct SingularMatrixError {
    pub pivot_or_determinant: f64,
}

impl fmt::Display for SingularMatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "matrix is singular (|pivot or determinant| = {:e} is below tolerance)",
            self.pivot_or_determinant.abs()
        )
    }
}

impl std::error::Error for SingularMatrixError {}

#[derive(Debug, Clone, PartialEq)]
pub struct InvalidRangeError {
    pub reason: String,
}

impl InvalidRangeError {
    pub fn new(reason: impl Into<String>) -> Self {
        InvalidRangeError {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for InvalidRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid range: {}", self.reason)
    }
}

impl std::error::Error for InvalidRangeError {}

/// Failures of the matrix algebra and the linear solver.
#[derive(Debug, Clone, PartialEq)]
pub enum MatrixError {
    DimensionMismatch(DimensionMismatch),
    Singular(SingularMatrixError),
}

impl MatrixError {
    pub fn dimension(operation: &'static str, expected: impl Into<String>, got: impl Into<String>) -> Self {
        MatrixError::DimensionMismatch(DimensionMismatch {
            operation,
            expected: expected.into(),
            got: got.into(),
        })
    }

    pub fn singular(pivot_or_determinant: f64) -> Self {
        MatrixError::Singular(SingularMatrixError {
            pivot_or_determinant,
        })
    }
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixError::DimensionMismatch(e) => e.fmt(f),
            MatrixError::Singular(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for MatrixError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MatrixError::DimensionMismatch(e) => Some(e),
            MatrixError::Singular(e) => Some(e),
        }
    }
}

impl From<DimensionMismatch> for MatrixError {
    fn from(e: DimensionMismatch) -> Self {
        MatrixError::DimensionMismatch(e)
    }
}

impl From<SingularMatrixError> for MatrixError {
    fn from(e: SingularMatrixError) -> Self {
        MatrixError::Singular(e)
    }
}

/// Umbrella error returned by the facade in `calc_api`.
#[derive(Debug, Clone, PartialEq)]
pub enum CalcError {
    Parse(ParseError),
    Eval(EvalError),
    Matrix(MatrixError),
    InvalidRange(InvalidRangeError),
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcError::Parse(e) => e.fmt(f),
            CalcError::Eval(e) => e.fmt(f),
            CalcError::Matrix(e) => e.fmt(f),
            CalcError::InvalidRange(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for CalcError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CalcError::Parse(e) => Some(e),
            CalcError::Eval(e) => Some(e),
            CalcError::Matrix(e) => Some(e),
            CalcError::InvalidRange(e) => Some(e),
        }
    }
}

impl From<ParseError> for CalcError {
    fn from(e: ParseError) -> Self {
        CalcError::Parse(e)
    }
}

impl From<EvalError> for CalcError {
    fn from(e: EvalError) -> Self {
        CalcError::Eval(e)
    }
}

impl From<MatrixError> for CalcError {
    fn from(e: MatrixError) -> Self {
        CalcError::Matrix(e)
    }
}

impl From<DimensionMismatch> for CalcError {
    fn from(e: DimensionMismatch) -> Self {
        CalcError::Matrix(MatrixError::DimensionMismatch(e))
    }
}

impl From<SingularMatrixError> for CalcError {
    fn from(e: SingularMatrixError) -> Self {
        CalcError::Matrix(MatrixError::Singular(e))
    }
}

impl From<InvalidRangeError> for CalcError {
    fn from(e: InvalidRangeError) -> Self {
        CalcError::InvalidRange(e)
    }
}
