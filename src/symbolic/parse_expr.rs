use crate::calc_errors::ParseError;
use crate::symbolic::function_table::MathFunction;
use crate::symbolic::symbolic_engine::{BinaryOp, Expr};
use crate::symbolic::utils::find_unbalanced_bracket;
use log::debug;
//                       grammar (lowest to highest precedence)
//                |_________________________________________________|
//                | additive       := multiplicative (('+'|'-') multiplicative)* |
//                | multiplicative := unary (('*'|'/') unary)*      |
//                | unary          := '-' unary | power             |
//                | power          := primary ('^' unary)?          |
//                | primary        := number | ident | ident '(' args ')' | '(' additive ')' |
//                |_________________________________________________|
// `^` is right associative because its right operand re-enters `unary`,
// which also makes `2^-1` legal. `-x^2` is `-(x^2)`.

/// deepest allowed nesting of parentheses, call arguments, unary minus and exponents
pub const MAX_NESTING_DEPTH: usize = 200;

/// A character of the normalized text together with its index in the text the user typed.
type SourceChar = (char, usize);

/// Insert an explicit `*` between adjacent characters where the user
/// multiplied implicitly: `2x`, `3sin(x)`, `(x+1)(x-1)`, `x2`, `(x)y`.
pub fn normalize_implicit_multiplication(input: &str) -> Vec<SourceChar> {
    let chars: Vec<char> = input.chars().collect();
    let mut out: Vec<SourceChar> = Vec::with_capacity(chars.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if let Some(&prev) = i.checked_sub(1).and_then(|j| chars.get(j)) {
            if needs_multiplication(prev, c) {
                out.push(('*', i));
            }
        }
        out.push((c, i));
    }
    out
}

fn needs_multiplication(prev: char, next: char) -> bool {
    (prev.is_ascii_digit() && (next.is_ascii_alphabetic() || next == '('))
        || ((prev.is_ascii_alphabetic() || prev == ')') && next.is_ascii_digit())
        || (prev == ')' && (next.is_ascii_alphanumeric() || next == '('))
}

/// the normalized text as a plain string, handy for showing the user what was understood
pub fn insert_implicit_multiplication(input: &str) -> String {
    normalize_implicit_multiplication(input)
        .into_iter()
        .map(|(c, _)| c)
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
    Comma,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(v) => format!("number {}", v),
            Token::Ident(name) => format!("identifier '{}'", name),
            Token::Plus => "operator '+'".to_string(),
            Token::Minus => "operator '-'".to_string(),
            Token::Star => "operator '*'".to_string(),
            Token::Slash => "operator '/'".to_string(),
            Token::Caret => "operator '^'".to_string(),
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
            Token::Comma => "','".to_string(),
        }
    }

    fn is_operator(&self) -> bool {
        matches!(
            self,
            Token::Plus | Token::Minus | Token::Star | Token::Slash | Token::Caret
        )
    }
}

/// token and its position in the original input
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub position: usize,
}

pub fn tokenize(chars: &[SourceChar]) -> Result<Vec<Spanned>, ParseError> {
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let (c, position) = chars[i];
        if c.is_whitespace() {
            i += 1;
            continue;
        }
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].0.is_ascii_digit() || chars[i].0 == '.') {
                i += 1;
            }
            let text: String = chars[start..i].iter().map(|(c, _)| *c).collect();
            let value = text
                .parse::<f64>()
                .map_err(|_| ParseError::new(format!("malformed number '{}'", text), Some(position)))?;
            tokens.push(Spanned {
                token: Token::Number(value),
                position,
            });
            continue;
        }
        if c.is_ascii_alphabetic() {
            let start = i;
            while i < chars.len() && chars[i].0.is_ascii_alphabetic() {
                i += 1;
            }
            let name: String = chars[start..i].iter().map(|(c, _)| *c).collect();
            tokens.push(Spanned {
                token: Token::Ident(name),
                position,
            });
            continue;
        }
        let token = match c {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '^' => Token::Caret,
            '(' => Token::LParen,
            ')' => Token::RParen,
            ',' => Token::Comma,
            other => {
                return Err(ParseError::new(
                    format!("unknown character '{}'", other),
                    Some(position),
                ));
            }
        };
        tokens.push(Spanned { token, position });
        i += 1;
    }
    Ok(tokens)
}

/// Recursive-descent parser over the token stream.
struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    depth: usize,
}

impl Parser {
    /// runs `f` one nesting level deeper, refusing past `MAX_NESTING_DEPTH`
    fn nested<T>(
        &mut self,
        position: usize,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::new("expression is nested too deeply", Some(position)));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn position(&self) -> Option<usize> {
        self.peek().or(self.tokens.last()).map(|s| s.position)
    }

    fn peek(&self) -> Option<&Spanned> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Spanned> {
        let t = self.tokens.get(self.pos).cloned();
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek().map(|s| &s.token) == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// error for a missing operand: either the input ended after an operator or something odd sits here
    fn missing_operand(&self) -> ParseError {
        match self.peek() {
            None => {
                let last = self.tokens.last();
                match last {
                    Some(s) if s.token.is_operator() => ParseError::new(
                        format!("expression ends with {}", s.token.describe()),
                        Some(s.position),
                    ),
                    Some(s) => ParseError::new("unexpected end of expression", Some(s.position)),
                    None => ParseError::new("empty expression", None),
                }
            }
            Some(s) => ParseError::new(format!("unexpected {}", s.token.describe()), Some(s.position)),
        }
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_multiplicative()?;
        loop {
            let op = match self.peek().map(|s| &s.token) {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => break,
            };
            self.pos += 1;
            let rhs = self.parse_multiplicative()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.peek().map(|s| &s.token) {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                _ => break,
            };
            self.pos += 1;
            let rhs = self.parse_unary()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if let Some(minus) = self.peek().filter(|s| s.token == Token::Minus) {
            let position = minus.position;
            self.pos += 1;
            let operand = self.nested(position, Self::parse_unary)?;
            return Ok(Expr::neg(operand));
        }
        self.parse_power()
    }

    fn parse_power(&mut self) -> Result<Expr, ParseError> {
        let base = self.parse_primary()?;
        if self.eat(&Token::Caret) {
            let position = self.position().unwrap_or(0);
            let exponent = self.nested(position, Self::parse_unary)?;
            return Ok(Expr::binary(BinaryOp::Pow, base, exponent));
        }
        Ok(base)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let Some(spanned) = self.peek().cloned() else {
            return Err(self.missing_operand());
        };
        match spanned.token {
            Token::Number(value) => {
                self.pos += 1;
                Ok(Expr::Number(value))
            }
            Token::Ident(name) => {
                self.pos += 1;
                if self.peek().map(|s| &s.token) == Some(&Token::LParen) {
                    self.parse_call(name, spanned.position)
                } else if MathFunction::lookup(&name).is_some() {
                    Err(ParseError::new(
                        format!("function '{}' must be followed by '('", name),
                        Some(spanned.position),
                    ))
                } else {
                    Ok(Expr::Identifier(name))
                }
            }
            Token::LParen => {
                self.pos += 1;
                if let Some(close) = self.peek().filter(|s| s.token == Token::RParen) {
                    return Err(ParseError::new("empty parentheses", Some(close.position)));
                }
                let inner = self.nested(spanned.position, Self::parse_additive)?;
                self.expect_closing(spanned.position)?;
                Ok(inner)
            }
            _ => Err(self.missing_operand()),
        }
    }

    fn parse_call(&mut self, name: String, position: usize) -> Result<Expr, ParseError> {
        let function = MathFunction::lookup(&name).ok_or_else(|| {
            ParseError::new(format!("unknown function '{}'", name), Some(position))
        })?;
        let open = self.advance().map(|s| s.position).unwrap_or(position);
        let mut args = Vec::new();
        if !self.eat(&Token::RParen) {
            loop {
                args.push(self.nested(open, Self::parse_additive)?);
                if !self.eat(&Token::Comma) {
                    break;
                }
            }
            self.expect_closing(open)?;
        }
        if args.len() != function.arity() {
            return Err(ParseError::new(
                format!(
                    "function '{}' expects {} argument(s), got {}",
                    name,
                    function.arity(),
                    args.len()
                ),
                Some(position),
            ));
        }
        Ok(Expr::Call(name, args))
    }

    fn expect_closing(&mut self, open_position: usize) -> Result<(), ParseError> {
        match self.advance() {
            Some(Spanned {
                token: Token::RParen,
                ..
            }) => Ok(()),
            Some(other) => Err(ParseError::new(
                format!("expected ')' but found {}", other.token.describe()),
                Some(other.position),
            )),
            None => Err(ParseError::new("unbalanced parentheses", Some(open_position))),
        }
    }
}

/// turns a String expression into an expression tree
///# Example
/// ```
/// use RustedCalc::symbolic::symbolic_engine::{Expr, EvalContext, AngleMode};
/// let parsed_expression = Expr::parse_expression("3sin(x)^2").unwrap();
/// println!(" parsed_expression {}", parsed_expression);
/// let ctx = EvalContext::new(AngleMode::Degrees).with_variable("x", 90.0);
/// let value = parsed_expression.evaluate(&ctx).unwrap();
/// assert!((value - 3.0).abs() < 1e-12);
/// ```
pub fn parse(input: &str) -> Result<Expr, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::new("empty expression", None));
    }
    if let Some(position) = find_unbalanced_bracket(input) {
        return Err(ParseError::new("unbalanced parentheses", Some(position)));
    }
    let normalized = normalize_implicit_multiplication(input);
    let tokens = tokenize(&normalized)?;
    debug!("tokens of '{}': {:?}", input, tokens);
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let expr = parser.parse_additive()?;
    if let Some(rest) = parser.peek() {
        return Err(ParseError::new(
            format!("unexpected {}", rest.token.describe()),
            Some(rest.position),
        ));
    }
    Ok(expr)
}

impl Expr {
    pub fn parse_expression(input: &str) -> Result<Expr, ParseError> {
        parse(input)
    }
}
