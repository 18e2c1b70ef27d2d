use std::fmt::{self, Display};

use crate::{
    core::parsing::{compile_expression, Expression},
    errors::ParseError,
};

/// A named real function that can be integrated against `e^(-x)`.
pub trait Evaluable {
    fn evaluate(&self, x: f64) -> f64;

    fn name(&self) -> &str;

    /// LaTeX rendering of the function, used for plot titles.
    fn latex(&self) -> &str {
        self.name()
    }
}

/// The fixed set of functions the comparison tool offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestFunction {
    Exponential,
    Polynomial,
    Trigonometric,
    Rational,
    MultiPeak,
    Growing,
    ComplexOscillation,
}

impl TestFunction {
    pub const ALL: [TestFunction; 7] = [
        TestFunction::Exponential,
        TestFunction::Polynomial,
        TestFunction::Trigonometric,
        TestFunction::Rational,
        TestFunction::MultiPeak,
        TestFunction::Growing,
        TestFunction::ComplexOscillation,
    ];

    /// Short lowercase identifier, e.g. `"multipeak"`.
    pub fn key(self) -> &'static str {
        match self {
            TestFunction::Exponential => "exponential",
            TestFunction::Polynomial => "polynomial",
            TestFunction::Trigonometric => "trigonometric",
            TestFunction::Rational => "rational",
            TestFunction::MultiPeak => "multipeak",
            TestFunction::Growing => "growing",
            TestFunction::ComplexOscillation => "complexoscillation",
        }
    }

    /// Looks a function up by its key or its display name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|func| {
            func.key().eq_ignore_ascii_case(name) || func.name().eq_ignore_ascii_case(name)
        })
    }
}

impl Evaluable for TestFunction {
    fn evaluate(&self, x: f64) -> f64 {
        match self {
            TestFunction::Exponential => (-x / 2f64).exp(),
            TestFunction::Polynomial => x.powi(2),
            TestFunction::Trigonometric => x.sin(),
            TestFunction::Rational => 1f64 / (1f64 + x.powi(2)),
            TestFunction::MultiPeak => (3f64 * x).sin() * (x / 2f64).cos(),
            TestFunction::Growing => x.powi(3) * x.sin(),
            TestFunction::ComplexOscillation => (5f64 * x).sin() / (1f64 + x),
        }
    }

    fn name(&self) -> &str {
        match self {
            TestFunction::Exponential => "e^(-x/2)",
            TestFunction::Polynomial => "x^2",
            TestFunction::Trigonometric => "sin(x)",
            TestFunction::Rational => "1/(1+x^2)",
            TestFunction::MultiPeak => "sin(3x)*cos(x/2)",
            TestFunction::Growing => "x^3*sin(x)",
            TestFunction::ComplexOscillation => "sin(5x)/(1+x)",
        }
    }

    fn latex(&self) -> &str {
        match self {
            TestFunction::Exponential => r"e^{-x/2}",
            TestFunction::Polynomial => r"x^2",
            TestFunction::Trigonometric => r"\sin(x)",
            TestFunction::Rational => r"\frac{1}{1+x^2}",
            TestFunction::MultiPeak => r"\sin(3x) \cdot \cos\left(\frac{x}{2}\right)",
            TestFunction::Growing => r"x^3 \cdot \sin(x)",
            TestFunction::ComplexOscillation => r"\frac{\sin(5x)}{1+x}",
        }
    }
}

impl Display for TestFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A function compiled from a user supplied expression in `x`.
#[derive(Debug, Clone)]
pub struct ParsedFunction {
    source: String,
    expr: Expression,
}

impl ParsedFunction {
    pub fn new(src: &str) -> Result<Self, ParseError> {
        Ok(Self {
            source: src.trim().to_string(),
            expr: compile_expression(src)?,
        })
    }
}

impl Evaluable for ParsedFunction {
    fn evaluate(&self, x: f64) -> f64 {
        self.expr.eval(x)
    }

    fn name(&self) -> &str {
        &self.source
    }
}

/// Resolves `src` against the catalogue first and compiles it as an
/// expression otherwise.
pub fn resolve_function(src: &str) -> Result<Box<dyn Evaluable + Send + Sync>, ParseError> {
    match TestFunction::from_name(src) {
        Some(func) => Ok(Box::new(func)),
        None => Ok(Box::new(ParsedFunction::new(src)?)),
    }
}
