use std::f64::consts::{E, PI};

use nom::{
    branch::alt,
    character::complete::{alpha1, alphanumeric0, char, digit0, digit1, multispace0, one_of},
    combinator::{map, map_res, opt, recognize},
    error::{Error, ErrorKind},
    multi::many0,
    sequence::{delimited, pair, preceded, tuple},
    IResult,
};

use crate::errors::ParseError;

pub const VARIABLE: &str = "x";

/// Deepest accepted nesting of parentheses, calls, signs and exponents.
pub const MAX_NESTING: usize = 64;

/// Longest accepted source in bytes. Bounds the depth of operator chains,
/// which fold into left leaning trees.
pub const MAX_EXPRESSION_LEN: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinOp {
    fn apply(self, l: f64, r: f64) -> f64 {
        match self {
            BinOp::Add => l + r,
            BinOp::Sub => l - r,
            BinOp::Mul => l * r,
            BinOp::Div => l / r,
            BinOp::Pow => l.powf(r),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryFn {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    Ln,
    Sqrt,
    Abs,
}

impl UnaryFn {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "sin" => UnaryFn::Sin,
            "cos" => UnaryFn::Cos,
            "tan" => UnaryFn::Tan,
            "asin" => UnaryFn::Asin,
            "acos" => UnaryFn::Acos,
            "atan" => UnaryFn::Atan,
            "sinh" => UnaryFn::Sinh,
            "cosh" => UnaryFn::Cosh,
            "tanh" => UnaryFn::Tanh,
            "exp" => UnaryFn::Exp,
            "ln" | "log" => UnaryFn::Ln,
            "sqrt" => UnaryFn::Sqrt,
            "abs" => UnaryFn::Abs,
            _ => return None,
        })
    }

    fn apply(self, x: f64) -> f64 {
        match self {
            UnaryFn::Sin => x.sin(),
            UnaryFn::Cos => x.cos(),
            UnaryFn::Tan => x.tan(),
            UnaryFn::Asin => x.asin(),
            UnaryFn::Acos => x.acos(),
            UnaryFn::Atan => x.atan(),
            UnaryFn::Sinh => x.sinh(),
            UnaryFn::Cosh => x.cosh(),
            UnaryFn::Tanh => x.tanh(),
            UnaryFn::Exp => x.exp(),
            UnaryFn::Ln => x.ln(),
            UnaryFn::Sqrt => x.sqrt(),
            UnaryFn::Abs => x.abs(),
        }
    }
}

/// A compiled single variable expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Const(f64),
    Var,
    Neg(Box<Expression>),
    Bin(BinOp, Box<Expression>, Box<Expression>),
    Call(UnaryFn, Box<Expression>),
}

impl Expression {
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Expression::Const(c) => *c,
            Expression::Var => x,
            Expression::Neg(e) => -e.eval(x),
            Expression::Bin(op, l, r) => op.apply(l.eval(x), r.eval(x)),
            Expression::Call(func, e) => func.apply(e.eval(x)),
        }
    }
}

/// Parse tree with identifiers still unresolved.
#[derive(Debug)]
enum Ast {
    Num(f64),
    /// Identifier and the length of the input remaining at its start.
    Ident(String, usize),
    Call(String, Box<Ast>),
    Neg(Box<Ast>),
    Bin(BinOp, Box<Ast>, Box<Ast>),
}

fn ws<'a, O>(
    inner: impl FnMut(&'a str) -> IResult<&'a str, O>,
) -> impl FnMut(&'a str) -> IResult<&'a str, O> {
    delimited(multispace0, inner, multispace0)
}

fn number(i: &str) -> IResult<&str, Ast> {
    map_res(
        recognize(tuple((
            alt((
                recognize(pair(digit1, opt(pair(char('.'), digit0)))),
                recognize(pair(char('.'), digit1)),
            )),
            opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
        ))),
        |s: &str| s.parse::<f64>().map(Ast::Num),
    )(i)
}

fn identifier(i: &str) -> IResult<&str, &str> {
    recognize(pair(alpha1, alphanumeric0))(i)
}

fn ident_or_call(i: &str, depth: usize) -> IResult<&str, Ast> {
    let at = i.len();
    map(
        pair(
            identifier,
            opt(delimited(
                ws(char('(')),
                |i| expr(i, depth + 1),
                ws(char(')')),
            )),
        ),
        move |(name, arg)| match arg {
            Some(arg) => Ast::Call(name.to_string(), Box::new(arg)),
            None => Ast::Ident(name.to_string(), at),
        },
    )(i)
}

fn atom(i: &str, depth: usize) -> IResult<&str, Ast> {
    ws(alt((
        number,
        |i| ident_or_call(i, depth),
        delimited(char('('), |i| expr(i, depth + 1), char(')')),
    )))(i)
}

fn power(i: &str, depth: usize) -> IResult<&str, Ast> {
    map(
        pair(
            |i| atom(i, depth),
            opt(preceded(char('^'), |i| unary(i, depth + 1))),
        ),
        |(base, exp)| match exp {
            Some(exp) => Ast::Bin(BinOp::Pow, Box::new(base), Box::new(exp)),
            None => base,
        },
    )(i)
}

/// Every level of recursion passes through here, so this is where the
/// nesting limit is enforced.
fn unary(i: &str, depth: usize) -> IResult<&str, Ast> {
    if depth > MAX_NESTING {
        return Err(nom::Err::Failure(Error::new(i, ErrorKind::TooLarge)));
    }
    alt((
        map(preceded(ws(char('-')), |i| unary(i, depth + 1)), |e| {
            Ast::Neg(Box::new(e))
        }),
        preceded(ws(char('+')), |i| unary(i, depth + 1)),
        |i| power(i, depth),
    ))(i)
}

fn fold_bin(first: Ast, rest: Vec<(char, Ast)>) -> Ast {
    rest.into_iter().fold(first, |acc, (op, rhs)| {
        let op = match op {
            '+' => BinOp::Add,
            '-' => BinOp::Sub,
            '*' => BinOp::Mul,
            _ => BinOp::Div,
        };
        Ast::Bin(op, Box::new(acc), Box::new(rhs))
    })
}

/// Products and quotients. A factor without an operator, as in `3x` or
/// `2(x + 1)`, is an implicit product and may not carry a leading sign.
fn term(i: &str, depth: usize) -> IResult<&str, Ast> {
    let (i, first) = unary(i, depth)?;
    let (i, rest) = many0(alt((
        pair(ws(one_of("*/")), |i| unary(i, depth)),
        map(|i| power(i, depth), |p| ('*', p)),
    )))(i)?;
    Ok((i, fold_bin(first, rest)))
}

fn expr(i: &str, depth: usize) -> IResult<&str, Ast> {
    let (i, first) = term(i, depth)?;
    let (i, rest) = many0(pair(ws(one_of("+-")), |i| term(i, depth)))(i)?;
    Ok((i, fold_bin(first, rest)))
}

fn resolve_ident(name: String) -> Result<Expression, ParseError> {
    match name.as_str() {
        VARIABLE => Ok(Expression::Var),
        "pi" => Ok(Expression::Const(PI)),
        "e" => Ok(Expression::Const(E)),
        _ => Err(ParseError::InvalidVariable { var: name }),
    }
}

fn resolve(ast: Ast, src_len: usize) -> Result<Expression, ParseError> {
    Ok(match ast {
        Ast::Num(c) => Expression::Const(c),
        Ast::Ident(name, at) => {
            if UnaryFn::from_name(&name).is_some() {
                return Err(ParseError::Syntax {
                    pos: src_len - at,
                    msg: format!("expected '(' after {}", name),
                });
            }
            resolve_ident(name)?
        }
        Ast::Neg(e) => Expression::Neg(Box::new(resolve(*e, src_len)?)),
        Ast::Bin(op, l, r) => Expression::Bin(
            op,
            Box::new(resolve(*l, src_len)?),
            Box::new(resolve(*r, src_len)?),
        ),
        Ast::Call(name, arg) => match UnaryFn::from_name(&name) {
            Some(func) => Expression::Call(func, Box::new(resolve(*arg, src_len)?)),
            // `x(x + 1)` and `pi(x)` are products
            None => match resolve_ident(name.clone()) {
                Ok(lhs) => Expression::Bin(
                    BinOp::Mul,
                    Box::new(lhs),
                    Box::new(resolve(*arg, src_len)?),
                ),
                Err(_) => return Err(ParseError::UnknownFunction { name }),
            },
        },
    })
}

/// Compiles an expression in the single variable `x`.
pub fn compile_expression(src: &str) -> Result<Expression, ParseError> {
    if src.len() > MAX_EXPRESSION_LEN {
        return Err(ParseError::Syntax {
            pos: MAX_EXPRESSION_LEN,
            msg: format!("expression longer than {} bytes", MAX_EXPRESSION_LEN),
        });
    }
    let (rest, ast) = expr(src, 0).map_err(|err| match err {
        nom::Err::Failure(e) if e.code == ErrorKind::TooLarge => ParseError::Syntax {
            pos: src.len() - e.input.len(),
            msg: format!("expression nested deeper than {} levels", MAX_NESTING),
        },
        nom::Err::Error(e) | nom::Err::Failure(e) => ParseError::Syntax {
            pos: src.len() - e.input.len(),
            msg: format!("expected an operand ({:?})", e.code),
        },
        nom::Err::Incomplete(_) => ParseError::Syntax {
            pos: src.len(),
            msg: "incomplete input".to_string(),
        },
    })?;
    if !rest.is_empty() {
        return Err(ParseError::Syntax {
            pos: src.len() - rest.len(),
            msg: format!("unexpected trailing input '{}'", rest),
        });
    }
    resolve(ast, src.len())
}
