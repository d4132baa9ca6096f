//! Parsing of rational expressions in a single variable.
//!
//! The grammar supports integers, identifiers, the binary operators `+ - * / ^`
//! (with `**` as a synonym for `^`), parentheses and unary signs. A
//! multiplication is inserted between adjacent operands, so that `2t` reads as `2*t`.
use std::str::FromStr;

use smallvec::SmallVec;
use smartstring::{LazyCompact, SmartString};

use crate::{
    atom::Atom,
    domains::{integer::Integer, rational::Rational},
    error::{Error, Result},
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Neg,
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operator::Add => f.write_str("+"),
            Operator::Sub | Operator::Neg => f.write_str("-"),
            Operator::Mul => f.write_str("*"),
            Operator::Div => f.write_str("/"),
            Operator::Pow => f.write_str("^"),
        }
    }
}

impl Operator {
    #[inline]
    pub fn get_arity(&self) -> usize {
        match self {
            Operator::Neg => 1,
            _ => 2,
        }
    }

    #[inline]
    pub fn get_precedence(&self) -> u8 {
        match self {
            Operator::Add | Operator::Sub => 7,
            Operator::Mul | Operator::Div => 8,
            Operator::Neg => 10,
            Operator::Pow => 11,
        }
    }

    #[inline]
    pub fn right_associative(&self) -> bool {
        matches!(self, Operator::Pow | Operator::Neg)
    }

    /// Apply the operator to its operands, the last operand on top.
    fn apply(&self, output: &mut Vec<Atom>) -> Option<Atom> {
        let rhs = output.pop()?;
        if self.get_arity() == 1 {
            return Some(-rhs);
        }

        let lhs = output.pop()?;
        Some(match self {
            Operator::Add => lhs + rhs,
            Operator::Sub => lhs - rhs,
            Operator::Mul => lhs * rhs,
            Operator::Div => lhs / rhs,
            Operator::Pow => lhs.pow(&rhs),
            Operator::Neg => unreachable!(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    Number(SmartString<LazyCompact>),
    ID(SmartString<LazyCompact>),
    Op(Operator),
    OpenParenthesis,
    CloseParenthesis,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Number(n) => f.write_str(n),
            Token::ID(v) => f.write_str(v),
            Token::Op(o) => o.fmt(f),
            Token::OpenParenthesis => f.write_str("("),
            Token::CloseParenthesis => f.write_str(")"),
        }
    }
}

/// Split the input into tokens, each paired with the character position at which it starts.
pub fn tokenize(input: &str) -> Result<Vec<(Token, usize)>> {
    let mut tokens = Vec::with_capacity(input.len() / 2);
    let mut chars = input.chars().enumerate().peekable();

    while let Some((pos, c)) = chars.next() {
        let token = match c {
            ' ' | '\t' | '\n' | '\r' => continue,
            '+' => Token::Op(Operator::Add),
            '-' => Token::Op(Operator::Sub),
            '*' => {
                if let Some((_, '*')) = chars.peek() {
                    chars.next();
                    Token::Op(Operator::Pow)
                } else {
                    Token::Op(Operator::Mul)
                }
            }
            '/' => Token::Op(Operator::Div),
            '^' => Token::Op(Operator::Pow),
            '(' => Token::OpenParenthesis,
            ')' => Token::CloseParenthesis,
            c if c.is_ascii_digit() => {
                let mut n = SmartString::new();
                n.push(c);
                while let Some((_, d)) = chars.peek() {
                    if d.is_ascii_digit() {
                        n.push(*d);
                        chars.next();
                    } else {
                        break;
                    }
                }

                if let Some((p, '.')) = chars.peek() {
                    return Err(Error::Parse {
                        pos: *p,
                        msg: "decimal numbers are not supported, write a fraction instead"
                            .to_string(),
                    });
                }

                Token::Number(n)
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut id = SmartString::new();
                id.push(c);
                while let Some((_, d)) = chars.peek() {
                    if d.is_alphanumeric() || *d == '_' {
                        id.push(*d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                Token::ID(id)
            }
            _ => {
                return Err(Error::Parse {
                    pos,
                    msg: format!("unexpected '{}'", c),
                })
            }
        };

        tokens.push((token, pos));
    }

    Ok(tokens)
}

type OperatorStack = SmallVec<[(Token, usize); 16]>;

/// Apply operators on top of the stack that bind at least as strongly as an incoming
/// operator with the given precedence.
fn reduce(
    stack: &mut OperatorStack,
    output: &mut Vec<Atom>,
    min_precedence: u8,
    right_associative: bool,
) -> Result<()> {
    while let Some((Token::Op(op), pos)) = stack.last() {
        let p = op.get_precedence();
        if p < min_precedence || (p == min_precedence && right_associative) {
            break;
        }

        let (op, pos) = (*op, *pos);
        stack.pop();
        let res = op.apply(output).ok_or_else(|| Error::Parse {
            pos,
            msg: format!("operator '{}' is missing an argument", op),
        })?;
        output.push(res);
    }

    Ok(())
}

/// Parse an expression into an [Atom].
///
/// # Examples
/// ```
/// use genfunc::parser::parse;
///
/// let a = parse("3*t^3/(1-t)").unwrap();
/// assert_eq!(a.to_string(), "3*t^3/(1-t)");
/// assert!(parse("2*(t+1").is_err());
/// ```
pub fn parse(input: &str) -> Result<Atom> {
    let tokens = tokenize(input)?;

    let mut output: Vec<Atom> = Vec::with_capacity(tokens.len());
    let mut stack = OperatorStack::new();
    let mut expect_operand = true;

    let mut iter = tokens.into_iter();
    let mut pending = None;
    while let Some((token, pos)) = pending.take().or_else(|| iter.next()) {
        if expect_operand {
            match token {
                Token::Number(n) => {
                    let n = Integer::from_str(&n).map_err(|_| Error::Parse {
                        pos,
                        msg: format!("invalid number '{}'", n),
                    })?;
                    output.push(Atom::new_num(Rational::from(n)));
                    expect_operand = false;
                }
                Token::ID(v) => {
                    output.push(Atom::new_var(&v));
                    expect_operand = false;
                }
                Token::OpenParenthesis => stack.push((token, pos)),
                // unary plus can be ignored
                Token::Op(Operator::Add) => {}
                // a prefix operator has no left operand to reduce
                Token::Op(Operator::Sub) => stack.push((Token::Op(Operator::Neg), pos)),
                Token::Op(op) => {
                    return Err(Error::Parse {
                        pos,
                        msg: format!("operator '{}' is missing its left-hand side", op),
                    })
                }
                Token::CloseParenthesis => {
                    return Err(Error::Parse {
                        pos,
                        msg: "unexpected ')'".to_string(),
                    })
                }
            }

            continue;
        }

        match token {
            Token::Op(op) => {
                reduce(
                    &mut stack,
                    &mut output,
                    op.get_precedence(),
                    op.right_associative(),
                )?;
                stack.push((token, pos));
                expect_operand = true;
            }
            Token::CloseParenthesis => {
                reduce(&mut stack, &mut output, 0, false)?;
                match stack.pop() {
                    Some((Token::OpenParenthesis, _)) => {}
                    _ => {
                        return Err(Error::Parse {
                            pos,
                            msg: "unbalanced ')'".to_string(),
                        })
                    }
                }
            }
            Token::Number(_) | Token::ID(_) | Token::OpenParenthesis => {
                // insert multiplication: 2t -> 2*t, t(1-t) -> t*(1-t)
                let op = Operator::Mul;
                reduce(&mut stack, &mut output, op.get_precedence(), false)?;
                stack.push((Token::Op(op), pos));
                expect_operand = true;
                pending = Some((token, pos));
            }
        }
    }

    if expect_operand {
        return Err(Error::Parse {
            pos: input.chars().count(),
            msg: if output.is_empty() && stack.is_empty() {
                "expression is empty".to_string()
            } else {
                "unexpected end of input".to_string()
            },
        });
    }

    reduce(&mut stack, &mut output, 0, false)?;

    if let Some((t, pos)) = stack.pop() {
        debug_assert_eq!(t, Token::OpenParenthesis);
        return Err(Error::Parse {
            pos,
            msg: "open parenthesis is not closed".to_string(),
        });
    }

    match (output.pop(), output.is_empty()) {
        (Some(a), true) => Ok(a),
        _ => Err(Error::Parse {
            pos: 0,
            msg: "malformed expression".to_string(),
        }),
    }
}

#[cfg(test)]
mod test {
    use crate::{atom::Atom, error::Error};

    use super::{parse, tokenize, Operator, Token};

    #[test]
    fn precedence() {
        assert_eq!(parse("1+2*3^2").unwrap(), Atom::new_num(19));
        assert_eq!(parse("2^3^2").unwrap(), Atom::new_num(512));
        assert_eq!(parse("-2^2").unwrap(), Atom::new_num(-4));
        assert_eq!(parse("(-2)^2").unwrap(), Atom::new_num(4));
        assert_eq!(parse("2^-1").unwrap(), Atom::new_num((1, 2)));
        assert_eq!(parse("12/4/3").unwrap(), Atom::new_num(1));
        assert_eq!(parse("8-3-2").unwrap(), Atom::new_num(3));
    }

    #[test]
    fn double_star() {
        assert_eq!(parse("t**2").unwrap(), parse("t^2").unwrap());
        assert_eq!(
            tokenize("t**2").unwrap()[1],
            (Token::Op(Operator::Pow), 1)
        );
    }

    #[test]
    fn implicit_multiplication() {
        assert_eq!(parse("2t").unwrap(), parse("2*t").unwrap());
        assert_eq!(parse("t(1-t)").unwrap(), parse("t*(1-t)").unwrap());
    }

    #[test]
    fn unary_signs() {
        assert_eq!(parse("+t").unwrap(), Atom::new_var("t"));
        assert_eq!(parse("--t").unwrap(), Atom::new_var("t"));
        assert_eq!(parse("2*-t").unwrap(), parse("-2*t").unwrap());
    }

    #[test]
    fn errors() {
        assert_eq!(
            parse("1.5*t"),
            Err(Error::Parse {
                pos: 1,
                msg: "decimal numbers are not supported, write a fraction instead".into()
            })
        );
        assert!(matches!(parse("2*(t+1"), Err(Error::Parse { pos: 2, .. })));
        assert!(matches!(parse("t+1)"), Err(Error::Parse { pos: 3, .. })));
        assert!(matches!(parse("t+"), Err(Error::Parse { pos: 2, .. })));
        assert!(matches!(parse("*t"), Err(Error::Parse { pos: 0, .. })));
        assert!(matches!(parse("t $ 2"), Err(Error::Parse { pos: 2, .. })));
        assert!(matches!(parse(""), Err(Error::Parse { pos: 0, .. })));
    }
}
