//! Defines the expression tree for rational expressions in a single variable.
//!
//! Expressions are built by parsing or with the arithmetic operators, which flatten
//! nested sums and products and fold numeric subexpressions. Beyond that, no
//! simplification happens, so that an expression prints close to how it was written.
//!
//! # Examples
//!
//! ```
//! use genfunc::atom::Atom;
//!
//! let t = Atom::new_var("t");
//! let expr = Atom::new_num(1) - t.npow(2);
//! assert_eq!(expr, Atom::parse("1 - t^2").unwrap());
//! ```
use std::{
    fmt,
    ops::{Add, Div, Mul, Neg, Sub},
    sync::Arc,
};

use crate::{
    domains::{
        rational::{Rational, Q},
        rational_polynomial::RationalPolynomial,
    },
    error::{Error, Result},
    parser,
    poly::{series::Series, univariate::UnivariatePolynomial, Variable},
    printer::AtomPrinter,
};

/// The largest exponent magnitude that is expanded, numerically or as a polynomial.
pub const MAX_EXPONENT: i64 = u16::MAX as i64;

/// A rational expression.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Atom {
    Num(Rational),
    Var(Variable),
    Add(Vec<Atom>),
    Mul(Vec<Atom>),
    Pow(Box<(Atom, Atom)>),
}

impl Default for Atom {
    fn default() -> Self {
        Atom::Num(Rational::zero())
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&AtomPrinter::new(self), f)
    }
}

impl From<Rational> for Atom {
    fn from(n: Rational) -> Self {
        Atom::Num(n)
    }
}

impl From<i64> for Atom {
    fn from(n: i64) -> Self {
        Atom::Num(n.into())
    }
}

impl From<Variable> for Atom {
    fn from(v: Variable) -> Self {
        Atom::Var(v)
    }
}

impl Atom {
    /// Create a new atom that represents a number.
    #[inline]
    pub fn new_num<T: Into<Rational>>(num: T) -> Atom {
        Atom::Num(num.into())
    }

    /// Create a new atom that represents a variable.
    #[inline]
    pub fn new_var(name: &str) -> Atom {
        Atom::Var(Variable::new(name))
    }

    /// Parse an expression from a string.
    pub fn parse(input: &str) -> Result<Atom> {
        parser::parse(input)
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Atom::Num(n) if n.is_zero())
    }

    pub fn is_one(&self) -> bool {
        matches!(self, Atom::Num(n) if n.is_one())
    }

    /// Take `self` to the power `exp`.
    pub fn pow(&self, exp: &Atom) -> Atom {
        if let Atom::Num(e) = exp {
            if e.is_zero() {
                return Atom::new_num(1);
            }
            if e.is_one() {
                return self.clone();
            }

            if let Atom::Num(b) = self {
                if e.is_integer() && !(b.is_zero() && e.is_negative()) {
                    if let Some(e) = e.numerator_ref().to_i64() {
                        if e.abs() <= MAX_EXPONENT {
                            return Atom::Num(b.pow(e));
                        }
                    }
                }
            }
        }

        Atom::Pow(Box::new((self.clone(), exp.clone())))
    }

    /// Take `self` to the numerical power `exp`.
    pub fn npow<T: Into<Rational>>(&self, exp: T) -> Atom {
        self.pow(&Atom::Num(exp.into()))
    }

    /// Convert the expression to a rational function in `var`.
    ///
    /// Fails when the expression contains another variable, when an exponent is not an
    /// integer or exceeds [MAX_EXPONENT] in magnitude, or when it divides by zero.
    pub fn to_rational_polynomial(&self, var: &Variable) -> Result<RationalPolynomial<Q>> {
        let var = Arc::new(var.clone());
        self.to_rational_polynomial_impl(&var)
    }

    fn to_rational_polynomial_impl(&self, var: &Arc<Variable>) -> Result<RationalPolynomial<Q>> {
        match self {
            Atom::Num(n) => Ok(RationalPolynomial::constant(&Q, n.clone(), var.clone())),
            Atom::Var(v) => {
                if v != var.as_ref() {
                    return Err(Error::UnknownVariable {
                        expected: var.name().to_string(),
                        found: v.name().to_string(),
                    });
                }

                let p = UnivariatePolynomial::new(&Q, Some(2), var.clone());
                Ok(RationalPolynomial::from_polynomial(
                    p.monomial(Rational::one(), 1),
                ))
            }
            Atom::Add(args) => {
                let mut res = RationalPolynomial::constant(&Q, Rational::zero(), var.clone());
                for a in args {
                    res = &res + &a.to_rational_polynomial_impl(var)?;
                }
                Ok(res)
            }
            Atom::Mul(args) => {
                let mut res = RationalPolynomial::constant(&Q, Rational::one(), var.clone());
                for a in args {
                    res = &res * &a.to_rational_polynomial_impl(var)?;
                }
                Ok(res)
            }
            Atom::Pow(p) => {
                let (base, exp) = p.as_ref();
                let e = match exp {
                    Atom::Num(e) if e.is_integer() => e,
                    _ => return Err(Error::NonIntegerExponent(exp.to_string())),
                };

                let e = e
                    .numerator_ref()
                    .to_i64()
                    .filter(|e| e.abs() <= MAX_EXPONENT)
                    .ok_or_else(|| Error::ExponentTooLarge(exp.to_string()))?;

                base.to_rational_polynomial_impl(var)?.pow(e)
            }
        }
    }

    /// Series expand in `var` around `expansion_point` up to and excluding
    /// `(var-expansion_point)^order`.
    pub fn series(
        &self,
        var: &Variable,
        expansion_point: &Rational,
        order: usize,
    ) -> Result<Series<Q>> {
        self.to_rational_polynomial(var)?
            .series(expansion_point, order)
    }

    /// Split off the numerical coefficient of a product.
    fn split_coefficient(self) -> (Rational, Atom) {
        match self {
            Atom::Num(n) => (n, Atom::new_num(1)),
            Atom::Mul(mut args) => {
                if let Some(Atom::Num(_)) = args.first() {
                    if let Atom::Num(n) = args.remove(0) {
                        let rest = if args.len() == 1 {
                            args.pop().unwrap_or_default()
                        } else {
                            Atom::Mul(args)
                        };
                        return (n, rest);
                    }
                }
                (Rational::one(), Atom::Mul(args))
            }
            a => (Rational::one(), a),
        }
    }
}

impl Add<Atom> for Atom {
    type Output = Atom;

    fn add(self, rhs: Atom) -> Atom {
        match (self, rhs) {
            (Atom::Num(a), Atom::Num(b)) => Atom::Num(&a + &b),
            (a, b) if b.is_zero() => a,
            (a, b) if a.is_zero() => b,
            (a, b) => {
                let mut args = match a {
                    Atom::Add(args) => args,
                    a => vec![a],
                };
                match b {
                    Atom::Add(b) => args.extend(b),
                    b => args.push(b),
                }
                Atom::Add(args)
            }
        }
    }
}

impl Sub<Atom> for Atom {
    type Output = Atom;

    fn sub(self, rhs: Atom) -> Atom {
        self + (-rhs)
    }
}

impl Mul<Atom> for Atom {
    type Output = Atom;

    fn mul(self, rhs: Atom) -> Atom {
        match (self, rhs) {
            (Atom::Num(a), Atom::Num(b)) => Atom::Num(&a * &b),
            (a, b) if b.is_one() => a,
            (a, b) if a.is_one() => b,
            (a, b) => {
                let mut args = match a {
                    Atom::Mul(args) => args,
                    a => vec![a],
                };
                match b {
                    Atom::Mul(b) => args.extend(b),
                    b => args.push(b),
                }

                // fold the numbers into a single leading coefficient
                let mut coeff = Rational::one();
                let mut has_coeff = false;
                args.retain(|a| {
                    if let Atom::Num(n) = a {
                        coeff = &coeff * n;
                        has_coeff = true;
                        false
                    } else {
                        true
                    }
                });

                if has_coeff && !coeff.is_one() {
                    args.insert(0, Atom::Num(coeff));
                }

                match args.len() {
                    0 => Atom::new_num(1),
                    1 => args.pop().unwrap_or_default(),
                    _ => Atom::Mul(args),
                }
            }
        }
    }
}

impl Div<Atom> for Atom {
    type Output = Atom;

    fn div(self, rhs: Atom) -> Atom {
        match rhs {
            Atom::Num(n) if !n.is_zero() => self * Atom::Num(n.inv()),
            // a negative exponent stays an inversion of a possibly zero base
            Atom::Pow(p) if matches!(&p.1, Atom::Num(e) if !e.is_negative()) => {
                let (base, exp) = *p;
                self * base.pow(&-exp)
            }
            rhs => self * Atom::Pow(Box::new((rhs, Atom::new_num(-1)))),
        }
    }
}

impl Neg for Atom {
    type Output = Atom;

    fn neg(self) -> Atom {
        match self {
            Atom::Num(n) => Atom::Num(-n),
            Atom::Mul(_) => {
                let (c, rest) = self.split_coefficient();
                Atom::Num(-c) * rest
            }
            a => Atom::Mul(vec![Atom::new_num(-1), a]),
        }
    }
}

impl<'a> Neg for &'a Atom {
    type Output = Atom;

    fn neg(self) -> Atom {
        -self.clone()
    }
}

macro_rules! impl_ref_ops {
    ($($tr:ident, $f:ident);*) => {
        $(
            impl<'a> $tr<&'a Atom> for Atom {
                type Output = Atom;

                fn $f(self, rhs: &'a Atom) -> Atom {
                    self.$f(rhs.clone())
                }
            }

            impl<'a, 'b> $tr<&'a Atom> for &'b Atom {
                type Output = Atom;

                fn $f(self, rhs: &'a Atom) -> Atom {
                    self.clone().$f(rhs.clone())
                }
            }

            impl<T: Into<Rational>> $tr<T> for &Atom {
                type Output = Atom;

                fn $f(self, rhs: T) -> Atom {
                    self.clone().$f(Atom::Num(rhs.into()))
                }
            }
        )*
    };
}

impl_ref_ops!(Add, add; Sub, sub; Mul, mul; Div, div);

#[cfg(test)]
mod test {
    use crate::{
        domains::rational::Rational,
        error::Error,
        poly::Variable,
    };

    use super::Atom;

    #[test]
    fn builders() {
        let t = Atom::new_var("t");
        let a = &(&t * 2) + 1;
        assert_eq!(a, Atom::parse("2*t+1").unwrap());
        assert_eq!(-(-&t), t);
        assert_eq!(&t / &t.npow(2), Atom::parse("t*t^-2").unwrap());
        assert_eq!(&t * 0, Atom::parse("0*t").unwrap());
    }

    #[test]
    fn numeric_folding() {
        assert_eq!(Atom::parse("(1/2)^-3").unwrap(), Atom::new_num(8));
        assert_eq!(Atom::parse("2*3*t/6").unwrap(), Atom::new_var("t"));
        assert!(matches!(Atom::parse("0^-1").unwrap(), Atom::Pow(_)));
    }

    #[test]
    fn rational_function() {
        let t = Variable::new("t");
        let a = Atom::parse("t/t").unwrap();
        assert!(a.to_rational_polynomial(&t).unwrap().is_one());

        let b = Atom::parse("(1-t^2)/(1+t)").unwrap();
        let r = b.to_rational_polynomial(&t).unwrap();
        assert!(r.is_polynomial());
        assert_eq!(format!("{}", r), "1-t");
    }

    #[test]
    fn conversion_errors() {
        let t = Variable::new("t");
        assert_eq!(
            Atom::parse("x+1").unwrap().to_rational_polynomial(&t),
            Err(Error::UnknownVariable {
                expected: "t".into(),
                found: "x".into()
            })
        );
        assert_eq!(
            Atom::parse("t^(1/2)").unwrap().to_rational_polynomial(&t),
            Err(Error::NonIntegerExponent("1/2".into()))
        );
        assert_eq!(
            Atom::parse("t^t").unwrap().to_rational_polynomial(&t),
            Err(Error::NonIntegerExponent("t".into()))
        );
        assert_eq!(
            Atom::parse("1/(t-t)").unwrap().to_rational_polynomial(&t),
            Err(Error::DivisionByZero)
        );
        assert_eq!(
            Atom::parse("1/0").unwrap().to_rational_polynomial(&t),
            Err(Error::DivisionByZero)
        );
    }

    #[test]
    fn dividing_by_inverse_of_zero() {
        let t = Variable::new("t");
        for e in ["1/(0^-1)", "1/(t-t)^-1", "t/(t-t)^-2"] {
            assert_eq!(
                Atom::parse(e).unwrap().to_rational_polynomial(&t),
                Err(Error::DivisionByZero),
                "{}",
                e
            );
        }

        // a non-zero base still simplifies
        let a = Atom::parse("1/(1-t)^-1").unwrap();
        assert_eq!(format!("{}", a.to_rational_polynomial(&t).unwrap()), "1-t");
    }

    #[test]
    fn exponent_bounds() {
        let t = Variable::new("t");
        let a = Atom::parse("t^9223372036854775808").unwrap();
        assert_eq!(
            a.to_rational_polynomial(&t),
            Err(Error::ExponentTooLarge("9223372036854775808".into()))
        );

        let b = Atom::parse("t^-100000").unwrap();
        assert_eq!(
            b.to_rational_polynomial(&t),
            Err(Error::ExponentTooLarge("-100000".into()))
        );

        let c = Atom::parse("(1+t)^20").unwrap();
        let r = c.to_rational_polynomial(&t).unwrap();
        assert_eq!(r.numerator().degree(), 20);
    }

    #[test]
    fn series() {
        let t = Variable::new("t");
        let a = Atom::parse("1/(1-t)^2").unwrap();
        let s = a.series(&t, &Rational::zero(), 5).unwrap();
        assert_eq!(
            s.coefficients(),
            (1..=5i64).map(Rational::from).collect::<Vec<_>>()
        );
    }
}
