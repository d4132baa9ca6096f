//! Univariate rational functions.

use std::{
    fmt::{Display, Error, Write},
    ops::{Add, Mul, Neg, Sub},
    sync::Arc,
};

use crate::{
    error::Error as RationalFunctionError,
    poly::{series::Series, univariate::UnivariatePolynomial, Variable},
    printer::{PrintOptions, PrintState},
};

use super::Field;

/// A quotient of two univariate polynomials in lowest terms.
///
/// The numerator and denominator share no common factor and the denominator is monic.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct RationalPolynomial<F: Field> {
    numerator: UnivariatePolynomial<F>,
    denominator: UnivariatePolynomial<F>,
}

impl<F: Field> RationalPolynomial<F> {
    /// Create a new rational function `num/den`, cancelling common factors.
    /// Panics when `den` is zero.
    pub fn new(num: UnivariatePolynomial<F>, den: UnivariatePolynomial<F>) -> Self {
        if den.is_zero() {
            panic!("Denominator of a rational function cannot be zero");
        }

        if num.is_zero() {
            return Self {
                denominator: num.one(),
                numerator: num,
            };
        }

        let g = num.gcd(&den);
        let (mut num, mut den) = if g.is_one() {
            (num, den)
        } else {
            (num.quot_rem(&g).0, den.quot_rem(&g).0)
        };

        let lc = den.lcoeff();
        if !num.field.is_one(&lc) {
            let inv = num.field.inv(&lc);
            num = num.mul_coeff(&inv);
            den = den.mul_coeff(&inv);
        }

        Self {
            numerator: num,
            denominator: den,
        }
    }

    pub fn from_polynomial(poly: UnivariatePolynomial<F>) -> Self {
        Self {
            denominator: poly.one(),
            numerator: poly,
        }
    }

    /// Create the constant rational function `c`.
    pub fn constant(field: &F, c: F::Element, variable: Arc<Variable>) -> Self {
        let p = UnivariatePolynomial::new(field, None, variable);
        Self::from_polynomial(p.constant(c))
    }

    pub fn numerator(&self) -> &UnivariatePolynomial<F> {
        &self.numerator
    }

    pub fn denominator(&self) -> &UnivariatePolynomial<F> {
        &self.denominator
    }

    pub fn get_variable(&self) -> Arc<Variable> {
        self.numerator.get_variable()
    }

    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.numerator.is_one() && self.denominator.is_one()
    }

    /// Returns true if the denominator is one.
    pub fn is_polynomial(&self) -> bool {
        self.denominator.is_one()
    }

    pub fn zero(&self) -> Self {
        Self::from_polynomial(self.numerator.zero())
    }

    pub fn one(&self) -> Self {
        Self::from_polynomial(self.numerator.one())
    }

    /// Compute the multiplicative inverse.
    pub fn inv(&self) -> Result<Self, RationalFunctionError> {
        if self.is_zero() {
            return Err(RationalFunctionError::DivisionByZero);
        }

        Ok(Self::new(self.denominator.clone(), self.numerator.clone()))
    }

    /// Compute `self^e`. A negative exponent inverts first.
    pub fn pow(&self, e: i64) -> Result<Self, RationalFunctionError> {
        let base = if e < 0 {
            self.inv()?
        } else {
            self.clone()
        };

        let e = e.unsigned_abs() as usize;
        Ok(Self {
            numerator: base.numerator.pow(e),
            denominator: base.denominator.pow(e),
        })
    }

    /// Divide `self` by `other`.
    pub fn div(&self, other: &Self) -> Result<Self, RationalFunctionError> {
        Ok(self * &other.inv()?)
    }

    /// Evaluate at `x`. Returns `None` when `x` is a pole.
    pub fn evaluate(&self, x: &F::Element) -> Option<F::Element> {
        let den = self.denominator.evaluate(x);
        if F::is_zero(&den) {
            return None;
        }

        let num = self.numerator.evaluate(x);
        Some(self.numerator.field.div(&num, &den))
    }

    /// Expand the rational function in powers of `(x-a)` up to and excluding `(x-a)^order`.
    ///
    /// Fails when the function has a pole at `a`. Since the numerator and
    /// denominator are coprime, this happens exactly when the denominator vanishes at `a`.
    pub fn series(
        &self,
        expansion_point: &F::Element,
        order: usize,
    ) -> Result<Series<F>, RationalFunctionError> {
        let num = Series::from_polynomial(&self.numerator, expansion_point.clone(), order);
        if self.is_polynomial() {
            return Ok(num);
        }

        let den = Series::from_polynomial(&self.denominator, expansion_point.clone(), order);
        num.div(&den)
    }

    pub fn format<W: Write>(
        &self,
        opts: &PrintOptions,
        state: PrintState,
        f: &mut W,
    ) -> Result<bool, Error> {
        if self.is_polynomial() {
            return self.numerator.format(opts, state, f);
        }

        self.numerator.format(
            opts,
            PrintState {
                in_product: true,
                ..state
            },
            f,
        )?;
        f.write_char('/')?;
        self.denominator.format(
            opts,
            PrintState {
                in_product: true,
                in_sum: false,
                ..state
            },
            f,
        )?;

        Ok(false)
    }
}

impl<F: Field> Display for RationalPolynomial<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.format(&PrintOptions::default(), PrintState::from_fmt(f), f)
            .map(|_| ())
    }
}

impl<'a, 'b, F: Field> Add<&'a RationalPolynomial<F>> for &'b RationalPolynomial<F> {
    type Output = RationalPolynomial<F>;

    fn add(self, other: &'a RationalPolynomial<F>) -> Self::Output {
        if self.denominator == other.denominator {
            return RationalPolynomial::new(
                &self.numerator + &other.numerator,
                self.denominator.clone(),
            );
        }

        let num = &self.numerator * &other.denominator + &other.numerator * &self.denominator;
        RationalPolynomial::new(num, &self.denominator * &other.denominator)
    }
}

impl<'a, 'b, F: Field> Sub<&'a RationalPolynomial<F>> for &'b RationalPolynomial<F> {
    type Output = RationalPolynomial<F>;

    fn sub(self, other: &'a RationalPolynomial<F>) -> Self::Output {
        self + &(-other.clone())
    }
}

impl<'a, 'b, F: Field> Mul<&'a RationalPolynomial<F>> for &'b RationalPolynomial<F> {
    type Output = RationalPolynomial<F>;

    fn mul(self, other: &'a RationalPolynomial<F>) -> Self::Output {
        RationalPolynomial::new(
            &self.numerator * &other.numerator,
            &self.denominator * &other.denominator,
        )
    }
}

impl<F: Field> Neg for RationalPolynomial<F> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            numerator: -self.numerator,
            denominator: self.denominator,
        }
    }
}
