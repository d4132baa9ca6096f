//! Truncated power series around a point.
//!
//! # Examples
//! ```
//! use genfunc::atom::Atom;
//! use genfunc::domains::rational::Rational;
//! use genfunc::poly::Variable;
//!
//! let a = Atom::parse("1/(1-t)").unwrap();
//! let s = a.series(&Variable::new("t"), &Rational::zero(), 4).unwrap();
//! assert_eq!(format!("{}", s), "1+t+t^2+t^3+O(t^4)");
//! ```
use std::{
    fmt::{Error, Write},
    ops::{Add, Mul, Neg, Sub},
    sync::Arc,
};

use crate::{
    domains::{integer::Integer, Field, Ring},
    error::Error as SeriesError,
    printer::{format_shifted_variable, format_term, PrintOptions, PrintState},
};

use super::{univariate::UnivariatePolynomial, Variable};

/// A power series in `(x-a)` known up to, but not including, `(x-a)^order`.
///
/// The coefficient of `(x-a)^i` is stored at index `i` and trailing zeros are removed.
#[derive(Clone)]
pub struct Series<F: Ring> {
    coefficients: Vec<F::Element>,
    variable: Arc<Variable>,
    expansion_point: F::Element,
    field: F,
    order: usize,
}

impl<F: Ring> std::fmt::Debug for Series<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.coefficients.is_empty() {
            return write!(f, "[] + O({})", self.order);
        }
        let mut first = true;
        write!(f, "[ ")?;
        for c in self.coefficients.iter() {
            if first {
                first = false;
            } else {
                write!(f, ", ")?;
            }
            write!(f, "{{ {:?} }}", c)?;
        }
        write!(f, " ] + O({})", self.order)
    }
}

impl<F: Ring> std::fmt::Display for Series<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.format(&PrintOptions::default(), PrintState::from_fmt(f), f)
            .map(|_| ())
    }
}

impl<F: Ring> Series<F> {
    /// Constructs a zero series with fixed order. Instead of using this constructor,
    /// prefer to create new series from existing ones, so that the
    /// variable and field are inherited.
    #[inline]
    pub fn new(
        field: &F,
        cap: Option<usize>,
        variable: Arc<Variable>,
        expansion_point: F::Element,
        order: usize,
    ) -> Self {
        Self {
            coefficients: Vec::with_capacity(cap.unwrap_or(0).min(order)),
            expansion_point,
            field: field.clone(),
            variable,
            order,
        }
    }

    /// Constructs a zero series with the same order, inheriting the field and variable from `self`.
    #[inline]
    pub fn zero(&self) -> Self {
        Self {
            coefficients: vec![],
            field: self.field.clone(),
            variable: self.variable.clone(),
            expansion_point: self.expansion_point.clone(),
            order: self.order,
        }
    }

    /// Constructs a constant series,
    /// inheriting the field and variable from `self`.
    #[inline]
    pub fn constant(&self, coeff: F::Element) -> Self {
        self.monomial(coeff, 0)
    }

    /// Constructs a series that is one, inheriting the field and variable from `self`.
    #[inline]
    pub fn one(&self) -> Self {
        self.constant(self.field.one())
    }

    /// Constructs the series `coeff*(x-a)^exponent`.
    pub fn monomial(&self, coeff: F::Element, exponent: usize) -> Self {
        let mut res = self.zero();
        if F::is_zero(&coeff) || exponent >= self.order {
            return res;
        }

        res.coefficients = vec![self.field.zero(); exponent + 1];
        res.coefficients[exponent] = coeff;
        res
    }

    /// Re-expand the polynomial `p(x)` in powers of `(x-a)`, truncated at `order`.
    pub fn from_polynomial(
        poly: &UnivariatePolynomial<F>,
        expansion_point: F::Element,
        order: usize,
    ) -> Self {
        let shifted = poly.shift_variable(&expansion_point);

        let mut res = Series::new(
            &poly.field,
            Some(shifted.coefficients.len()),
            poly.variable.clone(),
            expansion_point,
            order,
        );
        res.coefficients = shifted.coefficients;
        res.coefficients.truncate(order);
        res.truncate();
        res
    }

    /// Get the coefficient of `(x-a)^k`. Returns `None` when `k` is at or beyond the
    /// truncation order, since such a coefficient is not known.
    pub fn coefficient(&self, k: usize) -> Option<F::Element> {
        if k >= self.order {
            return None;
        }

        Some(
            self.coefficients
                .get(k)
                .cloned()
                .unwrap_or_else(|| self.field.zero()),
        )
    }

    /// All known coefficients, from `(x-a)^0` up to the truncation order.
    pub fn coefficients(&self) -> Vec<F::Element> {
        (0..self.order)
            .map(|k| {
                self.coefficients
                    .get(k)
                    .cloned()
                    .unwrap_or_else(|| self.field.zero())
            })
            .collect()
    }

    /// Get the absolute order of the series expansion.
    #[inline]
    pub fn absolute_order(&self) -> usize {
        self.order
    }

    /// Get the expansion point.
    #[inline]
    pub fn get_expansion_point(&self) -> F::Element {
        self.expansion_point.clone()
    }

    /// Get a copy of the variable.
    pub fn get_variable(&self) -> Arc<Variable> {
        self.variable.clone()
    }

    /// Truncate the series to the desired absolute order.
    /// If the new order is larger, nothing happens.
    #[inline]
    pub fn truncate_absolute_order(&mut self, order: usize) {
        if order >= self.order {
            return;
        }

        self.coefficients.truncate(order);
        self.order = order;
        self.truncate();
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.coefficients.is_empty()
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.coefficients.len() == 1 && self.field.is_one(&self.coefficients[0])
    }

    /// Returns true if the series is constant.
    #[inline]
    pub fn is_constant(&self) -> bool {
        self.coefficients.len() <= 1
    }

    /// Compute `self^pow`.
    pub fn npow(&self, mut pow: usize) -> Self {
        if pow == 0 {
            return self.one();
        }

        let mut x = self.clone();
        let mut y = self.one();
        while pow != 1 {
            if pow % 2 == 1 {
                y = &y * &x;
                pow -= 1;
            }

            x = &x * &x;
            pow /= 2;
        }

        x * &y
    }

    pub fn mul_coeff(mut self, coeff: &F::Element) -> Self {
        for c in &mut self.coefficients {
            if !F::is_zero(c) {
                self.field.mul_assign(c, coeff);
            }
        }

        self.truncate(); // zeros may have occurred

        self
    }

    /// Remove trailing zeros.
    fn truncate(&mut self) {
        let d = self
            .coefficients
            .iter_mut()
            .rev()
            .position(|c| !F::is_zero(c))
            .unwrap_or(self.coefficients.len());

        self.coefficients.truncate(self.coefficients.len() - d);
    }

    fn pole_error(&self) -> SeriesError {
        SeriesError::Pole {
            variable: self.variable.name().to_string(),
            point: format!("{}", self.field.printer(&self.expansion_point)),
        }
    }

    pub fn format<W: Write>(
        &self,
        opts: &PrintOptions,
        mut state: PrintState,
        f: &mut W,
    ) -> Result<bool, Error> {
        let mut v = String::new();
        format_shifted_variable(
            &self.field,
            self.variable.name(),
            &self.expansion_point,
            opts,
            &mut v,
        )?;

        let add_paren = state.in_product || state.in_exp;
        if add_paren {
            if state.in_sum {
                f.write_char('+')?;
                state.in_sum = false;
            }

            state.in_product = false;
            state.in_exp = false;
            f.write_char('(')?;
        }

        let mut in_sum = state.in_sum;
        for (e, c) in self.coefficients.iter().enumerate() {
            if F::is_zero(c) {
                continue;
            }

            format_term(
                &self.field,
                c,
                &v,
                e,
                opts,
                PrintState { in_sum, ..state },
                f,
            )?;
            in_sum = true;
        }

        if in_sum {
            f.write_char('+')?;
        }
        write!(f, "O({}", v)?;
        if self.order != 1 {
            if opts.double_star_for_exponentiation {
                f.write_str("**")?;
            } else {
                f.write_char('^')?;
            }
            crate::domains::integer::Z.format(
                &Integer::from(self.order),
                opts,
                state.step(false, false, true),
                f,
            )?;
        }
        f.write_char(')')?;

        if add_paren {
            f.write_char(')')?;
        }

        Ok(false)
    }
}

impl<F: Field> Series<F> {
    /// Compute the multiplicative inverse of the series. Fails with a pole
    /// error when the constant term is zero.
    pub fn inv(&self) -> Result<Self, SeriesError> {
        if self.order == 0 {
            return Ok(self.clone());
        }

        let a0 = match self.coefficients.first() {
            Some(c) if !F::is_zero(c) => c,
            _ => return Err(self.pole_error()),
        };

        let a0_inv = self.field.inv(a0);
        let mut res = self.zero();
        res.coefficients = Vec::with_capacity(self.order);
        res.coefficients.push(a0_inv.clone());

        for n in 1..self.order {
            let mut acc = self.field.zero();
            for (k, a) in self.coefficients.iter().enumerate().take(n + 1).skip(1) {
                if !F::is_zero(a) {
                    self.field.add_mul_assign(&mut acc, a, &res.coefficients[n - k]);
                }
            }

            let mut b = self.field.mul(&acc, &a0_inv);
            b = self.field.neg(&b);
            res.coefficients.push(b);
        }

        res.truncate();
        Ok(res)
    }

    /// Divide two series. Fails with a pole error when the divisor has no constant term.
    pub fn div(&self, other: &Self) -> Result<Self, SeriesError> {
        Ok(self * &other.inv()?)
    }
}

impl<F: Ring> PartialEq for Series<F> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.variable == other.variable
            && self.order == other.order
            && self.expansion_point == other.expansion_point
            && self.coefficients == other.coefficients
    }
}

impl<F: Ring> std::hash::Hash for Series<F> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.coefficients.hash(state);
        self.variable.hash(state);
        self.order.hash(state);
    }
}

impl<F: Ring> Eq for Series<F> {}

impl<F: Ring> Add for Series<F> {
    type Output = Self;

    fn add(mut self, mut other: Self) -> Self::Output {
        assert_eq!(self.field, other.field);
        assert_eq!(self.variable, other.variable);
        assert_eq!(self.expansion_point, other.expansion_point);

        if self.coefficients.len() < other.coefficients.len() {
            std::mem::swap(&mut self, &mut other);
        }

        self.order = self.order.min(other.order);
        self.coefficients.truncate(self.order);

        for (i, c) in other.coefficients.iter().enumerate() {
            if i < self.coefficients.len() {
                self.field.add_assign(&mut self.coefficients[i], c);
            }
        }

        self.truncate();
        self
    }
}

impl<'a, 'b, F: Ring> Add<&'a Series<F>> for &'b Series<F> {
    type Output = Series<F>;

    fn add(self, other: &'a Series<F>) -> Self::Output {
        (self.clone()).add(other.clone())
    }
}

impl<F: Ring> Sub for Series<F> {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        self.add(other.neg())
    }
}

impl<'a, 'b, F: Ring> Sub<&'a Series<F>> for &'b Series<F> {
    type Output = Series<F>;

    fn sub(self, other: &'a Series<F>) -> Self::Output {
        (self.clone()).add(other.clone().neg())
    }
}

impl<F: Ring> Neg for Series<F> {
    type Output = Self;
    fn neg(mut self) -> Self::Output {
        // Negate coefficients of all terms.
        for c in &mut self.coefficients {
            *c = self.field.neg(c);
        }
        self
    }
}

impl<'a, 'b, F: Ring> Mul<&'a Series<F>> for &'b Series<F> {
    type Output = Series<F>;

    #[inline]
    fn mul(self, rhs: &'a Series<F>) -> Self::Output {
        assert_eq!(self.field, rhs.field);
        assert_eq!(self.variable, rhs.variable);
        assert_eq!(self.expansion_point, rhs.expansion_point);

        let mut res = self.zero();
        res.order = self.order.min(rhs.order);

        if self.is_zero() || rhs.is_zero() {
            return res;
        }

        let len = (self.coefficients.len() + rhs.coefficients.len() - 1).min(res.order);
        res.coefficients = vec![self.field.zero(); len];

        for (e1, c1) in self.coefficients.iter().enumerate() {
            if F::is_zero(c1) {
                continue;
            }

            for (e2, c2) in rhs.coefficients.iter().enumerate() {
                if e1 + e2 >= len {
                    break;
                }

                if !F::is_zero(c2) {
                    self.field
                        .add_mul_assign(&mut res.coefficients[e1 + e2], c1, c2);
                }
            }
        }

        res.truncate();
        res
    }
}

impl<'a, F: Ring> Mul<&'a Series<F>> for Series<F> {
    type Output = Series<F>;

    #[inline]
    fn mul(self, rhs: &'a Series<F>) -> Self::Output {
        (&self) * rhs
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use crate::{
        domains::rational::{Rational, Q},
        error::Error,
        poly::{univariate::UnivariatePolynomial, Variable},
    };

    use super::Series;

    fn poly(c: &[i64]) -> UnivariatePolynomial<Q> {
        UnivariatePolynomial::from_coefficients(
            &Q,
            c.iter().map(|x| Rational::from(*x)).collect(),
            Arc::new(Variable::new("t")),
        )
    }

    #[test]
    fn geometric() {
        let s = Series::from_polynomial(&poly(&[1, -1]), Rational::zero(), 5);
        let inv = s.inv().unwrap();
        assert_eq!(inv.coefficients(), vec![Rational::one(); 5]);
        assert_eq!(inv.coefficient(5), None);
        assert_eq!(format!("{}", inv), "1+t+t^2+t^3+t^4+O(t^5)");
    }

    #[test]
    fn shifted_expansion() {
        // t^2 = 1 + 2*(t-1) + (t-1)^2
        let s = Series::from_polynomial(&poly(&[0, 0, 1]), Rational::one(), 3);
        assert_eq!(
            s.coefficients(),
            vec![Rational::one(), Rational::from(2), Rational::one()]
        );
        assert_eq!(format!("{}", s), "1+2*(t-1)+(t-1)^2+O((t-1)^3)");
    }

    #[test]
    fn pole() {
        let s = Series::from_polynomial(&poly(&[0, 1]), Rational::zero(), 3);
        assert_eq!(
            s.inv(),
            Err(Error::Pole {
                variable: "t".into(),
                point: "0".into()
            })
        );
    }

    #[test]
    fn truncation_follows_smallest_order() {
        let a = Series::from_polynomial(&poly(&[1, 1, 1]), Rational::zero(), 2);
        let b = Series::from_polynomial(&poly(&[1, 1, 1]), Rational::zero(), 5);
        let c = &a * &b;
        assert_eq!(c.absolute_order(), 2);
        assert_eq!(c.coefficients(), vec![Rational::one(), Rational::from(2)]);

        let mut d = b.npow(2);
        assert_eq!(d.coefficient(2), Some(Rational::from(3)));
        d.truncate_absolute_order(3);
        assert_eq!(d.coefficient(3), None);
        assert_eq!(format!("{}", &a + &b), "2+2*t+O(t^2)");
    }

    #[test]
    fn zero_series() {
        let s = Series::from_polynomial(&poly(&[]), Rational::zero(), 3);
        assert!(s.is_zero());
        assert_eq!(s.coefficient(2), Some(Rational::zero()));
        assert_eq!(format!("{}", s), "O(t^3)");
    }
}
