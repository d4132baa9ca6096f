//! Linear recurrences with a constant term.
//!
//! A recurrence `x(n) = c_1 x(n-1) + ... + c_d x(n-d) + k` with `d` initial values
//! has a rational generating function, which makes it a convenient oracle for
//! series expansions.
//!
//! # Examples
//! ```
//! use genfunc::domains::rational::Rational;
//! use genfunc::recurrence::LinearRecurrence;
//!
//! // Fibonacci
//! let r = LinearRecurrence::new(vec![1.into(), 1.into()], 0.into(), vec![0.into(), 1.into()])
//!     .unwrap();
//! assert_eq!(r.nth(10), Rational::from(55));
//! ```
use std::sync::Arc;

use tracing::trace;

use crate::{
    domains::{
        rational::{Rational, Q},
        rational_polynomial::RationalPolynomial,
    },
    error::{Error, Result},
    poly::{univariate::UnivariatePolynomial, Variable},
};

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct LinearRecurrence {
    coefficients: Vec<Rational>,
    constant: Rational,
    initial: Vec<Rational>,
}

impl LinearRecurrence {
    /// Create the recurrence `x(n) = sum_i coefficients[i-1] x(n-i) + constant`.
    /// One initial value is required per coefficient.
    pub fn new(
        coefficients: Vec<Rational>,
        constant: Rational,
        initial: Vec<Rational>,
    ) -> Result<LinearRecurrence> {
        if coefficients.len() != initial.len() {
            return Err(Error::InvalidRecurrence(format!(
                "{} coefficients need {} initial values, got {}",
                coefficients.len(),
                coefficients.len(),
                initial.len()
            )));
        }

        Ok(LinearRecurrence {
            coefficients,
            constant,
            initial,
        })
    }

    /// The recurrence `x(n) = 2x(n-1) + 5x(n-2) - 6x(n-3) + 3` with
    /// `x(0) = 1`, `x(1) = 4`, `x(2) = 4`.
    pub fn literal() -> LinearRecurrence {
        LinearRecurrence {
            coefficients: vec![2.into(), 5.into(), (-6).into()],
            constant: 3.into(),
            initial: vec![1.into(), 4.into(), 4.into()],
        }
    }

    /// The order `d` of the recurrence.
    pub fn order(&self) -> usize {
        self.coefficients.len()
    }

    /// The values `x(0), ..., x(n)`.
    pub fn terms(&self, n: usize) -> Vec<Rational> {
        let mut res: Vec<Rational> = self.initial.iter().take(n + 1).cloned().collect();

        while res.len() <= n {
            let len = res.len();
            let mut x = self.constant.clone();
            for (i, c) in self.coefficients.iter().enumerate() {
                x = &x + &(c * &res[len - 1 - i]);
            }
            res.push(x);
        }

        res
    }

    pub fn nth(&self, n: usize) -> Rational {
        self.terms(n).pop().unwrap_or_else(Rational::zero)
    }

    /// The generating function `sum_n x(n) var^n` as a rational function.
    ///
    /// With `q(t) = 1 - sum_i c_i t^i` this is `(p(t) + k t^d/(1-t))/q(t)`, where
    /// `p(t)` is the product of `q(t)` and the initial values, truncated below degree `d`.
    pub fn generating_function(&self, var: &Variable) -> RationalPolynomial<Q> {
        let d = self.order();
        let var = Arc::new(var.clone());

        let mut q = vec![Rational::one()];
        q.extend(self.coefficients.iter().map(|c| -c));
        let q = UnivariatePolynomial::from_coefficients(&Q, q, var.clone());

        let init = UnivariatePolynomial::from_coefficients(&Q, self.initial.clone(), var.clone());
        let mut p = &init * &q;
        p.coefficients.truncate(d);
        let p = UnivariatePolynomial::from_coefficients(&Q, p.coefficients, var.clone());

        trace!("recurrence generating function: p = {}, q = {}", p, q);

        if self.constant.is_zero() {
            return RationalPolynomial::new(p, q);
        }

        let one_minus_t =
            UnivariatePolynomial::from_coefficients(&Q, vec![1.into(), (-1).into()], var);
        let num = &p * &one_minus_t + q.monomial(self.constant.clone(), d);
        RationalPolynomial::new(num, &q * &one_minus_t)
    }
}
