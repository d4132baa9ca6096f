use std::{
    fmt::{Error, Write},
    ops::{Add, Mul, Neg, Sub},
    sync::Arc,
};

use crate::{
    domains::{EuclideanDomain, Field, Ring},
    printer::{format_term, PrintOptions, PrintState},
};

use super::Variable;

/// A dense univariate polynomial. The coefficient of `x^i` is stored at index `i`
/// and the vector has no trailing zeros.
#[derive(Clone)]
pub struct UnivariatePolynomial<F: Ring> {
    pub coefficients: Vec<F::Element>,
    pub variable: Arc<Variable>,
    pub field: F,
}

impl<F: Ring> std::fmt::Debug for UnivariatePolynomial<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "[]");
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
        write!(f, " ]")
    }
}

impl<F: Ring> std::fmt::Display for UnivariatePolynomial<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.format(&PrintOptions::default(), PrintState::from_fmt(f), f)
            .map(|_| ())
    }
}

impl<F: Ring> UnivariatePolynomial<F> {
    /// Constructs a zero polynomial. Instead of using this constructor,
    /// prefer to create new polynomials from existing ones, so that the
    /// variable and field are inherited.
    #[inline]
    pub fn new(field: &F, cap: Option<usize>, variable: Arc<Variable>) -> Self {
        Self {
            coefficients: Vec::with_capacity(cap.unwrap_or(0)),
            field: field.clone(),
            variable,
        }
    }

    /// Constructs a polynomial from its coefficients, lowest degree first.
    pub fn from_coefficients(
        field: &F,
        coefficients: Vec<F::Element>,
        variable: Arc<Variable>,
    ) -> Self {
        let mut p = Self {
            coefficients,
            field: field.clone(),
            variable,
        };
        p.truncate();
        p
    }

    /// Constructs a zero polynomial, inheriting the field and variable from `self`.
    #[inline]
    pub fn zero(&self) -> Self {
        Self {
            coefficients: vec![],
            field: self.field.clone(),
            variable: self.variable.clone(),
        }
    }

    /// Constructs a constant polynomial,
    /// inheriting the field and variable from `self`.
    #[inline]
    pub fn constant(&self, coeff: F::Element) -> Self {
        if F::is_zero(&coeff) {
            return self.zero();
        }

        Self {
            coefficients: vec![coeff],
            field: self.field.clone(),
            variable: self.variable.clone(),
        }
    }

    /// Constructs a polynomial that is one, inheriting the field and variable from `self`.
    #[inline]
    pub fn one(&self) -> Self {
        Self {
            coefficients: vec![self.field.one()],
            field: self.field.clone(),
            variable: self.variable.clone(),
        }
    }

    /// Constructs a polynomial with a single term.
    #[inline]
    pub fn monomial(&self, coeff: F::Element, exponent: usize) -> Self {
        if F::is_zero(&coeff) {
            return self.zero();
        }

        let mut coefficients = vec![self.field.zero(); exponent + 1];
        coefficients[exponent] = coeff;

        Self {
            coefficients,
            field: self.field.clone(),
            variable: self.variable.clone(),
        }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.coefficients.is_empty()
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.coefficients.len() == 1 && self.field.is_one(&self.coefficients[0])
    }

    /// Returns true if the polynomial is constant.
    #[inline]
    pub fn is_constant(&self) -> bool {
        self.coefficients.len() <= 1
    }

    /// Get the constant term of the polynomial.
    #[inline]
    pub fn get_constant(&self) -> F::Element {
        if self.is_zero() {
            return self.field.zero();
        }

        self.coefficients[0].clone()
    }

    /// Get the coefficient of `x^e`.
    pub fn coefficient(&self, e: usize) -> F::Element {
        self.coefficients
            .get(e)
            .cloned()
            .unwrap_or_else(|| self.field.zero())
    }

    /// Get a copy of the variable.
    pub fn get_variable(&self) -> Arc<Variable> {
        self.variable.clone()
    }

    /// Get the leading coefficient.
    pub fn lcoeff(&self) -> F::Element {
        self.coefficients
            .last()
            .cloned()
            .unwrap_or_else(|| self.field.zero())
    }

    /// The degree of the polynomial. The zero polynomial has degree 0.
    pub fn degree(&self) -> usize {
        if self.is_zero() {
            return 0;
        }

        self.coefficients.len() - 1
    }

    /// Compute `self^pow`.
    pub fn pow(&self, mut pow: usize) -> Self {
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

    /// Multiply by `x^exp`.
    pub fn mul_exp(&self, exp: usize) -> Self {
        if exp == 0 || self.is_zero() {
            return self.clone();
        }

        let mut a = self.zero();
        a.coefficients = vec![self.field.zero(); self.degree() + exp + 1];

        for (cn, c) in a.coefficients.iter_mut().skip(exp).zip(&self.coefficients) {
            *cn = c.clone();
        }

        a
    }

    pub fn mul_coeff(mut self, coeff: &F::Element) -> Self {
        for c in &mut self.coefficients {
            if !F::is_zero(c) {
                self.field.mul_assign(c, coeff);
            }
        }

        self.truncate(); // zero divisors may occur
        self
    }

    fn truncate(&mut self) {
        let d = self
            .coefficients
            .iter_mut()
            .rev()
            .position(|c| !F::is_zero(c))
            .unwrap_or(self.coefficients.len());

        self.coefficients.truncate(self.coefficients.len() - d);
    }

    /// Evaluate the polynomial at `x` using Horner's scheme.
    pub fn evaluate(&self, x: &F::Element) -> F::Element {
        let mut res = self.field.zero();

        for c in self.coefficients.iter().rev() {
            self.field.mul_assign(&mut res, x);
            self.field.add_assign(&mut res, c);
        }

        res
    }

    /// Compute `p(x + a)`, so that the coefficients of the result
    /// are the Taylor coefficients of `p` around `x = a`.
    pub fn shift_variable(&self, a: &F::Element) -> Self {
        if F::is_zero(a) || self.is_constant() {
            return self.clone();
        }

        let shifted_x = Self::from_coefficients(
            &self.field,
            vec![a.clone(), self.field.one()],
            self.variable.clone(),
        );

        let mut res = self.zero();
        for c in self.coefficients.iter().rev() {
            res = &res * &shifted_x;
            res = res + self.constant(c.clone());
        }

        res
    }

    pub fn format<W: Write>(
        &self,
        opts: &PrintOptions,
        mut state: PrintState,
        f: &mut W,
    ) -> Result<bool, Error> {
        if self.is_zero() {
            if state.in_sum {
                f.write_char('+')?;
            }
            f.write_char('0')?;
            return Ok(false);
        }

        let add_paren = self.coefficients.iter().filter(|c| !F::is_zero(c)).count() > 1
            && (state.in_product || state.in_exp);
        if add_paren {
            if state.in_sum {
                f.write_char('+')?;
            }
            state.in_sum = false;
            f.write_char('(')?;
        }

        let v = self.variable.name();
        let mut in_sum = state.in_sum;
        for (e, c) in self.coefficients.iter().enumerate() {
            if F::is_zero(c) {
                continue;
            }

            format_term(
                &self.field,
                c,
                v,
                e,
                opts,
                PrintState { in_sum, ..state },
                f,
            )?;
            in_sum = true;
        }

        if add_paren {
            f.write_char(')')?;
        }

        Ok(false)
    }
}

impl<F: Ring> PartialEq for UnivariatePolynomial<F> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        if self.variable != other.variable {
            if self.is_constant() && other.is_constant() {
                return self.coefficients == other.coefficients;
            }

            return false;
        }

        self.coefficients.eq(&other.coefficients)
    }
}

impl<F: Ring> std::hash::Hash for UnivariatePolynomial<F> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.coefficients.hash(state);
        self.variable.hash(state);
    }
}

impl<F: Ring> Eq for UnivariatePolynomial<F> {}

impl<F: Ring> Add for UnivariatePolynomial<F> {
    type Output = Self;

    fn add(mut self, mut other: Self) -> Self::Output {
        assert_eq!(self.field, other.field);

        if self.is_zero() {
            return other;
        }
        if other.is_zero() {
            return self;
        }

        assert_eq!(self.variable, other.variable);

        if self.degree() < other.degree() {
            std::mem::swap(&mut self, &mut other);
        }

        for (i, c) in other.coefficients.iter().enumerate() {
            self.field.add_assign(&mut self.coefficients[i], c);
        }

        self.truncate();

        self
    }
}

impl<'a, 'b, F: Ring> Add<&'a UnivariatePolynomial<F>> for &'b UnivariatePolynomial<F> {
    type Output = UnivariatePolynomial<F>;

    fn add(self, other: &'a UnivariatePolynomial<F>) -> Self::Output {
        (self.clone()).add(other.clone())
    }
}

impl<F: Ring> Sub for UnivariatePolynomial<F> {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        self.add(other.neg())
    }
}

impl<'a, 'b, F: Ring> Sub<&'a UnivariatePolynomial<F>> for &'b UnivariatePolynomial<F> {
    type Output = UnivariatePolynomial<F>;

    fn sub(self, other: &'a UnivariatePolynomial<F>) -> Self::Output {
        (self.clone()).add(other.clone().neg())
    }
}

impl<F: Ring> Neg for UnivariatePolynomial<F> {
    type Output = Self;
    fn neg(mut self) -> Self::Output {
        // Negate coefficients of all terms.
        for c in &mut self.coefficients {
            *c = self.field.neg(c);
        }
        self
    }
}

impl<'a, 'b, F: Ring> Mul<&'a UnivariatePolynomial<F>> for &'b UnivariatePolynomial<F> {
    type Output = UnivariatePolynomial<F>;

    #[inline]
    fn mul(self, rhs: &'a UnivariatePolynomial<F>) -> Self::Output {
        if self.is_zero() || rhs.is_zero() {
            return self.zero();
        }

        if self.is_constant() {
            return rhs.clone().mul_coeff(&self.coefficients[0]);
        }

        if rhs.is_constant() {
            return self.clone().mul_coeff(&rhs.coefficients[0]);
        }

        assert_eq!(self.variable, rhs.variable);

        let n = self.degree();
        let m = rhs.degree();

        let mut res = self.zero();
        res.coefficients = vec![self.field.zero(); n + m + 1];

        for (e1, c1) in self.coefficients.iter().enumerate() {
            if F::is_zero(c1) {
                continue;
            }

            for (e2, c2) in rhs.coefficients.iter().enumerate() {
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

impl<'a, F: Ring> Mul<&'a UnivariatePolynomial<F>> for UnivariatePolynomial<F> {
    type Output = UnivariatePolynomial<F>;

    #[inline]
    fn mul(self, rhs: &'a UnivariatePolynomial<F>) -> Self::Output {
        (&self) * rhs
    }
}

impl<F: EuclideanDomain> UnivariatePolynomial<F> {
    /// Long division. If a leading coefficient does not divide in the
    /// coefficient ring, the division stops and the partial remainder is returned.
    pub fn quot_rem(&self, div: &Self) -> (Self, Self) {
        if div.is_zero() {
            panic!("Cannot divide by 0");
        }

        if self.is_zero() || self.degree() < div.degree() {
            return (self.zero(), self.clone());
        }

        let mut n = self.degree();
        let m = div.degree();

        let mut q = self.zero();
        q.coefficients = vec![self.field.zero(); n - m + 1];

        let mut r = self.clone();

        while n >= m {
            let (qq, rr) = self
                .field
                .quot_rem(&r.coefficients[n], &div.coefficients[m]);
            if !F::is_zero(&rr) {
                return (self.zero(), r);
            }

            r = r - div.mul_exp(n - m).mul_coeff(&qq);
            q.coefficients[n - m] = qq;

            if r.is_zero() {
                break;
            }

            n = r.degree();
        }

        q.truncate();

        (q, r)
    }
}

impl<F: Field> UnivariatePolynomial<F> {
    /// Divide by the leading coefficient.
    pub fn make_monic(self) -> Self {
        if self.is_zero() {
            return self;
        }

        let inv = self.field.inv(&self.lcoeff());
        self.mul_coeff(&inv)
    }

    /// Compute the univariate GCD using Euclid's algorithm. The result is normalized to 1.
    pub fn gcd(&self, b: &Self) -> Self {
        if self.is_zero() {
            return b.clone().make_monic();
        }
        if b.is_zero() {
            return self.clone().make_monic();
        }

        let mut c = self.clone();
        let mut d = b.clone();
        if self.degree() < b.degree() {
            std::mem::swap(&mut c, &mut d);
        }

        let mut r = c.quot_rem(&d).1;
        while !r.is_zero() {
            c = d;
            d = r;
            r = c.quot_rem(&d).1;
        }

        d.make_monic()
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use crate::{
        domains::rational::{Rational, Q},
        poly::Variable,
    };

    use super::UnivariatePolynomial;

    fn poly(c: &[i64]) -> UnivariatePolynomial<crate::domains::rational::Q> {
        UnivariatePolynomial::from_coefficients(
            &Q,
            c.iter().map(|x| Rational::from(*x)).collect(),
            Arc::new(Variable::new("t")),
        )
    }

    #[test]
    fn arithmetic() {
        let a = poly(&[1, 1]);
        let b = poly(&[1, -1]);
        assert_eq!(&a * &b, poly(&[1, 0, -1]));
        assert_eq!(&a + &b, poly(&[2]));
        assert_eq!(&a - &a, poly(&[]));
        assert_eq!(a.pow(3), poly(&[1, 3, 3, 1]));
    }

    #[test]
    fn division() {
        let a = poly(&[-1, 0, 1]);
        let b = poly(&[1, 1]);
        let (q, r) = a.quot_rem(&b);
        assert_eq!(q, poly(&[-1, 1]));
        assert!(r.is_zero());

        let (q, r) = poly(&[1, 0, 1]).quot_rem(&b);
        assert_eq!(q, poly(&[-1, 1]));
        assert_eq!(r, poly(&[2]));
    }

    #[test]
    fn gcd() {
        let a = poly(&[-1, 0, 1]);
        let b = poly(&[2, 4, 2]);
        assert_eq!(a.gcd(&b), poly(&[1, 1]));
    }

    #[test]
    fn evaluate_and_shift() {
        let p = poly(&[1, -2, -5, 6]);
        assert_eq!(p.evaluate(&Rational::from(2)), Rational::from(25));

        // p(t + 2) has constant term p(2)
        let s = p.shift_variable(&Rational::from(2));
        assert_eq!(s.get_constant(), Rational::from(25));
        assert_eq!(s.shift_variable(&Rational::from(-2)), p);
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", poly(&[1, -2, -5, 6])), "1-2*t-5*t^2+6*t^3");
        assert_eq!(format!("{}", poly(&[0, 1])), "t");
        assert_eq!(format!("{}", poly(&[])), "0");
    }
}
