use std::{
    borrow::Cow,
    cmp::Ordering,
    fmt::{Display, Error, Formatter, Write},
    ops::{Add, Div, Mul, Neg, Sub},
    str::FromStr,
};

use crate::printer::{PrintOptions, PrintState};

use super::{
    integer::{Integer, IntegerRing, Z},
    EuclideanDomain, Field, Ring,
};

/// The field of rational numbers.
pub type Q = FractionField<IntegerRing>;
/// The field of rational numbers.
pub const Q: FractionField<IntegerRing> = FractionField::new(Z);

/// A rational number.
pub type Rational = Fraction<IntegerRing>;

/// The fraction field of `R`.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct FractionField<R: Ring> {
    ring: R,
}

impl<R: Ring> FractionField<R> {
    pub const fn new(ring: R) -> FractionField<R> {
        FractionField { ring }
    }
}

impl<R: EuclideanDomain + FractionNormalization> FractionField<R> {
    pub fn to_element_numerator(&self, numerator: R::Element) -> <Self as Ring>::Element {
        Fraction {
            numerator,
            denominator: self.ring.one(),
        }
    }

    /// Create a fraction from a numerator and denominator. If `do_gcd` is
    /// set, common factors are removed first. The denominator must be non-zero.
    pub fn to_element(
        &self,
        mut numerator: R::Element,
        mut denominator: R::Element,
        do_gcd: bool,
    ) -> <Self as Ring>::Element {
        if R::is_zero(&denominator) {
            panic!("Division by zero");
        }

        if do_gcd {
            let g = self.ring.gcd(&numerator, &denominator);
            if !self.ring.is_one(&g) {
                numerator = self.ring.quot_rem(&numerator, &g).0;
                denominator = self.ring.quot_rem(&denominator, &g).0;
            }
        }

        let f = self.ring.get_normalization_factor(&denominator);

        if self.ring.is_one(&f) {
            Fraction {
                numerator,
                denominator,
            }
        } else {
            Fraction {
                numerator: self.ring.mul(&numerator, &f),
                denominator: self.ring.mul(&denominator, &f),
            }
        }
    }
}

impl<R: Ring> Display for FractionField<R> {
    fn fmt(&self, _f: &mut Formatter<'_>) -> std::fmt::Result {
        Ok(())
    }
}

pub trait FractionNormalization: Ring {
    /// Get the factor that normalizes the element `a`.
    /// For the integers, this is the sign of `a`.
    fn get_normalization_factor(&self, a: &Self::Element) -> Self::Element;
}

impl FractionNormalization for Z {
    fn get_normalization_factor(&self, a: &Integer) -> Integer {
        if a.is_negative() {
            (-1).into()
        } else {
            1.into()
        }
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Fraction<R: Ring> {
    numerator: R::Element,
    denominator: R::Element,
}

impl<R: Ring> Fraction<R> {
    pub fn numerator_ref(&self) -> &R::Element {
        &self.numerator
    }

    pub fn denominator_ref(&self) -> &R::Element {
        &self.denominator
    }
}

impl<R: EuclideanDomain + FractionNormalization> Ring for FractionField<R> {
    type Element = Fraction<R>;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        let r = &self.ring;

        if a.denominator == b.denominator {
            let num = r.add(&a.numerator, &b.numerator);
            let g = r.gcd(&num, &a.denominator);
            if !r.is_one(&g) {
                return Fraction {
                    numerator: r.quot_rem(&num, &g).0,
                    denominator: r.quot_rem(&a.denominator, &g).0,
                };
            } else {
                return Fraction {
                    numerator: num,
                    denominator: a.denominator.clone(),
                };
            }
        }

        let denom_gcd = r.gcd(&a.denominator, &b.denominator);

        let mut a_den_red = Cow::Borrowed(&a.denominator);
        let mut b_den_red = Cow::Borrowed(&b.denominator);

        if !r.is_one(&denom_gcd) {
            a_den_red = Cow::Owned(r.quot_rem(&a.denominator, &denom_gcd).0);
            b_den_red = Cow::Owned(r.quot_rem(&b.denominator, &denom_gcd).0);
        }

        let num1 = r.mul(&a.numerator, &b_den_red);
        let num2 = r.mul(&b.numerator, &a_den_red);
        let mut num = r.add(&num1, &num2);
        let mut den = r.mul(b_den_red.as_ref(), &a.denominator);

        let g = r.gcd(&num, &denom_gcd);

        if !r.is_one(&g) {
            num = r.quot_rem(&num, &g).0;
            den = r.quot_rem(&den, &g).0;
        }

        Fraction {
            numerator: num,
            denominator: den,
        }
    }

    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.add(a, &self.neg(b))
    }

    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        let r = &self.ring;
        let gcd1 = r.gcd(&a.numerator, &b.denominator);
        let gcd2 = r.gcd(&a.denominator, &b.numerator);

        if r.is_one(&gcd1) {
            if r.is_one(&gcd2) {
                Fraction {
                    numerator: r.mul(&a.numerator, &b.numerator),
                    denominator: r.mul(&a.denominator, &b.denominator),
                }
            } else {
                Fraction {
                    numerator: r.mul(&a.numerator, &r.quot_rem(&b.numerator, &gcd2).0),
                    denominator: r.mul(&r.quot_rem(&a.denominator, &gcd2).0, &b.denominator),
                }
            }
        } else if r.is_one(&gcd2) {
            Fraction {
                numerator: r.mul(&r.quot_rem(&a.numerator, &gcd1).0, &b.numerator),
                denominator: r.mul(&a.denominator, &r.quot_rem(&b.denominator, &gcd1).0),
            }
        } else {
            Fraction {
                numerator: r.mul(
                    &r.quot_rem(&a.numerator, &gcd1).0,
                    &r.quot_rem(&b.numerator, &gcd2).0,
                ),
                denominator: r.mul(
                    &r.quot_rem(&a.denominator, &gcd2).0,
                    &r.quot_rem(&b.denominator, &gcd1).0,
                ),
            }
        }
    }

    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.add(a, b);
    }

    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.mul(a, b);
    }

    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        self.add_assign(a, &self.mul(b, c));
    }

    fn neg(&self, a: &Self::Element) -> Self::Element {
        Fraction {
            numerator: self.ring.neg(&a.numerator),
            denominator: a.denominator.clone(),
        }
    }

    fn zero(&self) -> Self::Element {
        Fraction {
            numerator: self.ring.zero(),
            denominator: self.ring.one(),
        }
    }

    fn one(&self) -> Self::Element {
        Fraction {
            numerator: self.ring.one(),
            denominator: self.ring.one(),
        }
    }

    fn pow(&self, b: &Self::Element, e: u64) -> Self::Element {
        Fraction {
            numerator: self.ring.pow(&b.numerator, e),
            denominator: self.ring.pow(&b.denominator, e),
        }
    }

    fn is_zero(a: &Self::Element) -> bool {
        R::is_zero(&a.numerator)
    }

    fn is_one(&self, a: &Self::Element) -> bool {
        self.ring.is_one(&a.numerator) && self.ring.is_one(&a.denominator)
    }

    fn format<W: Write>(
        &self,
        element: &Self::Element,
        opts: &PrintOptions,
        mut state: PrintState,
        f: &mut W,
    ) -> Result<bool, Error> {
        let has_denom = !self.ring.is_one(&element.denominator);

        let write_par = has_denom && state.in_exp;
        if write_par {
            if state.in_sum {
                state.in_sum = false;
                f.write_char('+')?;
            }

            f.write_char('(')?;
            state.in_exp = false;
        }

        if self.ring.format(
            &element.numerator,
            opts,
            PrintState {
                in_product: state.in_product || has_denom,
                suppress_one: state.suppress_one && !has_denom,
                ..state
            },
            f,
        )? {
            return Ok(true);
        };

        if has_denom {
            f.write_char('/')?;
            self.ring
                .format(&element.denominator, opts, state.step(false, true, true), f)?;
        }

        if write_par {
            f.write_char(')')?;
        }

        Ok(false)
    }
}

impl<R: EuclideanDomain + FractionNormalization> EuclideanDomain for FractionField<R> {
    fn quot_rem(&self, a: &Self::Element, b: &Self::Element) -> (Self::Element, Self::Element) {
        (self.div(a, b), self.zero())
    }

    fn gcd(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        let gcd_num = self.ring.gcd(&a.numerator, &b.numerator);
        let gcd_den = self.ring.gcd(&a.denominator, &b.denominator);

        let d1 = self.ring.quot_rem(&a.denominator, &gcd_den).0;
        let lcm = self.ring.mul(&d1, &b.denominator);

        self.to_element(gcd_num, lcm, false)
    }
}

impl<R: EuclideanDomain + FractionNormalization> Field for FractionField<R> {
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.mul(a, &self.inv(b))
    }

    fn inv(&self, a: &Self::Element) -> Self::Element {
        if R::is_zero(&a.numerator) {
            panic!("Division by zero");
        }

        let f = self.ring.get_normalization_factor(&a.numerator);
        Fraction {
            numerator: self.ring.mul(&a.denominator, &f),
            denominator: self.ring.mul(&a.numerator, &f),
        }
    }
}

impl Rational {
    /// Create a new rational number in lowest terms. Panics when `den` is zero.
    pub fn new(num: Integer, den: Integer) -> Rational {
        Q.to_element(num, den, true)
    }

    pub fn zero() -> Rational {
        Q.zero()
    }

    pub fn one() -> Rational {
        Q.one()
    }

    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.numerator.is_one() && self.denominator.is_one()
    }

    pub fn is_integer(&self) -> bool {
        self.denominator.is_one()
    }

    pub fn is_negative(&self) -> bool {
        self.numerator.is_negative()
    }

    pub fn inv(&self) -> Rational {
        Q.inv(self)
    }

    /// Compute `self^e`. Negative powers of zero panic.
    pub fn pow(&self, e: i64) -> Rational {
        if e < 0 {
            Q.pow(&self.inv(), e.unsigned_abs())
        } else {
            Q.pow(self, e as u64)
        }
    }
}

impl From<i64> for Rational {
    #[inline]
    fn from(value: i64) -> Self {
        Q.to_element_numerator(value.into())
    }
}

impl From<i32> for Rational {
    #[inline]
    fn from(value: i32) -> Self {
        Q.to_element_numerator(value.into())
    }
}

impl From<(i64, i64)> for Rational {
    #[inline]
    fn from((num, den): (i64, i64)) -> Self {
        Rational::new(num.into(), den.into())
    }
}

impl From<Integer> for Rational {
    #[inline]
    fn from(value: Integer) -> Self {
        Q.to_element_numerator(value)
    }
}

impl FromStr for Rational {
    type Err = &'static str;

    /// Parse `n` or `n/d`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some((n, d)) = s.split_once('/') {
            let n: Integer = n.trim().parse()?;
            let d: Integer = d.trim().parse()?;
            if d.is_zero() {
                return Err("Denominator is zero");
            }
            Ok(Rational::new(n, d))
        } else {
            Ok(Rational::from(s.parse::<Integer>()?))
        }
    }
}

impl Display for Rational {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Q.format(self, &PrintOptions::default(), PrintState::from_fmt(f), f)
            .map(|_| ())
    }
}

impl PartialOrd for Rational {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        // denominators are positive
        (&self.numerator * &other.denominator).cmp(&(&other.numerator * &self.denominator))
    }
}

impl<'a, 'b> Add<&'b Rational> for &'a Rational {
    type Output = Rational;

    fn add(self, rhs: &'b Rational) -> Rational {
        Q.add(self, rhs)
    }
}

impl<'a, 'b> Sub<&'b Rational> for &'a Rational {
    type Output = Rational;

    fn sub(self, rhs: &'b Rational) -> Rational {
        Q.sub(self, rhs)
    }
}

impl<'a, 'b> Mul<&'b Rational> for &'a Rational {
    type Output = Rational;

    fn mul(self, rhs: &'b Rational) -> Rational {
        Q.mul(self, rhs)
    }
}

impl<'a, 'b> Div<&'b Rational> for &'a Rational {
    type Output = Rational;

    fn div(self, rhs: &'b Rational) -> Rational {
        Q.div(self, rhs)
    }
}

impl<'a> Neg for &'a Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Q.neg(self)
    }
}

impl Neg for Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Q.neg(&self)
    }
}

#[cfg(test)]
mod test {
    use super::{Rational, Q};
    use crate::domains::{EuclideanDomain, Field, Ring};

    #[test]
    fn normalization() {
        let a = Rational::from((6, -4));
        assert_eq!(a, Rational::from((-3, 2)));
        assert_eq!(format!("{}", a), "-3/2");
        assert_eq!(format!("{}", Rational::from((8, 4))), "2");
    }

    #[test]
    fn arithmetic() {
        let a = Rational::from((1, 6));
        let b = Rational::from((1, 3));
        assert_eq!(&a + &b, Rational::from((1, 2)));
        assert_eq!(&a - &b, Rational::from((-1, 6)));
        assert_eq!(&a * &b, Rational::from((1, 18)));
        assert_eq!(&a / &b, Rational::from((1, 2)));
        assert_eq!(Q.inv(&Rational::from((-2, 3))), Rational::from((-3, 2)));
        assert_eq!(Rational::from((2, 3)).pow(-2), Rational::from((9, 4)));
    }

    #[test]
    fn gcd() {
        let g = Q.gcd(&Rational::from((2, 3)), &Rational::from((4, 9)));
        assert_eq!(g, Rational::from((2, 9)));
    }

    #[test]
    fn ordering_and_parse() {
        assert!(Rational::from((-1, 2)) < Rational::from((1, 3)));
        assert_eq!("3/-6".parse::<Rational>(), Ok(Rational::from((-1, 2))));
        assert_eq!(" 7 ".parse::<Rational>(), Ok(Rational::from(7)));
        assert!("1/0".parse::<Rational>().is_err());
    }

    #[test]
    fn printing_in_context() {
        let a = Rational::from((1, 16));
        assert_eq!(format!("{:+}", Q.printer(&a)), "+1/16");
        assert!(!Q.is_one(&a));
    }

    #[test]
    #[should_panic]
    fn invert_zero() {
        Q.inv(&Rational::zero());
    }
}
