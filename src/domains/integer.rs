use std::{
    cmp::Ordering,
    fmt::{Display, Error, Formatter, Write},
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub},
    str::FromStr,
};

use rug::Integer as MultiPrecisionInteger;

use crate::printer::{PrintOptions, PrintState};

use super::{EuclideanDomain, Ring};

/// The integer ring.
pub type Z = IntegerRing;
/// The integer ring.
pub const Z: IntegerRing = IntegerRing::new();

/// The integer ring.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct IntegerRing;

impl Default for IntegerRing {
    fn default() -> Self {
        Self::new()
    }
}

impl IntegerRing {
    pub const fn new() -> IntegerRing {
        IntegerRing
    }
}

impl Display for IntegerRing {
    fn fmt(&self, _f: &mut Formatter<'_>) -> std::fmt::Result {
        Ok(())
    }
}

/// An arbitrary-precision integer. Values that fit in an `i64` are always
/// stored as [Integer::Natural], so that structural equality is value equality.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Integer {
    Natural(i64),
    Large(MultiPrecisionInteger),
}

macro_rules! from_with_cast {
    ($base: ty) => {
        impl From<$base> for Integer {
            #[inline]
            fn from(value: $base) -> Self {
                Integer::Natural(value as i64)
            }
        }

        impl PartialEq<$base> for Integer {
            #[inline]
            fn eq(&self, other: &$base) -> bool {
                match self {
                    Integer::Natural(n) => *n == *other as i64,
                    _ => false,
                }
            }
        }

        impl PartialEq<Integer> for $base {
            #[inline]
            fn eq(&self, other: &Integer) -> bool {
                other == self
            }
        }
    };
}

from_with_cast!(i8);
from_with_cast!(i16);
from_with_cast!(i32);
from_with_cast!(i64);
from_with_cast!(u8);
from_with_cast!(u16);
from_with_cast!(u32);

impl From<u64> for Integer {
    #[inline]
    fn from(value: u64) -> Self {
        if value <= i64::MAX as u64 {
            Integer::Natural(value as i64)
        } else {
            Integer::Large(value.into())
        }
    }
}

impl From<usize> for Integer {
    #[inline]
    fn from(value: usize) -> Self {
        Integer::from(value as u64)
    }
}

impl From<i128> for Integer {
    #[inline]
    fn from(value: i128) -> Self {
        if value >= i64::MIN as i128 && value <= i64::MAX as i128 {
            Integer::Natural(value as i64)
        } else {
            Integer::Large(value.into())
        }
    }
}

impl From<MultiPrecisionInteger> for Integer {
    /// Convert from a multi-precision integer to an Integer, potentially
    /// downcasting the number.
    #[inline]
    fn from(n: MultiPrecisionInteger) -> Self {
        if let Some(n) = n.to_i64() {
            Integer::Natural(n)
        } else {
            Integer::Large(n)
        }
    }
}

impl FromStr for Integer {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() <= 18 {
            if let Ok(n) = s.parse::<i64>() {
                return Ok(Integer::Natural(n));
            }
        }

        if let Ok(n) = s.parse::<MultiPrecisionInteger>() {
            Ok(Integer::from(n))
        } else {
            Err("Could not parse integer")
        }
    }
}

impl std::fmt::Debug for Integer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Natural(n) => Display::fmt(n, f),
            Self::Large(n) => Display::fmt(n, f),
        }
    }
}

impl Display for Integer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Natural(n) => Display::fmt(n, f),
            Self::Large(n) => Display::fmt(n, f),
        }
    }
}

impl Integer {
    pub fn new(num: i64) -> Integer {
        Integer::Natural(num)
    }

    #[inline]
    pub fn zero() -> Integer {
        Integer::Natural(0)
    }

    #[inline]
    pub fn one() -> Integer {
        Integer::Natural(1)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        matches!(self, Integer::Natural(0))
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        matches!(self, Integer::Natural(1))
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        match self {
            Integer::Natural(n) => *n < 0,
            Integer::Large(r) => r.cmp0() == Ordering::Less,
        }
    }

    /// Convert to an `i64`, if the value fits.
    #[inline]
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Integer::Natural(n) => Some(*n),
            Integer::Large(_) => None,
        }
    }

    pub fn to_multi_prec(&self) -> MultiPrecisionInteger {
        match self {
            Integer::Natural(n) => MultiPrecisionInteger::from(*n),
            Integer::Large(l) => l.clone(),
        }
    }

    /// Compute `self^e` by repeated squaring.
    pub fn pow(&self, mut e: u64) -> Integer {
        if e == 0 {
            return Integer::one();
        }

        let mut x = self.clone();
        let mut y = Integer::one();
        while e != 1 {
            if e % 2 == 1 {
                y = &y * &x;
                e -= 1;
            }

            x = &x * &x;
            e /= 2;
        }

        &x * &y
    }

    /// Compute the non-negative greatest common divisor.
    pub fn gcd(&self, b: &Integer) -> Integer {
        match (self, b) {
            (Integer::Natural(n1), Integer::Natural(n2)) => {
                let (mut a, mut b) = (n1.unsigned_abs(), n2.unsigned_abs());
                while b != 0 {
                    let t = a % b;
                    a = b;
                    b = t;
                }
                Integer::from(a)
            }
            _ => Integer::from(self.to_multi_prec().gcd(&b.to_multi_prec())),
        }
    }

    /// Euclidean division: the remainder is always non-negative.
    ///
    /// Panics when `b` is zero.
    pub fn quot_rem(&self, b: &Integer) -> (Integer, Integer) {
        if b.is_zero() {
            panic!("Cannot divide by zero");
        }

        if let (Integer::Natural(n1), Integer::Natural(n2)) = (self, b) {
            if let Some(q) = n1.checked_div_euclid(*n2) {
                return (Integer::Natural(q), Integer::Natural(n1.rem_euclid(*n2)));
            }
        }

        let (q, r) = self.to_multi_prec().div_rem_euc(b.to_multi_prec());
        (Integer::from(q), Integer::from(r))
    }
}

impl PartialOrd for Integer {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Integer {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Integer::Natural(n1), Integer::Natural(n2)) => n1.cmp(n2),
            (Integer::Natural(_), Integer::Large(r2)) => {
                // a large integer never fits in an i64
                if r2.cmp0() == Ordering::Less {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            }
            (Integer::Large(r1), Integer::Natural(_)) => {
                if r1.cmp0() == Ordering::Less {
                    Ordering::Less
                } else {
                    Ordering::Greater
                }
            }
            (Integer::Large(r1), Integer::Large(r2)) => r1.cmp(r2),
        }
    }
}

impl<'a, 'b> Add<&'b Integer> for &'a Integer {
    type Output = Integer;

    #[inline]
    fn add(self, rhs: &'b Integer) -> Integer {
        if let (Integer::Natural(n1), Integer::Natural(n2)) = (self, rhs) {
            if let Some(num) = n1.checked_add(*n2) {
                return Integer::Natural(num);
            }
        }

        let mut r = self.to_multi_prec();
        match rhs {
            Integer::Natural(n) => r += *n,
            Integer::Large(l) => r += l,
        }
        Integer::from(r)
    }
}

impl<'a, 'b> Sub<&'b Integer> for &'a Integer {
    type Output = Integer;

    #[inline]
    fn sub(self, rhs: &'b Integer) -> Integer {
        if let (Integer::Natural(n1), Integer::Natural(n2)) = (self, rhs) {
            if let Some(num) = n1.checked_sub(*n2) {
                return Integer::Natural(num);
            }
        }

        let mut r = self.to_multi_prec();
        match rhs {
            Integer::Natural(n) => r -= *n,
            Integer::Large(l) => r -= l,
        }
        Integer::from(r)
    }
}

impl<'a, 'b> Mul<&'b Integer> for &'a Integer {
    type Output = Integer;

    #[inline]
    fn mul(self, rhs: &'b Integer) -> Integer {
        if let (Integer::Natural(n1), Integer::Natural(n2)) = (self, rhs) {
            if let Some(num) = n1.checked_mul(*n2) {
                return Integer::Natural(num);
            }
        }

        let mut r = self.to_multi_prec();
        match rhs {
            Integer::Natural(n) => r *= *n,
            Integer::Large(l) => r *= l,
        }
        Integer::from(r)
    }
}

macro_rules! forward_owned_binop {
    ($tr: ident, $f: ident) => {
        impl $tr<Integer> for Integer {
            type Output = Integer;

            #[inline]
            fn $f(self, rhs: Integer) -> Integer {
                (&self).$f(&rhs)
            }
        }

        impl<'a> $tr<&'a Integer> for Integer {
            type Output = Integer;

            #[inline]
            fn $f(self, rhs: &'a Integer) -> Integer {
                (&self).$f(rhs)
            }
        }
    };
}

forward_owned_binop!(Add, add);
forward_owned_binop!(Sub, sub);
forward_owned_binop!(Mul, mul);

impl<'a> AddAssign<&'a Integer> for Integer {
    #[inline]
    fn add_assign(&mut self, rhs: &'a Integer) {
        *self = &*self + rhs;
    }
}

impl<'a> MulAssign<&'a Integer> for Integer {
    #[inline]
    fn mul_assign(&mut self, rhs: &'a Integer) {
        *self = &*self * rhs;
    }
}

impl<'a> Neg for &'a Integer {
    type Output = Integer;

    #[inline]
    fn neg(self) -> Integer {
        match self {
            Integer::Natural(n) => match n.checked_neg() {
                Some(n) => Integer::Natural(n),
                None => Integer::Large(-MultiPrecisionInteger::from(*n)),
            },
            Integer::Large(r) => Integer::from(-r.clone()),
        }
    }
}

impl Neg for Integer {
    type Output = Integer;

    #[inline]
    fn neg(self) -> Integer {
        -&self
    }
}

impl Ring for IntegerRing {
    type Element = Integer;

    #[inline]
    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a + b
    }

    #[inline]
    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a - b
    }

    #[inline]
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a * b
    }

    #[inline]
    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a += b;
    }

    #[inline]
    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a *= b;
    }

    #[inline]
    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a += &(b * c);
    }

    #[inline]
    fn neg(&self, a: &Self::Element) -> Self::Element {
        -a
    }

    #[inline]
    fn zero(&self) -> Self::Element {
        Integer::zero()
    }

    #[inline]
    fn one(&self) -> Self::Element {
        Integer::one()
    }

    #[inline]
    fn pow(&self, b: &Self::Element, e: u64) -> Self::Element {
        b.pow(e)
    }

    #[inline]
    fn is_zero(a: &Self::Element) -> bool {
        a.is_zero()
    }

    #[inline]
    fn is_one(&self, a: &Self::Element) -> bool {
        a.is_one()
    }

    fn format<W: Write>(
        &self,
        element: &Self::Element,
        _opts: &PrintOptions,
        state: PrintState,
        f: &mut W,
    ) -> Result<bool, Error> {
        if state.in_sum && !element.is_negative() {
            f.write_char('+')?;
        }

        if state.suppress_one {
            if element.is_one() {
                return Ok(true);
            }

            if *element == -1 {
                f.write_char('-')?;
                return Ok(true);
            }
        }

        if element.is_negative() && state.in_exp {
            write!(f, "({})", element)?;
        } else {
            write!(f, "{}", element)?;
        }

        Ok(false)
    }
}

impl EuclideanDomain for IntegerRing {
    fn quot_rem(&self, a: &Self::Element, b: &Self::Element) -> (Self::Element, Self::Element) {
        a.quot_rem(b)
    }

    fn gcd(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a.gcd(b)
    }
}

#[cfg(test)]
mod test {
    use super::{Integer, Z};
    use crate::domains::{EuclideanDomain, Ring};

    #[test]
    fn overflow_promotes() {
        let a = Integer::new(i64::MAX);
        let b = &a + &Integer::one();
        assert!(matches!(b, Integer::Large(_)));
        assert_eq!(format!("{}", b), "9223372036854775808");

        // going back down normalizes
        let c = &b - &Integer::one();
        assert_eq!(c, Integer::Natural(i64::MAX));
    }

    #[test]
    fn neg_min() {
        let a = Integer::new(i64::MIN);
        let b = -&a;
        assert_eq!(format!("{}", b), "9223372036854775808");
        assert_eq!(-b, a);
    }

    #[test]
    fn pow_and_parse() {
        let a = Integer::new(3).pow(50);
        assert_eq!(
            a,
            "717897987691852588770249".parse::<Integer>().unwrap()
        );
        assert_eq!(Integer::new(-2).pow(3), Integer::new(-8));
    }

    #[test]
    fn euclidean_division() {
        let (q, r) = Z.quot_rem(&Integer::new(-7), &Integer::new(2));
        assert_eq!(q, Integer::new(-4));
        assert_eq!(r, Integer::new(1));

        let big = Integer::new(i64::MAX).pow(2);
        let (q, r) = Z.quot_rem(&-&big, &Integer::new(i64::MAX));
        assert_eq!(q, Integer::new(-i64::MAX));
        assert!(r.is_zero());
    }

    #[test]
    fn gcd() {
        assert_eq!(Z.gcd(&Integer::new(-12), &Integer::new(18)), Integer::new(6));

        let big = Integer::new(i64::MAX).pow(2);
        assert_eq!(big.gcd(&Integer::new(i64::MAX)), Integer::new(i64::MAX));
    }

    #[test]
    fn ordering() {
        let big = Integer::new(i64::MAX) + Integer::new(2);
        assert!(big > Integer::new(5));
        assert!(-&big < Integer::new(i64::MIN));
        assert!((-big).is_negative());
    }

    #[test]
    fn printing() {
        assert_eq!(format!("{}", Z.printer(&Integer::new(-5))), "-5");
        assert_eq!(format!("{:+}", Z.printer(&Integer::new(5))), "+5");
    }
}
