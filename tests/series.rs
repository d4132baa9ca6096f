use std::sync::Arc;

use proptest::prelude::*;

use genfunc::{
    atom::Atom,
    domains::rational::{Rational, Q},
    error::Error,
    poly::{series::Series, univariate::UnivariatePolynomial, Variable},
};

fn t() -> Arc<Variable> {
    Arc::new(Variable::new("t"))
}

// Strategy for generating small rational numbers
fn small_rational() -> impl Strategy<Value = Rational> {
    (-50i64..50i64, 1i64..10i64).prop_map(|(n, d)| Rational::from((n, d)))
}

// Strategy for generating series with an invertible constant term
fn invertible_series() -> impl Strategy<Value = Series<Q>> {
    (
        small_rational().prop_filter("constant term must be non-zero", |c| !c.is_zero()),
        proptest::collection::vec(small_rational(), 0..6),
        small_rational(),
        1usize..12,
    )
        .prop_map(|(c0, rest, point, order)| {
            let mut coeffs = vec![c0];
            coeffs.extend(rest);
            let p = UnivariatePolynomial::from_coefficients(&Q, coeffs, t());
            // shift so that the series around `point` has constant term c0
            let p = p.shift_variable(&-&point);
            Series::from_polynomial(&p, point, order)
        })
}

proptest! {
    #[test]
    fn inverse_is_reciprocal(s in invertible_series()) {
        let inv = s.inv().unwrap();
        let prod = &s * &inv;
        prop_assert!(prod.is_one());
        prop_assert_eq!(prod.absolute_order(), s.absolute_order());
    }

    #[test]
    fn division_undoes_multiplication(a in invertible_series(), b in invertible_series()) {
        let b = Series::from_polynomial(
            &UnivariatePolynomial::from_coefficients(&Q, b.coefficients(), t())
                .shift_variable(&-&a.get_expansion_point()),
            a.get_expansion_point(),
            a.absolute_order(),
        );

        let q = (&a * &b).div(&b).unwrap();
        prop_assert_eq!(q, a);
    }

    #[test]
    fn shift_round_trip(coeffs in proptest::collection::vec(small_rational(), 0..8), a in small_rational()) {
        let p = UnivariatePolynomial::from_coefficients(&Q, coeffs, t());
        prop_assert_eq!(p.shift_variable(&a).shift_variable(&-&a), p.clone());
        prop_assert_eq!(p.shift_variable(&a).get_constant(), p.evaluate(&a));
    }
}

#[test]
fn pole_at_zero() {
    let a = Atom::parse("1/t").unwrap();
    assert_eq!(
        a.series(&Variable::new("t"), &Rational::zero(), 5),
        Err(Error::Pole {
            variable: "t".into(),
            point: "0".into()
        })
    );
}

#[test]
fn removable_pole() {
    let a = Atom::parse("t/t").unwrap();
    let s = a.series(&Variable::new("t"), &Rational::zero(), 3).unwrap();
    assert!(s.is_one());

    let b = Atom::parse("(t^2-1)/(t-1)").unwrap();
    let s = b.series(&Variable::new("t"), &Rational::one(), 3).unwrap();
    assert_eq!(format!("{}", s), "2+(t-1)+O((t-1)^3)");
}

#[test]
fn pole_at_point() {
    let a = Atom::parse("1/(1-3t)").unwrap();
    assert_eq!(
        a.series(&Variable::new("t"), &Rational::from((1, 3)), 4),
        Err(Error::Pole {
            variable: "t".into(),
            point: "1/3".into()
        })
    );
}

#[test]
fn fractional_point() {
    // 1/t around 1/2: 2 - 4(t-1/2) + 8(t-1/2)^2 - ...
    let a = Atom::parse("1/t").unwrap();
    let s = a
        .series(&Variable::new("t"), &Rational::from((1, 2)), 4)
        .unwrap();
    assert_eq!(format!("{}", s), "2-4*(t-1/2)+8*(t-1/2)^2-16*(t-1/2)^3+O((t-1/2)^4)");
}
