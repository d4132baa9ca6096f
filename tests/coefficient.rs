use std::process::Command;

use genfunc::{
    atom::Atom,
    domains::rational::Rational,
    error::Error,
    extract::{SeriesCoefficientExtractor, LITERAL_DENOMINATOR, LITERAL_NUMERATOR},
    poly::Variable,
    recurrence::LinearRecurrence,
};

#[test]
fn coefficient_of_t10() {
    let report = SeriesCoefficientExtractor::literal().extract().unwrap();
    assert_eq!(report.coefficient, Rational::from(43600));
    assert_eq!(report.power, 10);
    assert_eq!(format!("{}", report), "Coefficient of t^10: 43600");
}

#[test]
fn truncated_series() {
    let expected: Vec<Rational> = [1, 4, 4, 25, 49, 202, 502, 1723, 4747, 15100, 43600]
        .into_iter()
        .map(|x: i64| x.into())
        .collect();

    let s = SeriesCoefficientExtractor::literal().series().unwrap();
    assert_eq!(s.coefficients(), expected);
    assert_eq!(s.absolute_order(), 11);
    assert_eq!(
        format!("{}", s),
        "1+4*t+4*t^2+25*t^3+49*t^4+202*t^5+502*t^6+1723*t^7+4747*t^8+15100*t^9+43600*t^10+O(t^11)"
    );
}

#[test]
fn combined_rational_function() {
    let r = SeriesCoefficientExtractor::literal()
        .rational_function()
        .unwrap();

    // (1+t-11t^2+12t^3)/((1-t)(1-2t-5t^2+6t^3)), scaled to a monic denominator
    assert_eq!(
        format!("{}", r),
        "(-1/6-1/6*t+11/6*t^2-2*t^3)/(-1/6+1/2*t+1/2*t^2-11/6*t^3+t^4)"
    );
    assert_eq!(r, LinearRecurrence::literal().generating_function(&Variable::new("t")));
}

#[test]
fn high_order_agrees_with_recurrence() {
    let rec = LinearRecurrence::literal();
    let s = Atom::parse(&format!("({})/({})", LITERAL_NUMERATOR, LITERAL_DENOMINATOR))
        .unwrap()
        .series(&Variable::new("t"), &Rational::zero(), 61)
        .unwrap();

    // the terms grow beyond the range of an i64
    let c60 = s.coefficient(60).unwrap();
    assert!(c60.numerator_ref().to_i64().is_none());
    assert_eq!(c60, rec.nth(60));
}

#[test]
fn other_variable_name() {
    let report = SeriesCoefficientExtractor::from_strings(
        &LITERAL_NUMERATOR.replace('t', "x"),
        &LITERAL_DENOMINATOR.replace('t', "x"),
        "x",
    )
    .unwrap()
    .extract()
    .unwrap();
    assert_eq!(format!("{}", report), "Coefficient of x^10: 43600");
}

#[test]
fn wrong_variable() {
    let e = SeriesCoefficientExtractor::from_strings(LITERAL_NUMERATOR, LITERAL_DENOMINATOR, "x")
        .unwrap();
    assert_eq!(
        e.extract(),
        Err(Error::UnknownVariable {
            expected: "x".into(),
            found: "t".into()
        })
    );
}

#[test]
fn cli_default_output() {
    let out = Command::new(env!("CARGO_BIN_EXE_genfunc"))
        .env_remove("GENFUNC_NUMERATOR")
        .env_remove("GENFUNC_DENOMINATOR")
        .env_remove("GENFUNC_POWER")
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    assert!(out.status.success());
    assert_eq!(
        String::from_utf8(out.stdout).unwrap(),
        "Coefficient of t^10: 43600\n"
    );
}

#[test]
fn cli_pole_fails() {
    let out = Command::new(env!("CARGO_BIN_EXE_genfunc"))
        .args(["--numerator", "1", "--denominator", "t"])
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert_eq!(stderr.matches("pole at t = 0").count(), 1, "{}", stderr);
}

#[test]
fn cli_power_too_large() {
    let out = Command::new(env!("CARGO_BIN_EXE_genfunc"))
        .args(["-k", "4294967295"])
        .env_remove("GENFUNC_NUMERATOR")
        .env_remove("GENFUNC_DENOMINATOR")
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("Power 4294967295 is too large"), "{}", stderr);
}

#[test]
fn cli_show_series() {
    let out = Command::new(env!("CARGO_BIN_EXE_genfunc"))
        .args(["-n", "1", "-d", "2-t", "-k", "3", "--show-series"])
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    assert!(out.status.success());
    assert_eq!(
        String::from_utf8(out.stdout).unwrap(),
        "Coefficient of t^3: 1/16\n1/2+1/4*t+1/8*t^2+1/16*t^3+O(t^4)\n"
    );
}
