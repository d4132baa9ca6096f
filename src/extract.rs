//! Extraction of a single coefficient from the power series of a rational function.
//!
//! # Examples
//! ```
//! use genfunc::extract::SeriesCoefficientExtractor;
//!
//! let report = SeriesCoefficientExtractor::literal().extract().unwrap();
//! assert_eq!(report.to_string(), "Coefficient of t^10: 43600");
//! ```
use std::fmt;

use tracing::{debug, trace};

use crate::{
    atom::Atom,
    domains::{
        rational::{Rational, Q},
        rational_polynomial::RationalPolynomial,
        Ring,
    },
    error::{Error, Result},
    poly::{series::Series, Variable},
    printer::{format_shifted_variable, PrintOptions},
};

/// The numerator of the built-in generating function.
pub const LITERAL_NUMERATOR: &str = "1 + 2*t - 9*t^2 + 3*t^3/(1-t)";
/// The denominator of the built-in generating function.
pub const LITERAL_DENOMINATOR: &str = "1 - 2*t - 5*t^2 + 6*t^3";
pub const DEFAULT_VARIABLE: &str = "t";
pub const DEFAULT_POWER: u32 = 10;
/// The largest power whose coefficient can be extracted.
pub const MAX_POWER: u32 = u16::MAX as u32;

/// Computes the coefficient of `(x-a)^k` in the series expansion of an expression
/// around `x = a`.
#[derive(Clone, Debug)]
pub struct SeriesCoefficientExtractor {
    expr: Atom,
    variable: Variable,
    point: Rational,
    power: u32,
}

/// The outcome of an extraction. Its [Display] is the labelled result line.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CoefficientReport {
    pub variable: Variable,
    pub point: Rational,
    pub power: u32,
    pub coefficient: Rational,
}

impl fmt::Display for CoefficientReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Coefficient of ")?;
        format_shifted_variable(
            &Q,
            self.variable.name(),
            &self.point,
            &PrintOptions::default(),
            f,
        )?;
        write!(f, "^{}: {}", self.power, Q.printer(&self.coefficient))
    }
}

impl SeriesCoefficientExtractor {
    /// Expand `expr` in `variable` around zero and extract the coefficient of `variable^10`.
    pub fn new(expr: Atom, variable: Variable) -> SeriesCoefficientExtractor {
        SeriesCoefficientExtractor {
            expr,
            variable,
            point: Rational::zero(),
            power: DEFAULT_POWER,
        }
    }

    /// The generating function `(1+2t-9t^2+3t^3/(1-t))/(1-2t-5t^2+6t^3)`.
    pub fn literal() -> SeriesCoefficientExtractor {
        let t = Atom::new_var(DEFAULT_VARIABLE);
        let one = Atom::new_num(1);

        let numerator =
            &one + &(&t * 2) - &t.npow(2) * 9 + &t.npow(3) * 3 / (&one - &t);
        let denominator = &one - &(&t * 2) - &t.npow(2) * 5 + &t.npow(3) * 6;

        SeriesCoefficientExtractor::new(numerator / denominator, Variable::new(DEFAULT_VARIABLE))
    }

    /// Parse the numerator and denominator of the expression.
    pub fn from_strings(
        numerator: &str,
        denominator: &str,
        variable: &str,
    ) -> Result<SeriesCoefficientExtractor> {
        let num = Atom::parse(numerator)?;
        let den = Atom::parse(denominator)?;
        Ok(SeriesCoefficientExtractor::new(num / den, Variable::new(variable)))
    }

    /// Set the expansion point.
    pub fn with_point(mut self, point: Rational) -> Self {
        self.point = point;
        self
    }

    /// Set the power of which the coefficient is extracted.
    pub fn with_power(mut self, power: u32) -> Self {
        self.power = power;
        self
    }

    pub fn expr(&self) -> &Atom {
        &self.expr
    }

    pub fn variable(&self) -> &Variable {
        &self.variable
    }

    pub fn point(&self) -> &Rational {
        &self.point
    }

    pub fn power(&self) -> u32 {
        self.power
    }

    /// Combine the expression into a single rational function in lowest terms.
    pub fn rational_function(&self) -> Result<RationalPolynomial<Q>> {
        let r = self.expr.to_rational_polynomial(&self.variable)?;
        trace!("{} = {}", self.expr, r);
        Ok(r)
    }

    /// Expand up to and including the power of interest.
    pub fn series(&self) -> Result<Series<Q>> {
        if self.power > MAX_POWER {
            return Err(Error::PowerTooLarge {
                power: self.power,
                max: MAX_POWER,
            });
        }

        let r = self.rational_function()?;

        debug!(
            "Expanding {} in {} around {} up to order {}",
            r,
            self.variable,
            Q.printer(&self.point),
            self.power + 1
        );

        let s = r.series(&self.point, self.power as usize + 1)?;
        trace!("Series: {}", s);
        Ok(s)
    }

    /// Compute the coefficient.
    pub fn extract(&self) -> Result<CoefficientReport> {
        let s = self.series()?;

        let coefficient = s
            .coefficient(self.power as usize)
            .unwrap_or_else(Rational::zero);

        debug!("Coefficient {}: {}", self.power, coefficient);

        Ok(CoefficientReport {
            variable: self.variable.clone(),
            point: self.point.clone(),
            power: self.power,
            coefficient,
        })
    }
}

#[cfg(test)]
mod test {
    use crate::{
        atom::Atom,
        domains::rational::Rational,
        error::Error,
        poly::Variable,
        recurrence::LinearRecurrence,
    };

    use super::{SeriesCoefficientExtractor, LITERAL_DENOMINATOR, LITERAL_NUMERATOR, MAX_POWER};

    #[test]
    fn literal() {
        let e = SeriesCoefficientExtractor::literal();
        let report = e.extract().unwrap();
        assert_eq!(report.coefficient, Rational::from(43600));
        assert_eq!(report.to_string(), "Coefficient of t^10: 43600");

        // idempotent
        assert_eq!(e.extract().unwrap(), report);
    }

    #[test]
    fn literal_matches_parsed() {
        let parsed =
            SeriesCoefficientExtractor::from_strings(LITERAL_NUMERATOR, LITERAL_DENOMINATOR, "t")
                .unwrap();
        assert_eq!(parsed.expr(), SeriesCoefficientExtractor::literal().expr());
        assert_eq!(
            parsed.expr().to_string(),
            "(1+2*t-9*t^2+3*t^3/(1-t))/(1-2*t-5*t^2+6*t^3)"
        );
    }

    #[test]
    fn all_coefficients() {
        let s = SeriesCoefficientExtractor::literal().series().unwrap();
        assert_eq!(
            s.coefficients(),
            LinearRecurrence::literal().terms(10)
        );
        assert_eq!(s.coefficient(0), Some(Rational::one()));
        assert_eq!(s.coefficient(11), None);
    }

    #[test]
    fn lower_powers() {
        let e = SeriesCoefficientExtractor::literal();
        for (k, c) in LinearRecurrence::literal().terms(10).into_iter().enumerate() {
            let r = e.clone().with_power(k as u32).extract().unwrap();
            assert_eq!(r.coefficient, c);
        }
    }

    #[test]
    fn rational_coefficient() {
        let e = SeriesCoefficientExtractor::from_strings("1", "2-t", "t")
            .unwrap()
            .with_power(3);
        assert_eq!(e.extract().unwrap().to_string(), "Coefficient of t^3: 1/16");
    }

    #[test]
    fn missing_term_is_zero() {
        let e = SeriesCoefficientExtractor::new(Atom::parse("1+t^2").unwrap(), Variable::new("t"));
        assert_eq!(e.extract().unwrap().coefficient, Rational::zero());
    }

    #[test]
    fn shifted_point() {
        // 1/t = sum (-1)^k (t-1)^k
        let e = SeriesCoefficientExtractor::from_strings("1", "t", "t")
            .unwrap()
            .with_point(Rational::one());

        for k in 0..6u32 {
            let r = e.clone().with_power(k).extract().unwrap();
            let expected = if k % 2 == 0 { 1 } else { -1 };
            assert_eq!(r.coefficient, Rational::from(expected));
        }

        assert_eq!(
            e.with_power(3).extract().unwrap().to_string(),
            "Coefficient of (t-1)^3: -1"
        );
    }

    #[test]
    fn power_out_of_range() {
        let e = SeriesCoefficientExtractor::literal().with_power(u32::MAX);
        assert_eq!(
            e.extract(),
            Err(Error::PowerTooLarge {
                power: u32::MAX,
                max: MAX_POWER
            })
        );
        assert!(e.series().is_err());
    }

    #[test]
    fn inverse_of_zero_in_denominator() {
        for den in ["0^-1", "(t-t)^-1"] {
            let e = SeriesCoefficientExtractor::from_strings("1", den, "t").unwrap();
            assert_eq!(e.extract(), Err(Error::DivisionByZero), "{}", den);
        }
    }

    #[test]
    fn pole() {
        let e = SeriesCoefficientExtractor::from_strings("1", "t", "t").unwrap();
        assert_eq!(
            e.extract(),
            Err(Error::Pole {
                variable: "t".into(),
                point: "0".into()
            })
        );

        let e = SeriesCoefficientExtractor::from_strings("t", "t", "t").unwrap();
        assert_eq!(e.extract().unwrap().coefficient, Rational::zero());
        assert_eq!(
            e.with_power(0).extract().unwrap().coefficient,
            Rational::one()
        );
    }
}
