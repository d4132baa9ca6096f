//! genfunc extracts exact coefficients from the power series of rational generating functions.
//!
//! Expressions are parsed into an [Atom](atom::Atom), combined into a single
//! rational function over the rationals and expanded as a truncated power series
//! by exact series inversion.
//!
//! For example:
//!
//! ```
//! use genfunc::{atom::Atom, domains::rational::Rational, poly::Variable};
//!
//! let g = Atom::parse("(1+2*t-9*t^2+3*t^3/(1-t))/(1-2*t-5*t^2+6*t^3)").unwrap();
//! let s = g.series(&Variable::new("t"), &Rational::zero(), 11).unwrap();
//! assert_eq!(s.coefficient(10), Some(Rational::from(43600)));
//! ```
//!
//! The [SeriesCoefficientExtractor](extract::SeriesCoefficientExtractor) wraps these steps.

pub mod atom;
pub mod domains;
pub mod error;
pub mod extract;
pub mod parser;
pub mod poly;
pub mod printer;
pub mod recurrence;

pub use error::{Error, Result};
