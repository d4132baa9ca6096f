//! Printing of expressions, ring elements, polynomials and series.
//!
//! Every printable structure implements a `format` function that takes
//! [PrintOptions] and a [PrintState]. The state tracks the surrounding context,
//! so that parentheses are only written where needed and a coefficient of one
//! can be suppressed in a product.
use std::fmt::{self, Error, Write};

use crate::{
    atom::Atom,
    domains::{
        integer::{Integer, Z},
        rational::{Rational, Q},
        Ring,
    },
};

/// Various options for printing expressions.
#[derive(Debug, Copy, Clone)]
pub struct PrintOptions {
    pub multiplication_operator: char,
    pub double_star_for_exponentiation: bool,
}

impl PrintOptions {
    pub const fn new() -> Self {
        Self {
            multiplication_operator: '*',
            double_star_for_exponentiation: false,
        }
    }

    /// Print the output in a sympy input format.
    pub const fn sympy() -> PrintOptions {
        Self {
            double_star_for_exponentiation: true,
            ..Self::new()
        }
    }

    fn write_pow<W: Write>(&self, f: &mut W) -> Result<(), Error> {
        if self.double_star_for_exponentiation {
            f.write_str("**")
        } else {
            f.write_char('^')
        }
    }
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// The current state useful for printing. These
/// settings will control, for example, if parentheses are needed
/// (e.g., a sum in a product),
/// and if 1 should be suppressed (e.g. in a product).
#[derive(Debug, Copy, Clone)]
pub struct PrintState {
    pub in_sum: bool,
    pub in_product: bool,
    pub suppress_one: bool,
    pub in_exp: bool,
}

impl Default for PrintState {
    fn default() -> Self {
        Self::new()
    }
}

impl PrintState {
    pub const fn new() -> PrintState {
        Self {
            in_sum: false,
            in_product: false,
            in_exp: false,
            suppress_one: false,
        }
    }

    pub fn from_fmt(f: &fmt::Formatter) -> PrintState {
        PrintState {
            in_sum: f.sign_plus(),
            ..Default::default()
        }
    }

    pub fn update_with_fmt(mut self, f: &fmt::Formatter) -> Self {
        self.in_sum = f.sign_plus();
        self
    }

    pub fn step(self, in_sum: bool, in_product: bool, in_exp: bool) -> Self {
        Self {
            in_sum,
            in_product,
            in_exp,
            suppress_one: false,
        }
    }
}

/// A printer for an [Atom] with custom [PrintOptions].
pub struct AtomPrinter<'a> {
    pub atom: &'a Atom,
    pub opts: PrintOptions,
}

impl<'a> AtomPrinter<'a> {
    pub fn new(atom: &'a Atom) -> AtomPrinter<'a> {
        AtomPrinter {
            atom,
            opts: PrintOptions::default(),
        }
    }

    pub fn new_with_options(atom: &'a Atom, opts: PrintOptions) -> AtomPrinter<'a> {
        AtomPrinter { atom, opts }
    }
}

impl<'a> fmt::Display for AtomPrinter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.atom
            .format(&self.opts, PrintState::from_fmt(f), f)
            .map(|_| ())
    }
}

impl Atom {
    pub fn format<W: Write>(
        &self,
        opts: &PrintOptions,
        state: PrintState,
        f: &mut W,
    ) -> Result<bool, Error> {
        match self {
            Atom::Num(n) => Q.format(n, opts, state, f),
            Atom::Var(v) => {
                if state.in_sum {
                    f.write_char('+')?;
                }
                f.write_str(v.name())?;
                Ok(false)
            }
            Atom::Add(args) => format_add(args, opts, state, f),
            Atom::Mul(args) => format_mul(args, opts, state, f),
            Atom::Pow(p) => match &p.1 {
                Atom::Num(e) if e.is_negative() => {
                    format_mul(std::slice::from_ref(self), opts, state, f)
                }
                _ => format_pow(&p.0, &p.1, opts, state, f),
            },
        }
    }

    pub fn printer(&self, opts: PrintOptions) -> AtomPrinter {
        AtomPrinter::new_with_options(self, opts)
    }
}

fn format_add<W: Write>(
    args: &[Atom],
    opts: &PrintOptions,
    mut state: PrintState,
    f: &mut W,
) -> Result<bool, Error> {
    let add_paren = state.in_product || state.in_exp;
    if add_paren {
        if state.in_sum {
            f.write_char('+')?;
        }
        f.write_char('(')?;
        state.in_sum = false;
    }

    for (i, a) in args.iter().enumerate() {
        a.format(
            opts,
            state.step(i > 0 || (state.in_sum && !add_paren), false, false),
            f,
        )?;
    }

    if add_paren {
        f.write_char(')')?;
    }

    Ok(false)
}

fn format_mul<W: Write>(
    args: &[Atom],
    opts: &PrintOptions,
    state: PrintState,
    f: &mut W,
) -> Result<bool, Error> {
    let mut coeff = Rational::one();
    let mut num = vec![];
    let mut den = vec![];
    for a in args {
        match a {
            Atom::Num(n) => coeff = &coeff * n,
            Atom::Pow(p) => match &p.1 {
                Atom::Num(e) if e.is_negative() => {
                    let e = -e;
                    if e.is_one() {
                        den.push(p.0.clone());
                    } else {
                        den.push(Atom::Pow(Box::new((p.0.clone(), Atom::Num(e)))));
                    }
                }
                _ => num.push(a),
            },
            _ => num.push(a),
        }
    }

    if num.is_empty() && den.is_empty() {
        return Q.format(&coeff, opts, state, f);
    }

    let suppressed = Z.format(
        coeff.numerator_ref(),
        opts,
        PrintState {
            suppress_one: !num.is_empty(),
            in_product: true,
            ..state
        },
        f,
    )?;

    for (i, a) in num.iter().enumerate() {
        if i > 0 || !suppressed {
            f.write_char(opts.multiplication_operator)?;
        }
        a.format(opts, state.step(false, true, false), f)?;
    }

    let den_coeff = coeff.denominator_ref();
    let den_count = den.len() + usize::from(!den_coeff.is_one());
    if den_count > 0 {
        f.write_char('/')?;

        let den_paren = den_count > 1 || matches!(den.first(), Some(Atom::Mul(_)));
        if den_paren {
            f.write_char('(')?;
        }

        let mut first = true;
        if !den_coeff.is_one() {
            Z.format(den_coeff, opts, state.step(false, true, false), f)?;
            first = false;
        }

        for a in &den {
            if !first {
                f.write_char(opts.multiplication_operator)?;
            }
            first = false;
            a.format(opts, state.step(false, true, false), f)?;
        }

        if den_paren {
            f.write_char(')')?;
        }
    }

    Ok(false)
}

fn format_pow<W: Write>(
    base: &Atom,
    exp: &Atom,
    opts: &PrintOptions,
    state: PrintState,
    f: &mut W,
) -> Result<bool, Error> {
    if state.in_sum {
        f.write_char('+')?;
    }

    let base_paren = match base {
        Atom::Var(_) => false,
        Atom::Num(n) => n.is_negative() || !n.is_integer(),
        _ => true,
    };

    if base_paren {
        f.write_char('(')?;
    }
    base.format(opts, state.step(false, false, false), f)?;
    if base_paren {
        f.write_char(')')?;
    }

    opts.write_pow(f)?;

    match exp {
        Atom::Var(_) => {
            exp.format(opts, state.step(false, false, true), f)?;
        }
        Atom::Num(n) if n.is_integer() && !n.is_negative() => {
            exp.format(opts, state.step(false, false, true), f)?;
        }
        _ => {
            f.write_char('(')?;
            exp.format(opts, state.step(false, false, false), f)?;
            f.write_char(')')?;
        }
    }

    Ok(false)
}

/// Write `v` or `(v-a)` for an expansion around `a`.
pub(crate) fn format_shifted_variable<R: Ring, W: Write>(
    ring: &R,
    name: &str,
    point: &R::Element,
    opts: &PrintOptions,
    f: &mut W,
) -> Result<(), Error> {
    if R::is_zero(point) {
        return f.write_str(name);
    }

    write!(f, "({}", name)?;
    ring.format(
        &ring.neg(point),
        opts,
        PrintState {
            in_sum: true,
            ..PrintState::new()
        },
        f,
    )?;
    f.write_char(')')
}

/// Write `c*v^e` as a term of a sum, suppressing unit coefficients and exponents.
pub(crate) fn format_term<R: Ring, W: Write>(
    ring: &R,
    coeff: &R::Element,
    var: &str,
    exp: usize,
    opts: &PrintOptions,
    state: PrintState,
    f: &mut W,
) -> Result<(), Error> {
    let suppressed = ring.format(
        coeff,
        opts,
        PrintState {
            in_product: exp > 0,
            suppress_one: exp > 0,
            ..state
        },
        f,
    )?;

    if exp == 0 {
        return Ok(());
    }

    if !suppressed {
        f.write_char(opts.multiplication_operator)?;
    }

    f.write_str(var)?;

    if exp > 1 {
        opts.write_pow(f)?;
        Z.format(&Integer::from(exp), opts, state.step(false, false, true), f)?;
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use crate::{atom::Atom, printer::PrintOptions};

    #[test]
    fn sums_and_products() {
        let a = Atom::parse("1 + 2*t - 9*t^2 + 3*t^3/(1-t)").unwrap();
        assert_eq!(format!("{}", a), "1+2*t-9*t^2+3*t^3/(1-t)");
    }

    #[test]
    fn fractions() {
        let a = Atom::parse("t/2 - 1/(2*t^2)").unwrap();
        assert_eq!(format!("{}", a), "t/2-1/(2*t^2)");
    }

    #[test]
    fn powers() {
        let a = Atom::parse("(1-t)^-2 + (2*t)^3").unwrap();
        assert_eq!(format!("{}", a), "1/(1-t)^2+(2*t)^3");

        let b = Atom::parse("(-2)^t").unwrap();
        assert_eq!(format!("{}", b), "(-2)^t");

        let c = Atom::parse("t^(1/2) + (1+t)^(t+1)").unwrap();
        assert_eq!(format!("{}", c), "t^(1/2)+(1+t)^(t+1)");
    }

    #[test]
    fn sympy_mode() {
        let a = Atom::parse("3*t^2").unwrap();
        assert_eq!(format!("{}", a.printer(PrintOptions::sympy())), "3*t**2");
    }
}
