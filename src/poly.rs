//! Univariate polynomials and truncated power series.
pub mod series;
pub mod univariate;

use std::fmt::{Display, Formatter};

use smartstring::{LazyCompact, SmartString};

/// A named indeterminate, such as `t`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Variable {
    name: SmartString<LazyCompact>,
}

impl Variable {
    pub fn new(name: &str) -> Variable {
        Variable { name: name.into() }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

impl From<&str> for Variable {
    fn from(name: &str) -> Variable {
        Variable::new(name)
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
