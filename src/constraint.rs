use num::ToPrimitive;

use std::fmt;
use std::str::FromStr;

use crate::error::StructuralError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comp {
    Le, // <=
    Ge, // >=
    Eq, // ==
}

impl Comp {
    /// Coefficient of the constraint's own auxiliary column in the initial tableau.
    pub fn aux_coeff(&self) -> f64 {
        match self {
            Comp::Le => 1.0_f64,
            Comp::Ge => -1.0_f64,
            Comp::Eq => 1.0_f64,
        }
    }
}

impl fmt::Display for Comp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Comp::Le => write!(f, "\u{2264}"),
            Comp::Eq => write!(f, "="),
            Comp::Ge => write!(f, "\u{2265}"),
        }
    }
}

impl FromStr for Comp {
    type Err = StructuralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "<=" | "\u{2264}" => Ok(Comp::Le),
            ">=" | "\u{2265}" => Ok(Comp::Ge),
            "=" | "==" => Ok(Comp::Eq),
            other => Err(StructuralError::UnknownRelation(other.to_string())),
        }
    }
}

/// One row of `coeffs · x  comp  rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub(crate) coeffs: Vec<f64>,
    pub(crate) comp: Comp,
    pub(crate) rhs: f64,
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let lhs = self
            .coeffs
            .iter()
            .enumerate()
            .map(|(i, coeff)| format!("{}*x{}", coeff, i + 1))
            .collect::<Vec<String>>()
            .join(" + ");
        write!(f, "{} {} {}", lhs, self.comp, self.rhs)
    }
}

impl Constraint {
    /// Numbers that cannot be represented as `f64` become NaN and are
    /// rejected when the tableau is built.
    pub fn new<T: ToPrimitive, U: ToPrimitive>(coeffs: &[T], comp: Comp, rhs: U) -> Self {
        Self {
            coeffs: coeffs
                .iter()
                .map(|c| c.to_f64().unwrap_or(f64::NAN))
                .collect(),
            comp,
            rhs: rhs.to_f64().unwrap_or(f64::NAN),
        }
    }

    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }

    pub fn comp(&self) -> Comp {
        self.comp
    }

    pub fn rhs(&self) -> f64 {
        self.rhs
    }

    pub fn lhs_value(&self, x: &[f64]) -> f64 {
        self.coeffs.iter().zip(x).map(|(a, v)| a * v).sum()
    }

    pub fn is_satisfied_by(&self, x: &[f64], tol: f64) -> bool {
        let lhs = self.lhs_value(x);
        match self.comp {
            Comp::Le => lhs <= self.rhs + tol,
            Comp::Ge => lhs >= self.rhs - tol,
            Comp::Eq => (lhs - self.rhs).abs() <= tol,
        }
    }
}
