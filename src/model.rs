use num::ToPrimitive;
use tabular::{Row, Table};

use std::fmt;

use crate::constraint::Constraint;

/// A maximization problem over non-negative variables.
#[derive(Clone, Debug, PartialEq)]
pub struct Problem {
    pub(crate) objective: Vec<f64>,
    pub(crate) constraints: Vec<Constraint>,
}

impl Problem {
    pub fn new<T: ToPrimitive>(objective: &[T]) -> Self {
        Self {
            objective: objective
                .iter()
                .map(|c| c.to_f64().unwrap_or(f64::NAN))
                .collect(),
            constraints: Vec::new(),
        }
    }

    //add a constraint to the problem
    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.add_constraint(constraint);
        self
    }

    pub fn n_vars(&self) -> usize {
        self.objective.len()
    }

    pub fn objective(&self) -> &[f64] {
        &self.objective
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn objective_value(&self, x: &[f64]) -> f64 {
        self.objective.iter().zip(x).map(|(c, v)| c * v).sum()
    }

    /// True when `x` is non-negative and meets every constraint, both within `tol`.
    pub fn is_satisfied_by(&self, x: &[f64], tol: f64) -> bool {
        x.len() == self.n_vars()
            && x.iter().all(|v| *v >= -tol)
            && self.constraints.iter().all(|c| c.is_satisfied_by(x, tol))
    }

    fn term_cells(coeffs: &[f64]) -> Vec<String> {
        coeffs
            .iter()
            .enumerate()
            .map(|(i, coeff)| {
                if i == 0 {
                    format!("{}*x{}", coeff, i + 1)
                } else {
                    format!("+ {}*x{}", coeff, i + 1)
                }
            })
            .collect()
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        //Label, one column per term, Comp, rhs
        let n_vars = self.n_vars();
        let columns = "{:<}".to_string() + &"{:>}".repeat(n_vars) + "{:^}{:>}";
        let mut table = Table::new(columns.as_str());

        let mut obj_row = vec!["Maximize:".to_string()];
        obj_row.extend(Self::term_cells(&self.objective));
        obj_row.extend(["".to_string(), "".to_string()]);
        table.add_row(Row::from_cells(obj_row));

        let mut header = vec!["".to_string(); n_vars + 3];
        header[0] = "Subject to:".to_string();
        table.add_row(Row::from_cells(header));

        for constraint in &self.constraints {
            let mut cons_row = vec!["".to_string()];
            let mut terms = Self::term_cells(constraint.coeffs());
            //pad short rows so the table stays rectangular
            terms.resize(n_vars, "".to_string());
            terms.truncate(n_vars);
            cons_row.extend(terms);
            cons_row.push(format!("{}", constraint.comp()));
            cons_row.push(format!("{}", constraint.rhs()));
            table.add_row(Row::from_cells(cons_row));
        }

        write!(f, "{}", table)
    }
}
