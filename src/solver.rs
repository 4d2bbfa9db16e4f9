use std::fmt;

use crate::error::Error;
use crate::model::Problem;

pub trait SolveAlgorithm {
    /// Build the tableau for `problem` and solve it.
    fn solve_problem(&self, problem: &Problem) -> Result<Outcome, Error>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    objective_value: f64,
    values: Vec<f64>,
}

impl Solution {
    pub fn new(objective_value: f64, values: Vec<f64>) -> Self {
        Self {
            objective_value,
            values,
        }
    }

    pub fn objective_value(&self) -> f64 {
        self.objective_value
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn var_value(&self, var: usize) -> f64 {
        self.values[var]
    }
}

/// Terminal state of a solve.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Optimal(Solution),
    Unbounded,
    Infeasible,
}

impl Outcome {
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Outcome::Optimal(sol) => Some(sol),
            _ => None,
        }
    }

    pub fn objective_value(&self) -> Option<f64> {
        self.solution().map(|sol| sol.objective_value())
    }

    pub fn is_optimal(&self) -> bool {
        matches!(self, Outcome::Optimal(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Outcome::Optimal(sol) => {
                writeln!(f, "Optimal solution found.")?;
                writeln!(f, "Optimal Objective Value: {}", sol.objective_value())?;
                write!(f, "Solution: {:?}", sol.values())
            }
            Outcome::Unbounded => write!(f, "The problem is unbounded."),
            Outcome::Infeasible => write!(f, "The problem is infeasible."),
        }
    }
}
