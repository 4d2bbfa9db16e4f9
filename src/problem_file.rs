//! Reader for problems stored as delimited text.
//!
//! The layout follows a spreadsheet with one row per line:
//!
//! ```text
//! # maximize 3*x1 + 2*x2
//! 3, 2
//! 1, 1, <=, 4
//! 1, 3, <=, 6
//! ```
//!
//! The first row holds the objective coefficients up to the first blank
//! cell. Every further row holds one coefficient per variable, a relation
//! symbol and the bound. Cells are separated by `,`, `;` or tabs, or by
//! whitespace when none of those appear.

use thiserror::Error;

use std::num::ParseFloatError;
use std::path::Path;

use crate::constraint::{Comp, Constraint};
use crate::error::StructuralError;
use crate::model::Problem;

#[derive(Debug, Error)]
pub enum ProblemFileError {
    #[error("could not read problem file")]
    Io(#[from] std::io::Error),

    #[error("problem file contains no rows")]
    Empty,

    #[error("line {line}: objective row has no coefficients")]
    EmptyObjective { line: usize },

    #[error("line {line}, cell {cell}: {text:?} is not a number")]
    Number {
        line: usize,
        cell: usize,
        text: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("line {line}: expected {expected} cells, found {found}")]
    MissingCells {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: {source}")]
    Structural {
        line: usize,
        #[source]
        source: StructuralError,
    },
}

fn split_cells(line: &str) -> Vec<&str> {
    match line.chars().find(|c| matches!(c, ',' | ';' | '\t')) {
        Some(sep) => line.split(sep).map(str::trim).collect(),
        None => line.split_whitespace().collect(),
    }
}

fn parse_number(text: &str, line: usize, cell: usize) -> Result<f64, ProblemFileError> {
    text.parse::<f64>()
        .map_err(|source| ProblemFileError::Number {
            line,
            cell: cell + 1,
            text: text.to_string(),
            source,
        })
}

pub fn parse(input: &str) -> Result<Problem, ProblemFileError> {
    let mut rows = input
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty() && !l.starts_with('#'));

    let (obj_line, obj_text) = rows.next().ok_or(ProblemFileError::Empty)?;
    let objective = split_cells(obj_text)
        .into_iter()
        .take_while(|c| !c.is_empty())
        .enumerate()
        .map(|(cell, text)| parse_number(text, obj_line, cell))
        .collect::<Result<Vec<f64>, _>>()?;
    if objective.is_empty() {
        return Err(ProblemFileError::EmptyObjective { line: obj_line });
    }

    let n_vars = objective.len();
    let mut problem = Problem::new(objective.as_slice());
    for (line, text) in rows {
        let cells = split_cells(text);
        if cells.len() < n_vars + 2 {
            return Err(ProblemFileError::MissingCells {
                line,
                expected: n_vars + 2,
                found: cells.len(),
            });
        }
        let coeffs = cells[..n_vars]
            .iter()
            .enumerate()
            .map(|(cell, text)| parse_number(text, line, cell))
            .collect::<Result<Vec<f64>, _>>()?;
        let comp = cells[n_vars]
            .parse::<Comp>()
            .map_err(|source| ProblemFileError::Structural { line, source })?;
        let bound = parse_number(cells[n_vars + 1], line, n_vars + 1)?;
        problem.add_constraint(Constraint::new(coeffs.as_slice(), comp, bound));
    }

    log::debug!(
        "parsed problem with {} variables and {} constraints",
        problem.n_vars(),
        problem.constraints().len()
    );
    Ok(problem)
}

pub fn read<P: AsRef<Path>>(path: P) -> Result<Problem, ProblemFileError> {
    let text = std::fs::read_to_string(path)?;
    parse(&text)
}
