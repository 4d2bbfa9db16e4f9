use thiserror::Error;

/// Malformed problem description. Raised by the builder before any pivoting.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StructuralError {
    #[error("problem has no decision variables")]
    NoVariables,

    #[error("objective has {found} coefficients, expected {expected}")]
    ObjectiveLength { expected: usize, found: usize },

    #[error("constraint {row} has {found} coefficients, expected {expected}")]
    CoefficientCount {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown relation symbol {0:?}")]
    UnknownRelation(String),

    /// `row` is `None` for the objective.
    #[error("non-finite number in {} at column {col}", describe_row(.row))]
    NonFinite { row: Option<usize>, col: usize },
}

fn describe_row(row: &Option<usize>) -> String {
    match row {
        Some(i) => format!("constraint {}", i),
        None => "objective".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("iteration limit reached after {iterations} pivots")]
    IterationLimit { iterations: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Structural(#[from] StructuralError),

    #[error(transparent)]
    Solve(#[from] SolveError),
}
