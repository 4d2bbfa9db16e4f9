//! Tableau simplex solver for `maximize cᵗx subject to Ax {≤,≥,=} b, x ≥ 0`.
//!
//! ```
//! use simplex_tableau::{build, solve, Comp, Constraint};
//!
//! let tableau = build(
//!     2,
//!     &[3.0, 2.0],
//!     &[
//!         Constraint::new(&[1.0, 1.0], Comp::Le, 4.0),
//!         Constraint::new(&[1.0, 3.0], Comp::Le, 6.0),
//!     ],
//! )?;
//! let outcome = solve(tableau)?;
//! assert_eq!(outcome.objective_value(), Some(12.0));
//! # Ok::<(), simplex_tableau::Error>(())
//! ```

pub mod constraint;
pub mod error;
pub mod model;
pub mod problem_file;
pub mod simplex;
pub mod solver;
pub mod tableau;

pub use constraint::{Comp, Constraint};
pub use error::{Error, SolveError, StructuralError};
pub use model::Problem;
pub use simplex::{PivotRule, Simplex, SolveOptions, Start, Step};
pub use solver::{Outcome, Solution, SolveAlgorithm};
pub use tableau::{build, Tableau, TableauIx};

/// Solve `tableau` with the default options.
pub fn solve(tableau: Tableau) -> Result<Outcome, SolveError> {
    Simplex::new().solve(tableau)
}
