use colored::*;
use ndarray::{s, Array2, ArrayView1, Axis};

use std::fmt;

use crate::constraint::{Comp, Constraint};
use crate::error::StructuralError;
use crate::model::Problem;

/// Position of a pivot element: constraint row `i`, column `j`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TableauIx {
    i: usize,
    j: usize,
}

impl TableauIx {
    pub fn new(i: usize, j: usize) -> Self {
        Self { i, j }
    }

    pub fn i(&self) -> usize {
        self.i
    }

    pub fn j(&self) -> usize {
        self.j
    }
}

/// Dense simplex tableau.
///
/// Rows `0..m` hold the constraints in input order and the last row holds the
/// objective. Columns `0..n_vars` are the decision variables, followed by one
/// auxiliary column per constraint and the right-hand side.
#[derive(Debug, Clone)]
pub struct Tableau {
    pub(crate) tbl: Array2<f64>,
    pub(crate) n_vars: usize,
    pub(crate) comps: Vec<Comp>,
    pub(crate) basic_vars: Vec<Option<usize>>,
}

/// Build the initial tableau for `maximize objective · x` under `constraints`.
pub fn build(
    n_vars: usize,
    objective: &[f64],
    constraints: &[Constraint],
) -> Result<Tableau, StructuralError> {
    if n_vars == 0 {
        return Err(StructuralError::NoVariables);
    }
    if objective.len() != n_vars {
        return Err(StructuralError::ObjectiveLength {
            expected: n_vars,
            found: objective.len(),
        });
    }
    if let Some(col) = objective.iter().position(|v| !v.is_finite()) {
        return Err(StructuralError::NonFinite { row: None, col });
    }
    for (row, con) in constraints.iter().enumerate() {
        if con.coeffs().len() != n_vars {
            return Err(StructuralError::CoefficientCount {
                row,
                expected: n_vars,
                found: con.coeffs().len(),
            });
        }
        if let Some(col) = con.coeffs().iter().position(|v| !v.is_finite()) {
            return Err(StructuralError::NonFinite {
                row: Some(row),
                col,
            });
        }
        if !con.rhs().is_finite() {
            return Err(StructuralError::NonFinite {
                row: Some(row),
                col: n_vars,
            });
        }
    }

    let m = constraints.len();
    let rhs_col = n_vars + m;
    //constraint rows followed by obj_fn row
    let mut tbl = Array2::<f64>::zeros((m + 1, n_vars + m + 1));
    let mut basic_vars = Vec::with_capacity(m);

    for (i, con) in constraints.iter().enumerate() {
        tbl.slice_mut(s![i, ..n_vars])
            .assign(&ArrayView1::from(con.coeffs()));
        tbl[[i, n_vars + i]] = con.comp().aux_coeff();
        tbl[[i, rhs_col]] = con.rhs();

        //surplus columns start at -1 and are not basic
        basic_vars.push(match con.comp() {
            Comp::Ge => None,
            Comp::Le | Comp::Eq => Some(n_vars + i),
        });
    }

    for (j, c) in objective.iter().enumerate() {
        tbl[[m, j]] = -c;
    }

    Ok(Tableau {
        tbl,
        n_vars,
        comps: constraints.iter().map(|c| c.comp()).collect(),
        basic_vars,
    })
}

impl Tableau {
    pub fn from_problem(problem: &Problem) -> Result<Self, StructuralError> {
        build(problem.n_vars(), problem.objective(), problem.constraints())
    }

    pub fn tbl(&self) -> &Array2<f64> {
        &self.tbl
    }

    pub fn n_vars(&self) -> usize {
        self.n_vars
    }

    pub fn n_constraints(&self) -> usize {
        self.tbl.nrows() - 1
    }

    pub fn comps(&self) -> &[Comp] {
        &self.comps
    }

    pub fn basic_vars(&self) -> &[Option<usize>] {
        &self.basic_vars
    }

    pub(crate) fn obj_row_ix(&self) -> usize {
        self.tbl.nrows() - 1
    }

    pub(crate) fn rhs_col(&self) -> usize {
        self.tbl.ncols() - 1
    }

    /// Reduced costs, i.e. the objective row without its RHS.
    pub fn reduced_costs(&self) -> ArrayView1<'_, f64> {
        self.tbl.slice(s![-1, ..-1])
    }

    pub fn rhs(&self) -> ArrayView1<'_, f64> {
        self.tbl.slice(s![..-1, -1])
    }

    /// Current value of the objective, read from the objective row's RHS.
    pub fn objective_value(&self) -> f64 {
        self.tbl[[self.obj_row_ix(), self.rhs_col()]]
    }

    /// Gauss-Jordan step on `pivot_ind`: the pivot row is scaled so the pivot
    /// element becomes 1 and the pivot column is eliminated from every other
    /// row, the objective row included.
    pub fn pivot(&mut self, pivot_ind: &TableauIx) {
        debug_assert!(pivot_ind.i() < self.obj_row_ix());
        debug_assert!(pivot_ind.j() < self.rhs_col());

        let div = self.tbl[[pivot_ind.i(), pivot_ind.j()]];
        self.tbl.row_mut(pivot_ind.i()).mapv_inplace(|v| v / div);

        let pivot_row = self.tbl.row(pivot_ind.i()).to_owned();
        for (i, mut row) in self.tbl.axis_iter_mut(Axis(0)).enumerate() {
            //skip pivot row
            if i == pivot_ind.i() {
                continue;
            }
            let ratio = row[pivot_ind.j()];
            if ratio != 0.0_f64 {
                row.scaled_add(-ratio, &pivot_row);
            }
        }

        self.basic_vars[pivot_ind.i()] = Some(pivot_ind.j());
    }

    pub(crate) fn negate_row(&mut self, i: usize) {
        self.tbl.row_mut(i).mapv_inplace(|v| -v);
    }

    /// Row holding the single 1 of `col` when the column is a unit vector
    /// over all rows, objective row included.
    pub fn basic_row(&self, col: usize, eps: f64) -> Option<usize> {
        let mut found = None;
        for (i, &val) in self.tbl.column(col).iter().enumerate() {
            if (val - 1.0_f64).abs() <= eps {
                if found.is_some() {
                    return None;
                }
                found = Some(i);
            } else if val.abs() > eps {
                return None;
            }
        }
        found.filter(|&i| i != self.obj_row_ix())
    }

    /// Values of the decision variables read off the tableau: the RHS of the
    /// row for basic columns, 0 otherwise.
    pub fn solution(&self, eps: f64) -> Vec<f64> {
        let mut claimed = vec![false; self.n_constraints()];
        (0..self.n_vars)
            .map(|col| match self.basic_row(col, eps) {
                Some(i) if !claimed[i] => {
                    claimed[i] = true;
                    self.tbl[[i, self.rhs_col()]]
                }
                _ => 0.0_f64,
            })
            .collect()
    }

    /// Text rendering of the tableau with column `highlight` in red.
    pub fn render(&self, highlight: Option<usize>) -> String {
        let mut out = String::new();
        for row in self.tbl.rows() {
            let cells = row
                .iter()
                .enumerate()
                .map(|(j, v)| {
                    let cell = format!("{:>10.2}", v);
                    if Some(j) == highlight {
                        cell.red().to_string()
                    } else {
                        cell
                    }
                })
                .collect::<Vec<String>>();
            out += &cells.join(" ");
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Tableau {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.render(None))
    }
}
