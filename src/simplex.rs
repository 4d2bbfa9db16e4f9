use log::Level;
use ndarray::{s, Array1, Array2, Axis};

use crate::constraint::Comp;
use crate::error::{Error, SolveError};
use crate::model::Problem;
use crate::solver::{Outcome, Solution, SolveAlgorithm};
use crate::tableau::{Tableau, TableauIx};

/// Entering/leaving variable selection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PivotRule {
    /// Most negative reduced cost, first index on ties. May cycle on degenerate problems.
    #[default]
    Dantzig,
    /// Smallest eligible index. Always terminates.
    Bland,
}

/// How the solver obtains its first basic feasible solution.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Start {
    /// Drive artificial variables out in a first phase, then optimize.
    #[default]
    TwoPhase,
    /// Pivot the built tableau as is. Only correct when every constraint is
    /// `<=` with a non-negative bound.
    SlackBasis,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SolveOptions {
    pub rule: PivotRule,
    pub start: Start,
    /// Upper bound on pivots over both phases, including the pivots that move
    /// leftover artificial variables out of the basis. Reaching an optimal or
    /// unbounded state takes no pivot and is reported even at the bound.
    /// `None` removes the bound.
    pub max_iterations: Option<usize>,
    pub eps: f64,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            rule: PivotRule::Dantzig,
            start: Start::TwoPhase,
            max_iterations: Some(10_000),
            eps: 1.0e-9,
        }
    }
}

impl SolveOptions {
    pub fn with_rule(mut self, rule: PivotRule) -> Self {
        self.rule = rule;
        self
    }

    pub fn with_start(mut self, start: Start) -> Self {
        self.start = start;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: Option<usize>) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }
}

/// Result of a single iteration of the pivot loop.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Optimal,
    Unbounded { column: usize },
    Pivoted(TableauIx),
}

enum Termination {
    Optimal,
    Unbounded,
}

#[derive(Clone, Debug, Default)]
pub struct Simplex {
    opts: SolveOptions,
}

impl Simplex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(opts: SolveOptions) -> Self {
        Self { opts }
    }

    pub fn options(&self) -> &SolveOptions {
        &self.opts
    }

    /// Entering column, or `None` when no reduced cost is negative.
    pub fn pivot_column(&self, tbl: &Tableau) -> Option<usize> {
        self.entering(tbl, &[])
    }

    fn entering(&self, tbl: &Tableau, barred: &[usize]) -> Option<usize> {
        let eps = self.opts.eps;
        let mut candidates = tbl
            .reduced_costs()
            .into_iter()
            .enumerate()
            .filter(|(j, _)| !barred.contains(j))
            .filter(|(_, v)| **v < -eps);

        let j = match self.opts.rule {
            PivotRule::Bland => candidates.next().map(|(j, _)| j),
            PivotRule::Dantzig => candidates
                .fold(None, |best: Option<(usize, f64)>, (j, &v)| match best {
                    Some((_, b)) if b <= v => best,
                    _ => Some((j, v)),
                })
                .map(|(j, _)| j),
        };
        log::trace!("entering column: {:?}", j);
        j
    }

    /// Leaving row for column `col` by the ratio test, or `None` when no
    /// entry of the column is positive.
    pub fn pivot_row(&self, tbl: &Tableau, col: usize) -> Option<usize> {
        let eps = self.opts.eps;
        let ratios = tbl
            .tbl()
            .slice(s![..-1, col])
            .into_iter()
            .zip(tbl.rhs())
            .enumerate()
            .filter(|(_, (a, _))| **a > eps)
            .map(|(i, (a, b))| (i, b / a));

        let i = match self.opts.rule {
            PivotRule::Dantzig => ratios
                .fold(None, |best: Option<(usize, f64)>, (i, r)| match best {
                    Some((_, b)) if b <= r => best,
                    _ => Some((i, r)),
                })
                .map(|(i, _)| i),
            PivotRule::Bland => {
                //ties broken by the smallest index of the leaving basic variable
                let basic_ix = |i: usize| tbl.basic_vars()[i].unwrap_or(usize::MAX);
                ratios
                    .fold(None, |best: Option<(usize, f64)>, (i, r)| match best {
                        Some((k, b)) if (r - b).abs() <= eps => {
                            if basic_ix(i) < basic_ix(k) {
                                Some((i, b.min(r)))
                            } else {
                                best
                            }
                        }
                        Some((_, b)) if b < r => best,
                        _ => Some((i, r)),
                    })
                    .map(|(i, _)| i)
            }
        };
        log::trace!("leaving row for column {}: {:?}", col, i);
        i
    }

    /// One column-select, row-select, pivot iteration.
    pub fn step(&self, tbl: &mut Tableau) -> Step {
        self.step_barred(tbl, &[])
    }

    fn step_barred(&self, tbl: &mut Tableau, barred: &[usize]) -> Step {
        let step = self.select(tbl, barred);
        if let Step::Pivoted(ix) = step {
            self.apply(tbl, &ix);
        }
        step
    }

    /// Pivot position for the next iteration, without touching the tableau.
    fn select(&self, tbl: &Tableau, barred: &[usize]) -> Step {
        let Some(j) = self.entering(tbl, barred) else {
            return Step::Optimal;
        };
        let Some(i) = self.pivot_row(tbl, j) else {
            return Step::Unbounded { column: j };
        };
        Step::Pivoted(TableauIx::new(i, j))
    }

    fn apply(&self, tbl: &mut Tableau, ix: &TableauIx) {
        tbl.pivot(ix);
        if log::log_enabled!(Level::Debug) {
            log::debug!(
                "Updated tableau (pivot {}, {}):\n{}",
                ix.i(),
                ix.j(),
                tbl.render(Some(ix.j()))
            );
        }
    }

    fn check_cap(&self, pvt_cnt: usize) -> Result<(), SolveError> {
        match self.opts.max_iterations {
            Some(max) if pvt_cnt >= max => Err(SolveError::IterationLimit {
                iterations: pvt_cnt,
            }),
            _ => Ok(()),
        }
    }

    fn run(
        &self,
        tbl: &mut Tableau,
        barred: &[usize],
        pvt_cnt: &mut usize,
    ) -> Result<Termination, SolveError> {
        loop {
            match self.select(tbl, barred) {
                Step::Optimal => return Ok(Termination::Optimal),
                Step::Unbounded { column } => {
                    log::debug!("column {} has no positive entry", column);
                    return Ok(Termination::Unbounded);
                }
                Step::Pivoted(ix) => {
                    self.check_cap(*pvt_cnt)?;
                    self.apply(tbl, &ix);
                    *pvt_cnt += 1;
                }
            }
        }
    }

    /// Solve the tableau produced by [`crate::tableau::build`].
    pub fn solve(&self, mut tableau: Tableau) -> Result<Outcome, SolveError> {
        if log::log_enabled!(Level::Debug) {
            log::debug!("Initial tableau:\n{}", tableau);
        }

        let mut pvt_cnt = 0;
        let barred = match self.opts.start {
            Start::SlackBasis => Vec::new(),
            Start::TwoPhase => match self.phase_one(&mut tableau, &mut pvt_cnt)? {
                Some(barred) => barred,
                None => {
                    log::info!("problem is infeasible after {} pivots", pvt_cnt);
                    return Ok(Outcome::Infeasible);
                }
            },
        };

        let outcome = match self.run(&mut tableau, &barred, &mut pvt_cnt)? {
            Termination::Unbounded => Outcome::Unbounded,
            Termination::Optimal => Outcome::Optimal(Solution::new(
                tableau.objective_value(),
                tableau.solution(self.opts.eps),
            )),
        };
        log::info!("{} after {} pivots", outcome, pvt_cnt);
        Ok(outcome)
    }

    /// Replace the slack basis by a feasible one.
    ///
    /// Returns the auxiliary columns of equality rows, which must stay at zero
    /// and never enter again, or `None` when the constraints admit no point.
    fn phase_one(
        &self,
        tableau: &mut Tableau,
        pvt_cnt: &mut usize,
    ) -> Result<Option<Vec<usize>>, SolveError> {
        let eps = self.opts.eps;
        let n_vars = tableau.n_vars();
        let m = tableau.n_constraints();
        let n_orig_cols = tableau.tbl().ncols();

        //ensure non-negative rhs
        for i in 0..m {
            if tableau.tbl()[[i, tableau.rhs_col()]] < 0.0_f64 {
                tableau.negate_row(i);
            }
        }

        //equality auxiliaries act as artificial variables
        let eq_cols: Vec<usize> = (0..m)
            .filter(|&i| tableau.comps()[i] == Comp::Eq)
            .map(|i| n_vars + i)
            .collect();
        let mut needs_artificial = Vec::new();
        for i in 0..m {
            let aux = n_vars + i;
            if tableau.comps()[i] == Comp::Eq {
                tableau.tbl[[i, aux]] = 1.0_f64;
                tableau.basic_vars[i] = Some(aux);
            } else if tableau.tbl()[[i, aux]] > 0.0_f64 {
                tableau.basic_vars[i] = Some(aux);
            } else {
                needs_artificial.push(i);
            }
        }

        if eq_cols.is_empty() && needs_artificial.is_empty() {
            log::debug!("slack basis is feasible, skipping phase one");
            return Ok(Some(eq_cols));
        }

        //append artificial columns in front of the rhs
        let n_art = needs_artificial.len();
        let mut ext = Array2::<f64>::zeros((m + 1, n_orig_cols + n_art));
        ext.slice_mut(s![.., ..n_orig_cols - 1])
            .assign(&tableau.tbl().slice(s![.., ..-1]));
        ext.slice_mut(s![.., -1])
            .assign(&tableau.tbl().slice(s![.., -1]));
        let mut artificial_cols = eq_cols.clone();
        for (k, &i) in needs_artificial.iter().enumerate() {
            let col = n_orig_cols - 1 + k;
            ext[[i, col]] = 1.0_f64;
            tableau.basic_vars[i] = Some(col);
            artificial_cols.push(col);
        }
        let second_stage_obj = tableau.tbl().row(m).to_owned();
        tableau.tbl = ext;

        //maximize -sum(artificials), priced out against the artificial basis
        let mut first_stage_obj = Array1::<f64>::zeros(tableau.tbl().ncols());
        for &col in &artificial_cols {
            first_stage_obj[col] = 1.0_f64;
        }
        for (i, basic) in tableau.basic_vars.iter().enumerate() {
            if basic.map_or(false, |b| artificial_cols.contains(&b)) {
                first_stage_obj -= &tableau.tbl.row(i);
            }
        }
        tableau.tbl.row_mut(m).assign(&first_stage_obj);

        log::info!(
            "phase one with {} artificial variables",
            artificial_cols.len()
        );
        if log::log_enabled!(Level::Debug) {
            log::debug!("Phase one tableau:\n{}", tableau);
        }

        //bounded above by zero, so it cannot be unbounded
        self.run(tableau, &[], pvt_cnt)?;

        if tableau.objective_value() < -eps {
            return Ok(None);
        }

        //drive remaining artificial variables out of the basis
        for i in 0..m {
            if !tableau.basic_vars[i].map_or(false, |b| artificial_cols.contains(&b)) {
                continue;
            }
            let entering = (0..n_orig_cols - 1)
                .filter(|j| !eq_cols.contains(j))
                .find(|&j| tableau.tbl()[[i, j]].abs() > eps);
            match entering {
                Some(j) => {
                    self.check_cap(*pvt_cnt)?;
                    self.apply(tableau, &TableauIx::new(i, j));
                    *pvt_cnt += 1;
                }
                None => {
                    log::warn!("constraint {} is redundant", i);
                    if tableau.basic_vars[i].map_or(false, |b| b >= n_orig_cols - 1) {
                        tableau.basic_vars[i] = None;
                    }
                }
            }
        }

        //drop appended artificial columns
        let keep = (0..n_orig_cols - 1)
            .chain(std::iter::once(tableau.tbl().ncols() - 1))
            .collect::<Vec<usize>>();
        tableau.tbl = tableau.tbl.select(Axis(1), &keep);

        //restore the original objective and price out the basic columns
        let mut obj = second_stage_obj;
        for i in 0..m {
            if let Some(b) = tableau.basic_vars[i] {
                let coeff = obj[b];
                if coeff != 0.0_f64 {
                    obj.scaled_add(-coeff, &tableau.tbl.row(i));
                }
            }
        }
        tableau.tbl.row_mut(m).assign(&obj);

        log::info!("phase one finished after {} pivots", pvt_cnt);
        if log::log_enabled!(Level::Debug) {
            log::debug!("Phase two tableau:\n{}", tableau);
        }
        Ok(Some(eq_cols))
    }
}

impl SolveAlgorithm for Simplex {
    fn solve_problem(&self, problem: &Problem) -> Result<Outcome, Error> {
        let tableau = Tableau::from_problem(problem)?;
        Ok(self.solve(tableau)?)
    }
}
