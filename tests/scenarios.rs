use approx::{assert_abs_diff_eq, assert_relative_eq};

use simplex_tableau::{
    build, solve, Comp, Constraint, Error, Outcome, PivotRule, Problem, Simplex,
    SolveAlgorithm, SolveError, SolveOptions, Start, StructuralError,
};

const TOL: f64 = 1e-9;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn solve_with(problem: &Problem, opts: SolveOptions) -> Result<Outcome, Error> {
    Simplex::with_options(opts).solve_problem(problem)
}

/// Optimal outcome whose point is feasible and whose value matches the objective.
fn assert_consistent(problem: &Problem, outcome: &Outcome) {
    let sol = outcome.solution().expect("expected an optimal outcome");
    assert_eq!(sol.values().len(), problem.n_vars());
    assert!(
        problem.is_satisfied_by(sol.values(), 1e-7),
        "{:?} violates the constraints",
        sol.values()
    );
    assert_relative_eq!(
        sol.objective_value(),
        problem.objective_value(sol.values()),
        epsilon = 1e-9
    );
}

#[test]
fn scenario_a_two_variables() {
    init();
    let problem = Problem::new(&[3, 2])
        .with_constraint(Constraint::new(&[1, 1], Comp::Le, 4))
        .with_constraint(Constraint::new(&[1, 3], Comp::Le, 6));
    let outcome = Simplex::new().solve_problem(&problem).unwrap();

    assert_consistent(&problem, &outcome);
    assert_abs_diff_eq!(outcome.objective_value().unwrap(), 12.0, epsilon = TOL);
    let x = outcome.solution().unwrap().values();
    assert_abs_diff_eq!(x[0], 4.0, epsilon = TOL);
    assert_abs_diff_eq!(x[1], 0.0, epsilon = TOL);

    //vertices of the feasible region
    for vertex in [[0.0, 0.0], [4.0, 0.0], [0.0, 2.0], [3.0, 1.0]] {
        assert!(problem.is_satisfied_by(&vertex, TOL));
        assert!(problem.objective_value(&vertex) <= 12.0 + TOL);
    }
}

#[test]
fn scenario_b_single_constraint() {
    init();
    let tableau = build(1, &[1.0], &[Constraint::new(&[1.0], Comp::Le, 5.0)]).unwrap();
    let outcome = solve(tableau).unwrap();
    assert_eq!(outcome.objective_value(), Some(5.0));
    assert_eq!(outcome.solution().unwrap().values(), &[5.0]);
}

#[test]
fn scenario_c_unbounded() {
    init();
    let tableau = build(
        2,
        &[1.0, 0.0],
        &[Constraint::new(&[0.0, 1.0], Comp::Le, 1.0)],
    )
    .unwrap();
    assert_eq!(solve(tableau).unwrap(), Outcome::Unbounded);
}

#[test]
fn scenario_d_coefficient_mismatch() {
    init();
    let err = build(
        3,
        &[1.0, 2.0, 3.0],
        &[Constraint::new(&[1.0, 1.0], Comp::Le, 1.0)],
    )
    .unwrap_err();
    assert_eq!(
        err,
        StructuralError::CoefficientCount {
            row: 0,
            expected: 3,
            found: 2
        }
    );

    let problem =
        Problem::new(&[1, 2, 3]).with_constraint(Constraint::new(&[1, 1], Comp::Le, 1));
    assert!(matches!(
        Simplex::new().solve_problem(&problem),
        Err(Error::Structural(StructuralError::CoefficientCount { .. }))
    ));
}

/// Known limitation of pivoting straight from the slack basis: the surplus
/// column of `x >= 2` is not a feasible starting basis, so the solver stops
/// at x = 0 without noticing the violated constraint.
#[test]
fn scenario_e_slack_basis_ignores_surplus_rows() {
    init();
    let problem = Problem::new(&[-1]).with_constraint(Constraint::new(&[1], Comp::Ge, 2));

    let outcome = solve_with(
        &problem,
        SolveOptions::default().with_start(Start::SlackBasis),
    )
    .unwrap();
    assert_eq!(outcome.objective_value(), Some(0.0));
    assert_eq!(outcome.solution().unwrap().values(), &[0.0]);
    assert!(!problem.is_satisfied_by(&[0.0], TOL));

    let outcome = Simplex::new().solve_problem(&problem).unwrap();
    assert_consistent(&problem, &outcome);
    assert_abs_diff_eq!(outcome.objective_value().unwrap(), -2.0, epsilon = TOL);
    assert_abs_diff_eq!(outcome.solution().unwrap().var_value(0), 2.0, epsilon = TOL);
}

#[test]
fn equality_and_negative_bound() {
    init();
    //x + y = 4, x - y >= -2
    let problem = Problem::new(&[2, 3])
        .with_constraint(Constraint::new(&[1, 1], Comp::Eq, 4))
        .with_constraint(Constraint::new(&[1, -1], Comp::Ge, -2));

    let outcome = Simplex::new().solve_problem(&problem).unwrap();
    assert_consistent(&problem, &outcome);
    assert_abs_diff_eq!(outcome.objective_value().unwrap(), 11.0, epsilon = TOL);
    let x = outcome.solution().unwrap().values();
    assert_abs_diff_eq!(x[0], 1.0, epsilon = TOL);
    assert_abs_diff_eq!(x[1], 3.0, epsilon = TOL);

    //the slack start overshoots the second constraint
    let outcome = solve_with(
        &problem,
        SolveOptions::default().with_start(Start::SlackBasis),
    )
    .unwrap();
    let x = outcome.solution().unwrap().values();
    assert!(!problem.is_satisfied_by(x, TOL));
}

#[test]
fn mixed_relations() {
    init();
    let problem = Problem::new(&[1, 1])
        .with_constraint(Constraint::new(&[1, 1], Comp::Ge, 1))
        .with_constraint(Constraint::new(&[1, 0], Comp::Le, 3))
        .with_constraint(Constraint::new(&[0, 1], Comp::Eq, 2));

    for rule in [PivotRule::Dantzig, PivotRule::Bland] {
        let opts = SolveOptions::default().with_rule(rule);
        let outcome = solve_with(&problem, opts).unwrap();
        assert_consistent(&problem, &outcome);
        assert_abs_diff_eq!(outcome.objective_value().unwrap(), 5.0, epsilon = TOL);
    }
}

#[test]
fn redundant_equalities() {
    init();
    let problem = Problem::new(&[1, 2])
        .with_constraint(Constraint::new(&[1, 1], Comp::Eq, 2))
        .with_constraint(Constraint::new(&[2, 2], Comp::Eq, 4));

    let outcome = Simplex::new().solve_problem(&problem).unwrap();
    assert_consistent(&problem, &outcome);
    assert_abs_diff_eq!(outcome.objective_value().unwrap(), 4.0, epsilon = TOL);
}

#[test]
fn infeasible_constraints() {
    init();
    let problem = Problem::new(&[1])
        .with_constraint(Constraint::new(&[1], Comp::Le, 1))
        .with_constraint(Constraint::new(&[1], Comp::Ge, 2));
    assert_eq!(
        Simplex::new().solve_problem(&problem).unwrap(),
        Outcome::Infeasible
    );
}

#[test]
fn unbounded_after_phase_one() {
    init();
    let problem =
        Problem::new(&[1, 1]).with_constraint(Constraint::new(&[1, -1], Comp::Ge, 1));
    assert_eq!(
        Simplex::new().solve_problem(&problem).unwrap(),
        Outcome::Unbounded
    );
}

#[test]
fn rules_agree_on_nondegenerate_problem() {
    init();
    let problem = Problem::new(&[5, 4, 3])
        .with_constraint(Constraint::new(&[2, 3, 1], Comp::Le, 5))
        .with_constraint(Constraint::new(&[4, 1, 2], Comp::Le, 11))
        .with_constraint(Constraint::new(&[3, 4, 2], Comp::Le, 8));

    let dantzig = Simplex::new().solve_problem(&problem).unwrap();
    let bland_opts = SolveOptions::default().with_rule(PivotRule::Bland);
    let bland = solve_with(&problem, bland_opts).unwrap();
    assert_consistent(&problem, &dantzig);
    assert_consistent(&problem, &bland);
    assert_abs_diff_eq!(dantzig.objective_value().unwrap(), 13.0, epsilon = TOL);
    assert_abs_diff_eq!(bland.objective_value().unwrap(), 13.0, epsilon = TOL);
}

/// Beale's example cycles under the most-negative rule.
#[test]
fn bland_rule_escapes_cycling() {
    init();
    let problem = Problem::new(&[0.75, -20.0, 0.5, -6.0])
        .with_constraint(Constraint::new(&[0.25, -8.0, -1.0, 9.0], Comp::Le, 0.0))
        .with_constraint(Constraint::new(&[0.5, -12.0, -0.5, 3.0], Comp::Le, 0.0))
        .with_constraint(Constraint::new(&[0.0, 0.0, 1.0, 0.0], Comp::Le, 1.0));

    let err = solve_with(
        &problem,
        SolveOptions::default().with_max_iterations(Some(50)),
    )
    .unwrap_err();
    assert_eq!(err, Error::Solve(SolveError::IterationLimit { iterations: 50 }));

    let bland_opts = SolveOptions::default().with_rule(PivotRule::Bland);
    let outcome = solve_with(&problem, bland_opts).unwrap();
    assert_consistent(&problem, &outcome);
    assert_abs_diff_eq!(outcome.objective_value().unwrap(), 1.25, epsilon = 1e-9);
}

#[test]
fn no_constraints() {
    init();
    assert_eq!(
        solve(build(2, &[0.0, -1.0], &[]).unwrap()).unwrap(),
        Outcome::Optimal(simplex_tableau::Solution::new(0.0, vec![0.0, 0.0]))
    );
    assert_eq!(
        solve(build(1, &[1.0], &[]).unwrap()).unwrap(),
        Outcome::Unbounded
    );
}
