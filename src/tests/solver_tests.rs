//! End-to-end equation solving.

use crate::arena::NodeArena;
use crate::error::EngineError;
use crate::factory::NodeFactory;
use crate::node::NodeId;
use crate::solver::{solve_equation, solve_linear, LinearSolve};
use crate::trace::Trace;

fn solve(f: &NodeFactory<'_>, eq: NodeId) -> Result<Vec<f64>, EngineError> {
    solve_equation(f, eq, "x", None)
}

#[test]
fn linear_equation() {
    let arena = NodeArena::new();
    let f = NodeFactory::new(&arena);
    // 2x + 5 == 11
    let eq = f.eq(f.add(f.mul(f.num(2.0), f.var("x")), f.num(5.0)), f.num(11.0));
    assert_eq!(solve(&f, eq).unwrap(), vec![3.0]);
}

#[test]
fn linear_equation_with_negative_slope() {
    let arena = NodeArena::new();
    let f = NodeFactory::new(&arena);
    // -2x + 5 == 20
    let eq = f.eq(
        f.add(f.mul(f.num(-2.0), f.var("x")), f.num(5.0)),
        f.num(20.0),
    );
    assert_eq!(solve(&f, eq).unwrap(), vec![-7.5]);
}

#[test]
fn quadratic_equation_has_both_roots() {
    let arena = NodeArena::new();
    let f = NodeFactory::new(&arena);
    // x^2 == 9
    let eq = f.eq(f.pow(f.var("x"), f.num(2.0)), f.num(9.0));
    let mut roots = solve(&f, eq).unwrap();
    roots.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(roots.len(), 2);
    assert!((roots[0] + 3.0).abs() < 1e-6);
    assert!((roots[1] - 3.0).abs() < 1e-6);
}

#[test]
fn cubic_equation_keeps_only_the_real_root() {
    let arena = NodeArena::new();
    let f = NodeFactory::new(&arena);
    // x^3 == 10
    let eq = f.eq(f.pow(f.var("x"), f.num(3.0)), f.num(10.0));
    let roots = solve(&f, eq).unwrap();
    assert_eq!(roots.len(), 1);
    assert!((roots[0] - 2.15443).abs() < 1e-4);
}

#[test]
fn quadratic_with_no_real_roots_yields_nothing() {
    let arena = NodeArena::new();
    let f = NodeFactory::new(&arena);
    // x^2 == -1
    let eq = f.eq(f.pow(f.var("x"), f.num(2.0)), f.num(-1.0));
    assert!(solve(&f, eq).unwrap().is_empty());
}

#[test]
fn non_equations_are_rejected() {
    let arena = NodeArena::new();
    let f = NodeFactory::new(&arena);
    let expr = f.add(f.var("x"), f.num(1.0));
    assert!(matches!(solve(&f, expr), Err(EngineError::NotAnEquation)));
}

#[test]
fn second_free_variable_is_an_error() {
    let arena = NodeArena::new();
    let f = NodeFactory::new(&arena);
    // x^2 + y == 9: y is neither the unknown nor a constant.
    let eq = f.eq(
        f.add(f.pow(f.var("x"), f.num(2.0)), f.var("y")),
        f.num(9.0),
    );
    assert!(matches!(
        solve(&f, eq),
        Err(EngineError::NonConstantTerm { .. })
    ));
}

#[test]
fn linear_fast_path_reports_unsolved_for_quadratics() {
    let arena = NodeArena::new();
    let f = NodeFactory::new(&arena);
    let lhs = f.pow(f.var("x"), f.num(2.0));
    let rhs = f.num(9.0);
    match solve_linear(&f, lhs, rhs, "x", None).unwrap() {
        LinearSolve::Unsolved(_) => {}
        LinearSolve::Root(root) => panic!("quadratic solved linearly: {}", root),
    }
}

#[test]
fn solver_trace_shows_the_strategy_used() {
    let arena = NodeArena::new();
    let f = NodeFactory::new(&arena);
    let eq = f.eq(f.mul(f.num(2.0), f.var("x")), f.num(8.0));

    let trace = Trace::new();
    solve_equation(&f, eq, "x", Some(&trace)).unwrap();

    let steps = trace.steps();
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].description, "linear solve");
    assert!(steps[0].after.contains("x = 4"));
}
