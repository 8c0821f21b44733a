//! Property-based tests over randomly generated inputs.

use quickcheck::{QuickCheck, TestResult};

use crate::arena::NodeArena;
use crate::compare::nodes_equal;
use crate::display::render;
use crate::factory::NodeFactory;
use crate::node::NodeId;
use crate::simplify::simplify;
use crate::solver::solve_equation;

fn reasonable(v: f64) -> bool {
    v.is_finite() && v.abs() < 1e6
}

/// Build a small constant tree from a recipe of opcode bytes.
fn constant_tree(f: &NodeFactory<'_>, seed: f64, recipe: &[u8]) -> NodeId {
    let mut current = f.num(seed);
    for &op in recipe.iter().take(6) {
        current = match op % 5 {
            0 => f.add(current, f.num((op % 7) as f64)),
            1 => f.sub(current, f.num((op % 7) as f64)),
            2 => f.mul(current, f.num((op % 3) as f64)),
            3 => f.sin(current),
            _ => f.cos(current),
        };
    }
    current
}

#[test]
fn simplify_is_idempotent_on_constant_trees() {
    fn prop(seed: f64, recipe: Vec<u8>) -> TestResult {
        if !reasonable(seed) {
            return TestResult::discard();
        }
        let arena = NodeArena::new();
        let f = NodeFactory::new(&arena);
        let tree = constant_tree(&f, seed, &recipe);

        let once = match simplify(&f, tree) {
            Ok(id) => id,
            Err(_) => return TestResult::discard(),
        };
        let twice = match simplify(&f, once) {
            Ok(id) => id,
            Err(_) => return TestResult::failed(),
        };
        TestResult::from_bool(render(&arena, once) == render(&arena, twice))
    }
    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(f64, Vec<u8>) -> TestResult);
}

#[test]
fn constant_trees_simplify_to_a_single_number() {
    fn prop(seed: f64, recipe: Vec<u8>) -> TestResult {
        if !reasonable(seed) {
            return TestResult::discard();
        }
        let arena = NodeArena::new();
        let f = NodeFactory::new(&arena);
        let tree = constant_tree(&f, seed, &recipe);
        match simplify(&f, tree) {
            Ok(id) => TestResult::from_bool(f.node(id).as_number().is_some()),
            Err(_) => TestResult::discard(),
        }
    }
    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(f64, Vec<u8>) -> TestResult);
}

#[test]
fn addition_compares_commutatively() {
    fn prop(a: f64, b: f64) -> TestResult {
        if !reasonable(a) || !reasonable(b) {
            return TestResult::discard();
        }
        let arena = NodeArena::new();
        let f = NodeFactory::new(&arena);
        let (x, y) = (f.num(a), f.num(b));
        TestResult::from_bool(
            nodes_equal(&arena, f.add(x, y), f.add(y, x))
                && nodes_equal(&arena, f.mul(x, y), f.mul(y, x)),
        )
    }
    QuickCheck::new()
        .tests(200)
        .quickcheck(prop as fn(f64, f64) -> TestResult);
}

#[test]
fn adding_zero_never_changes_a_variable() {
    fn prop(left_zero: bool) -> bool {
        let arena = NodeArena::new();
        let f = NodeFactory::new(&arena);
        let x = f.var("x");
        let sum = if left_zero {
            f.add(f.num(0.0), x)
        } else {
            f.add(x, f.num(0.0))
        };
        match simplify(&f, sum) {
            Ok(id) => render(&arena, id) == "x",
            Err(_) => false,
        }
    }
    QuickCheck::new().tests(10).quickcheck(prop as fn(bool) -> bool);
}

#[test]
fn linear_equations_round_trip_through_the_solver() {
    fn prop(a: f64, b: f64) -> TestResult {
        if !reasonable(a) || !reasonable(b) || a.abs() < 1e-6 {
            return TestResult::discard();
        }
        let arena = NodeArena::new();
        let f = NodeFactory::new(&arena);
        // a*x + b == 0 has the unique root -b/a.
        let eq = f.eq(f.add(f.mul(f.num(a), f.var("x")), f.num(b)), f.num(0.0));
        match solve_equation(&f, eq, "x", None) {
            Ok(roots) => TestResult::from_bool(
                roots.len() == 1 && (roots[0] - (-b / a)).abs() < 1e-6,
            ),
            Err(_) => TestResult::failed(),
        }
    }
    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(f64, f64) -> TestResult);
}
