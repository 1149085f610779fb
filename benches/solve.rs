//! Solver benchmarks: disjunctive blowup and modal depth.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use modal_tableau::formula::Formula;
use modal_tableau::frame::FrameProperties;
use modal_tableau::solver::Solver;

/// (p1 | q1) & (p2 | q2) & ... — every conjunct doubles the branch count.
fn disjunction_chain(n: usize) -> Arc<Formula> {
    let mut formula = Formula::or(Formula::atom("p0"), Formula::atom("q0"));
    for i in 1..n {
        let clause = Formula::or(
            Formula::atom(format!("p{i}")),
            Formula::atom(format!("q{i}")),
        );
        formula = Formula::and(formula, clause);
    }
    formula
}

/// <><>...<>p — a chain of fresh worlds of the given depth.
fn diamond_chain(depth: usize) -> Arc<Formula> {
    let mut formula = Formula::atom("p");
    for _ in 0..depth {
        formula = Formula::possibly(formula);
    }
    formula
}

fn bench_disjunction_blowup(c: &mut Criterion) {
    let solver = Solver::for_frame(FrameProperties::K);
    for n in [4, 8] {
        let formula = disjunction_chain(n);
        c.bench_function(&format!("disjunction_chain_{n}"), |b| {
            b.iter(|| solver.solve(black_box(formula.clone())).unwrap())
        });
    }
}

fn bench_modal_depth(c: &mut Criterion) {
    for frame in [FrameProperties::K, FrameProperties::S4] {
        let solver = Solver::for_frame(frame);
        let formula = diamond_chain(6);
        c.bench_function(&format!("diamond_chain_6_{frame}"), |b| {
            b.iter(|| solver.solve(black_box(formula.clone())).unwrap())
        });
    }
}

criterion_group!(benches, bench_disjunction_blowup, bench_modal_depth);
criterion_main!(benches);
