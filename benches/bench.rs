use criterion::{Criterion, criterion_group, criterion_main};
use crossword_solver::crossword::puzzle::Crossword;
use crossword_solver::crossword::solver::{DefaultConfig, Solver, SolverConfig};
use crossword_solver::crossword::value_ordering::{DomainOrder, LeastConstrainingValue, ValueOrdering};
use crossword_solver::crossword::variable_selection::{
    FixedOrder, MinimumRemainingValues, RandomOrder, VariableSelection,
};
use crossword_solver::crossword::worklist::{ArcQueue, ArcStack, Worklist};
use std::hint::black_box;
use std::marker::PhantomData;
use std::time::Duration;

const PUZZLES: [(&str, &str); 2] = [
    ("data/structure0.txt", "data/words0.txt"),
    ("data/structure1.txt", "data/words1.txt"),
];

#[derive(Debug, Clone)]
struct SelectorConfig<V: VariableSelection>(PhantomData<V>);

impl<V: VariableSelection> SolverConfig for SelectorConfig<V> {
    type VariableSelector = V;
    type ValueOrder = LeastConstrainingValue;
    type Worklist = ArcQueue;
}

#[derive(Debug, Clone)]
struct OrderingConfig<O: ValueOrdering>(PhantomData<O>);

impl<O: ValueOrdering> SolverConfig for OrderingConfig<O> {
    type VariableSelector = MinimumRemainingValues;
    type ValueOrder = O;
    type Worklist = ArcQueue;
}

#[derive(Debug, Clone)]
struct WorklistConfig<W: Worklist>(PhantomData<W>);

impl<W: Worklist> SolverConfig for WorklistConfig<W> {
    type VariableSelector = MinimumRemainingValues;
    type ValueOrder = LeastConstrainingValue;
    type Worklist = W;
}

fn load_puzzles() -> Vec<Crossword> {
    PUZZLES
        .iter()
        .filter_map(|(structure, words)| match Crossword::from_files(structure, words) {
            Ok(crossword) => Some(crossword),
            Err(e) => {
                eprintln!("Failed to load {structure}: {e}");
                None
            }
        })
        .collect()
}

fn solve_all<Config: SolverConfig>(puzzles: &[Crossword], inference: bool) {
    for crossword in puzzles {
        let mut solver = Solver::<Config>::new(crossword).with_inference(inference);
        black_box(solver.solve());
    }
}

fn bench_variable_selection(c: &mut Criterion) {
    let puzzles = load_puzzles();

    let mut group = c.benchmark_group("crossword - variable selection");
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("MRV", |b| {
        b.iter(|| solve_all::<SelectorConfig<MinimumRemainingValues>>(&puzzles, false));
    });
    group.bench_function("Fixed", |b| {
        b.iter(|| solve_all::<SelectorConfig<FixedOrder>>(&puzzles, false));
    });
    group.bench_function("Random", |b| {
        b.iter(|| solve_all::<SelectorConfig<RandomOrder>>(&puzzles, false));
    });

    group.finish();
}

fn bench_value_ordering(c: &mut Criterion) {
    let puzzles = load_puzzles();

    let mut group = c.benchmark_group("crossword - value ordering");
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("LCV", |b| {
        b.iter(|| solve_all::<OrderingConfig<LeastConstrainingValue>>(&puzzles, false));
    });
    group.bench_function("Domain", |b| {
        b.iter(|| solve_all::<OrderingConfig<DomainOrder>>(&puzzles, false));
    });

    group.finish();
}

fn bench_propagation(c: &mut Criterion) {
    let puzzles = load_puzzles();

    let mut group = c.benchmark_group("crossword - propagation");
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("Queue", |b| {
        b.iter(|| solve_all::<WorklistConfig<ArcQueue>>(&puzzles, false));
    });
    group.bench_function("Stack", |b| {
        b.iter(|| solve_all::<WorklistConfig<ArcStack>>(&puzzles, false));
    });
    group.bench_function("Default with inference", |b| {
        b.iter(|| solve_all::<DefaultConfig>(&puzzles, true));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_variable_selection,
    bench_value_ordering,
    bench_propagation
);
criterion_main!(benches);
