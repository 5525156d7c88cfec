#![allow(clippy::cast_precision_loss)]

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use crossword_solver::crossword::assignment::Assignment;
use crossword_solver::crossword::puzzle::Crossword;
use crossword_solver::crossword::solver::{DynamicConfig, SolutionStats, Solver};
use crossword_solver::crossword::structure::find_structures;
use crossword_solver::crossword::value_ordering::ValueOrderingType;
use crossword_solver::crossword::variable_selection::VariableSelectionType;
use crossword_solver::crossword::worklist::WorklistType;
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tikv_jemalloc_ctl::{epoch, stats};

const MIB: f64 = 1024.0 * 1024.0;

/// Defines the command-line interface for the crossword generator.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(
    name = "crossword",
    version,
    about = "Fills crossword grids by constraint propagation and backtracking search",
    args_conflicts_with_subcommands = true
)]
pub(crate) struct Cli {
    /// Path to the structure file, when no subcommand is given.
    pub structure: Option<PathBuf>,

    /// Path to the word list, when no subcommand is given.
    pub words: Option<PathBuf>,

    /// Optional file the filled grid is written to.
    pub output: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `solve`, `dir`).
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a single puzzle.
    Solve {
        /// Path to the structure file.
        #[arg(long)]
        structure: PathBuf,

        /// Path to the word list, one word per line.
        #[arg(long)]
        words: PathBuf,

        /// Optional file the filled grid is written to.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every structure file (name starting with `structure`) under a directory.
    Dir {
        /// Directory to search.
        #[arg(long)]
        path: PathBuf,

        /// Word list shared by every puzzle.
        #[arg(long)]
        words: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Default, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct CommonOptions {
    /// Enable debug logging. `RUST_LOG` takes precedence when set.
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,

    /// Skip checking the solution against every constraint before printing it.
    #[arg(long, default_value_t = false)]
    pub(crate) no_verify: bool,

    /// Print search statistics after solving.
    #[arg(short, long, default_value_t = false)]
    pub(crate) stats: bool,

    /// Maintain arc consistency after every assignment during search.
    #[arg(short, long, default_value_t = false)]
    pub(crate) inference: bool,

    /// Seed for `--variable-selection random`.
    #[arg(long)]
    pub(crate) seed: Option<u64>,

    /// Strategy for choosing the next slot to fill.
    #[arg(long, default_value_t = VariableSelectionType::Mrv)]
    pub(crate) variable_selection: VariableSelectionType,

    /// Order in which candidate words are tried.
    #[arg(long, default_value_t = ValueOrderingType::Lcv)]
    pub(crate) value_ordering: ValueOrderingType,

    /// Arc worklist discipline for AC-3.
    #[arg(long, default_value_t = WorklistType::Queue)]
    pub(crate) worklist: WorklistType,
}

/// Initialises `env_logger`, defaulting to `info` or to `debug` with `--debug`.
pub(crate) fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .try_init();
}

/// Builds a solver for `crossword` from the heuristics named in `common`.
pub(crate) fn get_solver<'a>(
    common: &CommonOptions,
    crossword: &'a Crossword,
) -> Solver<'a, DynamicConfig> {
    Solver::<DynamicConfig>::from_parts(
        crossword,
        common.variable_selection.to_impl(crossword, common.seed),
        common.value_ordering.to_impl(crossword),
        common.worklist.to_impl(),
    )
    .with_inference(common.inference)
}

/// Solves `crossword` with the configured solver.
///
/// # Returns
/// The solution if one exists, the time spent solving, and the solver's statistics.
pub(crate) fn solve(
    crossword: &Crossword,
    common: &CommonOptions,
) -> (Option<Assignment>, Duration, SolutionStats) {
    debug!(
        "Solving with {} selection, {} ordering, {} worklist, inference {}",
        common.variable_selection, common.value_ordering, common.worklist, common.inference
    );

    let time = Instant::now();
    let mut solver = get_solver(common, crossword);
    let solution = solver.solve();
    let elapsed = time.elapsed();

    (solution, elapsed, solver.stats())
}

/// Loads one puzzle, solves it, and reports the grid, verification and statistics.
///
/// # Errors
///
/// If either input cannot be loaded, the output cannot be written, or the
/// solution fails verification.
pub(crate) fn solve_and_report(
    structure: &Path,
    words: &Path,
    output: Option<&Path>,
    common: &CommonOptions,
) -> anyhow::Result<()> {
    let time = Instant::now();
    let crossword = Crossword::from_files(structure, words)
        .with_context(|| format!("Failed to load puzzle {}", structure.display()))?;
    let parse_time = time.elapsed();

    info!(
        "Solving {}: {} slots, {} words",
        structure.display(),
        crossword.num_variables(),
        crossword.words().len()
    );

    let (solution, elapsed, solver_stats) = solve(&crossword, common);

    if !common.no_verify {
        verify_solution(&crossword, solution.as_ref())?;
    }

    if common.stats {
        print_stats(
            parse_time,
            elapsed,
            &crossword,
            &solver_stats,
            memory_usage(),
            solution.is_some(),
        );
    }

    let Some(solution) = solution else {
        println!("No solution.");
        return Ok(());
    };

    for (variable, word) in crossword.entries(&solution) {
        debug!("{variable} = {word}");
    }

    let grid = crossword.render(&solution);
    print!("{grid}");

    if let Some(output) = output {
        std::fs::write(output, &grid)
            .with_context(|| format!("Unable to write {}", output.display()))?;
        info!("Grid written to {}", output.display());
    }

    Ok(())
}

/// Solves every structure file found under `path` against the same word list.
///
/// # Errors
///
/// If `path` is not a directory, the directory cannot be walked, or any puzzle fails
/// to load or verify.
pub(crate) fn solve_dir(path: &Path, words: &Path, common: &CommonOptions) -> anyhow::Result<()> {
    if !path.is_dir() {
        bail!("Provided path is not a directory: {}", path.display());
    }

    let structures = find_structures(path)
        .with_context(|| format!("Failed to search {}", path.display()))?;

    if structures.is_empty() {
        info!("No structure files under {}", path.display());
    }

    for structure in &structures {
        solve_and_report(structure, words, None, common)?;
        println!();
    }

    Ok(())
}

/// Checks a solution against every constraint of the puzzle.
///
/// # Errors
///
/// If the solution is incomplete or violates a constraint.
pub(crate) fn verify_solution(
    crossword: &Crossword,
    solution: Option<&Assignment>,
) -> anyhow::Result<()> {
    match solution {
        Some(solution) => {
            let ok = crossword.verify(solution);
            info!("Verified: {ok}");
            if !ok {
                bail!("Solution failed verification!");
            }
        }
        None => info!("Unsatisfiable"),
    }
    Ok(())
}

/// Allocated and resident memory in MiB, if jemalloc can report them.
fn memory_usage() -> Option<(f64, f64)> {
    epoch::advance().ok()?;
    let allocated = stats::allocated::mib().ok()?.read().ok()?;
    let resident = stats::resident::mib().ok()?.read().ok()?;
    Some((allocated as f64 / MIB, resident as f64 / MIB))
}

/// Prints a single statistic line in a formatted table row.
pub(crate) fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Prints a statistic line that includes a rate (value/second).
pub(crate) fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
pub(crate) fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    crossword: &Crossword,
    s: &SolutionStats,
    memory: Option<(f64, f64)>,
    solved: bool,
) {
    let elapsed_secs = elapsed.as_secs_f64();

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line(
        "Grid",
        format!("{}x{}", crossword.height(), crossword.width()),
    );
    stat_line("Slots", crossword.num_variables());
    stat_line("Crossings", crossword.arcs().count() / 2);
    stat_line("Words", crossword.words().len());

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Revisions", s.revisions, elapsed_secs);
    stat_line("Values removed", s.removals);
    stat_line_with_rate("Search nodes", s.nodes, elapsed_secs);
    stat_line_with_rate("Candidates", s.candidates, elapsed_secs);
    stat_line("Inconsistent candidates", s.inconsistent);
    stat_line("Backtracks", s.backtracks);
    stat_line("Inference failures", s.inference_failures);
    if let Some((allocated, resident)) = memory {
        stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
        stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    }
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");

    if solved {
        println!("\nSOLVED");
    } else {
        println!("\nUNSOLVABLE");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    const STRUCTURE: &str = "#___#\n#_##_\n#_##_\n#_##_\n#____\n";
    const WORDS: &str = "one\ntwo\nthree\nfour\nfive\nsix\nseven\neight\nnine\nten\n";

    fn write_puzzle(dir: &Path) -> (PathBuf, PathBuf) {
        let structure = dir.join("structure0.txt");
        let words = dir.join("words0.txt");
        std::fs::write(&structure, STRUCTURE).unwrap();
        std::fs::write(&words, WORDS).unwrap();
        (structure, words)
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_positional_arguments() {
        let cli = Cli::try_parse_from(["crossword", "s.txt", "w.txt", "out.txt"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.structure, Some(PathBuf::from("s.txt")));
        assert_eq!(cli.words, Some(PathBuf::from("w.txt")));
        assert_eq!(cli.output, Some(PathBuf::from("out.txt")));
        assert!(!cli.common.no_verify);
        assert_eq!(cli.common.variable_selection, VariableSelectionType::Mrv);
    }

    #[test]
    fn test_solve_subcommand_options() {
        let cli = Cli::try_parse_from([
            "crossword",
            "solve",
            "--structure",
            "s.txt",
            "--words",
            "w.txt",
            "--inference",
            "--worklist",
            "stack",
            "--value-ordering",
            "domain",
        ])
        .unwrap();

        let Some(Commands::Solve { common, output, .. }) = cli.command else {
            panic!("expected the solve subcommand");
        };
        assert!(output.is_none());
        assert!(common.inference);
        assert_eq!(common.worklist, WorklistType::Stack);
        assert_eq!(common.value_ordering, ValueOrderingType::Domain);
    }

    #[test]
    fn test_verification_can_be_disabled() {
        let cli = Cli::try_parse_from(["crossword", "s.txt", "w.txt", "--no-verify"]).unwrap();
        assert!(cli.common.no_verify);

        let cli = Cli::try_parse_from([
            "crossword", "dir", "--path", "data", "--words", "w.txt", "--no-verify",
        ])
        .unwrap();
        let Some(Commands::Dir { common, .. }) = cli.command else {
            panic!("expected the dir subcommand");
        };
        assert!(common.no_verify);

        assert!(Cli::try_parse_from(["crossword", "s.txt", "w.txt", "--verify=false"]).is_err());
    }

    #[test]
    fn test_solve_and_report_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let (structure, words) = write_puzzle(dir.path());
        let output = dir.path().join("out.txt");

        let common = CommonOptions {
            stats: true,
            ..CommonOptions::default()
        };
        solve_and_report(&structure, &words, Some(&output), &common).unwrap();

        let grid = std::fs::read_to_string(&output).unwrap();
        assert_eq!(grid, "█SIX█\n█E██F\n█V██I\n█E██V\n█NINE\n");
    }

    #[test]
    fn test_solve_and_report_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("structure9.txt");
        let words = dir.path().join("words.txt");
        assert!(solve_and_report(&missing, &words, None, &CommonOptions::default()).is_err());
    }

    #[test]
    fn test_solve_dir() {
        let dir = tempfile::tempdir().unwrap();
        let (_, words) = write_puzzle(dir.path());
        std::fs::write(dir.path().join("structure1.txt"), "___\n").unwrap();

        assert!(solve_dir(dir.path(), &words, &CommonOptions::default()).is_ok());
        assert!(solve_dir(&words, &words, &CommonOptions::default()).is_err());
    }

    #[test]
    fn test_solver_from_options_finds_fill() {
        let crossword = Crossword::parse(STRUCTURE, WORDS).unwrap();
        let common = CommonOptions {
            variable_selection: VariableSelectionType::Random,
            seed: Some(11),
            inference: true,
            ..CommonOptions::default()
        };

        let (solution, _, stats) = solve(&crossword, &common);
        let solution = solution.unwrap();
        assert!(crossword.verify(&solution));
        assert!(stats.nodes >= crossword.num_variables());
        assert!(verify_solution(&crossword, Some(&solution)).is_ok());
    }
}
