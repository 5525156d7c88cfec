//! # crossword
//!
//! `crossword` is a command-line crossword generator. It reads a grid structure
//! and a word list, then fills every slot with a distinct word so that crossing
//! slots agree on their shared letters.
//!
//! Solving treats the puzzle as a constraint satisfaction problem:
//! 1.  **Node consistency** drops words of the wrong length.
//! 2.  **Arc consistency (AC-3)** drops words that cannot meet any crossing word.
//! 3.  **Backtracking search** fills slots one at a time, optionally maintaining
//!     arc consistency after every choice.
//!
//! ## Usage
//!
//! ```sh
//! crossword [OPTIONS] <STRUCTURE> <WORDS> [OUTPUT]
//! crossword solve --structure <PATH> --words <PATH> [--output <PATH>] [OPTIONS]
//! crossword dir --path <DIR> --words <PATH> [OPTIONS]
//! crossword completions <SHELL>
//! ```
//!
//! The structure file uses `_` for fillable cells; any other character is a
//! blocked cell. The word list has one word per line.
//!
//! ### Common options
//!
//! -   `-d, --debug`: Debug logging (default: `false`).
//! -   `--no-verify`: Skip checking the solution against every constraint.
//! -   `--stats`: Print search statistics (default: `false`).
//! -   `--variable-selection <mrv|fixed|random>` (default: `mrv`).
//! -   `--value-ordering <lcv|domain>` (default: `lcv`).
//! -   `--worklist <queue|stack>` (default: `queue`).
//! -   `--inference`: Maintain arc consistency during search.
//! -   `--seed <N>`: Seed for random variable selection.
//!
//! ## Example Invocations
//!
//! ```sh
//! crossword data/structure0.txt data/words0.txt
//! crossword data/structure0.txt data/words0.txt out.txt --stats
//! crossword dir --path data --words data/words0.txt --inference
//! ```

use crate::command_line::cli::{Cli, Commands, init_logging, solve_and_report, solve_dir};
use anyhow::bail;
use clap::{CommandFactory, Parser};
use clap_complete::generate;

mod command_line {
    pub(crate) mod cli;
}

/// Global allocator using `tikv-jemallocator` so memory usage can be reported.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Solve {
            structure,
            words,
            output,
            common,
        }) => {
            init_logging(common.debug);
            solve_and_report(&structure, &words, output.as_deref(), &common)
        }

        Some(Commands::Dir {
            path,
            words,
            common,
        }) => {
            init_logging(common.debug);
            solve_dir(&path, &words, &common)
        }

        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }

        None => {
            init_logging(cli.common.debug);
            let (Some(structure), Some(words)) = (cli.structure, cli.words) else {
                bail!("Expected a structure file and a word list. Use --help for more information.");
            };
            solve_and_report(&structure, &words, cli.output.as_deref(), &cli.common)
        }
    }
}
