use anyhow::{Context, Result};
use clap::{crate_version, Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use env_logger::Builder;

use std::path::PathBuf;

use simplex_tableau::{problem_file, PivotRule, Simplex, SolveAlgorithm, SolveOptions, Start};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum RuleArg {
    Dantzig,
    Bland,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum StartArg {
    TwoPhase,
    Slack,
}

/// Solve a linear program with the tableau simplex method.
#[derive(Debug, Parser)]
#[command(version = crate_version!())]
struct Cli {
    /// Problem file: objective row followed by one row per constraint.
    file: PathBuf,

    /// Entering/leaving variable rule.
    #[arg(long, value_enum, default_value_t = RuleArg::Dantzig)]
    rule: RuleArg,

    /// How to obtain the starting basis.
    #[arg(long, value_enum, default_value_t = StartArg::TwoPhase)]
    start: StartArg,

    /// Maximum number of pivots, 0 for no limit.
    #[arg(long, default_value_t = 10_000)]
    max_iterations: usize,

    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

impl Cli {
    fn options(&self) -> SolveOptions {
        SolveOptions::default()
            .with_rule(match self.rule {
                RuleArg::Dantzig => PivotRule::Dantzig,
                RuleArg::Bland => PivotRule::Bland,
            })
            .with_start(match self.start {
                StartArg::TwoPhase => Start::TwoPhase,
                StartArg::Slack => Start::SlackBasis,
            })
            .with_max_iterations(Some(self.max_iterations).filter(|&n| n > 0))
    }
}

pub fn main() -> Result<()> {
    let cli = Cli::parse();

    Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    let problem = problem_file::read(&cli.file)
        .with_context(|| format!("Reading {}", cli.file.display()))?;

    println!("Objective function and constraints:\n{}", problem);

    let outcome = Simplex::with_options(cli.options())
        .solve_problem(&problem)
        .context("Solving with simplex method by tableau")?;

    println!("{}", outcome);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn default_options() {
        let cli = Cli::parse_from(["simplex-tableau", "problem.csv"]);
        assert_eq!(cli.file, PathBuf::from("problem.csv"));
        assert_eq!(cli.options(), SolveOptions::default());
    }

    #[test]
    fn flags_map_to_options() {
        let cli = Cli::parse_from([
            "simplex-tableau",
            "problem.csv",
            "--rule",
            "bland",
            "--start",
            "slack",
            "--max-iterations",
            "25",
        ]);
        let opts = cli.options();
        assert_eq!(opts.rule, PivotRule::Bland);
        assert_eq!(opts.start, Start::SlackBasis);
        assert_eq!(opts.max_iterations, Some(25));
    }

    #[test]
    fn zero_iterations_means_no_limit() {
        let cli = Cli::parse_from(["simplex-tableau", "problem.csv", "--max-iterations", "0"]);
        assert_eq!(cli.options().max_iterations, None);
    }
}
