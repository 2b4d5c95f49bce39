//! Tessel CLI: the command-line interface for the Tessel placer.
//!
//! Provides `tessel place` to place a netlist and write the result, and
//! `tessel check` to parse and validate a netlist without placing it.

#![warn(missing_docs)]

mod check;
mod pipeline;
mod place;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tessel_config::InfeasiblePolicy;

/// Tessel: a greedy abutment placer for gate netlists.
#[derive(Parser, Debug)]
#[command(name = "tessel", version, about = "Tessel gate placer")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print per-net placement detail.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a `tessel.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Place a netlist and write gate positions.
    Place(PlaceArgs),
    /// Parse and validate a netlist without placing it.
    Check(CheckArgs),
}

/// Arguments for `tessel place`.
#[derive(Parser, Debug)]
pub struct PlaceArgs {
    /// Netlist file to read.
    pub input: PathBuf,

    /// Placement file to write.
    pub output: PathBuf,

    /// Also write a `<gate> <width> <height>` file.
    #[arg(long)]
    pub dimensions: Option<PathBuf>,

    /// Grid width in cells (overrides `grid.width`).
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub grid_width: Option<u64>,

    /// Grid height in cells (overrides `grid.height`).
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub grid_height: Option<u64>,

    /// What to do with a gate that has no feasible position
    /// (overrides `placement.on_infeasible`).
    #[arg(long, value_enum)]
    pub on_infeasible: Option<PolicyArg>,

    /// Output format for diagnostics and the summary.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Arguments for `tessel check`.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Netlist file to read.
    pub input: PathBuf,

    /// Output format for diagnostics and the summary.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Infeasible-gate policy as a command-line value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Skip the gate and continue.
    Skip,
    /// Retry unplaced gates once after all nets.
    Retry,
    /// Stop at the first infeasible gate.
    Fail,
}

impl From<PolicyArg> for InfeasiblePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Skip => InfeasiblePolicy::Skip,
            PolicyArg::Retry => InfeasiblePolicy::Retry,
            PolicyArg::Fail => InfeasiblePolicy::Fail,
        }
    }
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Color when stderr is a terminal.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Diagnostic output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON on stdout.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print per-net detail.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a config file.
    pub config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::io::stderr().is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Place(ref args) => place::run(args, &global),
        Command::Check(ref args) => check::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_place_minimal() {
        let cli = Cli::parse_from(["tessel", "place", "in.net", "out.txt"]);
        match cli.command {
            Command::Place(ref args) => {
                assert_eq!(args.input, PathBuf::from("in.net"));
                assert_eq!(args.output, PathBuf::from("out.txt"));
                assert!(args.dimensions.is_none());
                assert!(args.grid_width.is_none());
                assert!(args.grid_height.is_none());
                assert!(args.on_infeasible.is_none());
                assert_eq!(args.format, ReportFormat::Text);
            }
            _ => panic!("expected Place command"),
        }
    }

    #[test]
    fn parse_place_with_args() {
        let cli = Cli::parse_from([
            "tessel",
            "place",
            "in.net",
            "out.txt",
            "--dimensions",
            "dims.txt",
            "--grid-width",
            "64",
            "--grid-height",
            "32",
            "--on-infeasible",
            "retry",
            "--format",
            "json",
        ]);
        match cli.command {
            Command::Place(ref args) => {
                assert_eq!(args.dimensions, Some(PathBuf::from("dims.txt")));
                assert_eq!(args.grid_width, Some(64));
                assert_eq!(args.grid_height, Some(32));
                assert_eq!(args.on_infeasible, Some(PolicyArg::Retry));
                assert_eq!(args.format, ReportFormat::Json);
            }
            _ => panic!("expected Place command"),
        }
    }

    #[test]
    fn parse_place_rejects_zero_grid() {
        let result = Cli::try_parse_from(["tessel", "place", "a", "b", "--grid-width", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_place_requires_output() {
        assert!(Cli::try_parse_from(["tessel", "place", "in.net"]).is_err());
    }

    #[test]
    fn parse_check() {
        let cli = Cli::parse_from(["tessel", "check", "in.net", "-f", "json"]);
        match cli.command {
            Command::Check(ref args) => {
                assert_eq!(args.input, PathBuf::from("in.net"));
                assert_eq!(args.format, ReportFormat::Json);
            }
            _ => panic!("expected Check command"),
        }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from(["tessel", "--quiet", "--color", "never", "check", "a.net"]);
        assert!(cli.quiet);
        assert!(!cli.verbose);
        assert_eq!(cli.color, ColorChoice::Never);
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["tessel", "check", "a.net", "--verbose", "--config", "x.toml"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }

    #[test]
    fn parse_unknown_policy_fails() {
        let result =
            Cli::try_parse_from(["tessel", "place", "a", "b", "--on-infeasible", "ignore"]);
        assert!(result.is_err());
    }

    #[test]
    fn policy_arg_converts() {
        assert_eq!(InfeasiblePolicy::from(PolicyArg::Skip), InfeasiblePolicy::Skip);
        assert_eq!(InfeasiblePolicy::from(PolicyArg::Retry), InfeasiblePolicy::Retry);
        assert_eq!(InfeasiblePolicy::from(PolicyArg::Fail), InfeasiblePolicy::Fail);
    }

    #[test]
    fn parse_no_subcommand_fails() {
        assert!(Cli::try_parse_from(["tessel"]).is_err());
    }
}
