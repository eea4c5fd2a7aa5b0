use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tasksim::{Sim, Workload};
use tracing::error;

const USAGE: &str = "USAGE: <program> <commands_file>";

/// Single-CPU priority scheduler driven by a command script.
#[derive(Parser, Debug)]
#[command(name = "tasksim", version, about)]
struct CliArgs {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Run a command script and print the scheduler's report lines
    Run {
        /// Path to the commands file
        commands_file: PathBuf,

        /// Print response/turnaround/off-CPU averages after the run
        #[arg(long, env = "TASKSIM_STATS")]
        stats: bool,
    },

    /// Print a reproducible random command script
    Generate {
        #[arg(long, default_value_t = 100)]
        ticks: u64,

        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Probability of an arrival per tick
        #[arg(long, default_value_t = 0.3)]
        p_arrival: f64,

        #[arg(long, default_value_t = 0.05)]
        p_block: f64,

        #[arg(long, default_value_t = 0.1)]
        p_unblock: f64,

        /// Probability that an arrival gets the short burst
        #[arg(long, default_value_t = 0.3)]
        p_short: f64,

        #[arg(long, default_value_t = 2)]
        short_burst: u128,

        #[arg(long, default_value_t = 6)]
        long_burst: u128,

        /// Priorities are drawn uniformly from 0..=max_priority
        #[arg(long, default_value_t = 4)]
        max_priority: i128,
    },
}

fn main() -> Result<ExitCode> {
    // Logs go to stderr; stdout carries only report lines
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let args = CliArgs::parse();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let code = match args.command {
        CliCommand::Run {
            commands_file,
            stats,
        } => run_file(&commands_file, stats, &mut out)?,
        CliCommand::Generate {
            ticks,
            seed,
            p_arrival,
            p_block,
            p_unblock,
            p_short,
            short_burst,
            long_burst,
            max_priority,
        } => {
            let workload = Workload {
                ticks,
                p_arrival,
                p_block,
                p_unblock,
                p_short,
                short_burst,
                long_burst,
                max_priority,
                seed,
            };
            for line in workload.generate() {
                writeln!(out, "{line}")?;
            }
            ExitCode::SUCCESS
        }
    };

    out.flush().context("failed to flush stdout")?;
    Ok(code)
}

fn run_file(path: &Path, stats: bool, out: &mut impl Write) -> Result<ExitCode> {
    let script = match std::fs::read_to_string(path) {
        Ok(script) => script,
        Err(err) => {
            error!(path = %path.display(), error = %err, "cannot read commands file");
            writeln!(out, "{USAGE}")?;
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut sim = Sim::new();
    sim.run_script(&script, out)
        .context("failed to write report output")?;
    if stats {
        writeln!(out, "{}", sim.stats())?;
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEMO: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/basic.txt");

    fn run_to_string(path: &Path, stats: bool) -> (ExitCode, String) {
        let mut out = Vec::new();
        let code = run_file(path, stats, &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_unreadable_file_prints_usage_and_fails() {
        let (code, out) = run_to_string(Path::new("/nonexistent/tasksim/commands.txt"), true);
        assert_eq!(code, ExitCode::FAILURE);
        assert_eq!(out, "USAGE: <program> <commands_file>\n");
    }

    #[test]
    fn test_run_without_stats_prints_only_reports() {
        let (code, out) = run_to_string(Path::new(DEMO), false);
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(out.starts_with("READY_QUEUE\n-> B | priority=1 | remaining= 2\n"));
        assert!(out.ends_with("RUNNING long job\nIDLE\nIDLE\nIDLE\n"));
        assert!(!out.contains("Completed tasks"));
    }

    #[test]
    fn test_run_with_stats_appends_averages() {
        let (code, out) = run_to_string(Path::new(DEMO), true);
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(out.ends_with(
            "IDLE\n\
             Completed tasks: 3\n\
             Average response time: 2.00 ticks\n\
             Average turnaround time: 5.00 ticks\n\
             Average offcpu time: 3.00 ticks\n"
        ));
    }

    #[test]
    fn test_cli_parses_stats_flag() {
        let args = CliArgs::try_parse_from(["tasksim", "run", "cmds.txt", "--stats"]).unwrap();
        match args.command {
            CliCommand::Run {
                commands_file,
                stats,
            } => {
                assert_eq!(commands_file, PathBuf::from("cmds.txt"));
                assert!(stats);
            }
            other => panic!("parsed as {other:?}"),
        }
        assert!(CliArgs::try_parse_from(["tasksim", "run"]).is_err());
    }

    #[test]
    fn test_generate_accepts_wide_burst() {
        let args = CliArgs::try_parse_from([
            "tasksim",
            "generate",
            "--long-burst",
            "99999999999999999999",
        ])
        .unwrap();
        assert!(matches!(
            args.command,
            CliCommand::Generate { long_burst: 99_999_999_999_999_999_999, .. }
        ));
    }
}
