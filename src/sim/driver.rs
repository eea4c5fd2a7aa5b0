use std::io::{self, Write};

use tracing::{debug, info, warn};

use super::{command::Command, script::tokenize};
use crate::{
    core::{Observer, Report, RunStats, Scheduler},
    error::SchedError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Report(Report),
    Diagnostic(SchedError),
    // Accepted with nothing to print (successful ADD_TASK, empty line)
    Silent,
    Quit,
}

// Engine invariants are checked after every step
#[derive(Debug, Default)]
pub struct Sim {
    pub core: Scheduler,
    observer: Observer,
    halted: bool,
}

impl Sim {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    // Once halted by QUIT, every further step is a no-op
    pub fn step(&mut self, tokens: &[String]) -> Outcome {
        if self.halted {
            return Outcome::Quit;
        }
        let Some((keyword, args)) = tokens.split_first() else {
            return Outcome::Silent;
        };

        let outcome = match Command::parse(keyword, args).and_then(|cmd| self.execute(cmd)) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(command = %keyword, error = ?err, "command rejected");
                Outcome::Diagnostic(err)
            }
        };

        self.observer.observe(&self.core);
        if outcome == Outcome::Quit {
            self.halted = true;
        }
        outcome
    }

    fn execute(&mut self, cmd: Command) -> Result<Outcome, SchedError> {
        let outcome = match cmd {
            Command::AddTask {
                id,
                priority,
                burst,
            } => {
                self.core.admit(id, priority, burst)?;
                Outcome::Silent
            }
            Command::Tick => Outcome::Report(self.core.tick()),
            Command::Block => Outcome::Report(self.core.block_running()?),
            Command::Unblock => Outcome::Report(self.core.unblock_one()?),
            Command::PrintReady => Outcome::Report(self.core.report_ready()),
            Command::PrintBlocked => Outcome::Report(self.core.report_blocked()),
            Command::Status => Outcome::Report(self.core.report_status()),
            Command::Quit => Outcome::Quit,
        };
        Ok(outcome)
    }

    pub fn run_script<W: Write>(&mut self, script: &str, out: &mut W) -> io::Result<()> {
        for (lineno, line) in script.lines().enumerate() {
            let Some(tokens) = tokenize(line) else {
                continue;
            };
            debug!(line = lineno + 1, ?tokens, "step");
            match self.step(&tokens) {
                Outcome::Report(report) => writeln!(out, "{report}")?,
                Outcome::Diagnostic(err) => writeln!(out, "{err}")?,
                Outcome::Silent => {}
                Outcome::Quit => break,
            }
        }
        info!(
            steps = self.observer.steps(),
            ticks = self.core.now(),
            completed = self.core.stats().completed(),
            "script finished"
        );
        Ok(())
    }

    pub fn stats(&self) -> &RunStats {
        self.core.stats()
    }
}
