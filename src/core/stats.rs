use std::fmt;

use average::{Estimate, Mean};

use super::state::{TaskId, Ticks};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub id: TaskId,
    pub burst: Ticks,
    pub admitted_at: Ticks,
    pub first_run: Ticks,
    pub finished_at: Ticks,
}

impl Completion {
    pub fn response_time(&self) -> Ticks {
        self.first_run - self.admitted_at
    }

    pub fn turnaround_time(&self) -> Ticks {
        self.finished_at - self.admitted_at
    }

    pub fn offcpu_time(&self) -> Ticks {
        self.turnaround_time() - self.burst
    }
}

// Running means, so memory stays flat however many tasks finish
#[derive(Debug, Clone)]
pub struct RunStats {
    completed: u64,
    response: Mean,
    turnaround: Mean,
    offcpu: Mean,
}

impl Default for RunStats {
    fn default() -> Self {
        Self {
            completed: 0,
            response: Mean::new(),
            turnaround: Mean::new(),
            offcpu: Mean::new(),
        }
    }
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, done: &Completion) {
        self.completed += 1;
        self.response.add(done.response_time() as f64);
        self.turnaround.add(done.turnaround_time() as f64);
        self.offcpu.add(done.offcpu_time() as f64);
    }

    pub fn completed(&self) -> u64 {
        self.completed
    }

    pub fn avg_response(&self) -> f64 {
        self.response.estimate()
    }

    pub fn avg_turnaround(&self) -> f64 {
        self.turnaround.estimate()
    }

    pub fn avg_offcpu(&self) -> f64 {
        self.offcpu.estimate()
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Completed tasks: {}", self.completed)?;
        writeln!(f, "Average response time: {:.2} ticks", self.avg_response())?;
        writeln!(f, "Average turnaround time: {:.2} ticks", self.avg_turnaround())?;
        write!(f, "Average offcpu time: {:.2} ticks", self.avg_offcpu())
    }
}
