pub mod collections;
pub mod core;
pub mod error;
pub mod sim;

pub use crate::core::{Report, RunStats, Scheduler, Task, TaskState};
pub use error::{CollectionError, SchedError};
pub use sim::{Outcome, Sim, Workload};
