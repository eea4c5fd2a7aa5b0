use thiserror::Error;

use crate::core::TaskId;

// Display form is the diagnostic line; none of these abort a run
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedError {
    #[error("ERROR: ADD_TASK requires 3 arguments: id priority burst_time")]
    AddTaskArity,

    #[error("ERROR: priority and burst_time must be integers")]
    NotInteger,

    #[error("ERROR: priority and burst_time must fit in 128 bits")]
    IntegerOutOfRange,

    #[error("ERROR: burst_time must be a positive integer")]
    NonPositiveBurst,

    #[error("DUPLICATE")]
    Duplicate(TaskId),

    #[error("ERROR: NO_TASK_RUNNING")]
    NoTaskRunning,

    #[error("ERROR: NO_TASK_BLOCKED")]
    NoTaskBlocked,

    #[error("ERROR: Unknown command '{0}'")]
    UnknownCommand(String),
}

// The scheduler checks emptiness before every removal, so one of these
// escaping a container is a bug
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CollectionError {
    #[error("index {index} out of range for length {len}")]
    OutOfRange { index: usize, len: usize },

    #[error("container is empty")]
    Empty,
}
