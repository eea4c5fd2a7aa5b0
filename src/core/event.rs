use std::fmt;

use crate::core::{TaskId, TaskSnapshot};

// Multi-line reports are joined with '\n', no trailing newline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Running(TaskId),
    Idle,
    Blocked(TaskId),
    Unblocked(TaskId),
    ReadyQueue(Vec<TaskSnapshot>),
    BlockedQueue(Vec<TaskSnapshot>),
    Status(Option<TaskSnapshot>),
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running(id) => write!(f, "RUNNING {id}"),
            Self::Idle => write!(f, "IDLE"),
            Self::Blocked(id) => write!(f, "BLOCKED {id}"),
            Self::Unblocked(id) => write!(f, "UNBLOCKED {id}"),
            Self::ReadyQueue(tasks) => {
                write!(f, "READY_QUEUE")?;
                if tasks.is_empty() {
                    return write!(f, "\nEMPTY");
                }
                for t in tasks {
                    write!(
                        f,
                        "\n-> {} | priority={} | remaining= {}",
                        t.id, t.priority, t.remaining
                    )?;
                }
                Ok(())
            }
            Self::BlockedQueue(tasks) => {
                write!(f, "BLOCKED_QUEUE")?;
                if tasks.is_empty() {
                    return write!(f, "\nEMPTY");
                }
                for t in tasks {
                    write!(f, "\n-> {} | remaining={}", t.id, t.remaining)?;
                }
                Ok(())
            }
            Self::Status(None) => write!(f, "STATUS\nIDLE"),
            Self::Status(Some(t)) => write!(
                f,
                "STATUS\n-> {} | priority={} |  remaining={}",
                t.id, t.priority, t.remaining
            ),
        }
    }
}
