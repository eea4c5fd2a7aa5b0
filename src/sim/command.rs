use std::num::IntErrorKind;

use crate::core::{Priority, TaskId};
use crate::error::SchedError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddTask {
        id: TaskId,
        priority: Priority,
        burst: i128,
    },
    Tick,
    Block,
    Unblock,
    PrintReady,
    PrintBlocked,
    Status,
    Quit,
}

impl Command {
    // ADD_TASK checks arity and integer syntax here; positivity and
    // uniqueness are the scheduler's. Surplus args elsewhere are ignored.
    pub fn parse(keyword: &str, args: &[String]) -> Result<Self, SchedError> {
        let keyword = keyword.to_uppercase();
        let cmd = match keyword.as_str() {
            "ADD_TASK" => {
                let [id, priority, burst] = args else {
                    return Err(SchedError::AddTaskArity);
                };
                let (priority, burst) = (parse_int(priority), parse_int(burst));
                if priority == Err(IntError::Invalid) || burst == Err(IntError::Invalid) {
                    return Err(SchedError::NotInteger);
                }
                let (Ok(priority), Ok(burst)) = (priority, burst) else {
                    return Err(SchedError::IntegerOutOfRange);
                };
                Self::AddTask {
                    id: id.clone(),
                    priority,
                    burst,
                }
            }
            "TICK" => Self::Tick,
            "BLOCK" => Self::Block,
            "UNBLOCK" => Self::Unblock,
            "PRINT_READY" => Self::PrintReady,
            "PRINT_BLOCKED" => Self::PrintBlocked,
            "STATUS" => Self::Status,
            "QUIT" => Self::Quit,
            _ => return Err(SchedError::UnknownCommand(keyword)),
        };
        Ok(cmd)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IntError {
    Invalid,
    OutOfRange,
}

// Decimal with optional sign, surrounding whitespace, and single
// underscores between digits (`1_000`)
fn parse_int(raw: &str) -> Result<i128, IntError> {
    let raw = raw.trim();
    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    let well_formed = !digits.is_empty()
        && digits
            .split('_')
            .all(|group| !group.is_empty() && group.bytes().all(|b| b.is_ascii_digit()));
    if !well_formed {
        return Err(IntError::Invalid);
    }

    raw.replace('_', "").parse::<i128>().map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => IntError::OutOfRange,
        _ => IntError::Invalid,
    })
}
