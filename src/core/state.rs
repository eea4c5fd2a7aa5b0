use std::cmp::Ordering;

pub type TaskId = String;
// Wide enough for any integer a script can reasonably spell out
pub type Priority = i128;
pub type Ticks = u128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Ready,
    Running,
    Blocked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub priority: Priority,
    pub remaining: Ticks,
    // Stamped by the ready heap each time the task enters READY
    pub insertion_order: u64,

    // Bookkeeping for run statistics only; never consulted by scheduling
    pub burst: Ticks,
    pub admitted_at: Ticks,
    pub first_run: Option<Ticks>,
}

impl Task {
    pub fn new(id: TaskId, priority: Priority, burst: Ticks, admitted_at: Ticks) -> Self {
        debug_assert!(burst > 0, "Task {id} admitted with zero burst");
        Self {
            id,
            priority,
            remaining: burst,
            insertion_order: 0,
            burst,
            admitted_at,
            first_run: None,
        }
    }

    // Lower priority value first, then earlier insertion
    pub fn sched_cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| self.insertion_order.cmp(&other.insertion_order))
    }

    pub fn runs_before(&self, other: &Self) -> bool {
        self.sched_cmp(other) == Ordering::Less
    }

    // Returns true once the burst is exhausted
    pub fn execute_tick(&mut self, now: Ticks) -> bool {
        debug_assert!(self.remaining > 0, "Task {} ticked with no work left", self.id);
        self.first_run.get_or_insert(now);
        self.remaining -= 1;
        self.remaining == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSnapshot {
    pub id: TaskId,
    pub priority: Priority,
    pub remaining: Ticks,
}

impl From<&Task> for TaskSnapshot {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            priority: task.priority,
            remaining: task.remaining,
        }
    }
}
