use rustc_hash::FxHashMap;
use tracing::debug;

use super::{
    event::Report,
    observer::Observer,
    state::{Priority, Task, TaskId, TaskSnapshot, TaskState, Ticks},
    stats::{Completion, RunStats},
};
use crate::{
    collections::{ReadyHeap, RingQueue},
    error::SchedError,
};

// Every live task is in exactly one of ready/blocked/running, and the
// registry says which
#[derive(Debug, Default)]
pub struct Scheduler {
    ready: ReadyHeap,
    blocked: RingQueue<Task>,
    running: Option<Task>,
    registry: FxHashMap<TaskId, TaskState>,
    stats: RunStats,
    now: Ticks,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn admit(&mut self, id: TaskId, priority: Priority, burst: i128) -> Result<(), SchedError> {
        let burst = match Ticks::try_from(burst) {
            Ok(b) if b > 0 => b,
            _ => return Err(SchedError::NonPositiveBurst),
        };
        if self.registry.contains_key(&id) {
            return Err(SchedError::Duplicate(id));
        }

        debug!(task = %id, priority, burst, now = self.now, "admit");
        self.registry.insert(id.clone(), TaskState::Ready);
        self.ready.insert(Task::new(id, priority, burst, self.now));
        Ok(())
    }

    pub fn tick(&mut self) -> Report {
        if self.running.is_none() {
            if let Some(task) = self.ready.extract_min() {
                debug!(task = %task.id, now = self.now, "dispatch");
                self.set_state(&task.id, TaskState::Running);
                self.running = Some(task);
            }
        }

        let now = self.now;
        self.now += 1;

        let Some(task) = self.running.as_mut() else {
            return Report::Idle;
        };
        let report = Report::Running(task.id.clone());
        if task.execute_tick(now) {
            let task = self
                .running
                .take()
                .expect("running slot was occupied a moment ago");
            self.terminate(task);
        }
        report
    }

    pub fn block_running(&mut self) -> Result<Report, SchedError> {
        let task = self.running.take().ok_or(SchedError::NoTaskRunning)?;
        debug!(task = %task.id, remaining = task.remaining, "block");
        self.set_state(&task.id, TaskState::Blocked);
        let report = Report::Blocked(task.id.clone());
        self.blocked.enqueue(task);
        Ok(report)
    }

    // Fresh insertion stamp: queues behind equal-priority tasks already ready
    pub fn unblock_one(&mut self) -> Result<Report, SchedError> {
        let task = self.blocked.dequeue().ok_or(SchedError::NoTaskBlocked)?;
        debug!(task = %task.id, "unblock");
        self.set_state(&task.id, TaskState::Ready);
        let report = Report::Unblocked(task.id.clone());
        self.ready.insert(task);
        Ok(report)
    }

    pub fn report_ready(&self) -> Report {
        Report::ReadyQueue(
            self.ready
                .get_all_sorted()
                .iter()
                .map(TaskSnapshot::from)
                .collect(),
        )
    }

    pub fn report_blocked(&self) -> Report {
        Report::BlockedQueue(self.blocked.iter().map(TaskSnapshot::from).collect())
    }

    pub fn report_status(&self) -> Report {
        Report::Status(self.running.as_ref().map(TaskSnapshot::from))
    }

    pub fn now(&self) -> Ticks {
        self.now
    }

    pub fn running(&self) -> Option<&Task> {
        self.running.as_ref()
    }

    pub fn ready(&self) -> &ReadyHeap {
        &self.ready
    }

    pub fn blocked(&self) -> &RingQueue<Task> {
        &self.blocked
    }

    pub fn registry(&self) -> &FxHashMap<TaskId, TaskState> {
        &self.registry
    }

    pub fn state_of(&self, id: &str) -> Option<TaskState> {
        self.registry.get(id).copied()
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn check_invariants(&self) {
        Observer::new().observe(self);
    }

    fn set_state(&mut self, id: &str, state: TaskState) {
        let slot = self
            .registry
            .get_mut(id)
            .expect("Transitioning task missing from registry");
        *slot = state;
    }

    fn terminate(&mut self, task: Task) {
        let removed = self.registry.remove(&task.id);
        debug_assert_eq!(
            removed,
            Some(TaskState::Running),
            "Terminated task {} was not registered as running",
            task.id
        );
        debug!(task = %task.id, now = self.now, "terminate");
        self.stats.record(&Completion {
            first_run: task.first_run.unwrap_or(task.admitted_at),
            id: task.id,
            burst: task.burst,
            admitted_at: task.admitted_at,
            finished_at: self.now,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(report: Report) -> Vec<String> {
        match report {
            Report::ReadyQueue(tasks) | Report::BlockedQueue(tasks) => {
                tasks.into_iter().map(|t| t.id).collect()
            }
            other => panic!("not a queue dump: {other:?}"),
        }
    }

    #[test]
    fn test_tick_with_no_tasks_is_idle() {
        let mut s = Scheduler::new();
        assert_eq!(s.tick(), Report::Idle);
        assert_eq!(s.now(), 1);
        assert_eq!(s.report_status(), Report::Status(None));
    }

    #[test]
    fn test_rejects_non_positive_burst() {
        let mut s = Scheduler::new();
        assert_eq!(s.admit("x".into(), 1, 0), Err(SchedError::NonPositiveBurst));
        assert_eq!(s.admit("x".into(), 1, -4), Err(SchedError::NonPositiveBurst));
        assert!(s.registry().is_empty());
        assert!(s.ready().is_empty());
    }

    #[test]
    fn test_duplicate_keeps_original() {
        let mut s = Scheduler::new();
        s.admit("A".into(), 1, 5).unwrap();
        assert_eq!(
            s.admit("A".into(), 2, 3),
            Err(SchedError::Duplicate("A".into()))
        );
        let a = s.ready().peek().unwrap();
        assert_eq!((a.priority, a.remaining), (1, 5));
        assert_eq!(s.ready().len(), 1);
    }

    #[test]
    fn test_duplicate_detected_in_every_state() {
        let mut s = Scheduler::new();
        s.admit("run".into(), 0, 9).unwrap();
        s.admit("blk".into(), 1, 9).unwrap();
        s.tick();
        s.block_running().unwrap();
        s.tick();
        s.admit("rdy".into(), 5, 9).unwrap();

        assert_eq!(s.state_of("run"), Some(TaskState::Blocked));
        assert_eq!(s.state_of("blk"), Some(TaskState::Running));
        assert_eq!(s.state_of("rdy"), Some(TaskState::Ready));
        for id in ["run", "blk", "rdy"] {
            assert_eq!(
                s.admit(id.into(), 0, 1),
                Err(SchedError::Duplicate(id.into()))
            );
        }
    }

    #[test]
    fn test_higher_priority_runs_first_and_terminates() {
        let mut s = Scheduler::new();
        s.admit("A".into(), 2, 2).unwrap();
        s.admit("B".into(), 1, 1).unwrap();
        assert_eq!(s.tick(), Report::Running("B".into()));
        assert_eq!(s.state_of("B"), None);
        assert!(s.running().is_none());
        assert_eq!(s.tick(), Report::Running("A".into()));
        assert_eq!(s.running().map(|t| t.remaining), Some(1));
        check(&s);
    }

    #[test]
    fn test_running_task_is_not_preempted_by_admission() {
        let mut s = Scheduler::new();
        s.admit("slow".into(), 5, 3).unwrap();
        s.tick();
        s.admit("fast".into(), 0, 1).unwrap();
        assert_eq!(s.tick(), Report::Running("slow".into()));
        assert_eq!(s.tick(), Report::Running("slow".into()));
        assert_eq!(s.tick(), Report::Running("fast".into()));
        assert_eq!(s.tick(), Report::Idle);
    }

    #[test]
    fn test_block_and_unblock_errors_on_empty() {
        let mut s = Scheduler::new();
        assert_eq!(s.block_running(), Err(SchedError::NoTaskRunning));
        assert_eq!(s.unblock_one(), Err(SchedError::NoTaskBlocked));
        s.admit("A".into(), 1, 5).unwrap();
        // READY but not yet dispatched
        assert_eq!(s.block_running(), Err(SchedError::NoTaskRunning));
    }

    #[test]
    fn test_block_unblock_round_trip_restamps() {
        let mut s = Scheduler::new();
        s.admit("A".into(), 1, 5).unwrap();
        let original = s.ready().peek().unwrap().insertion_order;
        s.tick();
        assert_eq!(s.block_running(), Ok(Report::Blocked("A".into())));
        assert_eq!(ids(s.report_blocked()), vec!["A"]);
        assert_eq!(s.unblock_one(), Ok(Report::Unblocked("A".into())));

        let a = s.ready().peek().unwrap();
        assert_eq!(a.remaining, 4);
        assert_ne!(a.insertion_order, original);
        assert_eq!(s.state_of("A"), Some(TaskState::Ready));
        assert_eq!(s.tick(), Report::Running("A".into()));
        check(&s);
    }

    #[test]
    fn test_unblocked_task_queues_behind_equal_priority() {
        let mut s = Scheduler::new();
        s.admit("A".into(), 1, 5).unwrap();
        s.tick();
        s.block_running().unwrap();
        s.admit("B".into(), 1, 5).unwrap();
        s.unblock_one().unwrap();
        assert_eq!(ids(s.report_ready()), vec!["B", "A"]);
    }

    #[test]
    fn test_blocked_queue_is_fifo() {
        let mut s = Scheduler::new();
        for (id, prio) in [("A", 3), ("B", 1), ("C", 2)] {
            s.admit(id.into(), prio, 9).unwrap();
        }
        for _ in 0..3 {
            s.tick();
            s.block_running().unwrap();
        }
        assert_eq!(ids(s.report_blocked()), vec!["B", "C", "A"]);
        assert_eq!(s.unblock_one(), Ok(Report::Unblocked("B".into())));
        assert_eq!(ids(s.report_blocked()), vec!["C", "A"]);
        check(&s);
    }

    #[test]
    fn test_report_ready_does_not_disturb_order() {
        let mut s = Scheduler::new();
        for (id, prio) in [("A", 2), ("B", 2), ("C", 0)] {
            s.admit(id.into(), prio, 1).unwrap();
        }
        assert_eq!(ids(s.report_ready()), vec!["C", "A", "B"]);
        assert_eq!(ids(s.report_ready()), vec!["C", "A", "B"]);
        let order: Vec<Report> = (0..3).map(|_| s.tick()).collect();
        assert_eq!(
            order,
            vec![
                Report::Running("C".into()),
                Report::Running("A".into()),
                Report::Running("B".into()),
            ]
        );
    }

    #[test]
    fn test_completion_timings() {
        let mut s = Scheduler::new();
        s.admit("A".into(), 0, 2).unwrap();
        s.admit("B".into(), 1, 1).unwrap();
        s.tick();
        s.tick();
        s.tick();
        // A: response 0, turnaround 2. B: response 2, turnaround 3, off-CPU 2
        let stats = s.stats();
        assert_eq!(stats.completed(), 2);
        assert!((stats.avg_response() - 1.0).abs() < 1e-9);
        assert!((stats.avg_turnaround() - 2.5).abs() < 1e-9);
        assert!((stats.avg_offcpu() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_huge_burst_is_admitted() {
        let mut s = Scheduler::new();
        s.admit("A".into(), -1, 99_999_999_999_999_999_999).unwrap();
        assert_eq!(s.tick(), Report::Running("A".into()));
        assert_eq!(
            s.running().map(|t| t.remaining),
            Some(99_999_999_999_999_999_998)
        );
    }

    fn check(s: &Scheduler) {
        s.check_invariants();
        let held = s.ready().len() + s.blocked().len() + usize::from(s.running().is_some());
        assert_eq!(held, s.registry().len());
    }
}
