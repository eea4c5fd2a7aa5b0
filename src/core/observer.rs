use super::{
    driver::Scheduler,
    state::{Task, TaskState},
};

#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, sched: &Scheduler) {
        self.step += 1;
        if !cfg!(debug_assertions) {
            return;
        }

        let mut held = 0usize;
        let mut expect = |task: &Task, state: TaskState| {
            held += 1;
            debug_assert_eq!(
                sched.state_of(&task.id),
                Some(state),
                "step {}: task {} registry entry does not match its container",
                self.step,
                task.id
            );
        };

        if let Some(task) = sched.running() {
            debug_assert!(task.remaining > 0, "Finished task {} still running", task.id);
            expect(task, TaskState::Running);
        }
        for task in sched.ready().iter() {
            expect(task, TaskState::Ready);
        }
        for task in sched.blocked().iter() {
            debug_assert!(task.remaining > 0, "Finished task {} still blocked", task.id);
            expect(task, TaskState::Blocked);
        }

        // Every registered id was matched by exactly one container entry
        debug_assert_eq!(
            held,
            sched.registry().len(),
            "step {}: registry holds tasks outside every container",
            self.step
        );
    }
}
