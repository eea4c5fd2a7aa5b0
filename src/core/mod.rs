pub mod driver;
pub mod event;
pub mod observer;
pub mod state;
pub mod stats;

pub use driver::Scheduler;
pub use event::Report;
pub use observer::Observer;
pub use state::{Priority, Task, TaskId, TaskSnapshot, TaskState, Ticks};
pub use stats::{Completion, RunStats};
