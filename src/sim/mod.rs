pub mod command;
pub mod driver;
pub mod script;
pub mod workload;

pub use command::Command;
pub use driver::{Outcome, Sim};
pub use script::tokenize;
pub use workload::Workload;
