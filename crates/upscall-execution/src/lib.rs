//! Runtime plumbing for the chat widget: real timers and logging.

pub mod logging;
pub mod scheduler;

pub use logging::init_logging;
pub use scheduler::{DueTasks, TokioScheduler, live_widget};
