//! Wall-clock scheduling on the tokio runtime.
//!
//! Each scheduled task sleeps on its own spawned timer and is then sent over
//! an unbounded channel. The event loop owning the widget receives due tasks
//! and calls [`ChatWidget::fire`], so all widget mutation stays on one task.

use std::time::Duration;
use tokio::sync::mpsc;
use upscall_core::{ChatConfig, ChatWidget, RandomSource, ScheduledTask, Scheduler};

/// Receiving end of a [`TokioScheduler`]: tasks arrive here once due.
pub type DueTasks = mpsc::UnboundedReceiver<ScheduledTask>;

/// A scheduler backed by `tokio::time::sleep`.
///
/// `schedule` spawns, so it must be called from within a tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    sender: mpsc::UnboundedSender<ScheduledTask>,
}

impl TokioScheduler {
    /// Creates a scheduler and the receiver its due tasks are sent to.
    pub fn channel() -> (Self, DueTasks) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, delay: Duration, task: ScheduledTask) {
        let sender = self.sender.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The receiver is gone only when the widget's event loop has shut down.
            if sender.send(task).is_err() {
                tracing::trace!("Dropped task for a closed chat");
            }
        });
    }
}

/// A widget running on real time, and the channel its due tasks arrive on.
pub fn live_widget<R: RandomSource>(
    config: ChatConfig,
    random: R,
) -> (ChatWidget<TokioScheduler, R>, DueTasks) {
    let (scheduler, due) = TokioScheduler::channel();
    (ChatWidget::new(config, scheduler, random), due)
}
