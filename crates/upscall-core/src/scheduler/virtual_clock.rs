//! Manually advanced clock for tests and replays.

use super::{ScheduledTask, Scheduler};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;

#[derive(Debug)]
struct Entry {
    due: Duration,
    // insertion order breaks ties between tasks due at the same instant
    seq: u64,
    task: ScheduledTask,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

/// A scheduler whose clock only moves when told to.
///
/// Time starts at zero. Tasks scheduled while a task is being handled are
/// placed relative to that task's due time.
#[derive(Debug, Default)]
pub struct VirtualScheduler {
    now: Duration,
    next_seq: u64,
    queue: BinaryHeap<Reverse<Entry>>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of tasks waiting to come due.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// When the earliest pending task comes due.
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.peek().map(|Reverse(entry)| entry.due)
    }

    /// Removes the earliest task due at or before `deadline` and moves the
    /// clock to its due time.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<ScheduledTask> {
        if self.next_due()? > deadline {
            return None;
        }
        let Reverse(entry) = self.queue.pop()?;
        self.now = self.now.max(entry.due);
        Some(entry.task)
    }

    /// Moves the clock forward to `deadline` without running anything.
    pub fn advance_to(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule(&mut self, delay: Duration, task: ScheduledTask) {
        let due = self.now + delay;
        tracing::trace!(?due, ?task, "Scheduled task");
        self.queue.push(Reverse(Entry {
            due,
            seq: self.next_seq,
            task,
        }));
        self.next_seq += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(input: &str) -> ScheduledTask {
        ScheduledTask::DeliverReply {
            input: input.to_string(),
            turn: 1,
        }
    }

    #[test]
    fn test_tasks_come_due_in_time_order() {
        let mut scheduler = VirtualScheduler::new();
        scheduler.schedule(Duration::from_millis(900), reply("slow"));
        scheduler.schedule(Duration::from_millis(300), reply("fast"));

        let end = Duration::from_secs(5);
        assert_eq!(scheduler.pop_due(end), Some(reply("fast")));
        assert_eq!(scheduler.now(), Duration::from_millis(300));
        assert_eq!(scheduler.pop_due(end), Some(reply("slow")));
        assert_eq!(scheduler.pop_due(end), None);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut scheduler = VirtualScheduler::new();
        scheduler.schedule(Duration::from_millis(100), ScheduledTask::BeginFollowUp);
        scheduler.schedule(Duration::from_millis(100), ScheduledTask::DeliverFollowUp);

        let end = Duration::from_millis(100);
        assert_eq!(scheduler.pop_due(end), Some(ScheduledTask::BeginFollowUp));
        assert_eq!(scheduler.pop_due(end), Some(ScheduledTask::DeliverFollowUp));
    }

    #[test]
    fn test_nothing_pops_before_deadline() {
        let mut scheduler = VirtualScheduler::new();
        scheduler.schedule(Duration::from_millis(500), ScheduledTask::BeginFollowUp);

        assert_eq!(scheduler.pop_due(Duration::from_millis(499)), None);
        assert_eq!(scheduler.pending(), 1);
        scheduler.advance_to(Duration::from_millis(499));
        assert_eq!(scheduler.now(), Duration::from_millis(499));
    }

    #[test]
    fn test_delay_is_relative_to_current_time() {
        let mut scheduler = VirtualScheduler::new();
        scheduler.advance_to(Duration::from_secs(1));
        scheduler.schedule(Duration::from_millis(250), ScheduledTask::BeginFollowUp);
        assert_eq!(scheduler.next_due(), Some(Duration::from_millis(1250)));
    }
}
