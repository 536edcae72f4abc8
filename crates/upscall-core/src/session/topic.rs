//! Topic tracking.
//!
//! Remembers which subjects the agent has already covered so follow-up
//! suggestions steer toward something new.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter};

/// A discussion subject the agent can cover.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Topic {
    Packages,
    Pricing,
    Services,
    Process,
    Results,
    About,
    Industry,
}

impl Topic {
    /// Topics the agent offers on its own when suggesting what to talk about next.
    pub const SUGGESTIBLE: [Topic; 5] = [
        Topic::Packages,
        Topic::Services,
        Topic::Process,
        Topic::Results,
        Topic::Pricing,
    ];
}

/// Ordered set of covered topics plus the most recently tracked one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicTracker {
    discussed: Vec<Topic>,
    last: Option<Topic>,
}

impl TopicTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `topic`. Inserts it once, in first-seen order, and always
    /// makes it the last topic.
    pub fn track(&mut self, topic: Topic) {
        if !self.discussed.contains(&topic) {
            self.discussed.push(topic);
        }
        self.last = Some(topic);
    }

    pub fn contains(&self, topic: Topic) -> bool {
        self.discussed.contains(&topic)
    }

    pub fn len(&self) -> usize {
        self.discussed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.discussed.is_empty()
    }

    pub fn last(&self) -> Option<Topic> {
        self.last
    }

    pub fn discussed(&self) -> &[Topic] {
        &self.discussed
    }

    /// Suggestible topics not yet covered, in suggestion order.
    pub fn unexplored(&self) -> Vec<Topic> {
        Topic::SUGGESTIBLE
            .into_iter()
            .filter(|topic| !self.contains(*topic))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_keeps_first_seen_order_without_duplicates() {
        let mut tracker = TopicTracker::new();
        tracker.track(Topic::Services);
        tracker.track(Topic::Packages);
        tracker.track(Topic::Services);

        assert_eq!(tracker.discussed(), &[Topic::Services, Topic::Packages]);
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn test_last_is_overwritten_even_for_known_topic() {
        let mut tracker = TopicTracker::new();
        tracker.track(Topic::Services);
        tracker.track(Topic::Process);
        tracker.track(Topic::Services);

        assert_eq!(tracker.last(), Some(Topic::Services));
    }

    #[test]
    fn test_unexplored_ignores_non_suggestible_topics() {
        let mut tracker = TopicTracker::new();
        tracker.track(Topic::About);
        tracker.track(Topic::Industry);
        assert_eq!(tracker.unexplored().len(), 5);

        for topic in Topic::SUGGESTIBLE {
            tracker.track(topic);
        }
        assert!(tracker.unexplored().is_empty());
    }

    #[test]
    fn test_topic_identifiers() {
        assert_eq!(Topic::Packages.to_string(), "packages");
        assert_eq!(Topic::Industry.as_ref(), "industry");
    }
}
