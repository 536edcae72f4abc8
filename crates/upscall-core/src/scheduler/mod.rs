//! Dialogue scheduling.
//!
//! The widget never sleeps. It hands [`ScheduledTask`]s to a [`Scheduler`]
//! together with a delay, and whoever owns the clock hands each task back to
//! [`ChatWidget::fire`](crate::widget::ChatWidget::fire) once it is due.
//! Pending tasks are independent: none is cancelled and none waits for another.

mod virtual_clock;

pub use virtual_clock::VirtualScheduler;

use crate::config::TypingConfig;
use crate::random::RandomSource;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Work the widget asks to be handed back later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScheduledTask {
    /// Clear one typing bubble and answer `input`.
    DeliverReply {
        input: String,
        /// The message count right after `input` was submitted.
        turn: u32,
    },
    /// Show the typing bubble that precedes the challenge follow-up.
    BeginFollowUp,
    /// Clear that bubble and send the follow-up.
    DeliverFollowUp,
}

/// A delay-then-deliver capability.
pub trait Scheduler {
    /// Arranges for `task` to be handed back after `delay`.
    fn schedule(&mut self, delay: Duration, task: ScheduledTask);
}

/// Simulated typing latency for a message of `input_chars` characters.
///
/// `base + uniform(0, jitter) + min(per_char * input_chars, max_length)`.
pub fn typing_delay(
    config: &TypingConfig,
    input_chars: usize,
    random: &mut dyn RandomSource,
) -> Duration {
    let jitter = (random.next_unit() * config.jitter_ms as f64) as u64;
    let length = (input_chars as u64)
        .saturating_mul(config.per_char_ms)
        .min(config.max_length_ms);
    Duration::from_millis(config.base_ms + jitter + length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandom;

    #[test]
    fn test_typing_delay_bounds() {
        let config = TypingConfig::default();

        let mut low = ScriptedRandom::constant(0.0);
        assert_eq!(typing_delay(&config, 0, &mut low), Duration::from_millis(600));

        let mut mid = ScriptedRandom::constant(0.5);
        assert_eq!(typing_delay(&config, 20, &mut mid), Duration::from_millis(1300));
    }

    #[test]
    fn test_length_component_is_capped() {
        let config = TypingConfig::default();
        let mut random = ScriptedRandom::constant(0.0);
        assert_eq!(
            typing_delay(&config, 10_000, &mut random),
            Duration::from_millis(1100)
        );
    }

    #[test]
    fn test_delay_never_reaches_upper_bound() {
        let config = TypingConfig::default();
        let mut random = ScriptedRandom::constant(1.0);
        assert!(typing_delay(&config, 100, &mut random) < Duration::from_millis(2100));
    }
}
