//! The chat widget.
//!
//! `ChatWidget` is the surface the UI talks to. It owns one [`Session`], the
//! visibility flag and the typing indicator, and turns submissions into
//! scheduled replies.

use crate::config::ChatConfig;
use crate::error::Result;
use crate::event::ChatEvent;
use crate::random::RandomSource;
use crate::responder::{CHALLENGE_FOLLOW_UP, WELCOME, email_greeting};
use crate::rules;
use crate::scheduler::{ScheduledTask, Scheduler, VirtualScheduler, typing_delay};
use crate::session::{Contact, Message, Session};
use std::time::Duration;

/// Why a submission was dropped without any effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Nothing but whitespace was submitted.
    Empty,
    /// A chat message arrived before the email gate was passed.
    EmailRequired,
    /// An email arrived after one was already captured.
    AlreadyCaptured,
}

/// Outcome of `submit_email` / `submit_message`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Accepted,
    Ignored(IgnoreReason),
}

impl Submission {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// One chat widget instance.
pub struct ChatWidget<S: Scheduler, R: RandomSource> {
    session: Session,
    config: ChatConfig,
    scheduler: S,
    random: R,
    open: bool,
    /// Outstanding typing bubbles; overlapping replies each hold one.
    typing: usize,
    events: Vec<ChatEvent>,
}

impl<S: Scheduler, R: RandomSource> ChatWidget<S, R> {
    pub fn new(config: ChatConfig, scheduler: S, random: R) -> Self {
        Self {
            session: Session::new(),
            config,
            scheduler,
            random,
            open: false,
            typing: 0,
            events: Vec::new(),
        }
    }

    // ============================================================================
    // Read model
    // ============================================================================

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn messages(&self) -> &[Message] {
        self.session.messages()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_typing(&self) -> bool {
        self.typing > 0
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Takes the events produced since the last call.
    pub fn drain_events(&mut self) -> Vec<ChatEvent> {
        std::mem::take(&mut self.events)
    }

    /// The whole session, including the message log, as pretty JSON.
    pub fn transcript_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.session)?)
    }

    // ============================================================================
    // Visibility
    // ============================================================================

    /// Shows the widget. Opening before the email gate is passed greets the
    /// visitor and asks for their email.
    pub fn open(&mut self) {
        if self.open {
            return;
        }
        self.open = true;
        self.events.push(ChatEvent::VisibilityChanged { open: true });

        if !self.session.email_captured() {
            self.append_bot(WELCOME);
        }
    }

    /// Hides the widget. Conversation state and pending replies are untouched.
    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        self.events.push(ChatEvent::VisibilityChanged { open: false });
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    // ============================================================================
    // Submissions
    // ============================================================================

    /// Passes the email gate and greets the visitor by name.
    pub fn submit_email(&mut self, text: &str) -> Submission {
        let email = text.trim();
        if email.is_empty() {
            return Submission::Ignored(IgnoreReason::Empty);
        }
        if !self.session.capture_contact(Contact::from_email(email)) {
            return Submission::Ignored(IgnoreReason::AlreadyCaptured);
        }

        let name = self.session.user_name().unwrap_or_default().to_string();
        tracing::info!(session = %self.session.id(), "Email captured");
        self.append_bot(&email_greeting(&name));
        Submission::Accepted
    }

    /// Logs the visitor's message and schedules the reply behind a typing delay.
    pub fn submit_message(&mut self, text: &str) -> Submission {
        let text = text.trim();
        if text.is_empty() {
            return Submission::Ignored(IgnoreReason::Empty);
        }
        if !self.session.email_captured() {
            return Submission::Ignored(IgnoreReason::EmailRequired);
        }

        let message = self.session.record_user_message(text).clone();
        self.events.push(ChatEvent::MessageAppended { message });
        self.typing_started();

        let delay = typing_delay(&self.config.typing, text.chars().count(), &mut self.random);
        let turn = self.session.message_count();
        tracing::debug!(session = %self.session.id(), turn, ?delay, "Reply scheduled");
        self.scheduler.schedule(
            delay,
            ScheduledTask::DeliverReply {
                input: text.to_string(),
                turn,
            },
        );
        Submission::Accepted
    }

    // ============================================================================
    // Scheduled work
    // ============================================================================

    /// Runs a task handed back by the scheduler.
    pub fn fire(&mut self, task: ScheduledTask) {
        match task {
            ScheduledTask::DeliverReply { input, turn } => {
                self.typing_finished();
                let reply = rules::respond(&input, &mut self.session, &mut self.random);
                self.append_bot(&reply.text);

                if self.follow_up_due(turn) {
                    tracing::info!(session = %self.session.id(), turn, "Follow-up scheduled");
                    self.scheduler.schedule(
                        Duration::from_millis(self.config.follow_up.delay_ms),
                        ScheduledTask::BeginFollowUp,
                    );
                }
            }
            ScheduledTask::BeginFollowUp => {
                self.typing_started();
                self.scheduler.schedule(
                    Duration::from_millis(self.config.follow_up.typing_ms),
                    ScheduledTask::DeliverFollowUp,
                );
            }
            ScheduledTask::DeliverFollowUp => {
                self.typing_finished();
                self.append_bot(CHALLENGE_FOLLOW_UP);
            }
        }
    }

    /// The challenge prompt goes out once, after the reply to the configured
    /// turn, and only if the visitor has not described their business.
    fn follow_up_due(&self, turn: u32) -> bool {
        let follow_up = &self.config.follow_up;
        follow_up.enabled
            && turn == follow_up.turn
            && self.session.user_business().is_none()
            && !self.session.asked_about_business()
    }

    fn append_bot(&mut self, text: &str) {
        let message = self.session.record_bot_message(text).clone();
        self.events.push(ChatEvent::MessageAppended { message });
    }

    fn typing_started(&mut self) {
        self.typing += 1;
        if self.typing == 1 {
            self.events.push(ChatEvent::TypingChanged { typing: true });
        }
    }

    fn typing_finished(&mut self) {
        if self.typing == 0 {
            return;
        }
        self.typing -= 1;
        if self.typing == 0 {
            self.events.push(ChatEvent::TypingChanged { typing: false });
        }
    }
}

impl<R: RandomSource> ChatWidget<VirtualScheduler, R> {
    /// Moves virtual time forward by `by`, running every task that comes due.
    pub fn advance(&mut self, by: Duration) {
        let deadline = self.scheduler.now() + by;
        while let Some(task) = self.scheduler.pop_due(deadline) {
            self.fire(task);
        }
        self.scheduler.advance_to(deadline);
    }

    /// Runs until nothing is pending, including tasks scheduled along the way.
    pub fn flush(&mut self) {
        while let Some(due) = self.scheduler.next_due() {
            let by = due.saturating_sub(self.scheduler.now());
            self.advance(by);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandom;
    use crate::session::Sender;

    fn widget() -> ChatWidget<VirtualScheduler, ScriptedRandom> {
        ChatWidget::new(
            ChatConfig::default(),
            VirtualScheduler::new(),
            ScriptedRandom::constant(0.0),
        )
    }

    #[test]
    fn test_open_greets_until_email_is_given() {
        let mut widget = widget();
        widget.open();
        widget.open();
        assert_eq!(widget.messages().len(), 1);
        assert_eq!(widget.messages()[0].text, WELCOME);

        widget.close();
        widget.submit_email("kim@x.com");
        widget.toggle();
        assert!(widget.is_open());
        assert_eq!(widget.messages().len(), 2);
    }

    #[test]
    fn test_close_keeps_conversation() {
        let mut widget = widget();
        widget.open();
        widget.submit_email("kim@x.com");
        widget.close();
        assert!(!widget.is_open());
        assert!(widget.session().email_captured());
        assert_eq!(widget.messages().len(), 2);
    }

    #[test]
    fn test_message_before_email_is_ignored() {
        let mut widget = widget();
        assert_eq!(
            widget.submit_message("hello"),
            Submission::Ignored(IgnoreReason::EmailRequired)
        );
        assert_eq!(widget.session().message_count(), 0);
        assert_eq!(widget.scheduler().pending(), 0);
    }

    #[test]
    fn test_second_email_is_ignored() {
        let mut widget = widget();
        assert!(widget.submit_email("kim@x.com").is_accepted());
        assert_eq!(
            widget.submit_email("lee@x.com"),
            Submission::Ignored(IgnoreReason::AlreadyCaptured)
        );
        assert_eq!(widget.session().user_name(), Some("Kim"));
        assert_eq!(widget.messages().len(), 1);
    }

    #[test]
    fn test_reply_waits_for_typing_delay() {
        let mut widget = widget();
        widget.submit_email("kim@x.com");
        widget.submit_message("zebras");
        assert!(widget.is_typing());

        // 600ms base + 0 jitter + 60ms for six characters
        widget.advance(Duration::from_millis(659));
        assert!(widget.is_typing());
        assert_eq!(widget.messages().len(), 2);

        widget.advance(Duration::from_millis(1));
        assert!(!widget.is_typing());
        assert_eq!(widget.messages().len(), 3);
        assert_eq!(widget.messages()[2].sender, Sender::Bot);
    }

    #[test]
    fn test_typing_indicator_spans_overlapping_replies() {
        let mut widget = widget();
        widget.submit_email("kim@x.com");
        widget.drain_events();

        widget.submit_message("zebras");
        widget.submit_message("giraffes and more giraffes");
        widget.advance(Duration::from_millis(700));
        assert!(widget.is_typing());
        widget.flush();
        assert!(!widget.is_typing());

        let toggles: Vec<bool> = widget
            .drain_events()
            .into_iter()
            .filter_map(|event| match event {
                ChatEvent::TypingChanged { typing } => Some(typing),
                _ => None,
            })
            .collect();
        assert_eq!(toggles, vec![true, false]);
    }

    #[test]
    fn test_events_follow_log() {
        let mut widget = widget();
        widget.open();
        widget.submit_email("kim@x.com");
        let events = widget.drain_events();

        assert_eq!(events.len(), 3);
        assert_eq!(events[0], ChatEvent::VisibilityChanged { open: true });
        assert!(matches!(&events[2], ChatEvent::MessageAppended { message } if message.is_bot()));
        assert!(widget.drain_events().is_empty());
    }

    #[test]
    fn test_transcript_json_contains_log() {
        let mut widget = widget();
        widget.submit_email("kim@x.com");
        let json = widget.transcript_json().unwrap();
        assert!(json.contains("Nice to meet you, Kim!"));
        assert!(json.contains("\"sender\": \"bot\""));
    }
}
