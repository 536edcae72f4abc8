//! Session domain model.

use super::contact::Contact;
use super::message::Message;
use super::topic::{Topic, TopicTracker};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Conversation state of one chat widget instance.
///
/// A session contains:
/// - The visitor's contact details once the email gate is passed
/// - The business the visitor described, if any
/// - Counters and flags that gate one-off prompts
/// - Topics covered so far
/// - The append-only message log
///
/// Fields are private so the invariants hold: the contact is set at most
/// once, the message count and topic set only grow, and a business is
/// recorded exactly when the business prompt has fired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    id: Uuid,
    contact: Option<Contact>,
    user_business: Option<String>,
    asked_about_business: bool,
    message_count: u32,
    topics: TopicTracker,
    messages: Vec<Message>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            contact: None,
            user_business: None,
            asked_about_business: false,
            message_count: 0,
            topics: TopicTracker::new(),
            messages: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn email_captured(&self) -> bool {
        self.contact.is_some()
    }

    pub fn user_email(&self) -> Option<&str> {
        self.contact.as_ref().map(|c| c.email.as_str())
    }

    pub fn user_name(&self) -> Option<&str> {
        self.contact.as_ref().map(|c| c.name.as_str())
    }

    pub fn user_business(&self) -> Option<&str> {
        self.user_business.as_deref()
    }

    pub fn asked_about_business(&self) -> bool {
        self.asked_about_business
    }

    pub fn message_count(&self) -> u32 {
        self.message_count
    }

    pub fn topics(&self) -> &TopicTracker {
        &self.topics
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Stores the contact. Returns `false` if one was already captured.
    pub(crate) fn capture_contact(&mut self, contact: Contact) -> bool {
        if self.contact.is_some() {
            return false;
        }
        self.contact = Some(contact);
        true
    }

    /// Appends a user message and bumps the message count.
    pub(crate) fn record_user_message(&mut self, text: &str) -> &Message {
        self.message_count += 1;
        self.append(Message::user(text))
    }

    pub(crate) fn record_bot_message(&mut self, text: &str) -> &Message {
        self.append(Message::bot(text))
    }

    /// Records the visitor's business and marks the business prompt as fired.
    pub(crate) fn record_business(&mut self, description: &str) {
        self.user_business = Some(description.to_string());
        self.asked_about_business = true;
    }

    pub(crate) fn track_topic(&mut self, topic: Topic) {
        self.topics.track(topic);
    }

    fn append(&mut self, message: Message) -> &Message {
        self.messages.push(message);
        // just pushed
        &self.messages[self.messages.len() - 1]
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Sender;

    #[test]
    fn test_new_session_is_blank() {
        let session = Session::new();
        assert!(!session.email_captured());
        assert_eq!(session.user_name(), None);
        assert_eq!(session.message_count(), 0);
        assert!(session.messages().is_empty());
        assert!(session.topics().is_empty());
    }

    #[test]
    fn test_contact_is_captured_once() {
        let mut session = Session::new();
        assert!(session.capture_contact(Contact::from_email("ana@x.com")));
        assert!(!session.capture_contact(Contact::from_email("bo@x.com")));
        assert_eq!(session.user_name(), Some("Ana"));
        assert_eq!(session.user_email(), Some("ana@x.com"));
    }

    #[test]
    fn test_only_user_messages_are_counted() {
        let mut session = Session::new();
        session.record_user_message("hello");
        session.record_bot_message("hi there");
        session.record_user_message("pricing?");

        assert_eq!(session.message_count(), 2);
        let senders: Vec<Sender> = session.messages().iter().map(|m| m.sender).collect();
        assert_eq!(senders, vec![Sender::User, Sender::Bot, Sender::User]);
    }

    #[test]
    fn test_record_business_sets_flag() {
        let mut session = Session::new();
        session.record_business("we run a bakery");
        assert!(session.asked_about_business());
        assert_eq!(session.user_business(), Some("we run a bakery"));
    }
}
