//! Conversational core of the Upscall support chat.
//!
//! A [`ChatWidget`] owns one [`Session`]. Visitor messages are classified
//! against the ordered [`rules::RULES`] table, answered by the
//! [`responder`], and delivered through an injectable [`Scheduler`] after a
//! simulated typing delay.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use upscall_core::{ChatConfig, ChatWidget, ScriptedRandom, VirtualScheduler};
//!
//! let mut widget = ChatWidget::new(
//!     ChatConfig::default(),
//!     VirtualScheduler::new(),
//!     ScriptedRandom::constant(0.0),
//! );
//! widget.open();
//! widget.submit_email("jane.doe@example.com");
//! widget.submit_message("what packages do you have?");
//! widget.advance(Duration::from_secs(3));
//!
//! assert_eq!(widget.session().user_name(), Some("Jane Doe"));
//! assert!(widget.messages().last().unwrap().text.contains("three tiers"));
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod random;
pub mod responder;
pub mod rules;
pub mod scheduler;
pub mod session;
pub mod widget;

pub use config::ChatConfig;
pub use error::{ChatError, Result};
pub use event::ChatEvent;
pub use random::{RandomSource, ScriptedRandom, SeededRandom, SystemRandom};
pub use rules::{Intent, Reply};
pub use scheduler::{ScheduledTask, Scheduler, VirtualScheduler};
pub use session::{Message, Sender, Session, Topic};
pub use widget::{ChatWidget, IgnoreReason, Submission};
