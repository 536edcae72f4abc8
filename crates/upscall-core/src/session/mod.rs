//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: per-widget conversation state (`Session`)
//! - `message`: log entries (`Message`, `Sender`)
//! - `contact`: email gate data and name derivation (`Contact`)
//! - `topic`: covered-topic bookkeeping (`Topic`, `TopicTracker`)

mod contact;
mod message;
mod model;
mod topic;

// Re-export public API
pub use contact::{Contact, derive_user_name};
pub use message::{Message, Sender};
pub use model::Session;
pub use topic::{Topic, TopicTracker};
