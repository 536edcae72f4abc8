use serde::{Deserialize, Serialize};

use crate::session::Message;

/// Changes the rendering surface has to reflect, in the order they happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatEvent {
    /// A user or bot message was appended to the log.
    MessageAppended { message: Message },
    /// The typing indicator appeared or disappeared.
    TypingChanged { typing: bool },
    /// The widget was opened or closed.
    VisibilityChanged { open: bool },
}
