//! Prompt message type.

use crate::Role;
use serde::{Deserialize, Serialize};

/// A single text message sent to the model.
///
/// # Examples
///
/// ```
/// use reelscript_core::{Message, Role};
///
/// let message = Message::user("Write five reel scripts.");
/// assert_eq!(message.role, Role::User);
/// assert!(message.content.starts_with("Write"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message sender
    pub role: Role,
    /// Message text
    pub content: String,
}

impl Message {
    /// System message carrying standing instructions.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// User message carrying the rendered instruction.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}
