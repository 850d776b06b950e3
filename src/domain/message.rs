use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::validation::ValidationError;
use crate::domain::value::{MessageStatus, Number};

/// Maximum body length of a text-mode SMS, in characters.
pub const MAX_LENGTH_TEXT_MODE: usize = 160;

/// Maximum body length of a PDU-mode SMS, in characters.
pub const MAX_LENGTH_PDU_MODE: usize = 160;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A single SMS, either built for sending or read back from device storage.
///
/// The body length is not checked here; see [`Message::text_mode`].
pub struct Message {
    text: String,
    number: Number,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<MessageStatus>,
}

impl Message {
    /// Build an outgoing message. It has no storage slot and no device status.
    pub fn outgoing(number: Number, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            number,
            index: None,
            status: None,
        }
    }

    /// Build a message as read from device storage slot `index`.
    pub fn stored(
        index: u32,
        status: MessageStatus,
        number: Number,
        text: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            number,
            index: Some(index),
            status: Some(status),
        }
    }

    /// Check that `text` has at most `max` characters.
    pub fn check_length(text: &str, max: usize) -> Result<(), ValidationError> {
        let actual = text.chars().count();
        if actual > max {
            return Err(ValidationError::MessageTooLong { max, actual });
        }
        Ok(())
    }

    /// Body as it is transmitted in text mode.
    pub fn text_mode(&self) -> Result<&str, ValidationError> {
        Self::check_length(&self.text, MAX_LENGTH_TEXT_MODE)?;
        Ok(&self.text)
    }

    /// Borrow the body, including any line terminators kept from the listing.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn number(&self) -> &Number {
        &self.number
    }

    /// Device storage slot, present only for messages read from the device.
    pub fn index(&self) -> Option<u32> {
        self.index
    }

    pub fn status(&self) -> Option<&MessageStatus> {
        self.status.as_ref()
    }

    pub(crate) fn push_line(&mut self, line: &str) {
        self.text.push_str(line);
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Number: {}", self.number)?;
        if let Some(index) = self.index {
            write!(f, ", index: {index}")?;
        }
        if let Some(status) = &self.status {
            write!(f, ", status: {status}")?;
        }
        write!(f, ", message: {:?}", self.text)
    }
}
