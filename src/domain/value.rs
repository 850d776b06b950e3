use std::fmt;
use std::str::FromStr;

use phonenumber::country;
use serde::{Deserialize, Serialize};

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
/// Phone number as understood by the modem (`+` optional, digits only).
///
/// Invariant: matches `^\+?[0-9]+$` with redundant leading zeros after the
/// optional `+` removed. A number made only of zeros keeps a single `0`.
pub struct Number(String);

impl Number {
    /// Validate and normalize a raw number.
    ///
    /// No trimming is done: surrounding whitespace is a grammar violation.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let (plus, digits) = match value.strip_prefix('+') {
            Some(rest) => ("+", rest),
            None => ("", value.as_str()),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidNumber { input: value });
        }

        let significant = digits.trim_start_matches('0');
        let significant = if significant.is_empty() {
            &digits[digits.len() - 1..]
        } else {
            significant
        };
        Ok(Self(format!("{plus}{significant}")))
    }

    /// Parse a human-formatted number (spaces, dashes, brackets) through
    /// `phonenumber` and normalize it to E.164 before validation.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let parsed = phonenumber::parse(default_region, input.trim())
            .map_err(|_| ValidationError::InvalidNumber {
                input: input.clone(),
            })?;
        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();
        Self::new(e164)
    }

    /// Borrow the normalized number.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the number carries an international `+` prefix.
    pub fn is_international(&self) -> bool {
        self.0.starts_with('+')
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Number {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Number {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Number {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Number> for String {
    fn from(value: Number) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
/// Storage status tag reported by the modem for a listed message (e.g. `REC UNREAD`).
///
/// The tag is preserved as-is even when it is unknown to this crate.
pub struct MessageStatus(String);

impl MessageStatus {
    /// Wrap a status tag as reported by the device.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Borrow the raw tag.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Map this tag to a known status, if one exists.
    pub fn known(&self) -> Option<KnownMessageStatus> {
        KnownMessageStatus::from_tag(&self.0)
    }

    /// Whether the device reports this message as received and not yet read.
    pub fn is_unread(&self) -> bool {
        self.known() == Some(KnownMessageStatus::ReceivedUnread)
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Text-mode storage states defined for `+CMGL` listings.
pub enum KnownMessageStatus {
    ReceivedUnread,
    ReceivedRead,
    StoredUnsent,
    StoredSent,
}

impl KnownMessageStatus {
    /// Convert a text-mode tag into a known variant.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "REC UNREAD" => Self::ReceivedUnread,
            "REC READ" => Self::ReceivedRead,
            "STO UNSENT" => Self::StoredUnsent,
            "STO SENT" => Self::StoredSent,
            _ => return None,
        })
    }

    /// The tag the device uses for this status.
    pub fn as_tag(self) -> &'static str {
        match self {
            Self::ReceivedUnread => "REC UNREAD",
            Self::ReceivedRead => "REC READ",
            Self::StoredUnsent => "STO UNSENT",
            Self::StoredSent => "STO SENT",
        }
    }

    /// Whether the message was received by the device (as opposed to stored for sending).
    pub fn is_received(self) -> bool {
        matches!(self, Self::ReceivedUnread | Self::ReceivedRead)
    }
}
