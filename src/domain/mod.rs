//! Domain layer: strong types with validation and invariants (no I/O).

mod message;
mod validation;
mod value;

pub use message::{MAX_LENGTH_PDU_MODE, MAX_LENGTH_TEXT_MODE, Message};
pub use validation::ValidationError;
pub use value::{KnownMessageStatus, MessageStatus, Number};

/// Validate and normalize a raw phone number.
///
/// Equivalent to [`Number::new`].
pub fn normalize(raw: impl Into<String>) -> Result<Number, ValidationError> {
    Number::new(raw)
}
