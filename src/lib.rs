//! Send and receive SMS through a GSM modem speaking the AT command set.
//!
//! The crate is split in three layers: a domain layer of validated types, a
//! transport layer for AT wire-format details, and a client layer that runs
//! command/response exchanges over a byte [`Transport`].
//!
//! ```rust,no_run
//! use atphone::{CommandChannel, SerialConfig};
//!
//! fn main() -> Result<(), atphone::AtError> {
//!     let mut phone = CommandChannel::open_serial(&SerialConfig::device("/dev/ttyUSB0"))?;
//!     phone.send_sms("+37060000000", "hello")?;
//!
//!     let mut inbox = phone.messages()?;
//!     for msg in &inbox {
//!         println!("{msg}");
//!     }
//!     inbox.delete_all(&mut phone)?;
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
pub mod transport;

pub use client::{
    AtError, CommandChannel, CommandChannelBuilder, Logger, MessageList, NoopLogger, Parity,
    READ_TIMEOUT, SMS_SEND_TIMEOUT, SerialConfig, SerialTransport, SmsListReader, SmsSender,
    TracingLogger, Transport,
};
pub use domain::{
    KnownMessageStatus, MAX_LENGTH_PDU_MODE, MAX_LENGTH_TEXT_MODE, Message, MessageStatus, Number,
    ValidationError, normalize,
};
