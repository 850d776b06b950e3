//! Client layer: drives the modem over a [`Transport`] and maps wire responses to domain types.

mod log;
mod messages;
mod reader;
mod sender;
mod serial;

use std::io;
use std::time::Duration;

use crate::domain::{Message, ValidationError};
use crate::transport::{self, DeviceError, ListingError};

pub use log::{Logger, NoopLogger, TracingLogger};
pub use messages::MessageList;
pub use reader::SmsListReader;
pub use sender::{SMS_SEND_TIMEOUT, SmsSender};
pub use serial::{Parity, SerialConfig, SerialTransport};

/// Default time a single response read may take.
pub const READ_TIMEOUT: Duration = Duration::from_millis(800);

/// Byte link to the modem.
///
/// `read` performs one bounded read: it returns whatever arrived before the
/// timeout set by the last `set_read_timeout` call, possibly nothing.
pub trait Transport: Send {
    fn write(&mut self, bytes: &[u8]) -> io::Result<()>;

    fn set_read_timeout(&mut self, timeout: Duration) -> io::Result<()>;

    fn read(&mut self) -> io::Result<Vec<u8>>;
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`CommandChannel`] and the operations built on it.
///
/// None of these are retried internally.
pub enum AtError {
    /// Reading from or writing to the transport failed.
    #[error("transport error: {0}")]
    Transport(#[from] io::Error),

    /// The serial device could not be opened or configured.
    #[error("failed to open {device}: {source}")]
    Open {
        device: String,
        #[source]
        source: serialport::Error,
    },

    /// The modem answered with `ERROR`.
    #[error(transparent)]
    Device(#[from] DeviceError),

    /// An `AT+CMGL` listing could not be decoded.
    #[error("listing error: {0}")]
    Listing(#[from] ListingError),

    /// Input was rejected before anything was written to the modem.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The escape or echo-off step of channel setup failed.
    #[error("handshake failed: {0}")]
    Handshake(#[source] Box<AtError>),

    /// The message was never read from the device, so it has no slot to delete.
    #[error("message has no device storage index")]
    NotStored,
}

/// Builder for [`CommandChannel`].
pub struct CommandChannelBuilder {
    transport: Box<dyn Transport>,
    read_timeout: Duration,
    logger: Box<dyn Logger>,
}

impl CommandChannelBuilder {
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
            read_timeout: READ_TIMEOUT,
            logger: Box::new(TracingLogger),
        }
    }

    /// Override the default per-command read timeout.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Replace the default [`TracingLogger`].
    pub fn logger(mut self, logger: impl Logger + 'static) -> Self {
        self.logger = Box::new(logger);
        self
    }

    /// Perform the handshake and return a ready channel.
    pub fn open(self) -> Result<CommandChannel, AtError> {
        let mut channel = CommandChannel {
            transport: self.transport,
            read_timeout: self.read_timeout,
            logger: self.logger,
        };
        channel
            .handshake()
            .map_err(|err| AtError::Handshake(Box::new(err)))?;
        Ok(channel)
    }
}

/// One command/response exchange at a time with a modem.
///
/// Every exchange borrows the channel mutably; share it across threads only
/// behind a lock.
pub struct CommandChannel {
    transport: Box<dyn Transport>,
    read_timeout: Duration,
    logger: Box<dyn Logger>,
}

impl CommandChannel {
    /// Handshake over `transport` with default settings.
    ///
    /// For a custom timeout or logger, use [`CommandChannel::builder`].
    pub fn open(transport: impl Transport + 'static) -> Result<Self, AtError> {
        Self::builder(transport).open()
    }

    /// Open the serial device described by `config` and handshake over it.
    pub fn open_serial(config: &SerialConfig) -> Result<Self, AtError> {
        Self::open(SerialTransport::open(config)?)
    }

    pub fn builder(transport: impl Transport + 'static) -> CommandChannelBuilder {
        CommandChannelBuilder::new(transport)
    }

    /// Default read timeout used by [`CommandChannel::send`] and [`CommandChannel::send_raw`].
    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    fn handshake(&mut self) -> Result<(), AtError> {
        tracing::debug!("switching modem to command mode");
        self.send_raw(transport::ESCAPE)?;
        self.send(transport::ECHO_OFF)?;
        Ok(())
    }

    /// Write `payload` as-is and read one response with the default timeout.
    pub fn send_raw(&mut self, payload: &str) -> Result<String, AtError> {
        self.send_raw_with_timeout(payload, self.read_timeout)
    }

    /// Write `payload` as-is and read one response within `timeout`.
    ///
    /// Errors:
    /// - [`AtError::Transport`] when the transport fails,
    /// - [`AtError::Device`] when the normalized response ends with `ERROR`.
    pub fn send_raw_with_timeout(
        &mut self,
        payload: &str,
        timeout: Duration,
    ) -> Result<String, AtError> {
        self.logger.log(&format!("->[PHONE] {payload:?}"));
        self.transport.write(payload.as_bytes())?;
        self.transport.set_read_timeout(timeout)?;

        let raw = self.transport.read()?;
        self.logger
            .log(&format!("<-[PHONE] {:?}", String::from_utf8_lossy(&raw)));

        let response = transport::decode_response(&raw)?;
        self.logger.log(&format!("<- {response:?}"));
        Ok(response)
    }

    /// Send `command` terminated by `CR LF` with the default timeout.
    pub fn send(&mut self, command: &str) -> Result<String, AtError> {
        self.send_with_timeout(command, self.read_timeout)
    }

    pub fn send_with_timeout(
        &mut self,
        command: &str,
        timeout: Duration,
    ) -> Result<String, AtError> {
        self.send_raw_with_timeout(&transport::encode_command(command), timeout)
    }

    pub(crate) fn log(&self, message: &str) {
        self.logger.log(message);
    }

    /// Send a text-mode SMS with the default [`SmsSender`] settings.
    pub fn send_sms(&mut self, number: &str, text: &str) -> Result<String, AtError> {
        SmsSender::default().send(self, number, text)
    }

    /// Read all messages stored on the device.
    pub fn messages(&mut self) -> Result<MessageList, AtError> {
        SmsListReader.list(self)
    }

    /// Delete a single storage slot without going through a [`MessageList`].
    pub fn delete(&mut self, index: u32) -> Result<(), AtError> {
        tracing::debug!(index, "deleting message from device");
        self.send(&transport::encode_delete(index))?;
        Ok(())
    }

    /// Send an already built message, re-checking its length.
    pub fn send_message(&mut self, message: &Message) -> Result<String, AtError> {
        SmsSender::default().send_message(self, message)
    }
}
