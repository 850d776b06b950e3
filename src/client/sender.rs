use std::time::Duration;

use crate::client::{AtError, CommandChannel};
use crate::domain::{MAX_LENGTH_TEXT_MODE, Message, Number};
use crate::transport;

/// Time to wait for the modem to acknowledge a submitted body.
pub const SMS_SEND_TIMEOUT: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Sends text-mode SMS through a [`CommandChannel`].
pub struct SmsSender {
    send_timeout: Duration,
    max_length: usize,
}

impl Default for SmsSender {
    fn default() -> Self {
        Self {
            send_timeout: SMS_SEND_TIMEOUT,
            max_length: MAX_LENGTH_TEXT_MODE,
        }
    }
}

impl SmsSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override how long to wait for the submit acknowledgment.
    pub fn send_timeout(mut self, timeout: Duration) -> Self {
        self.send_timeout = timeout;
        self
    }

    /// Lower the body limit below the text-mode maximum.
    ///
    /// Values above [`MAX_LENGTH_TEXT_MODE`] are clamped to it.
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length.min(MAX_LENGTH_TEXT_MODE);
        self
    }

    /// Send `text` to `number`.
    ///
    /// The body length and the number are validated before anything is
    /// written. Returns the modem's normalized answer to the submitted body.
    ///
    /// Errors:
    /// - [`AtError::Validation`] with
    ///   [`ValidationError::MessageTooLong`](crate::domain::ValidationError::MessageTooLong) or
    ///   [`ValidationError::InvalidNumber`](crate::domain::ValidationError::InvalidNumber),
    ///   with no bytes written,
    /// - [`AtError::Device`] when any step is answered with `ERROR`.
    pub fn send(
        &self,
        channel: &mut CommandChannel,
        number: &str,
        text: &str,
    ) -> Result<String, AtError> {
        Message::check_length(text, self.max_length)?;
        let number = Number::new(number)?;
        self.submit(channel, &number, text)
    }

    /// Send an already built message.
    ///
    /// The body is checked against this sender's limit, which never exceeds the
    /// text-mode maximum.
    pub fn send_message(
        &self,
        channel: &mut CommandChannel,
        message: &Message,
    ) -> Result<String, AtError> {
        Message::check_length(message.text(), self.max_length)?;
        self.submit(channel, message.number(), message.text())
    }

    fn submit(
        &self,
        channel: &mut CommandChannel,
        number: &Number,
        text: &str,
    ) -> Result<String, AtError> {
        tracing::debug!(%number, length = text.chars().count(), "sending message");
        channel.send(transport::TEXT_MODE)?;
        channel.send_raw(&transport::encode_send_prompt(number))?;
        let response =
            channel.send_raw_with_timeout(&transport::encode_body(text), self.send_timeout)?;
        tracing::info!(%number, "message sent");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use crate::client::READ_TIMEOUT;
    use crate::client::testing::{FakeTransport, open};
    use crate::domain::ValidationError;

    use super::*;

    #[test]
    fn send_runs_text_mode_prompt_and_body_steps() {
        let transport = FakeTransport::after_handshake()
            .respond("\r\nOK\r\n")
            .respond("\r\n> ")
            .respond("\r\n+CMGS: 42\r\n\r\nOK\r\n");
        let mut channel = open(&transport);

        let response = SmsSender::new()
            .send(&mut channel, "+0015551234", "Hello")
            .unwrap();
        assert_eq!(response, "+CMGS: 42\n");
        assert_eq!(
            transport.writes(),
            vec!["AT+CMGF=1\r\n", "AT+CMGS=\"+15551234\"\r", "Hello\u{1a}"]
        );
        assert_eq!(
            transport.timeouts(),
            vec![READ_TIMEOUT, READ_TIMEOUT, SMS_SEND_TIMEOUT]
        );
    }

    #[test]
    fn custom_send_timeout_applies_to_body_only() {
        let transport = FakeTransport::after_handshake();
        let mut channel = open(&transport);

        SmsSender::new()
            .send_timeout(Duration::from_secs(30))
            .send(&mut channel, "1", "hi")
            .unwrap();
        assert_eq!(
            transport.timeouts(),
            vec![READ_TIMEOUT, READ_TIMEOUT, Duration::from_secs(30)]
        );
    }

    #[test]
    fn too_long_body_fails_before_any_write() {
        let transport = FakeTransport::after_handshake();
        let mut channel = open(&transport);

        let text = "x".repeat(MAX_LENGTH_TEXT_MODE + 1);
        let err = SmsSender::new()
            .send(&mut channel, "not a number", &text)
            .unwrap_err();
        assert!(matches!(
            err,
            AtError::Validation(ValidationError::MessageTooLong { max: 160, actual: 161 })
        ));
        assert!(transport.writes().is_empty());
    }

    #[test]
    fn invalid_number_fails_before_any_write() {
        let transport = FakeTransport::after_handshake();
        let mut channel = open(&transport);

        let err = SmsSender::new()
            .send(&mut channel, "555-CALL", "hi")
            .unwrap_err();
        match err {
            AtError::Validation(ValidationError::InvalidNumber { input }) => {
                assert_eq!(input, "555-CALL");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(transport.writes().is_empty());
    }

    #[test]
    fn lowered_limit_is_enforced() {
        let transport = FakeTransport::after_handshake();
        let mut channel = open(&transport);

        let err = SmsSender::new()
            .max_length(5)
            .send(&mut channel, "1", "too long")
            .unwrap_err();
        assert!(matches!(
            err,
            AtError::Validation(ValidationError::MessageTooLong { max: 5, actual: 8 })
        ));
        assert_eq!(SmsSender::new().max_length(500), SmsSender::new());
    }

    #[test]
    fn device_error_on_prompt_stops_the_sequence() {
        let transport = FakeTransport::after_handshake()
            .respond("OK")
            .respond("\r\nERROR\r\n");
        let mut channel = open(&transport);

        let err = channel.send_sms("+1", "hi").unwrap_err();
        assert!(matches!(err, AtError::Device(_)));
        assert_eq!(transport.writes().len(), 2);
    }

    #[test]
    fn send_message_uses_stored_number_and_text() {
        let transport = FakeTransport::after_handshake();
        let mut channel = open(&transport);

        let message = Message::outgoing(Number::new("+370600").unwrap(), "labas");
        channel.send_message(&message).unwrap();
        assert_eq!(
            transport.writes(),
            vec!["AT+CMGF=1\r\n", "AT+CMGS=\"+370600\"\r", "labas\u{1a}"]
        );

        let long = Message::outgoing(Number::new("1").unwrap(), "y".repeat(200));
        transport.clear();
        assert!(matches!(
            channel.send_message(&long),
            Err(AtError::Validation(ValidationError::MessageTooLong { .. }))
        ));
        assert!(transport.writes().is_empty());
    }

    #[test]
    fn send_message_reports_the_sender_limit_once() {
        let transport = FakeTransport::after_handshake();
        let mut channel = open(&transport);

        let message = Message::outgoing(Number::new("1").unwrap(), "twelve chars");
        let err = SmsSender::new()
            .max_length(10)
            .send_message(&mut channel, &message)
            .unwrap_err();
        assert!(matches!(
            err,
            AtError::Validation(ValidationError::MessageTooLong { max: 10, actual: 12 })
        ));
        assert!(transport.writes().is_empty());
    }
}
