use crate::client::{AtError, CommandChannel, MessageList};
use crate::transport;

#[derive(Debug, Clone, Copy, Default)]
/// Reads stored messages with `AT+CMGL` in text mode.
pub struct SmsListReader;

impl SmsListReader {
    /// Switch to text mode, list every stored message and decode the records.
    ///
    /// Errors:
    /// - [`AtError::Device`] when either command is answered with `ERROR`,
    /// - [`AtError::Listing`] when a record header cannot be decoded.
    ///
    /// One undecodable record fails the whole listing. This includes a
    /// sender that is not a digits-only number (for example `Bank`), and the
    /// error does not carry that record's slot index.
    pub fn list(&self, channel: &mut CommandChannel) -> Result<MessageList, AtError> {
        channel.send(transport::TEXT_MODE)?;
        let response = channel.send(transport::LIST_MESSAGES)?;

        let messages = transport::decode_listing(&response)?;
        for msg in &messages {
            channel.log(&format!("listed {msg}"));
        }
        tracing::debug!(count = messages.len(), "listed messages");

        Ok(MessageList::from_messages(messages))
    }
}
