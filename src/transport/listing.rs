use crate::domain::{Message, MessageStatus, Number, ValidationError};

/// Prefix of a `+CMGL` record header line.
pub const HEADER: &str = "+CMGL:";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListingError {
    #[error("malformed +CMGL header: {line:?}")]
    MalformedHeader { line: String },

    #[error("invalid number in +CMGL header: {0}")]
    Number(#[from] ValidationError),
}

/// Decode a normalized `AT+CMGL` response into messages, in device order.
///
/// Lines after a header are appended verbatim (terminators included) to the
/// open record. Body lines that themselves start with `+CMGL:` cannot be told
/// apart from headers and start a new record.
pub fn decode_listing(response: &str) -> Result<Vec<Message>, ListingError> {
    let mut messages = Vec::new();
    let mut open: Option<Message> = None;

    for line in response.split_inclusive('\n') {
        if line.starts_with(HEADER) {
            if let Some(done) = open.take() {
                messages.push(done);
            }
            open = Some(decode_header(line)?);
        } else if let Some(msg) = open.as_mut() {
            msg.push_line(line);
        }
    }

    if let Some(done) = open {
        messages.push(done);
    }
    Ok(messages)
}

fn decode_header(line: &str) -> Result<Message, ListingError> {
    let malformed = || ListingError::MalformedHeader {
        line: line.trim_end_matches('\n').to_owned(),
    };

    let fields = line
        .strip_prefix(HEADER)
        .ok_or_else(malformed)?
        .trim_end_matches('\n');
    let mut fields = fields.split(',');

    let index = fields
        .next()
        .and_then(|raw| raw.trim().parse::<u32>().ok())
        .ok_or_else(malformed)?;
    let status = fields.next().map(unquote).ok_or_else(malformed)?;
    let number = fields.next().map(unquote).ok_or_else(malformed)?;

    Ok(Message::stored(
        index,
        MessageStatus::new(status),
        Number::new(number)?,
        String::new(),
    ))
}

fn unquote(field: &str) -> String {
    field.replace('"', "").trim().to_owned()
}
