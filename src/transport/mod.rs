//! Transport layer: AT wire-format details (command framing, response decoding).

mod command;
mod listing;
mod response;

pub use command::{
    ECHO_OFF, EOM, ESCAPE, LIST_MESSAGES, NL, TEXT_MODE, encode_body, encode_command,
    encode_delete, encode_send_prompt,
};
pub use listing::{HEADER, ListingError, decode_listing};
pub use response::{DeviceError, decode_response, is_final};
