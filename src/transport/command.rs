use crate::domain::Number;

/// Command line terminator.
pub const NL: &str = "\r\n";

/// Submit byte (`Ctrl-Z`) closing a text-mode message body.
pub const EOM: char = '\u{1a}';

/// Escape sequence switching the modem from data mode to command mode.
pub const ESCAPE: &str = "+++";

pub const ECHO_OFF: &str = "ATE0";
pub const TEXT_MODE: &str = "AT+CMGF=1";
pub const LIST_MESSAGES: &str = "AT+CMGL";

pub fn encode_command(command: &str) -> String {
    format!("{command}{NL}")
}

/// `AT+CMGS="<number>"` terminated by a bare `CR`, which opens the body prompt.
pub fn encode_send_prompt(number: &Number) -> String {
    format!("AT+CMGS=\"{number}\"\r")
}

pub fn encode_body(text: &str) -> String {
    let mut body = String::with_capacity(text.len() + 1);
    body.push_str(text);
    body.push(EOM);
    body
}

pub fn encode_delete(index: u32) -> String {
    format!("AT+CMGD={index}")
}
