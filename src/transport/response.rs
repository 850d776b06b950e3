const OK: &str = "OK";
const ERROR: &str = "ERROR";
const PROMPT: &str = "> ";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("device reported error: {response:?}")]
pub struct DeviceError {
    /// Full normalized response text, including the final `ERROR`.
    pub response: String,
}

/// Normalize one raw modem response and classify it.
///
/// `CR LF` and bare `CR` become `LF`, leading and trailing blank lines are dropped.
/// A response ending in `ERROR` is an error. Otherwise one final `OK` line is
/// removed together with the blank lines right before it.
pub fn decode_response(raw: &[u8]) -> Result<String, DeviceError> {
    let text = String::from_utf8_lossy(raw);
    let normalized = normalize_line_endings(&text);
    let trimmed = normalized.trim_matches('\n');

    if trimmed.ends_with(ERROR) {
        return Err(DeviceError {
            response: trimmed.to_owned(),
        });
    }

    Ok(strip_ok(trimmed).to_owned())
}

/// Whether a partially read response already contains a final result.
///
/// Streaming transports use this to stop reading before the timeout elapses.
/// A final line is exactly `OK` or `ERROR`, or a `+CMS ERROR:` / `+CME ERROR:`
/// result code. The `> ` body prompt also counts as final.
pub fn is_final(raw: &[u8]) -> bool {
    let text = String::from_utf8_lossy(raw);
    if text.ends_with(PROMPT) {
        return true;
    }

    let normalized = normalize_line_endings(&text);
    if !normalized.ends_with('\n') {
        return false;
    }
    match normalized.trim_end_matches('\n').rsplit('\n').next() {
        Some(last) => {
            last == OK
                || last == ERROR
                || last.starts_with("+CMS ERROR:")
                || last.starts_with("+CME ERROR:")
        }
        None => false,
    }
}

fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

fn strip_ok(text: &str) -> &str {
    let Some(rest) = text.strip_suffix(OK) else {
        return text;
    };
    if rest.is_empty() {
        return rest;
    }
    if !rest.ends_with('\n') {
        return text;
    }

    let body = rest.trim_end_matches('\n');
    if body.is_empty() {
        body
    } else {
        // keep the terminator of the last content line
        &rest[..=body.len()]
    }
}
