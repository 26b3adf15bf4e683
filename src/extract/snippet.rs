//! Body-to-snippet conversion: UTF-8 decoding that drops undecodable
//! bytes, CR/LF collapsing, and length-bounded truncation.

use crate::pff::PffBody;

/// Maximum snippet length in characters.
pub const SNIPPET_MAX_CHARS: usize = 200;

/// Build the plain-text preview snippet from an extracted body.
pub fn make_snippet(body: Option<PffBody>) -> String {
    let text = match body {
        Some(PffBody::Text(text)) => text,
        Some(PffBody::Bytes(bytes)) => decode_utf8_ignore(&bytes),
        None => String::new(),
    };
    text.replace("\r\n", " ")
        .replace('\n', " ")
        .replace('\r', " ")
        .chars()
        .take(SNIPPET_MAX_CHARS)
        .collect()
}

/// Decode bytes as UTF-8, dropping undecodable sequences entirely
/// (no replacement characters).
pub fn decode_utf8_ignore(mut bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    loop {
        match std::str::from_utf8(bytes) {
            Ok(valid) => {
                out.push_str(valid);
                return out;
            }
            Err(err) => {
                let (valid, rest) = bytes.split_at(err.valid_up_to());
                out.push_str(std::str::from_utf8(valid).expect("validated prefix"));
                // error_len is None only at a truncated sequence at EOF.
                let skip = err.error_len().unwrap_or(rest.len());
                bytes = &rest[skip..];
                if bytes.is_empty() {
                    return out;
                }
            }
        }
    }
}
