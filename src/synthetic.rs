//! Synthetic fixture reader.
//!
//! A synthetic mailbox is a deterministic stand-in for a real OST
//! container, used for testing the pipeline without a pff backend. The
//! format is a 10-byte magic prefix (`OSTFTEST1` plus a raw `0x0A`
//! newline) followed by a UTF-8 JSON array of message objects with the
//! optional keys `subject, from, to, cc, received_time, sent_time,
//! snippet`.

use std::path::Path;

use crate::extract::snippet::decode_utf8_ignore;
use crate::model::record::MessageRecord;

/// The exact magic prefix a synthetic file starts with.
pub const MAGIC: &[u8; 10] = b"OSTFTEST1\n";

/// Read a synthetic mailbox, if `path` is one.
///
/// Returns `None` when the file cannot be opened, the magic prefix does
/// not match byte-for-byte, or the payload is not a JSON array of
/// objects — all of which mean "not a synthetic file, try the real
/// backend". Undecodable payload bytes are dropped, not an error.
/// Missing keys default per [`MessageRecord`]; timestamps are passed
/// through unconverted, since fixtures supply already-canonical values.
pub fn read_synthetic(path: &Path) -> Option<Vec<MessageRecord>> {
    let bytes = std::fs::read(path).ok()?;
    let payload = bytes.strip_prefix(MAGIC.as_slice())?;
    let text = decode_utf8_ignore(payload);
    match serde_json::from_str::<Vec<MessageRecord>>(&text) {
        Ok(records) => Some(records),
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "magic matched but payload is not valid JSON");
            None
        }
    }
}
