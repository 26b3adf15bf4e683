//! The message stream extractor.
//!
//! Given a mailbox file path, produces a lazy, finite, pull-based sequence
//! of [`MessageRecord`]s: synthetic fixtures are recognized first, then
//! the real pff collaborator is consulted. Each index that fails to
//! extract is dropped as an `Err` and logged; one corrupt message never
//! aborts the scan of the rest of the mailbox.

use std::fmt;
use std::path::Path;

use tracing::debug;

use crate::error::{OstError, Result};
use crate::model::record::MessageRecord;
use crate::pff::{FieldFault, FieldResult, PffBody, PffFolder, PffMessage, PffOpener};
use crate::synthetic;

use super::{inbox, recipient, snippet, timestamp};

/// Produces message streams from mailbox files.
///
/// Holds the optional pff collaborator. Synthetic fixtures never touch the
/// collaborator, so an extractor without one still serves fixture files;
/// a real mailbox then fails fatally with a configuration error instead of
/// silently yielding nothing.
pub struct Extractor {
    opener: Option<Box<dyn PffOpener>>,
}

impl Extractor {
    /// An extractor without a pff backend. This build links no libpff
    /// binding, so only synthetic fixtures can be read.
    pub fn new() -> Self {
        Self { opener: None }
    }

    /// An extractor using the given collaborator for non-synthetic files.
    pub fn with_opener(opener: Box<dyn PffOpener>) -> Self {
        Self {
            opener: Some(opener),
        }
    }

    /// Open `path` and return a fresh, single-pass stream over its Inbox.
    ///
    /// Calling this again re-opens the source from scratch. A mailbox
    /// without an Inbox folder yields an empty stream, not an error.
    pub fn stream(&self, path: &Path) -> Result<MessageStream> {
        if let Some(records) = synthetic::read_synthetic(path) {
            debug!(path = %path.display(), count = records.len(), "synthetic fixture recognized");
            return Ok(MessageStream::Synthetic(records.into_iter()));
        }

        let opener = self
            .opener
            .as_ref()
            .ok_or_else(|| OstError::PffUnavailable(path.to_path_buf()))?;

        let root = opener.open(path).map_err(|fault| OstError::Open {
            path: path.to_path_buf(),
            reason: fault.to_string(),
        })?;

        let Some(folder) = inbox::find_inbox(root) else {
            debug!(path = %path.display(), "no Inbox folder in mailbox");
            return Ok(MessageStream::Empty);
        };

        // The collaborator may expose either message-access naming
        // convention; count and getter are resolved independently.
        let total = match folder.sub_message_count().or_else(|| folder.message_count()) {
            Some(Ok(total)) => total,
            Some(Err(fault)) => {
                return Err(OstError::MessageCount {
                    reason: fault.to_string(),
                })
            }
            None => 0,
        };

        Ok(MessageStream::Mailbox(InboxScan {
            folder,
            total,
            next_index: 0,
        }))
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

/// A lazy, finite stream of normalized message records.
pub enum MessageStream {
    /// Records decoded from a synthetic fixture, yielded in source order.
    Synthetic(std::vec::IntoIter<MessageRecord>),
    /// A live scan over a real Inbox folder.
    Mailbox(InboxScan),
    /// The mailbox has no Inbox folder.
    Empty,
}

impl Iterator for MessageStream {
    type Item = MessageRecord;

    fn next(&mut self) -> Option<MessageRecord> {
        match self {
            MessageStream::Synthetic(records) => records.next(),
            MessageStream::Mailbox(scan) => scan.next(),
            MessageStream::Empty => None,
        }
    }
}

// Hand-written: the Mailbox variant holds a `Box<dyn PffFolder>`,
// which has no `Debug` of its own.
impl fmt::Debug for MessageStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageStream::Synthetic(records) => {
                f.debug_tuple("Synthetic").field(&records.len()).finish()
            }
            MessageStream::Mailbox(scan) => f.debug_tuple("Mailbox").field(scan).finish(),
            MessageStream::Empty => f.write_str("Empty"),
        }
    }
}

/// Index-by-index scan over one Inbox folder.
pub struct InboxScan {
    folder: Box<dyn PffFolder>,
    total: u32,
    next_index: u32,
}

impl fmt::Debug for InboxScan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InboxScan")
            .field("total", &self.total)
            .field("next_index", &self.next_index)
            .finish_non_exhaustive()
    }
}

impl Iterator for InboxScan {
    type Item = MessageRecord;

    fn next(&mut self) -> Option<MessageRecord> {
        while self.next_index < self.total {
            let index = self.next_index;
            self.next_index += 1;
            match extract_record(&*self.folder, index) {
                Ok(record) => return Some(record),
                Err(fault) => {
                    debug!(index, error = %fault, "skipping unreadable message");
                }
            }
        }
        None
    }
}

/// Extract one message into a record. Any field fault (outside the
/// recipient table, which degrades internally) fails the whole index.
fn extract_record(folder: &dyn PffFolder, index: u32) -> FieldResult<MessageRecord> {
    let message = folder
        .sub_message(index)
        .or_else(|| folder.message(index))
        .ok_or_else(|| FieldFault::new("no message accessor available"))??;
    let message = &*message;

    let subject = message.subject()?.unwrap_or_default();

    let sender = match message.sender_name()? {
        Some(name) if !name.is_empty() => Some(name),
        _ => message.sender_email_address()?,
    }
    .unwrap_or_default();

    let received = match message.delivery_time()?.filter(|t| !t.is_unset()) {
        Some(time) => Some(time),
        None => message.client_submit_time()?,
    };
    let sent = message.client_submit_time()?;

    let (to, cc) = recipient::collect(message);

    Ok(MessageRecord {
        subject,
        from: sender,
        to,
        cc,
        received_time: timestamp::normalize(received),
        sent_time: timestamp::normalize(sent),
        snippet: snippet::make_snippet(first_body(message)),
    })
}

/// Try the body getters in fixed order: plain text, then HTML, then the
/// generic body. The first non-empty result wins; a fault in one getter
/// just moves on to the next, and absent capabilities are skipped.
fn first_body(message: &dyn PffMessage) -> Option<PffBody> {
    pick_body(message.plain_text_body())
        .or_else(|| pick_body(message.html_body()))
        .or_else(|| pick_body(message.body()))
}

fn pick_body(outcome: Option<FieldResult<Option<PffBody>>>) -> Option<PffBody> {
    match outcome {
        Some(Ok(Some(body))) if !body.is_empty() => Some(body),
        Some(Err(fault)) => {
            debug!(error = %fault, "body getter failed, trying next");
            None
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_debug_names_variants() {
        assert_eq!(format!("{:?}", MessageStream::Empty), "Empty");
        let synthetic =
            MessageStream::Synthetic(vec![MessageRecord::default(); 2].into_iter());
        assert_eq!(format!("{synthetic:?}"), "Synthetic(2)");
    }
}
