//! Capability interface of the mailbox-reading collaborator.
//!
//! ostfinder does not parse the OST container format itself. Byte-level
//! structural parsing is delegated to a collaborator implementing these
//! traits (in production a libpff-style backend, in tests an in-memory
//! mock). Optional capabilities — accessors a given backend may or may not
//! expose, such as the two message-access naming conventions — are modeled
//! as default trait methods returning `None`, so "capability absent" is an
//! explicit branch at every call site.

use std::path::Path;

use chrono::NaiveDateTime;
use thiserror::Error;

/// A failed read of a single collaborator field.
///
/// Field faults are never fatal on their own: depending on where they occur
/// they skip one message, end one folder's scan, or truncate a recipient
/// list. Only opening the container and reading the Inbox message count
/// escalate them into [`crate::error::OstError`].
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct FieldFault(String);

impl FieldFault {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Outcome of a single collaborator field read.
pub type FieldResult<T> = std::result::Result<T, FieldFault>;

/// A timestamp as the collaborator reports it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PffTime {
    /// Unix epoch seconds (fractional part carries sub-second precision).
    Epoch(f64),
    /// An already-decoded date/time value.
    DateTime(NaiveDateTime),
}

impl PffTime {
    /// Whether this value means "no timestamp" rather than an instant.
    /// Backends report missing FILETIME properties as epoch zero.
    pub fn is_unset(&self) -> bool {
        matches!(self, PffTime::Epoch(secs) if *secs == 0.0)
    }
}

/// A message body as the collaborator reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PffBody {
    Text(String),
    Bytes(Vec<u8>),
}

impl PffBody {
    pub fn is_empty(&self) -> bool {
        match self {
            PffBody::Text(s) => s.is_empty(),
            PffBody::Bytes(b) => b.is_empty(),
        }
    }
}

/// Opens mailbox containers and hands out their root folder.
pub trait PffOpener {
    fn open(&self, path: &Path) -> FieldResult<Box<dyn PffFolder>>;
}

/// One node of the collaborator-owned folder tree.
///
/// The tree is read-only and assumed acyclic; ostfinder performs no caching
/// and no cycle detection.
pub trait PffFolder {
    /// Folder display name. `Ok(None)` when the backend has no name for it.
    fn name(&self) -> FieldResult<Option<String>>;

    /// Number of child folders.
    fn sub_folder_count(&self) -> FieldResult<u32>;

    /// Child folder by index. `Ok(None)` for a null child slot.
    fn sub_folder(&self, index: u32) -> FieldResult<Option<Box<dyn PffFolder>>>;

    /// Message count via the `sub_message` naming convention.
    /// `None` when the backend does not expose this accessor.
    fn sub_message_count(&self) -> Option<FieldResult<u32>> {
        None
    }

    /// Message by index via the `sub_message` naming convention.
    fn sub_message(&self, _index: u32) -> Option<FieldResult<Box<dyn PffMessage>>> {
        None
    }

    /// Message count via the `message` naming convention.
    fn message_count(&self) -> Option<FieldResult<u32>> {
        None
    }

    /// Message by index via the `message` naming convention.
    fn message(&self, _index: u32) -> Option<FieldResult<Box<dyn PffMessage>>> {
        None
    }
}

/// One message inside a folder.
pub trait PffMessage {
    fn subject(&self) -> FieldResult<Option<String>>;

    fn sender_name(&self) -> FieldResult<Option<String>>;

    fn sender_email_address(&self) -> FieldResult<Option<String>>;

    /// Time the message was delivered.
    fn delivery_time(&self) -> FieldResult<Option<PffTime>>;

    /// Time the message was submitted by the sending client.
    fn client_submit_time(&self) -> FieldResult<Option<PffTime>>;

    /// Plain-text body, when the backend exposes that accessor.
    fn plain_text_body(&self) -> Option<FieldResult<Option<PffBody>>> {
        None
    }

    /// HTML body, when the backend exposes that accessor.
    fn html_body(&self) -> Option<FieldResult<Option<PffBody>>> {
        None
    }

    /// Generic body, when the backend exposes that accessor.
    fn body(&self) -> Option<FieldResult<Option<PffBody>>> {
        None
    }

    fn recipient_count(&self) -> FieldResult<u32>;

    fn recipient(&self, index: u32) -> FieldResult<Box<dyn PffRecipient>>;
}

/// One entry of a message's recipient table.
pub trait PffRecipient {
    /// MAPI recipient type code (1 = To, 2 = Cc).
    fn recipient_type(&self) -> FieldResult<Option<i32>>;

    fn name(&self) -> FieldResult<Option<String>>;

    fn email_address(&self) -> FieldResult<Option<String>>;
}
