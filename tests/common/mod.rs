//! In-memory mock of the pff collaborator, with per-field fault injection.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ostfinder::pff::{
    FieldFault, FieldResult, PffBody, PffFolder, PffMessage, PffOpener, PffRecipient, PffTime,
};

/// Which message-access naming convention a mock folder exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convention {
    /// `sub_message_count` / `sub_message`.
    SubMessage,
    /// `message_count` / `message`.
    Message,
    /// Count only via `sub_message_count`, getter only via `message`.
    Split,
}

#[derive(Clone)]
pub struct FolderSpec {
    pub name: String,
    pub children: Vec<Arc<FolderSpec>>,
    pub messages: Vec<Arc<MessageSpec>>,
    pub convention: Convention,
}

impl FolderSpec {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            children: Vec::new(),
            messages: Vec::new(),
            convention: Convention::SubMessage,
        }
    }

    pub fn with_children(mut self, children: Vec<FolderSpec>) -> Self {
        self.children = children.into_iter().map(Arc::new).collect();
        self
    }

    pub fn with_messages(mut self, messages: Vec<MessageSpec>) -> Self {
        self.messages = messages.into_iter().map(Arc::new).collect();
        self
    }

    pub fn with_convention(mut self, convention: Convention) -> Self {
        self.convention = convention;
        self
    }
}

/// How a mock body getter behaves.
#[derive(Debug, Clone)]
pub enum BodySpec {
    /// The backend does not expose this getter.
    Absent,
    /// The getter fails with a field fault.
    Faulty,
    /// The getter returns this body.
    Value(PffBody),
}

impl BodySpec {
    fn resolve(&self) -> Option<FieldResult<Option<PffBody>>> {
        match self {
            BodySpec::Absent => None,
            BodySpec::Faulty => Some(Err(FieldFault::new("body unreadable"))),
            BodySpec::Value(body) => Some(Ok(Some(body.clone()))),
        }
    }
}

#[derive(Clone)]
pub struct RecipientSpec {
    pub rtype: Option<i32>,
    pub name: String,
    pub email: String,
}

impl RecipientSpec {
    pub fn new(rtype: i32, name: &str, email: &str) -> Self {
        Self {
            rtype: Some(rtype),
            name: name.to_string(),
            email: email.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct MessageSpec {
    pub subject: Option<String>,
    pub sender_name: Option<String>,
    pub sender_email: Option<String>,
    pub delivery: Option<PffTime>,
    pub submit: Option<PffTime>,
    pub plain_body: BodySpec,
    pub html_body: BodySpec,
    pub generic_body: BodySpec,
    pub recipients: Vec<RecipientSpec>,
    /// Subject access fails, which skips the whole message.
    pub faulty: bool,
}

impl Default for MessageSpec {
    fn default() -> Self {
        Self {
            subject: None,
            sender_name: None,
            sender_email: None,
            delivery: None,
            submit: None,
            plain_body: BodySpec::Absent,
            html_body: BodySpec::Absent,
            generic_body: BodySpec::Absent,
            recipients: Vec::new(),
            faulty: false,
        }
    }
}

impl MessageSpec {
    pub fn with_subject(subject: &str) -> Self {
        Self {
            subject: Some(subject.to_string()),
            ..Default::default()
        }
    }
}

/// A mock opener serving one fixed folder tree, counting open calls.
pub struct MockOpener {
    root: Arc<FolderSpec>,
    opens: Arc<AtomicUsize>,
}

impl MockOpener {
    pub fn new(root: FolderSpec) -> Self {
        Self {
            root: Arc::new(root),
            opens: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn open_count(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.opens)
    }
}

impl PffOpener for MockOpener {
    fn open(&self, _path: &Path) -> FieldResult<Box<dyn PffFolder>> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockFolder(Arc::clone(&self.root))))
    }
}

struct MockFolder(Arc<FolderSpec>);

impl PffFolder for MockFolder {
    fn name(&self) -> FieldResult<Option<String>> {
        Ok(Some(self.0.name.clone()))
    }

    fn sub_folder_count(&self) -> FieldResult<u32> {
        Ok(self.0.children.len() as u32)
    }

    fn sub_folder(&self, index: u32) -> FieldResult<Option<Box<dyn PffFolder>>> {
        Ok(Some(Box::new(MockFolder(Arc::clone(
            &self.0.children[index as usize],
        )))))
    }

    fn sub_message_count(&self) -> Option<FieldResult<u32>> {
        match self.0.convention {
            Convention::SubMessage | Convention::Split => {
                Some(Ok(self.0.messages.len() as u32))
            }
            Convention::Message => None,
        }
    }

    fn sub_message(&self, index: u32) -> Option<FieldResult<Box<dyn PffMessage>>> {
        match self.0.convention {
            Convention::SubMessage => Some(Ok(Box::new(MockMessage(Arc::clone(
                &self.0.messages[index as usize],
            ))))),
            Convention::Message | Convention::Split => None,
        }
    }

    fn message_count(&self) -> Option<FieldResult<u32>> {
        match self.0.convention {
            Convention::Message => Some(Ok(self.0.messages.len() as u32)),
            Convention::SubMessage | Convention::Split => None,
        }
    }

    fn message(&self, index: u32) -> Option<FieldResult<Box<dyn PffMessage>>> {
        match self.0.convention {
            Convention::Message | Convention::Split => Some(Ok(Box::new(MockMessage(
                Arc::clone(&self.0.messages[index as usize]),
            )))),
            Convention::SubMessage => None,
        }
    }
}

struct MockMessage(Arc<MessageSpec>);

impl PffMessage for MockMessage {
    fn subject(&self) -> FieldResult<Option<String>> {
        if self.0.faulty {
            return Err(FieldFault::new("subject unreadable"));
        }
        Ok(self.0.subject.clone())
    }

    fn sender_name(&self) -> FieldResult<Option<String>> {
        Ok(self.0.sender_name.clone())
    }

    fn sender_email_address(&self) -> FieldResult<Option<String>> {
        Ok(self.0.sender_email.clone())
    }

    fn delivery_time(&self) -> FieldResult<Option<PffTime>> {
        Ok(self.0.delivery)
    }

    fn client_submit_time(&self) -> FieldResult<Option<PffTime>> {
        Ok(self.0.submit)
    }

    fn plain_text_body(&self) -> Option<FieldResult<Option<PffBody>>> {
        self.0.plain_body.resolve()
    }

    fn html_body(&self) -> Option<FieldResult<Option<PffBody>>> {
        self.0.html_body.resolve()
    }

    fn body(&self) -> Option<FieldResult<Option<PffBody>>> {
        self.0.generic_body.resolve()
    }

    fn recipient_count(&self) -> FieldResult<u32> {
        Ok(self.0.recipients.len() as u32)
    }

    fn recipient(&self, index: u32) -> FieldResult<Box<dyn PffRecipient>> {
        Ok(Box::new(MockRecipient(
            self.0.recipients[index as usize].clone(),
        )))
    }
}

struct MockRecipient(RecipientSpec);

impl PffRecipient for MockRecipient {
    fn recipient_type(&self) -> FieldResult<Option<i32>> {
        Ok(self.0.rtype)
    }

    fn name(&self) -> FieldResult<Option<String>> {
        Ok(Some(self.0.name.clone()))
    }

    fn email_address(&self) -> FieldResult<Option<String>> {
        Ok(Some(self.0.email.clone()))
    }
}
