//! Recipient extraction.
//!
//! Walks a message's recipient table once and classifies each entry into
//! "To" or "Cc" by its MAPI type code, producing two flattened display
//! strings for presentation.

use crate::pff::{FieldResult, PffMessage};

/// MAPI recipient type: primary recipient.
const RECIPIENT_TO: i32 = 1;
/// MAPI recipient type: carbon copy.
const RECIPIENT_CC: i32 = 2;

/// Collect a message's recipients into `(to, cc)` display strings.
///
/// Each entry is labeled `Display Name <email>`, or just the name when no
/// address is available. Empty labels are still appended so the join keeps
/// positional semantics. Type codes other than To/Cc are ignored.
///
/// A fault while reading the table truncates it: whatever was accumulated
/// before the fault is returned, and nothing propagates.
pub fn collect(message: &dyn PffMessage) -> (String, String) {
    let mut to_list = Vec::new();
    let mut cc_list = Vec::new();
    if let Err(fault) = walk_recipients(message, &mut to_list, &mut cc_list) {
        tracing::debug!(error = %fault, "recipient table truncated by field fault");
    }
    (to_list.join(", "), cc_list.join(", "))
}

fn walk_recipients(
    message: &dyn PffMessage,
    to_list: &mut Vec<String>,
    cc_list: &mut Vec<String>,
) -> FieldResult<()> {
    let count = message.recipient_count()?;
    for i in 0..count {
        let recipient = message.recipient(i)?;
        let rtype = recipient.recipient_type()?;
        let name = recipient.name()?.unwrap_or_default();
        let email = recipient.email_address()?.unwrap_or_default();
        let label = if email.is_empty() {
            name
        } else {
            format!("{name} <{email}>")
        };
        match rtype {
            Some(RECIPIENT_TO) => to_list.push(label),
            Some(RECIPIENT_CC) => cc_list.push(label),
            _ => {}
        }
    }
    Ok(())
}
