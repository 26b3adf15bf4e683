//! Inbox location: depth-first search of the collaborator's folder tree.

use crate::pff::PffFolder;

/// Find the first folder named "inbox" (case-insensitive), depth-first.
///
/// A matching folder is returned before its children are visited. A fault
/// while reading a folder's name counts as an empty name; a fault while
/// enumerating its children silently ends the search below that folder,
/// including its remaining siblings' slots at that level. Returns `None`
/// when no match exists.
///
/// The tree is assumed acyclic; a cyclic collaborator tree will not
/// terminate.
pub fn find_inbox(folder: Box<dyn PffFolder>) -> Option<Box<dyn PffFolder>> {
    let name = folder.name().ok().flatten().unwrap_or_default();
    if name.to_lowercase() == "inbox" {
        return Some(folder);
    }
    let count = match folder.sub_folder_count() {
        Ok(count) => count,
        Err(fault) => {
            tracing::debug!(error = %fault, "folder child count unreadable, ending branch");
            return None;
        }
    };
    for i in 0..count {
        match folder.sub_folder(i) {
            Ok(Some(child)) => {
                if let Some(found) = find_inbox(child) {
                    return Some(found);
                }
            }
            Ok(None) => {}
            Err(fault) => {
                tracing::debug!(index = i, error = %fault, "folder child unreadable, ending branch");
                return None;
            }
        }
    }
    None
}
