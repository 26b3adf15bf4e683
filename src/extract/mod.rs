//! The extraction and normalization pipeline: Inbox location, field
//! extraction with fallbacks, and fault-tolerant streaming iteration.

pub mod inbox;
pub mod recipient;
pub mod snippet;
pub mod stream;
pub mod timestamp;

pub use stream::{Extractor, MessageStream};
