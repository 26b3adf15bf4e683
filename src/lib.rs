//! `ostfinder` — extract Inbox messages from OST mailbox containers.
//!
//! This crate provides the core library for opening a mailbox container,
//! locating the Inbox folder, streaming its messages as normalized
//! records, and filtering them by a received/sent time window.

pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod filter;
pub mod model;
pub mod pff;
pub mod synthetic;
