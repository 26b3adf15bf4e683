//! Export functionality for filtered message records.

pub mod csv;
