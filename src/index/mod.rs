//! Reference index over the catalog and rejected history
//!
//! Lookups by normalized URL, repository identity and name prefix. The index
//! only narrows the search; every lookup answers the same question a scan
//! over all records would.

mod resource_index;

pub use resource_index::*;
