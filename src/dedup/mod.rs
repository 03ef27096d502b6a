//! Duplicate detection against the catalog and rejected history

mod detector;
mod report;
mod result;

pub use detector::{check_duplicate, DuplicateDetector};
pub use report::generate_report;
pub use result::{BatchSummary, CheckOutcome, Checks, DuplicateCheckResult, DuplicateType, SimilarMatch};
