//! Summary domain - human-readable description of a record's active renderer chain

mod reporter;

pub use reporter::{Summary, SummaryEntry, SummaryReporter, EMPTY_SUMMARY};
