//! Stroke bookkeeping: which segments are still open and which are final.

pub mod ledger;

pub use ledger::StrokeLedger;
