//! Core domain types for advisory reconciliation

mod advisory;
mod record;

pub use advisory::{Advisory, LinkStatus, RepoRef};
pub use record::{AdvisoryRecord, CpeMatch};
