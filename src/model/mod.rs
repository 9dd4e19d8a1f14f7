//! Data models for blameline
//!
//! Transient, UI-independent values built per lookup.

mod attribution;
mod remote;

pub use attribution::{Attribution, Identity};
pub use remote::Upstream;
