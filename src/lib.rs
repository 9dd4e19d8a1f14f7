//! blameline - who last touched this line, and when
//!
//! Attribution for the line under the cursor, built for editor integrations.
//!
//! This library provides:
//! - [`process`]: Single external process execution with a kill handle
//! - [`git`]: git invocations, porcelain parsing and the single in-flight lookup
//! - [`format`]: Relative times ("3 days ago") and templated messages
//! - [`model`]: Domain models
//! - [`config`]: Runtime configuration
//! - [`clipboard`]: Copying revision ids
//! - [`logger`]: Opt-in debug log file

pub mod logger;

pub mod clipboard;
pub mod config;
pub mod format;
pub mod git;
pub mod model;
pub mod process;
