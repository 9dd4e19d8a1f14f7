//! git output parser
//!
//! Parses the output from git commands into structured data.

mod porcelain;
mod remote;


/// Parser for git command output
pub struct Parser;
