//! georoute CLI library.
//!
//! Command handlers and output formatting for the
//! `georoute-cli` binary.

pub mod commands;
pub mod output;
