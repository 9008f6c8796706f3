//! hookkit core: tool events, hook logic, and the audit trail.
//!
//! Shared by the `hookkit` binary, which wires each hook to a subcommand.
//! Hook logic returns explicit outcome types; deciding the exit status and
//! which failures to swallow is left to the caller.

pub mod audit;
pub mod config;
pub mod env;
pub mod error;
pub mod hooks;
pub mod paths;

pub use config::Config;
pub use error::{HookError, Result};
