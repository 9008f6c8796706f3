//! Environment variable constants used throughout the application.
//!
//! Centralized definition of all `HOOKKIT_*` environment variables to ensure
//! consistency and avoid hardcoded strings.

/// State directory override (default `.claude` in the working directory)
pub const HOOKKIT_STATE_DIR: &str = "HOOKKIT_STATE_DIR";

/// Configuration file path override (CLI arg default env)
pub const HOOKKIT_CONFIG: &str = "HOOKKIT_CONFIG";
