//! Server launcher option parsing.
//!
//! Turns command-line arguments, a few environment variables, and a TOML
//! config file into the option set a server is booted with. Options are
//! returned as an [`indifferent::IndifferentMap`], so `"Port"` and `:Port`
//! read the same value.
//!
//! - **[`options`]**: argument parsing and precedence rules. Pure apart
//!   from `debug!` tracing.
//! - **[`env`]** / **[`config`]**: the environment snapshot and file-backed
//!   defaults the rules read from.

pub mod config;
pub mod env;
pub mod exit_codes;
pub mod logging;
pub mod options;
