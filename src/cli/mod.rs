//! CLI module for studio-stream.
//!
//! - Argument parsing
//! - Rendering of turn updates to the terminal
//!
//! # Usage
//!
//! ```ignore
//! use studio_stream::cli::{parse_args, CliCommand};
//!
//! match parse_args(std::env::args())? {
//!     CliCommand::Send(args) => run(args).await?,
//!     other => ...,
//! }
//! ```

pub mod args;
pub mod render;

pub use args::{parse_args, CliCommand, SendArgs, USAGE};
pub use render::TurnPrinter;

/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
