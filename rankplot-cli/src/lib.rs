//! rankplot command line front end
//!
//! Argument parsing, the `render` and `simulate` commands, and the HTTP
//! simulation server used by `serve`.

pub mod cli;
pub mod commands;
pub mod server;

pub use cli::{Args, Command};
pub use server::create_router;
