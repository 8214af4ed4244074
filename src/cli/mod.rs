//! Command-line interface: argument parsing and interactive prompts.

pub mod args;
pub mod prompt;

pub use args::Args;
pub use prompt::read_password;
