// Application layer: command handlers behind the CLI.

#[cfg(feature = "cli")]
pub mod commands;
