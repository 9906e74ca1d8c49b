//! CLI commands module.

mod config;
mod intent;
mod profile;
mod replay;
mod util;

pub use config::ConfigCommand;
pub use intent::IntentCommand;
pub use profile::ProfileCommand;
pub use replay::ReplayCommand;

pub(crate) use util::*;
