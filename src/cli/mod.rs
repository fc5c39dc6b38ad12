//! Command-line interface.

mod args;

pub use args::{Cli, Commands, JobsAction, JobsArgs, MigrateAction, MigrateArgs, ServeArgs};
