mod args;
mod runner;

pub(crate) use args::{Cli, Commands, LogAction};
pub(crate) use runner::run;
