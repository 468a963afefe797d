mod cli;
mod cli_cmds;

use anyhow::Result;

pub(crate) use cli::LogAction;

fn main() -> Result<()> {
    cli::run()
}
