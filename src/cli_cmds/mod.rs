mod discover_cmds;
mod log_cmds;
mod rank_cmds;
mod stats_cmds;

pub use discover_cmds::{cmd_discover, cmd_score};
pub use log_cmds::cmd_log;
pub use rank_cmds::cmd_rank;
pub use stats_cmds::cmd_stats;
