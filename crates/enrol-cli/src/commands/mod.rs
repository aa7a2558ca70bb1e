//! One module per subcommand; each exposes `execute`.

pub mod check;
pub mod completions;
pub mod config;
pub mod register;
pub mod watch;
