//! Command handlers for CLI operations
//!
//! One handler per subcommand, keeping execution apart from parsing and
//! validation.

pub mod check;
pub mod watch;

pub use check::CheckCommandHandler;
pub use watch::WatchCommandHandler;
