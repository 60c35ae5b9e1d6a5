//! Terminal output for the diagnostic subcommands. Never used by `serve`,
//! where stdout belongs to the protocol.

pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{error, header, info, success, warn};
pub use table::{query_table, stats_table};
pub use theme::{theme, Theme};
