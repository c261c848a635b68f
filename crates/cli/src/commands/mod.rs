//! Command implementations.

mod ingest;
mod menu;
mod replay;
mod simulate;
mod validate;

pub use ingest::run_ingest;
pub use menu::run_menu;
pub use replay::run_replay;
pub use simulate::run_simulate;
pub use validate::run_validate;
