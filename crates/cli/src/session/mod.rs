//! Ingestion session plumbing shared by the commands.

mod interrupts;
mod report;

pub use interrupts::{run_blocking, Interrupts};
pub use report::print_session;
