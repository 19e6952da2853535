//! Archiver module: orchestrates one full archive run
//!
//! A run enumerates the guild's conversational channels, crawls each one's
//! full message history strictly sequentially, writes the raw dumps, then
//! applies the genesis cutoff and writes the filtered dump plus per-user
//! statistics.

mod coordinator;

pub use coordinator::{run_archive, Archiver, RunOptions, RunSummary};
