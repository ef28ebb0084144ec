//! Filesystem and subprocess helpers shared by the packaging stages.

pub mod fs;
pub mod process;
