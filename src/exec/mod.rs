//! Process execution

pub mod subprocess;
