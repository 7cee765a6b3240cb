//! Library side of the `titanic` command-line tool.

pub mod input;
pub mod logging;
pub mod report;
