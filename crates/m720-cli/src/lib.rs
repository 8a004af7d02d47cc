//! Library components of the `m720` command line tool.

pub mod logging;
pub mod source;
