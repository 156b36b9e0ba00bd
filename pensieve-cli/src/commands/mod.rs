//! Command implementations for the pnsv CLI.

pub mod check;
pub mod dump;

pub use check::check_file;
pub use dump::dump_file;
