//! Command-line interface module.

mod args;
pub mod check;
pub mod common;
pub mod normalize;
pub mod scan;

pub use args::{CheckArgs, Cli, Commands, NormalizeArgs, ScanArgs};
