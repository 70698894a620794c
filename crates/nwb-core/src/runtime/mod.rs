//! Runtime detection for the external tools nwb shells out to

pub mod check;

pub use check::{check_npm, check_program, npm_program, require, RuntimeInfo};
