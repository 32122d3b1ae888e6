//! Utilities

pub mod ansi;
