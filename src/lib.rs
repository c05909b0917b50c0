//! Interactive console file-system browser.
//!
//! [`services::navigator::Navigator`] holds the current directory and a
//! cache of every visited directory's listing; [`console::shell::Shell`]
//! drives it from line-oriented input.

pub mod console;
pub mod core;
pub mod models;
pub mod services;
