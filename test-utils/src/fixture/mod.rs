//! Test fixtures providing reusable Lua sources.
//!
//! Fixtures produce script text with fixed defaults. They never touch the filesystem;
//! hand their output to [`crate::builder::TestBuilder`] to lay it out.
//!
//! # Example
//!
//! ```rust,ignore
//! use test_utils::fixture;
//!
//! // Entry script that declares nothing
//! let empty = fixture::script::entry();
//!
//! // Entry script with a setup body
//! let source = fixture::script::entry_builder()
//!     .setup(r#"ctx.global.role({ id = "10", name = "admin" })"#)
//!     .build();
//! ```

pub mod lua;
pub mod script;

pub use script::{entry as script_entry, entry_builder as script_entry_builder};
