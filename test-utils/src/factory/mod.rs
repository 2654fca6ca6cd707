//! Factory methods for creating declaration option records.
//!
//! Each factory returns the JSON shape of a capability argument with a fresh, unique
//! snowflake id, so tests can declare several entities without picking ids by hand.
//! Render them into a script with [`crate::fixture::lua::table`].
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::{factory, fixture};
//!
//! let role = factory::declaration::role("moderator");
//! let setup = format!("ctx.global.role({})", fixture::lua::table(&role));
//! ```

pub mod declaration;
pub mod helpers;
