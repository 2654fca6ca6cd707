//! Guildscript Test Utils
//!
//! Provides shared testing utilities for the guild script compiler. Scripts are ordinary
//! files on disk, so most tests need a temporary directory holding an entry script and a
//! handful of companion scripts. This crate builds those trees and the Lua sources that
//! go into them.
//!
//! # Overview
//!
//! The test utilities consist of these components:
//! - **TestBuilder**: Fluent builder for laying out a temporary script tree
//! - **TestContext**: The laid-out tree; owns the temporary directory
//! - **TestError**: Error types that can occur during test setup
//! - **fixture**: Lua source fixtures with fixed defaults
//! - **factory**: Declaration option records with unique snowflake ids
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, fixture};
//!
//! #[tokio::test]
//! async fn test_compile() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_entry(fixture::script::entry())
//!         .with_file("lib/roles.lua", "return {}")
//!         .build()?;
//!
//!     let config = service.compile(&test.entry).await?;
//!     // Assert on the compiled configuration...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod fixture;
