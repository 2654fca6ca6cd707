//! Compiles guild scripts into canonical guild configurations.
//!
//! An operator describes a server's roles, channels, categories and permission overrides
//! in a sandboxed Lua script. [`service::pipeline::GuildConfigService`] runs the script,
//! validates every declaration as it is made, syncs category overrides into their
//! channels, drops channels excluded by their inclusion predicates and orders every
//! collection, producing a [`model::guild::GuildConfiguration`] that can be diffed
//! byte for byte against live state.

pub mod config;
pub mod error;
pub mod model;
pub mod runtime;
pub mod schema;
pub mod service;
pub mod util;
