//! Script Runtime Adapter.
//!
//! The pipeline talks to the scripting engine only through two traits:
//!
//! - [`ScriptEvaluator`] boots or resets the interpreter and runs an entry script against a
//!   fresh Setup Context, returning everything the script declared.
//! - [`PredicateHost`] evaluates inclusion predicates the script registered, after
//!   execution has finished.
//!
//! [`lua::LuaRuntime`] is the Lua implementation. An evaluator owns live interpreter
//! state and is not isolated between runs on its own: callers reset it before each
//! independent evaluation (the `GuildConfigService` does) and never share one instance
//! between concurrent evaluations.

pub mod bridge;
pub mod capability;
pub mod lua;
pub mod mount;

use crate::{
    error::AppError,
    model::{channel::Channel, PredicateId},
    runtime::mount::MountTable,
    service::context::SetupContext,
};

/// Name of the library table exposed to scripts.
pub const LIBRARY: &str = "discord";

/// Everything one evaluation produced, before resolution.
#[derive(Debug)]
pub struct Declaration {
    /// The `id` the entry script returned.
    pub guild_id: String,
    /// The accumulator as it stood when `setup` returned.
    pub context: SetupContext,
}

/// Evaluates inclusion predicates registered during script execution.
pub trait PredicateHost {
    /// Runs `predicate` with `channel` as its argument.
    ///
    /// # Returns
    /// - `Ok(bool)` - Whether the predicate admits the channel
    /// - `Err(AppError::ScriptErr)` - The predicate raised an error
    /// - `Err(AppError::InternalErr)` - The handle was not issued by this host
    fn test(&self, predicate: PredicateId, channel: &Channel) -> Result<bool, AppError>;
}

/// Interchangeable script executor.
pub trait ScriptEvaluator: PredicateHost {
    /// Discards all interpreter state and boots a fresh instance.
    fn reset(&mut self) -> Result<(), AppError>;

    /// Mounts `scripts`, executes the entry script, validates its return value and calls
    /// its `setup` exactly once.
    fn evaluate(&mut self, scripts: &MountTable) -> Result<Declaration, AppError>;
}
