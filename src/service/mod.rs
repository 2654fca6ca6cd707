//! Post-execution pipeline stages and the orchestrating `GuildConfigService`.

pub mod context;
pub mod filter;
pub mod inheritance;
pub mod ordering;
pub mod pipeline;

#[cfg(test)]
mod test;
