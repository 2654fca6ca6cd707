use std::path::Path;

use crate::{
    error::AppError,
    model::guild::GuildConfiguration,
    runtime::{mount::MountTable, Declaration, PredicateHost, ScriptEvaluator},
    service::{
        filter::{filter_category, filter_global},
        inheritance::sync_category,
        ordering::{sequence, sort_category_overrides, sort_overrides},
    },
};

/// Compiles guild scripts into finished configurations.
///
/// Borrows one evaluator exclusively for as long as it lives, so evaluations through it
/// never overlap; the evaluator is reset before every compile.
pub struct GuildConfigService<'a, E: ScriptEvaluator> {
    evaluator: &'a mut E,
}

impl<'a, E: ScriptEvaluator> GuildConfigService<'a, E> {
    pub fn new(evaluator: &'a mut E) -> Self {
        Self { evaluator }
    }

    /// Compiles the guild script at `entry`.
    ///
    /// Mounts the entry and its companion scripts, evaluates them on a freshly reset
    /// interpreter, then merges, filters and orders what the script declared.
    ///
    /// # Arguments
    /// - `entry` - Path to the entry script
    ///
    /// # Returns
    /// - `Ok(GuildConfiguration)` - The complete configuration
    /// - `Err(AppError::FilesystemErr)` - The entry is missing or a script is unreadable
    /// - `Err(AppError::ValidationErr)` - A declaration was malformed
    /// - `Err(AppError::SchemaErr)` - The entry script returned the wrong shape
    /// - `Err(AppError::ScriptErr)` - The script or one of its predicates raised an error
    pub async fn compile(&mut self, entry: &Path) -> Result<GuildConfiguration, AppError> {
        let scripts = MountTable::scan(entry).await?;

        self.evaluator.reset()?;
        let declaration = self.evaluator.evaluate(&scripts)?;

        resolve(declaration, &*self.evaluator)
    }
}

/// Turns a raw declaration into the finished configuration.
///
/// Runs inheritance per category, sorts every override list, applies inclusion
/// predicates through `host`, and sequences the result. `host` must be the evaluator
/// that produced `declaration`.
pub fn resolve(
    declaration: Declaration,
    host: &dyn PredicateHost,
) -> Result<GuildConfiguration, AppError> {
    let Declaration { guild_id, context } = declaration;
    let mut channels = context.channels;
    let mut categories = context.categories;

    for category in &mut categories {
        sync_category(category);
        sort_category_overrides(category);
    }
    for channel in &mut channels {
        sort_overrides(&mut channel.overrides);
    }

    let mut excluded = filter_global(&mut channels, host)?;
    for category in &mut categories {
        excluded += filter_category(category, host)?;
    }

    let configuration = sequence(guild_id, channels, context.roles, categories);

    tracing::info!(
        "Compiled guild {}: {} global channels, {} roles, {} categories ({} channels excluded)",
        configuration.guild_id,
        configuration.global_channels.len(),
        configuration.global_roles.len(),
        configuration.categories.len(),
        excluded
    );

    Ok(configuration)
}
