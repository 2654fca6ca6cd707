//! Capability functions injected into the script.
//!
//! The same eight capabilities are exposed twice:
//!
//! - on the `discord` library table, as validate-and-return builders;
//! - on the Setup Context handed to `setup`, where `global.*` and `category` also record
//!   the validated entity into the accumulator.
//!
//! Validation runs inside the call, so a malformed declaration fails the script at the
//! line that made it and nothing partial is ever recorded.

use mlua::{Function, Lua, Table, Value as LuaValue};
use serde_json::Value;
use std::{cell::RefCell, collections::HashSet, rc::Rc};

use crate::{
    error::validation::ValidationError,
    model::{channel::ChannelKind, permission::OverrideKind, snowflake::Snowflake},
    runtime::bridge::{self, PredicateRegistry, ScriptValue},
    schema::{
        category::parse_category,
        channel::{parse_channel, parse_channel_builder},
        permission::parse_override_builder,
        role::parse_role,
    },
    service::context::SetupContext,
};

/// Accumulator shared by the recording capabilities of one evaluation.
///
/// Holds `None` once the evaluation has taken the context back, which closes it to
/// further declarations.
pub type Recorder = Rc<RefCell<Option<SetupContext>>>;

/// Builds the `discord` library table.
///
/// Library capabilities validate and return their entity but never record it, even when
/// called while `setup` runs; only the `ctx.*` capabilities record declarations.
pub fn library(lua: &Lua, registry: &Rc<PredicateRegistry>) -> mlua::Result<Table> {
    let library = namespaces(lua, registry, None)?;
    library.set("allow", "allow")?;
    library.set("deny", "deny")?;
    library.set("inherit", "inherit")?;
    Ok(library)
}

/// Builds the Setup Context table passed to `setup`.
pub fn setup_context(
    lua: &Lua,
    registry: &Rc<PredicateRegistry>,
    recorder: Recorder,
) -> mlua::Result<Table> {
    namespaces(lua, registry, Some(recorder))
}

fn namespaces(
    lua: &Lua,
    registry: &Rc<PredicateRegistry>,
    recorder: Option<Recorder>,
) -> mlua::Result<Table> {
    let root = lua.create_table()?;

    let global = lua.create_table()?;
    for (name, kind) in [("text", ChannelKind::Text), ("voice", ChannelKind::Voice)] {
        let path = format!("global.{name}");
        let recorder = recorder.clone();
        global.set(
            name,
            capability(lua, registry, path, move |json, path| {
                let channel = parse_channel(json, path, Some(kind))?;
                record(&recorder, path, |ctx| {
                    ensure_unused(ctx.channel_ids(), [channel.id], path)?;
                    ctx.channels.push(channel.clone());
                    Ok(())
                })?;
                Ok(channel)
            })?,
        )?;
    }
    let role_recorder = recorder.clone();
    global.set(
        "role",
        capability(lua, registry, "global.role".to_string(), move |json, path| {
            let role = parse_role(json, path)?;
            record(&role_recorder, path, |ctx| {
                ensure_unused(ctx.role_ids(), [role.id], path)?;
                ctx.roles.push(role.clone());
                Ok(())
            })?;
            Ok(role)
        })?,
    )?;
    root.set("global", global)?;

    let channel = lua.create_table()?;
    for (name, kind) in [("text", ChannelKind::Text), ("voice", ChannelKind::Voice)] {
        channel.set(
            name,
            capability(lua, registry, format!("channel.{name}"), move |json, path| {
                parse_channel_builder(json, path, kind)
            })?,
        )?;
    }
    root.set("channel", channel)?;

    let overrides = lua.create_table()?;
    for (name, kind) in [("role", OverrideKind::Role), ("user", OverrideKind::User)] {
        overrides.set(
            name,
            capability(lua, registry, format!("override.{name}"), move |json, path| {
                parse_override_builder(json, path, kind)
            })?,
        )?;
    }
    root.set("override", overrides)?;

    let category_recorder = recorder;
    root.set(
        "category",
        capability(lua, registry, "category".to_string(), move |json, path| {
            let category = parse_category(json, path)?;
            record(&category_recorder, path, |ctx| {
                let ids = std::iter::once(category.id)
                    .chain(category.channels.iter().map(|channel| channel.id));
                ensure_unused(ctx.channel_ids(), ids, path)?;
                ctx.categories.push(category.clone());
                Ok(())
            })?;
            Ok(category)
        })?,
    )?;

    Ok(root)
}

/// Wraps a schema parser as a script function.
///
/// The argument must be a table. It is bridged to JSON, parsed (and possibly recorded)
/// by `parse`, and the typed result is echoed back to the script so calls can be nested
/// or chained. Validation failures travel as the `ValidationError` itself, so the host
/// can recover them from the script's error.
fn capability<T, P>(
    lua: &Lua,
    registry: &Rc<PredicateRegistry>,
    path: String,
    parse: P,
) -> mlua::Result<Function>
where
    T: ScriptValue,
    P: Fn(&Value, &str) -> Result<T, ValidationError> + 'static,
{
    let registry = Rc::clone(registry);

    lua.create_function(move |lua, opts: LuaValue| {
        if !matches!(opts, LuaValue::Table(_)) {
            return Err(mlua::Error::external(ValidationError::new(
                &path,
                format!("expected a table argument, got {}", opts.type_name()),
            )));
        }

        let json = bridge::to_json(&opts, &registry, &path).map_err(mlua::Error::external)?;
        let entity = parse(&json, &path).map_err(mlua::Error::external)?;

        let echoed = entity.to_script_json().map_err(mlua::Error::external)?;
        bridge::to_lua(lua, &echoed, &registry)
    })
}

/// Runs `apply` against the open accumulator. A no-op for library builders.
fn record(
    recorder: &Option<Recorder>,
    path: &str,
    apply: impl FnOnce(&mut SetupContext) -> Result<(), ValidationError>,
) -> Result<(), ValidationError> {
    let Some(recorder) = recorder else {
        tracing::debug!(
            "discord.{} validated but not recorded; declare through ctx.{} to record it",
            path,
            path
        );
        return Ok(());
    };

    let mut slot = recorder.borrow_mut();
    let context = slot.as_mut().ok_or_else(|| {
        ValidationError::new(
            path,
            "setup context is closed; declarations must be made while setup runs",
        )
    })?;

    apply(context)
}

fn ensure_unused(
    taken: impl Iterator<Item = Snowflake>,
    ids: impl IntoIterator<Item = Snowflake>,
    path: &str,
) -> Result<(), ValidationError> {
    let taken: HashSet<Snowflake> = taken.collect();

    match ids.into_iter().find(|id| taken.contains(id)) {
        Some(id) => Err(ValidationError::new(
            format!("{path}.id"),
            format!("id {id} is already declared"),
        )),
        None => Ok(()),
    }
}
