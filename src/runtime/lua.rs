//! Lua implementation of the script evaluator.

use mlua::{Function, Lua, LuaOptions, StdLib, Table, Value as LuaValue, Variadic};
use std::{cell::RefCell, rc::Rc};

use crate::{
    error::{
        internal::InternalError,
        script::{FilesystemError, ScriptExecutionError},
        validation::{SchemaError, ValidationError},
        AppError,
    },
    model::{channel::Channel, PredicateId},
    runtime::{
        bridge::{self, PredicateRegistry, ScriptValue},
        capability::{self, Recorder},
        mount::MountTable,
        Declaration, PredicateHost, ScriptEvaluator, LIBRARY,
    },
    service::context::SetupContext,
};

/// Base-library functions that could reach outside the mounted scripts.
const REMOVED_GLOBALS: [&str; 3] = ["dofile", "loadfile", "load"];

/// Sandboxed Lua 5.4 interpreter.
///
/// Holds the interpreter together with the predicates registered while it ran, so a
/// [`Declaration`] it produced can be resolved against it afterwards. Call
/// [`ScriptEvaluator::reset`] before evaluating an unrelated script.
pub struct LuaRuntime {
    lua: Lua,
    predicates: Rc<PredicateRegistry>,
}

impl LuaRuntime {
    /// Boots a fresh sandboxed interpreter with the `discord` library installed.
    ///
    /// # Returns
    /// - `Ok(LuaRuntime)` - Ready to evaluate an entry script
    /// - `Err(AppError::InternalErr)` - The interpreter could not be prepared
    pub fn new() -> Result<Self, AppError> {
        Self::boot().map_err(|e| InternalError::Interpreter(e.to_string()).into())
    }

    fn boot() -> mlua::Result<Self> {
        let libs = StdLib::TABLE | StdLib::STRING | StdLib::MATH | StdLib::UTF8 | StdLib::COROUTINE;
        let lua = Lua::new_with(libs, LuaOptions::new())?;
        let globals = lua.globals();

        for name in REMOVED_GLOBALS {
            globals.set(name, LuaValue::Nil)?;
        }

        let print = lua.create_function(|_, args: Variadic<LuaValue>| {
            let line = args
                .iter()
                .map(|arg| arg.to_string())
                .collect::<mlua::Result<Vec<_>>>()?
                .join("\t");
            tracing::debug!("script: {}", line);
            Ok(())
        })?;
        globals.set("print", print)?;

        let predicates = Rc::new(PredicateRegistry::default());
        globals.set(LIBRARY, capability::library(&lua, &predicates)?)?;

        Ok(Self { lua, predicates })
    }

    /// Installs `require` and `package.loaded` for the mounted companion scripts.
    fn install_require(&self, scripts: Rc<MountTable>) -> mlua::Result<()> {
        let globals = self.lua.globals();

        let loaded = self.lua.create_table()?;
        loaded.set(LIBRARY, globals.get::<Table>(LIBRARY)?)?;
        let package = self.lua.create_table()?;
        package.set("loaded", loaded)?;
        globals.set("package", package)?;

        let require = self.lua.create_function(move |lua, name: String| {
            let package: Table = lua.globals().get("package")?;
            let loaded: Table = package.get("loaded")?;

            let cached: LuaValue = loaded.get(name.as_str())?;
            if cached != LuaValue::Nil {
                return Ok(cached);
            }

            let Some((path, source)) = scripts.resolve_module(&name) else {
                return Err(mlua::Error::RuntimeError(format!(
                    "module '{name}' not found among the mounted scripts"
                )));
            };

            let value: LuaValue = lua.load(source).set_name(format!("@{path}")).eval()?;
            // A module returning nothing is cached as `true`, like stock `require`.
            let value = match value {
                LuaValue::Nil => LuaValue::Boolean(true),
                other => other,
            };
            loaded.set(name.as_str(), value.clone())?;
            Ok(value)
        })?;
        globals.set("require", require)?;

        Ok(())
    }

    /// Runs the entry script and the `setup` callback it returns.
    fn run(&self, scripts: &MountTable) -> Result<Declaration, AppError> {
        let source = scripts.entry_source().ok_or_else(|| {
            AppError::from(FilesystemError::MissingEntry {
                path: scripts.entry_path(),
            })
        })?;

        let returned: LuaValue = self
            .lua
            .load(source)
            .set_name(format!("@{}", scripts.entry()))
            .eval()
            .map_err(classify)?;

        let (guild_id, setup) = entry_contract(returned)?;

        let recorder: Recorder = Rc::new(RefCell::new(Some(SetupContext::new())));
        let ctx = capability::setup_context(&self.lua, &self.predicates, Rc::clone(&recorder))
            .map_err(|e| InternalError::Interpreter(e.to_string()))?;

        let outcome = setup.call::<()>(ctx);
        // Seal the context whether or not setup succeeded.
        let context = recorder.borrow_mut().take().unwrap_or_default();
        outcome.map_err(classify)?;

        tracing::debug!(
            "Script for guild {} declared {} channels, {} roles and {} categories",
            guild_id,
            context.channels.len(),
            context.roles.len(),
            context.categories.len()
        );

        Ok(Declaration { guild_id, context })
    }
}

impl ScriptEvaluator for LuaRuntime {
    fn reset(&mut self) -> Result<(), AppError> {
        *self = Self::new()?;
        Ok(())
    }

    fn evaluate(&mut self, scripts: &MountTable) -> Result<Declaration, AppError> {
        self.install_require(Rc::new(scripts.clone()))
            .map_err(|e| InternalError::Interpreter(e.to_string()))?;

        self.run(scripts)
    }
}

impl PredicateHost for LuaRuntime {
    fn test(&self, predicate: PredicateId, channel: &Channel) -> Result<bool, AppError> {
        let function: Function = self
            .predicates
            .get(predicate)
            .ok_or(InternalError::DanglingPredicate(predicate.0))?;

        let json = channel.to_script_json()?;
        let argument = bridge::to_lua(&self.lua, &json, &self.predicates)
            .map_err(|e| InternalError::Interpreter(e.to_string()))?;

        function.call::<bool>(argument).map_err(classify)
    }
}

/// Checks that the entry script returned `{ id = <string>, setup = <function> }`.
fn entry_contract(returned: LuaValue) -> Result<(String, Function), SchemaError> {
    let table = match returned {
        LuaValue::Table(table) => table,
        other => {
            return Err(SchemaError(format!(
                "expected a table with `id` and `setup`, got {}",
                other.type_name()
            )))
        }
    };

    let id = match table.get::<LuaValue>("id") {
        Ok(LuaValue::String(id)) => id
            .to_str()
            .map(|id| id.to_string())
            .map_err(|_| SchemaError("`id` is not valid UTF-8".to_string()))?,
        Ok(other) => {
            return Err(SchemaError(format!(
                "`id` must be a string, got {}",
                other.type_name()
            )))
        }
        Err(e) => return Err(SchemaError(format!("`id` could not be read: {e}"))),
    };
    if id.trim().is_empty() {
        return Err(SchemaError("`id` must not be empty".to_string()));
    }

    match table.get::<LuaValue>("setup") {
        Ok(LuaValue::Function(setup)) => Ok((id, setup)),
        Ok(other) => Err(SchemaError(format!(
            "`setup` must be a function, got {}",
            other.type_name()
        ))),
        Err(e) => Err(SchemaError(format!("`setup` could not be read: {e}"))),
    }
}

/// Maps an interpreter error to the pipeline's error taxonomy.
///
/// A `ValidationError` raised by a capability is recovered from the error chain; any
/// other fault keeps the interpreter's own diagnostic.
fn classify(err: mlua::Error) -> AppError {
    match find_validation(&err) {
        Some(validation) => validation.into(),
        None => ScriptExecutionError::new(err.to_string()).into(),
    }
}

fn find_validation(err: &mlua::Error) -> Option<ValidationError> {
    match err {
        mlua::Error::CallbackError { cause, .. } => find_validation(cause),
        mlua::Error::WithContext { cause, .. } => find_validation(cause),
        mlua::Error::ExternalError(inner) => inner
            .downcast_ref::<ValidationError>()
            .cloned()
            .or_else(|| inner.downcast_ref::<mlua::Error>().and_then(find_validation)),
        _ => None,
    }
}
