//! Value bridge between Lua and the JSON-shaped values the schema layer validates.
//!
//! Functions are only meaningful as inclusion predicates. On the way out of Lua each one
//! is registered in the [`PredicateRegistry`] and replaced by a predicate marker; on the
//! way back in the marker turns into the original function again.

use mlua::{Function, Lua, Table, Value as LuaValue};
use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::cell::RefCell;

use crate::{
    error::validation::ValidationError,
    model::{category::Category, channel::Channel, role::Role, PredicateId},
    schema::{predicate_marker, read_predicate_marker, OpenEntity, PREDICATE_MARKER},
};

/// Tables nested deeper than this are rejected; this also stops self-referencing tables.
const MAX_DEPTH: usize = 32;

/// Predicates registered by one interpreter instance.
#[derive(Debug, Default)]
pub struct PredicateRegistry {
    functions: RefCell<Vec<Function>>,
}

impl PredicateRegistry {
    pub fn register(&self, function: Function) -> PredicateId {
        let mut functions = self.functions.borrow_mut();
        functions.push(function);
        PredicateId(functions.len() - 1)
    }

    pub fn get(&self, id: PredicateId) -> Option<Function> {
        self.functions.borrow().get(id.0).cloned()
    }

    pub fn len(&self) -> usize {
        self.functions.borrow().len()
    }
}

/// Converts a script value into its JSON shape.
///
/// # Arguments
/// - `value` - The value passed by the script
/// - `registry` - Where functions found along the way are registered
/// - `path` - Field path of `value`, for error messages
///
/// # Returns
/// - `Ok(Value)` - The converted value
/// - `Err(ValidationError)` - The value holds something with no JSON shape (threads,
///   userdata, non-UTF-8 strings, non-finite numbers, odd table keys, or nesting past
///   the depth limit)
pub fn to_json(
    value: &LuaValue,
    registry: &PredicateRegistry,
    path: &str,
) -> Result<Value, ValidationError> {
    convert(value, registry, path, 0)
}

fn convert(
    value: &LuaValue,
    registry: &PredicateRegistry,
    path: &str,
    depth: usize,
) -> Result<Value, ValidationError> {
    match value {
        LuaValue::Nil | LuaValue::LightUserData(_) => Ok(Value::Null),
        LuaValue::Boolean(flag) => Ok(Value::Bool(*flag)),
        LuaValue::Integer(int) => Ok(Value::from(*int)),
        LuaValue::Number(float) => Number::from_f64(*float)
            .map(Value::Number)
            .ok_or_else(|| ValidationError::new(path, "expected a finite number")),
        LuaValue::String(text) => text
            .to_str()
            .map(|text| Value::String(text.to_string()))
            .map_err(|_| ValidationError::new(path, "expected UTF-8 text")),
        LuaValue::Function(function) => Ok(predicate_marker(registry.register(function.clone()))),
        LuaValue::Table(table) => {
            if depth >= MAX_DEPTH {
                return Err(ValidationError::new(
                    path,
                    format!("tables nested deeper than {MAX_DEPTH} levels"),
                ));
            }
            convert_table(table, registry, path, depth + 1)
        }
        other => Err(ValidationError::new(
            path,
            format!("unsupported value of type {}", other.type_name()),
        )),
    }
}

fn convert_table(
    table: &Table,
    registry: &PredicateRegistry,
    path: &str,
    depth: usize,
) -> Result<Value, ValidationError> {
    let lua_error = |e: mlua::Error| ValidationError::new(path, e.to_string());

    let length = table.raw_len();
    let pairs = table
        .clone()
        .pairs::<LuaValue, LuaValue>()
        .collect::<mlua::Result<Vec<_>>>()
        .map_err(lua_error)?;

    if length > 0 && pairs.len() == length {
        let mut items = Vec::with_capacity(length);
        for index in 1..=length {
            let item: LuaValue = table.raw_get(index).map_err(lua_error)?;
            items.push(convert(&item, registry, &format!("{path}[{}]", index - 1), depth)?);
        }
        return Ok(Value::Array(items));
    }

    let mut map = Map::new();
    for (key, item) in pairs {
        let key = match key {
            LuaValue::String(key) => key
                .to_str()
                .map(|key| key.to_string())
                .map_err(|_| ValidationError::new(path, "table keys must be UTF-8 text"))?,
            LuaValue::Integer(key) => key.to_string(),
            other => {
                return Err(ValidationError::new(
                    path,
                    format!("table keys must be strings, got {}", other.type_name()),
                ))
            }
        };
        if key == PREDICATE_MARKER {
            return Err(ValidationError::new(
                format!("{path}.{key}"),
                "reserved key; pass a function to declare a predicate",
            ));
        }
        let converted = convert(&item, registry, &format!("{path}.{key}"), depth)?;
        map.insert(key, converted);
    }

    Ok(Value::Object(map))
}

/// Converts a JSON-shaped value into a script value, restoring predicate markers to the
/// functions they stand for.
pub fn to_lua(lua: &Lua, value: &Value, registry: &PredicateRegistry) -> mlua::Result<LuaValue> {
    Ok(match value {
        Value::Null => LuaValue::Nil,
        Value::Bool(flag) => LuaValue::Boolean(*flag),
        Value::Number(number) => match number.as_i64() {
            Some(int) => LuaValue::Integer(int),
            None => LuaValue::Number(number.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(text) => LuaValue::String(lua.create_string(text)?),
        Value::Array(items) => {
            let table = lua.create_table_with_capacity(items.len(), 0)?;
            for (index, item) in items.iter().enumerate() {
                table.raw_set(index + 1, to_lua(lua, item, registry)?)?;
            }
            LuaValue::Table(table)
        }
        Value::Object(map) => {
            if let Some(function) = read_predicate_marker(value).and_then(|id| registry.get(id)) {
                return Ok(LuaValue::Function(function));
            }

            let table = lua.create_table_with_capacity(0, map.len())?;
            for (key, item) in map {
                table.raw_set(key.as_str(), to_lua(lua, item, registry)?)?;
            }
            LuaValue::Table(table)
        }
    })
}

/// How a validated entity is echoed back to the script that declared it.
///
/// The echo is the typed entity in JSON shape, with inclusion predicates put back as
/// markers so they survive being passed into another declaration.
pub trait ScriptValue {
    fn to_script_json(&self) -> Result<Value, serde_json::Error>;
}

fn plain<T: Serialize>(entity: &T) -> Result<Value, serde_json::Error> {
    serde_json::to_value(entity)
}

fn with_include(mut value: Value, include: Option<PredicateId>) -> Value {
    if let (Some(id), Value::Object(map)) = (include, &mut value) {
        map.insert("include".to_string(), predicate_marker(id));
    }
    value
}

impl ScriptValue for Role {
    fn to_script_json(&self) -> Result<Value, serde_json::Error> {
        plain(self)
    }
}

impl ScriptValue for OpenEntity {
    fn to_script_json(&self) -> Result<Value, serde_json::Error> {
        plain(self)
    }
}

impl ScriptValue for Channel {
    fn to_script_json(&self) -> Result<Value, serde_json::Error> {
        Ok(with_include(plain(self)?, self.include))
    }
}

impl ScriptValue for Category {
    fn to_script_json(&self) -> Result<Value, serde_json::Error> {
        let mut value = with_include(plain(self)?, self.include);

        if let Some(Value::Array(channels)) = value.get_mut("channels") {
            for (slot, channel) in channels.iter_mut().zip(&self.channels) {
                *slot = channel.to_script_json()?;
            }
        }

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn converts_sequences_and_maps() {
        let lua = Lua::new();
        let registry = PredicateRegistry::default();
        let value: LuaValue = lua
            .load(r#"return { id = "1", tags = { "a", "b" }, flags = { [3] = true }, n = 1.5 }"#)
            .eval()
            .unwrap();

        let json = to_json(&value, &registry, "x").unwrap();

        assert_eq!(
            json,
            json!({ "id": "1", "tags": ["a", "b"], "flags": { "3": true }, "n": 1.5 })
        );
    }

    #[test]
    fn empty_table_becomes_empty_object() {
        let lua = Lua::new();
        let registry = PredicateRegistry::default();
        let value: LuaValue = lua.load("return {}").eval().unwrap();

        assert_eq!(to_json(&value, &registry, "x").unwrap(), json!({}));
    }

    #[test]
    fn functions_round_trip_through_markers() {
        let lua = Lua::new();
        let registry = PredicateRegistry::default();
        let value: LuaValue = lua
            .load("return { include = function(ch) return ch.name == 'keep' end }")
            .eval()
            .unwrap();

        let json = to_json(&value, &registry, "x").unwrap();
        assert_eq!(json, json!({ "include": { "$predicate": 0 } }));
        assert_eq!(registry.len(), 1);

        let back = to_lua(&lua, &json, &registry).unwrap();
        let LuaValue::Table(table) = back else {
            panic!("expected a table");
        };
        let include: Function = table.get("include").unwrap();
        let arg = lua.create_table().unwrap();
        arg.set("name", "keep").unwrap();
        assert!(include.call::<bool>(arg).unwrap());
    }

    #[test]
    fn marker_tables_written_by_scripts_are_rejected() {
        let lua = Lua::new();
        let registry = PredicateRegistry::default();
        let value: LuaValue = lua
            .load(r#"return { include = { ["$predicate"] = 0 } }"#)
            .eval()
            .unwrap();

        let err = to_json(&value, &registry, "global.text").unwrap_err();

        assert_eq!(err.path, "global.text.include.$predicate");
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn self_referencing_table_is_rejected() {
        let lua = Lua::new();
        let registry = PredicateRegistry::default();
        let value: LuaValue = lua
            .load("local t = {} t.me = t return t")
            .eval()
            .unwrap();

        let err = to_json(&value, &registry, "category").unwrap_err();

        assert!(err.path.starts_with("category.me"));
    }

    #[test]
    fn coroutine_is_unsupported() {
        let lua = Lua::new();
        let registry = PredicateRegistry::default();
        let value: LuaValue = lua
            .load("return { co = coroutine.create(function() end) }")
            .eval()
            .unwrap();

        let err = to_json(&value, &registry, "channel.text").unwrap_err();

        assert_eq!(err.path, "channel.text.co");
    }
}
