//! Restricted expression evaluator.
//!
//! User-authored expressions are Lua expressions evaluated against a
//! whitelisted environment: a handful of safe stdlib entries plus the
//! call-specific bindings (`parameters`, `query`, and for column code the
//! record context). Nothing else from the Lua globals is reachable, so
//! expressions cannot touch the filesystem, the OS or the module system.
//!
//! Evaluation never panics and never propagates an error: syntax and
//! runtime failures are captured as [`Value::Error`].

use mlua::{Lua, Table};

use crate::value::Value;

/// Globals copied into every evaluation environment.
const SAFE_GLOBALS: &[&str] = &[
    "math", "string", "table", "tonumber", "tostring", "type", "ipairs", "pairs", "select",
    "next",
];

/// A sandboxed Lua interpreter.
pub struct Sandbox {
    lua: Lua,
    base: Table,
}

impl Sandbox {
    /// Create a sandbox with the whitelisted base environment.
    pub fn new() -> mlua::Result<Self> {
        let lua = Lua::new();
        let base = lua.create_table()?;
        let globals = lua.globals();
        for name in SAFE_GLOBALS {
            base.set(*name, globals.get::<mlua::Value>(*name)?)?;
        }
        Ok(Self { lua, base })
    }

    pub fn lua(&self) -> &Lua {
        &self.lua
    }

    /// Evaluate an expression with bindings installed by `install`.
    ///
    /// The expression is wrapped as `return <source>`; any failure is
    /// returned as [`Value::Error`] with the first line of the Lua message.
    pub fn eval_expr(
        &self,
        source: &str,
        install: impl FnOnce(&Lua, &Table) -> mlua::Result<()>,
    ) -> Value {
        match self.try_eval(source, install) {
            Ok(value) => value,
            Err(err) => Value::Error(first_line(&err.to_string())),
        }
    }

    fn try_eval(
        &self,
        source: &str,
        install: impl FnOnce(&Lua, &Table) -> mlua::Result<()>,
    ) -> mlua::Result<Value> {
        let env = self.lua.create_table()?;
        let meta = self.lua.create_table()?;
        meta.set("__index", self.base.clone())?;
        env.set_metatable(Some(meta));

        install(&self.lua, &env)?;

        let result: mlua::Value = self
            .lua
            .load(format!("return {source}"))
            .set_name("expression")
            .set_environment(env)
            .eval()?;
        from_lua(&result)
    }

    /// Build a Lua table from name/value pairs.
    pub fn value_table<'a>(
        &self,
        entries: impl IntoIterator<Item = (&'a str, &'a Value)>,
    ) -> mlua::Result<Table> {
        let table = self.lua.create_table()?;
        for (name, value) in entries {
            table.set(name, to_lua(&self.lua, value)?)?;
        }
        Ok(table)
    }
}

/// Convert a value into its Lua representation.
///
/// Dates and references become their string forms; a captured error
/// becomes its message, matching how the original carries stringified
/// failures through parameter scopes.
pub fn to_lua(lua: &Lua, value: &Value) -> mlua::Result<mlua::Value> {
    let converted = match value {
        Value::Null => mlua::Value::Nil,
        Value::Bool(b) => mlua::Value::Boolean(*b),
        Value::Int(i) => mlua::Value::Integer(*i),
        Value::Float(f) => mlua::Value::Number(*f),
        Value::Str(s) => mlua::Value::String(lua.create_string(s)?),
        Value::Date(_) | Value::DateTime(_) | Value::Ref(_) | Value::Error(_) => {
            mlua::Value::String(lua.create_string(value.to_display())?)
        }
        Value::List(items) => {
            let table = lua.create_table()?;
            for (i, item) in items.iter().enumerate() {
                table.set(i + 1, to_lua(lua, item)?)?;
            }
            mlua::Value::Table(table)
        }
    };
    Ok(converted)
}

/// Convert a Lua result back into a value.
pub fn from_lua(value: &mlua::Value) -> mlua::Result<Value> {
    let converted = match value {
        mlua::Value::Nil => Value::Null,
        mlua::Value::Boolean(b) => Value::Bool(*b),
        mlua::Value::Integer(i) => Value::Int(*i),
        mlua::Value::Number(n) => Value::Float(*n),
        mlua::Value::String(s) => Value::Str(s.to_string_lossy().to_string()),
        mlua::Value::Table(table) => {
            let mut items = Vec::new();
            for item in table.clone().sequence_values::<mlua::Value>() {
                items.push(from_lua(&item?)?);
            }
            Value::List(items)
        }
        other => Value::Error(format!("unsupported result of type {}", other.type_name())),
    };
    Ok(converted)
}

fn first_line(message: &str) -> String {
    message.lines().next().unwrap_or(message).trim().to_string()
}
