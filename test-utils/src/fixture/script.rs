//! Entry script fixtures.

/// Default guild id returned by fixture entry scripts.
pub const DEFAULT_GUILD_ID: &str = "123456789012345678";

/// Creates an entry script that declares nothing.
///
/// # Default Values
/// - id: `"123456789012345678"`
/// - setup: empty function
///
/// # Returns
/// - `String` - Lua source for `main.lua`
pub fn entry() -> String {
    entry_builder().build()
}

/// Creates an entry script builder for customization.
///
/// # Example
///
/// ```rust,ignore
/// let source = entry_builder()
///     .prelude(r#"local roles = require("lib.roles")"#)
///     .setup("ctx.global.role(roles.admin)")
///     .build();
/// ```
pub fn entry_builder() -> EntryScriptBuilder {
    EntryScriptBuilder {
        guild_id: DEFAULT_GUILD_ID.to_string(),
        prelude: Vec::new(),
        setup: Vec::new(),
    }
}

/// Builder for entry script sources.
pub struct EntryScriptBuilder {
    guild_id: String,
    prelude: Vec<String>,
    setup: Vec<String>,
}

impl EntryScriptBuilder {
    /// Sets the guild id the script returns.
    pub fn guild_id(mut self, guild_id: &str) -> Self {
        self.guild_id = guild_id.to_string();
        self
    }

    /// Adds a statement that runs before the return, at chunk level.
    pub fn prelude(mut self, statement: &str) -> Self {
        self.prelude.push(statement.to_string());
        self
    }

    /// Adds a statement to the body of `setup(ctx)`.
    pub fn setup(mut self, statement: &str) -> Self {
        self.setup.push(statement.to_string());
        self
    }

    /// Renders the entry script.
    pub fn build(self) -> String {
        let mut source = String::new();
        for statement in &self.prelude {
            source.push_str(statement);
            source.push('\n');
        }

        source.push_str("return {\n");
        source.push_str(&format!("  id = {:?},\n", self.guild_id));
        source.push_str("  setup = function(ctx)\n");
        for statement in &self.setup {
            source.push_str("    ");
            source.push_str(statement);
            source.push('\n');
        }
        source.push_str("  end,\n}\n");

        source
    }
}
