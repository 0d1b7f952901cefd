//! Parameter metadata derived from command struct fields
//!
//! `#[operation]` builds a static `ParamMeta` table for each command so the
//! CLI can describe operations without a second, hand-written schema.

use serde_json::{json, Map, Value};

/// JSON type a parameter travels as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
}

impl ParamType {
    /// JSON Schema `type` keyword
    pub const fn json_type(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
        }
    }
}

/// Metadata about a parameter
#[derive(Debug, Clone)]
pub struct ParamMeta {
    /// Field name
    pub name: &'static str,
    /// Description (from doc comment)
    pub description: &'static str,
    pub param_type: ParamType,
    /// Whether callers must supply it (not `Option`, no `#[serde(default)]`)
    pub required: bool,
    /// CLI short flag
    pub short: Option<char>,
    /// Alternative names
    pub aliases: &'static [&'static str],
}

impl ParamMeta {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            description: "",
            param_type: ParamType::String,
            required: false,
            short: None,
            aliases: &[],
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn description(mut self, desc: &'static str) -> Self {
        self.description = desc;
        self
    }

    pub const fn short(mut self, c: char) -> Self {
        self.short = Some(c);
        self
    }

    pub const fn aliases(mut self, a: &'static [&'static str]) -> Self {
        self.aliases = a;
        self
    }

    pub const fn param_type(mut self, t: ParamType) -> Self {
        self.param_type = t;
        self
    }

    /// Set short flag from Option (for macro compatibility)
    pub const fn short_opt(mut self, c: Option<char>) -> Self {
        self.short = c;
        self
    }
}

/// Build a JSON Schema object describing a parameter table
pub fn params_schema(params: &[ParamMeta]) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for param in params {
        let mut prop = json!({ "type": param.param_type.json_type() });
        if !param.description.is_empty() {
            prop["description"] = Value::from(param.description);
        }
        if !param.aliases.is_empty() {
            prop["aliases"] = Value::from(param.aliases.to_vec());
        }
        properties.insert(param.name.to_string(), prop);
        if param.required {
            required.push(Value::from(param.name));
        }
    }

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    static PARAMS: [ParamMeta; 2] = [
        ParamMeta::new("id")
            .description("The sprint to start")
            .required()
            .aliases(&["sprint_id"]),
        ParamMeta::new("story_points").param_type(ParamType::Integer),
    ];

    #[test]
    fn test_params_schema() {
        let schema = params_schema(&PARAMS);
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["id"]["type"], "string");
        assert_eq!(schema["properties"]["id"]["aliases"][0], "sprint_id");
        assert_eq!(schema["properties"]["story_points"]["type"], "integer");
        assert_eq!(schema["required"], json!(["id"]));
    }

    #[test]
    fn test_short_opt() {
        let meta = ParamMeta::new("name").short_opt(Some('n'));
        assert_eq!(meta.short, Some('n'));
        assert!(!meta.required);
    }
}
