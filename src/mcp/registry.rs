//! Tool Registry
//!
//! The process-wide, read-only table of tools exposed by `getTools` and
//! dispatched by `executeTool`. Built once on first use, never mutated.

use std::sync::LazyLock;

use serde_json::{json, Map, Value};

use super::models::{GET_WEATHER_TOOL, LIST_CITIES_TOOL};

/// Which executor runs a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    GetWeather,
    ListCities,
}

/// A named, server-exposed operation.
///
/// The parameter schema is advisory only; executors validate their own input.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Value,
    pub kind: ToolKind,
}

impl ToolDescriptor {
    fn to_json(&self) -> Value {
        json!({
            "description": self.description,
            "parameters": self.parameters,
        })
    }
}

/// Immutable name → descriptor table.
#[derive(Debug)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
}

impl ToolRegistry {
    fn builtin() -> Self {
        Self {
            tools: vec![
                ToolDescriptor {
                    name: GET_WEATHER_TOOL,
                    description: "Get the current weather for a Moroccan city",
                    parameters: json!({
                        "type": "object",
                        "properties": {
                            "city": {
                                "type": "string",
                                "description": "Name of the Moroccan city"
                            }
                        },
                        "required": ["city"]
                    }),
                    kind: ToolKind::GetWeather,
                },
                ToolDescriptor {
                    name: LIST_CITIES_TOOL,
                    description: "List the available Moroccan cities",
                    parameters: json!({
                        "type": "object",
                        "properties": {}
                    }),
                    kind: ToolKind::ListCities,
                },
            ],
        }
    }

    /// Looks up a tool by exact name.
    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// Tool names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.tools.iter().map(|t| t.name)
    }

    /// The full registry as a `{name: {description, parameters}}` mapping.
    pub fn to_json(&self) -> Value {
        let tools: Map<String, Value> = self
            .tools
            .iter()
            .map(|t| (t.name.to_string(), t.to_json()))
            .collect();
        Value::Object(tools)
    }
}

static REGISTRY: LazyLock<ToolRegistry> = LazyLock::new(ToolRegistry::builtin);

/// The process-wide tool registry.
pub fn registry() -> &'static ToolRegistry {
    &REGISTRY
}
