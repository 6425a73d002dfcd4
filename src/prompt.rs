// SYNOID Reel Prompt Builder
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Structured prompts sent to the model as JSON text, and the YAML movie
// schema embedded in the scenario prompt.

use serde::Serialize;
use serde_json::{json, Map, Value};
use std::path::Path;

/// Document shape bundled with the binary.
pub const BUNDLED_MOVIE_SCHEMA: &str = include_str!("../assets/movie-schema.yaml");

#[derive(Debug, thiserror::Error)]
pub enum SchemaFileError {
    #[error("schema file {0} not found")]
    NotFound(String),

    #[error("failed to read schema file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid YAML schema: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("schema cannot be expressed as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptStep {
    pub id: String,
    pub description: String,
}

/// One step of the conversation with the model.
///
/// Serializes as `{"task", "step", <context...>, "response_schema"}`; the
/// context entries keep insertion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptTask {
    pub task: String,
    pub step: PromptStep,
    #[serde(flatten)]
    pub context: Map<String, Value>,
    pub response_schema: Value,
}

impl PromptTask {
    pub fn new(
        task: impl Into<String>,
        step_id: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            task: task.into(),
            step: PromptStep {
                id: step_id.into(),
                description: description.into(),
            },
            context: Map::new(),
            response_schema: Value::Null,
        }
    }

    /// Extra material the model should work from (sources, durations, schema).
    pub fn with_context(mut self, key: impl Into<String>, value: Value) -> Self {
        self.context.insert(key.into(), value);
        self
    }

    pub fn with_response_schema(mut self, schema: Value) -> Self {
        self.response_schema = schema;
        self
    }

    pub fn to_prompt(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Parse YAML text into the equivalent JSON value.
pub fn yaml_str_to_value(text: &str) -> Result<Value, SchemaFileError> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(text)?;
    Ok(serde_json::to_value(yaml)?)
}

/// Load a YAML schema file as a JSON value.
pub fn load_schema_yaml(path: &Path) -> Result<Value, SchemaFileError> {
    let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => SchemaFileError::NotFound(path.display().to_string()),
        _ => SchemaFileError::Io(e),
    })?;
    yaml_str_to_value(&text)
}

/// `{"schema": <yaml content>}` as JSON text.
pub fn schema_yaml_to_json(path: &Path) -> Result<String, SchemaFileError> {
    let schema = load_schema_yaml(path)?;
    Ok(serde_json::to_string(&json!({ "schema": schema }))?)
}
