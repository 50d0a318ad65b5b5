use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::extractor::{DocumentView, ListRecord, Outcome};
use crate::intent::errors::IntentError;

/// Advertised shape of a tool, handed to the resolver.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    /// JSON-schema object describing the arguments.
    pub parameters: Value,
}

/// The resolver's decision: which tool to run, with which arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

/// An extraction operation the resolver may pick.
pub trait ExtractionTool: Send + Sync + 'static {
    /// Run against a parsed page with the resolver's arguments.
    fn run(&self, doc: &DocumentView, arguments: &Value) -> anyhow::Result<Outcome<ListRecord>>;

    /// Name the resolver refers to this tool by.
    fn name(&self) -> &'static str;

    fn spec(&self) -> ToolSpec;
}

/// Read a required, non-blank string argument.
pub fn required_str<'a>(
    tool: &'static str,
    arguments: &'a Value,
    argument: &'static str,
) -> Result<&'a str, IntentError> {
    arguments
        .get(argument)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(IntentError::MissingArgument { tool, argument })
}
