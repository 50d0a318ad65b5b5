use std::collections::HashMap;

use crate::config::Config;
use crate::extractor::{DocumentView, ListRecord, Outcome};
use crate::intent::errors::IntentError;
use crate::intent::handler::{ExtractionTool, ToolCall, ToolSpec};
use crate::intent::tools::{ResultListTool, SectionTool};

/// Extraction tools by name.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<&'static str, Box<dyn ExtractionTool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Registry holding the section and result-list tools.
    pub fn with_defaults(config: &Config) -> Self {
        let mut registry = Self::new();
        registry.register(SectionTool::new(config));
        registry.register(ResultListTool::new(config));
        registry
    }

    /// Register a tool, replacing any tool already using its name.
    pub fn register<T: ExtractionTool>(&mut self, tool: T) {
        self.tools.insert(tool.name(), Box::new(tool));
    }

    pub fn get(&self, name: &str) -> Option<&dyn ExtractionTool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }

    /// Run the tool a resolver picked.
    pub fn dispatch(&self, doc: &DocumentView, call: &ToolCall) -> anyhow::Result<Outcome<ListRecord>> {
        let tool = self
            .get(&call.name)
            .ok_or_else(|| IntentError::UnknownTool(call.name.clone()))?;
        tool.run(doc, &call.arguments)
    }

    /// Specs of every registered tool, sorted by name.
    pub fn tool_specs(&self) -> Vec<ToolSpec> {
        let mut specs: Vec<ToolSpec> = self.tools.values().map(|tool| tool.spec()).collect();
        specs.sort_by_key(|spec| spec.name);
        specs
    }

    pub fn registered_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.tools.keys().copied().collect();
        names.sort_unstable();
        names
    }
}
