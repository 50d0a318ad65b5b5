use serde_json::{Value, json};
use tracing::debug;

use crate::config::Config;
use crate::extractor::lists::{ListScoring, extract_list_records_with};
use crate::extractor::section::extract_section_with;
use crate::extractor::{DocumentView, ListRecord, Outcome};
use crate::intent::handler::{ExtractionTool, ToolSpec, required_str};

pub const SECTION_TOOL: &str = "scrape_section_by_heading";
pub const RESULT_LIST_TOOL: &str = "scrape_result_list";

/// Content under the `h2`/`h3` heading that mentions a keyword.
#[derive(Debug, Clone)]
pub struct SectionTool {
    min_fragment_chars: usize,
}

impl SectionTool {
    pub fn new(config: &Config) -> Self {
        Self {
            min_fragment_chars: config.min_fragment_chars(),
        }
    }
}

impl ExtractionTool for SectionTool {
    fn run(&self, doc: &DocumentView, arguments: &Value) -> anyhow::Result<Outcome<ListRecord>> {
        let heading_keyword = required_str(SECTION_TOOL, arguments, "heading_keyword")?;
        debug!(heading_keyword, "running section tool");

        let record = |text: String| ListRecord {
            index: 1,
            title: heading_keyword.to_string(),
            text,
            ..Default::default()
        };
        // The section text travels as one record so both tools share a shape.
        Ok(match extract_section_with(doc, heading_keyword, self.min_fragment_chars) {
            Outcome::Single(text) => Outcome::Many(vec![record(text)]),
            other => other.map(record),
        })
    }

    fn name(&self) -> &'static str {
        SECTION_TOOL
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: SECTION_TOOL,
            description: "Extract a section of content from a webpage by finding a heading that \
                          contains a keyword and returning all content under that heading until \
                          the next heading.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "heading_keyword": {
                        "type": "string",
                        "description": "A single keyword or short phrase likely to appear in an \
                                        h2 or h3 heading, e.g. 'Pricing', 'About Us', 'Features'."
                    }
                },
                "required": ["heading_keyword"]
            }),
        }
    }
}

/// Records of the list under a named section.
#[derive(Debug, Clone)]
pub struct ResultListTool {
    scoring: ListScoring,
}

impl ResultListTool {
    pub fn new(config: &Config) -> Self {
        Self {
            scoring: config.list_scoring(),
        }
    }
}

impl ExtractionTool for ResultListTool {
    fn run(&self, doc: &DocumentView, arguments: &Value) -> anyhow::Result<Outcome<ListRecord>> {
        let section_name = required_str(RESULT_LIST_TOOL, arguments, "section_name")?;
        debug!(section_name, "running result list tool");
        Ok(extract_list_records_with(doc, Some(section_name), None, &self.scoring)?)
    }

    fn name(&self) -> &'static str {
        RESULT_LIST_TOOL
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: RESULT_LIST_TOOL,
            description: "Extract a list of results from a webpage by finding a section (like \
                          'Results', 'Admit Cards', 'Latest Jobs') and returning all list items \
                          from that section, each with a title, link and optional status.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "section_name": {
                        "type": "string",
                        "description": "Heading or title of the section to read, e.g. \
                                        'Results', 'Admit Cards', 'Notifications'."
                    }
                },
                "required": ["section_name"]
            }),
        }
    }
}
