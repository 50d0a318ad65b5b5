//! Free-text extraction requests.
//!
//! An [`IntentResolver`] picks one of the registered [`ExtractionTool`]s and
//! its arguments for a query; the registry then runs it against the page.

pub mod errors;
pub mod handler;
pub mod registry;
pub mod resolver;
pub mod tools;

pub use errors::IntentError;
pub use handler::{ExtractionTool, ToolCall, ToolSpec};
pub use registry::ToolRegistry;
pub use resolver::IntentResolver;

use tracing::{info, instrument};

use crate::extractor::{DocumentView, ListRecord, Outcome};

/// Resolve `query` to a tool call and run it against `doc`.
#[instrument(skip_all, fields(query = %query, page_url = %doc.base_url()))]
pub async fn extract_by_intent<R>(
    resolver: &R,
    registry: &ToolRegistry,
    doc: &DocumentView,
    query: &str,
) -> anyhow::Result<Outcome<ListRecord>>
where
    R: IntentResolver + ?Sized,
{
    let specs = registry.tool_specs();
    let call = resolver.resolve(query, doc.base_url(), &specs).await?;
    info!(tool = %call.name, arguments = %call.arguments, "intent resolved");
    registry.dispatch(doc, &call)
}
