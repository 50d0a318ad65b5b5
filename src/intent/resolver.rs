use async_trait::async_trait;
use url::Url;

use crate::intent::handler::{ToolCall, ToolSpec};

/// Turns a free-text request into a tool call. Implementations typically
/// wrap a function-calling language model; none ships with this crate.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IntentResolver: Send + Sync {
    async fn resolve(&self, query: &str, page_url: &Url, tools: &[ToolSpec]) -> anyhow::Result<ToolCall>;
}
