use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntentError {
    #[error("no extraction tool registered under '{0}'")]
    UnknownTool(String),

    #[error("tool '{tool}' requires a non-empty string argument '{argument}'")]
    MissingArgument {
        tool: &'static str,
        argument: &'static str,
    },
}
