pub mod config;
pub mod extractor;
pub mod intent;

pub use extractor::{
    CardRecord, DocumentView, ExtractError, Extractor, ListRecord, Outcome,
};
