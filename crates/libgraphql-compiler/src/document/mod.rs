mod collected_document;
mod document_collector;
mod document_kind;
mod naming_error;
mod raw_document;

pub use collected_document::CollectedDocument;
pub use document_collector::CollectedDocuments;
pub use document_collector::DocumentCollector;
pub use document_kind::DocumentKind;
pub use naming_error::NamingError;
pub use raw_document::RawDocument;

#[cfg(test)]
mod tests;
