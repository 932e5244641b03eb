//! Search API route handlers and module exports.

mod search_for_results;
pub use search_for_results::{search_documents, search_documents_with_config};

mod search_facets;
pub use search_facets::process_facets;

pub mod solr_query;
