//! Client API calls for search endpoints.

use common::{search_query::SearchRequest, search_result::SearchResultDocuments};
use dioxus::prelude::*;


#[server]
pub async fn search_documents(request: SearchRequest) -> Result<SearchResultDocuments, ServerFnError> {
    let x = backend::api::search::search_documents(request).await;
    x.map_err(|e| ServerFnError::ServerError { message: format!("Erro na busca: {e}"), code: 500, details: None })
}
