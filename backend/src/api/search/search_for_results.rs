//! Search endpoint for result pages.

use common::{search_query::SearchRequest, search_result::SearchResultDocuments};

use crate::{
    api::search::{process_facets, solr_query::build_select_params},
    config::SolrConfig,
    db_utils::solr_utils::solr_select,
};

pub async fn search_documents(request: SearchRequest) -> anyhow::Result<SearchResultDocuments> {
    search_documents_with_config(&SolrConfig::from_env(), request).await
}

pub async fn search_documents_with_config(config: &SolrConfig, request: SearchRequest) -> anyhow::Result<SearchResultDocuments> {
    let params = build_select_params(config, &request);
    tracing::info!(
        "search: q={:?} filters={} page={}",
        request.query,
        request.filters.len(),
        request.page
    );
    let response = solr_select(config, &params).await?;
    let facets = response.facet_counts.unwrap_or_default().facet_fields;

    Ok(SearchResultDocuments {
        documents: response.response.docs,
        total_documents: response.response.num_found,
        group_counts: process_facets(&facets),
        page: request.page,
    })
}
