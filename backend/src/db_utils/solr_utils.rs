use serde::{Deserialize, Serialize};

use common::search_result::{Document, FacetFields};

use crate::config::SolrConfig;

#[derive(Debug, Serialize, Deserialize)]
pub struct RawSolrResponse {
    #[serde(rename = "responseHeader", default)]
    pub response_header: Option<RawSolrResponseHeader>,
    pub response: RawSolrResponseBody,
    #[serde(default)]
    pub facet_counts: Option<RawSolrFacetCounts>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RawSolrResponseHeader {
    pub status: i64,
    #[serde(rename = "QTime")]
    pub q_time: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RawSolrResponseBody {
    #[serde(rename = "numFound")]
    pub num_found: u64,
    #[serde(default)]
    pub start: u64,
    #[serde(default)]
    pub docs: Vec<Document>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct RawSolrFacetCounts {
    #[serde(default)]
    pub facet_fields: FacetFields,
}

pub async fn solr_select(config: &SolrConfig, params: &[(String, String)]) -> anyhow::Result<RawSolrResponse> {
    let url = config.select_url();
    tracing::debug!("SOLR SELECT: {} {:?}", url, params);
    let t0 = std::time::Instant::now();
    let client = reqwest::Client::new();

    let request = client.get(&url).query(params).send();
    let response = match config.request_timeout {
        Some(timeout) => match tokio::time::timeout(timeout, request).await {
            Ok(response) => response?,
            Err(_) => anyhow::bail!("Solr request timed out after {}s", timeout.as_secs()),
        },
        None => request.await?,
    };
    let status = response.status();
    let response_txt = response.text().await?;
    if status.is_client_error() || status.is_server_error() {
        tracing::error!("SOLR ERROR: {}: {}", status, response_txt);
        anyhow::bail!("Error: {}: {}", status, response_txt);
    }
    let dt_ms = t0.elapsed().as_millis();
    tracing::info!("SOLR RESPONSE: len = {} ({}ms)", response_txt.len(), dt_ms);

    parse_select_response(&response_txt)
}

pub fn parse_select_response(response_txt: &str) -> anyhow::Result<RawSolrResponse> {
    let response: RawSolrResponse = serde_json::from_str(response_txt)?;
    Ok(response)
}
